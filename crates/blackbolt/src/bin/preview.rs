//! # Blackbolt Preview
//!
//! Headless run of the landing page: no surface, just the simulation.
//!
//! ```text
//! blackbolt_preview [config.toml] [seconds]
//! ```
//!
//! Simulates at 60 fps, drags the carousel once a second, and logs stage
//! statistics every simulated second. `RUST_LOG=debug` shows lifecycle
//! events (mounts, releases, beam collisions).

use std::process::ExitCode;

use blackbolt::{Page, SiteConfig};
use blackbolt_fx::InputEvent;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const FPS: u32 = 60;
const DEFAULT_SECONDS: u32 = 10;

/// Frames per second spent dragging, and the drag distance per frame.
const DRAG_FRAMES: u32 = 12;
const DRAG_STEP: f32 = -14.0;

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => match SiteConfig::from_path(&path) {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => SiteConfig::default(),
    };
    let seconds = match args.next().map(|s| s.parse::<u32>()) {
        None => DEFAULT_SECONDS,
        Some(Ok(seconds)) => seconds,
        Some(Err(e)) => {
            error!("Invalid duration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut page = match Page::from_config(&config) {
        Ok(page) => page,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let dt = 1.0 / FPS as f32;
    let pointer_y = config.carousel.band_top + config.carousel.card_height * 0.5;
    let start_x = config.viewport.width * 0.5;

    for second in 0..seconds {
        for frame in 0..FPS {
            match frame {
                0 => page.input(&InputEvent::PointerDown { x: start_x, y: pointer_y }),
                1..=DRAG_FRAMES => page.input(&InputEvent::PointerMove {
                    x: start_x + DRAG_STEP * frame as f32,
                    y: pointer_y,
                }),
                f if f == DRAG_FRAMES + 1 => page.input(&InputEvent::PointerUp),
                _ => {}
            }
            page.tick(dt);
        }

        let commands = page.draw().len();
        let stats = page.stage().stats();
        info!(
            second = second + 1,
            commands,
            frames = stats.active_frames,
            timers = stats.pending_timers,
            hero_complete = page.is_hero_complete(),
            "tick"
        );
    }

    page.teardown();
    let stats = page.stage().stats();
    println!(
        "simulated {}s: {} ticks, {} frame callbacks, {} timer callbacks, {} skipped mounts",
        seconds, stats.ticks, stats.frames_dispatched, stats.timers_fired, stats.skipped
    );
    if stats.active_frames != 0 || stats.pending_timers != 0 {
        error!(
            "Leaked {} frame registrations and {} timers after teardown",
            stats.active_frames, stats.pending_timers
        );
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
