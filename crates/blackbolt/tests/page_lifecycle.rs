//! Page-level behaviour: mounting, input routing, teardown.

use blackbolt::page::{AMBIENT, CAROUSEL, SCANNER};
use blackbolt::{Page, SiteConfig, SiteError};
use blackbolt_core::{Viewport, FRAME_DT};
use blackbolt_fx::draw::{CardLayer, SpriteId};
use blackbolt_fx::{DrawCommand, InputEvent};

fn seeded_page() -> Page {
    let config = SiteConfig {
        seed: Some(42),
        ..SiteConfig::default()
    };
    Page::from_config(&config).unwrap()
}

fn run(page: &mut Page, seconds: f32) {
    let frames = (seconds / FRAME_DT).round() as usize;
    for _ in 0..frames {
        page.tick(FRAME_DT);
    }
}

fn card_layer(list: &[DrawCommand], card: usize, layer: CardLayer) -> Option<f32> {
    list.iter().find_map(|c| match *c {
        DrawCommand::CardLayer {
            card: index,
            layer: l,
            bounds,
            ..
        } if index == card && l == layer => Some(bounds.x),
        _ => None,
    })
}

#[test]
fn test_teardown_leaves_nothing_scheduled() {
    let mut page = seeded_page();
    assert_eq!(page.stage().stats().active_frames, 5);

    for second in 0..3 {
        page.input(&InputEvent::PointerDown { x: 700.0, y: 200.0 });
        for step in 1..=10 {
            page.input(&InputEvent::PointerMove {
                x: 700.0 - 12.0 * step as f32,
                y: 200.0,
            });
            page.tick(FRAME_DT);
        }
        page.input(&InputEvent::PointerUp);
        page.input(&InputEvent::Wheel {
            delta_y: if second % 2 == 0 { 3.0 } else { -3.0 },
        });
        run(&mut page, 1.0);
    }
    assert!(page.stage().stats().pending_timers > 0);

    page.teardown();
    let stats = page.stage().stats();
    assert_eq!(stats.mounted, 0);
    assert_eq!(stats.active_frames, 0);
    assert_eq!(stats.pending_timers, 0);
    assert!(page.draw().is_empty());
}

#[test]
fn test_unmounting_carousel_leaves_scanner_running() {
    let mut page = seeded_page();
    run(&mut page, 1.0);
    let before = page.stage().stats();

    assert!(page.stage_mut().unmount(CAROUSEL));
    let after = page.stage().stats();
    assert_eq!(after.active_frames, before.active_frames - 1);
    assert!(page.stage().is_mounted(SCANNER));

    run(&mut page, 1.0);
    assert!(page.stage().stats().frames_dispatched > after.frames_dispatched);
}

#[test]
fn test_drag_moves_cards_immediately() {
    let mut page = seeded_page();
    run(&mut page, 4.0);
    let before = card_layer(page.draw().commands(), 0, CardLayer::Image).unwrap();

    page.input(&InputEvent::PointerDown { x: 700.0, y: 200.0 });
    page.input(&InputEvent::PointerMove { x: 800.0, y: 200.0 });
    let after = card_layer(page.draw().commands(), 0, CardLayer::Image).unwrap();
    assert!((after - before - 100.0).abs() < 1e-3, "{before} -> {after}");
}

#[test]
fn test_failed_image_hides_only_that_layer() {
    let is_image = |c: &DrawCommand| matches!(c, DrawCommand::CardLayer { layer: CardLayer::Image, .. });
    let mut page = seeded_page();
    run(&mut page, 4.0);
    let images_before = page.draw().count_where(is_image);
    assert!(card_layer(page.draw().commands(), 0, CardLayer::Image).is_some());

    page.input(&InputEvent::ImageFailed { card: 0 });
    assert!(card_layer(page.draw().commands(), 0, CardLayer::Image).is_none());
    assert_eq!(page.draw().count_where(is_image), images_before - 1);
}

#[test]
fn test_press_outside_carousel_does_not_drag() {
    let mut page = seeded_page();
    run(&mut page, 4.0);
    let before = card_layer(page.draw().commands(), 0, CardLayer::Image).unwrap();

    // The card band spans y 85..335; the press lands near the page bottom.
    page.input(&InputEvent::PointerDown { x: 700.0, y: 880.0 });
    page.input(&InputEvent::PointerMove { x: 400.0, y: 880.0 });
    page.input(&InputEvent::PointerUp);
    let after = card_layer(page.draw().commands(), 0, CardLayer::Image).unwrap();
    assert_eq!(after, before);
}

#[test]
fn test_resize_keeps_simulation_state() {
    let is_scanner_sprite = |c: &DrawCommand| {
        matches!(c, DrawCommand::Sprite { sprite: SpriteId::ScannerGlow, .. })
    };
    let mut page = seeded_page();
    run(&mut page, 4.0);
    let card_x = card_layer(page.draw().commands(), 0, CardLayer::Image).unwrap();
    let particles = page.draw().count_where(is_scanner_sprite);
    assert!(particles > 0);

    page.resize(Viewport::new(1600.0, 1000.0));
    assert_eq!(card_layer(page.draw().commands(), 0, CardLayer::Image), Some(card_x));
    assert_eq!(page.draw().count_where(is_scanner_sprite), particles);

    run(&mut page, 1.0);
    assert_eq!(page.stage().viewport(), Viewport::new(1600.0, 1000.0));
    assert_eq!(page.stage().len(), 5);
}

#[test]
fn test_config_file_round_trip() {
    let path = std::env::temp_dir().join(format!("blackbolt-site-{}.toml", std::process::id()));
    std::fs::write(&path, "seed = 9\n[carousel]\ncard_count = 4\n").unwrap();
    let config = SiteConfig::from_path(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(config.seed, Some(9));
    let mut page = Page::from_config(&config).unwrap();
    run(&mut page, 0.5);
    assert_eq!(page.stage().len(), 5);
}

#[test]
fn test_duplicate_mount_is_an_error() {
    use blackbolt_core::EffectRng;
    use blackbolt_fx::{AmbientConfig, AmbientDrift};

    let mut page = seeded_page();
    let viewport = page.stage().viewport();
    let err = page
        .stage_mut()
        .mount(
            AMBIENT,
            Box::new(AmbientDrift::new(AmbientConfig::default(), viewport, EffectRng::seeded(1))),
        )
        .unwrap_err();
    assert!(matches!(err, SiteError::DuplicateEffect(_)));
}
