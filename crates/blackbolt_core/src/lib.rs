//! # Blackbolt Core
//!
//! Simulation primitives shared by every visual effect on the landing page:
//! - Fixed-capacity particle pools that grow and shrink only at the tail
//! - Exponential smoothing toward moving targets
//! - A deterministic frame/timer scheduler standing in for the browser's
//!   animation-frame and timer queues
//!
//! ## Architecture Rules
//!
//! 1. **No allocations per frame** - pools are reserved once at mount
//! 2. **Simulation is plain data** - nothing here draws anything
//! 3. **Cancellation is explicit** - everything an owner registers can be
//!    dropped in one call
//!
//! ## Example
//!
//! ```rust
//! use blackbolt_core::{approach, TailPool};
//!
//! let mut pool: TailPool<f32> = TailPool::with_live(16, 4, |i| i as f32);
//! assert_eq!(pool.live_count(), 4);
//! pool.trim_tail(2);
//! assert_eq!(pool.live_count(), 2);
//!
//! assert_eq!(approach(0.0, 10.0, 0.5), 5.0);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod easing;
pub mod geometry;
pub mod memory;
pub mod rng;
pub mod schedule;
pub mod signal;
pub mod smoothing;

pub use easing::{keyframes, Easing, Tween};
pub use geometry::{Rect, Viewport};
pub use memory::{PoolHandle, TailPool};
pub use rng::EffectRng;
pub use schedule::{Fired, FrameScheduler, OwnerId, TimerHandle};
pub use signal::{scan_channel, ScanReader, ScanWriter};
pub use smoothing::{approach, Smoothed};

/// Nominal frame duration the per-frame constants were tuned against (60 Hz).
pub const FRAME_DT: f32 = 1.0 / 60.0;

/// Converts a delta time into a number of nominal 60 Hz frames.
#[inline]
#[must_use]
pub fn frames_elapsed(dt: f32) -> f32 {
    dt / FRAME_DT
}
