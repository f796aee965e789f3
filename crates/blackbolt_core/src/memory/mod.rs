//! # Memory Management
//!
//! Pre-allocated pools for particle effects.
//!
//! ## Design Philosophy
//!
//! All memory is reserved once at mount. While an effect runs:
//! - No heap allocations
//! - Slots are rewritten in place when a particle dies
//! - The live count moves only at the tail

mod pool;

pub use pool::{PoolHandle, TailPool};
