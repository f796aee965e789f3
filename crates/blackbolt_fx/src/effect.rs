//! The contract every mounted effect implements.
//!
//! ```text
//! mount ─► (timer | frame | input | resize)* ─► unmount
//! ```
//!
//! The host owns the scheduler. Effects register their frame slot and timers
//! through [`EffectCtx`] and never keep a reference to the scheduler itself,
//! so the host can cancel everything an effect registered in one call.

use blackbolt_core::{FrameScheduler, OwnerId, TimerHandle, Viewport};

use crate::draw::DrawList;

/// Rendering surface an effect needs at mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    /// A 3D rendering context (WebGL).
    Webgl,
    /// A 2D canvas context.
    Canvas2d,
    /// Plain DOM elements. Always available.
    Dom,
}

/// Browser input forwarded to effects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Mouse down or touch start, in the effect's surface coordinates.
    PointerDown {
        /// X.
        x: f32,
        /// Y.
        y: f32,
    },
    /// Mouse or touch move.
    PointerMove {
        /// X.
        x: f32,
        /// Y.
        y: f32,
    },
    /// Mouse up or touch end.
    PointerUp,
    /// Wheel scroll.
    Wheel {
        /// Vertical delta; only its sign matters.
        delta_y: f32,
    },
    /// An image asset failed to load.
    ImageFailed {
        /// Card index whose image broke.
        card: usize,
    },
}

/// Scheduler access scoped to one owner.
#[derive(Debug)]
pub struct EffectCtx<'a> {
    owner: OwnerId,
    scheduler: &'a mut FrameScheduler,
    viewport: Viewport,
}

impl<'a> EffectCtx<'a> {
    /// Scopes `scheduler` to `owner`.
    pub fn new(owner: OwnerId, scheduler: &'a mut FrameScheduler, viewport: Viewport) -> Self {
        Self {
            owner,
            scheduler,
            viewport,
        }
    }

    /// Owner this context registers on behalf of.
    #[must_use]
    pub const fn owner(&self) -> OwnerId {
        self.owner
    }

    /// Current viewport.
    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Current virtual time in seconds.
    #[must_use]
    pub fn now(&self) -> f64 {
        self.scheduler.now()
    }

    /// Registers for per-frame callbacks.
    pub fn request_frame(&mut self) {
        self.scheduler.request_frame(self.owner);
    }

    /// Stops per-frame callbacks.
    pub fn cancel_frame(&mut self) {
        self.scheduler.cancel_frame(self.owner);
    }

    /// Fires [`Effect::timer`] with `tag` once after `delay` seconds.
    pub fn set_timeout(&mut self, delay: f32, tag: u32) -> TimerHandle {
        self.scheduler.set_timeout(self.owner, f64::from(delay), tag)
    }

    /// Fires [`Effect::timer`] with `tag` every `period` seconds.
    pub fn set_interval(&mut self, period: f32, tag: u32) -> TimerHandle {
        self.scheduler.set_interval(self.owner, f64::from(period), tag)
    }

    /// Cancels one timer.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.scheduler.cancel(handle)
    }
}

/// A self-contained visual effect with its own update loop.
pub trait Effect {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Surface the effect renders into.
    fn surface(&self) -> SurfaceKind;

    /// Stacking order; higher draws later.
    fn z_index(&self) -> i32 {
        0
    }

    /// Registers the frame slot and timers.
    fn mount(&mut self, ctx: &mut EffectCtx<'_>);

    /// Per-frame update. `dt` is in seconds.
    fn frame(&mut self, dt: f32, ctx: &mut EffectCtx<'_>);

    /// A timer registered by this effect fired.
    fn timer(&mut self, _tag: u32, _ctx: &mut EffectCtx<'_>) {}

    /// Input event; latest sample wins.
    fn input(&mut self, _event: &InputEvent) {}

    /// Viewport changed. Recompute cached bounds, keep simulation state.
    fn resize(&mut self, viewport: Viewport);

    /// Appends this frame's draw commands.
    fn draw(&self, list: &mut DrawList);

    /// Releases effect-held resources. The host cancels scheduler state.
    fn unmount(&mut self) {}
}
