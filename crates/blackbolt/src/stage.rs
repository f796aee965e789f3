//! # Stage
//!
//! Hosts mounted effects the way the browser hosts components:
//!
//! ```text
//! tick(dt):
//!   1. advance the virtual clock, collect due timers
//!   2. Effect::timer for each fired timer, in deadline order
//!   3. Effect::frame for each owner still registered for frames
//! draw():
//!   Effect::draw for every effect, lowest z-index first
//! ```
//!
//! Unmounting cancels the owner's frame slot and every pending timer, so a
//! removed effect can never be called again.

use std::collections::HashSet;

use blackbolt_core::{Fired, FrameScheduler, OwnerId, Viewport};
use blackbolt_fx::{DrawList, Effect, EffectCtx, InputEvent, SurfaceKind};
use tracing::{debug, info};

use crate::error::{SiteError, SiteResult};

/// Result of [`Stage::mount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountOutcome {
    /// The effect is live under this owner.
    Mounted(OwnerId),
    /// The effect's surface is unavailable; nothing was registered.
    Skipped,
}

/// Counters for the preview and for leak checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageStats {
    /// Effects currently mounted.
    pub mounted: usize,
    /// Mounts skipped for a missing surface.
    pub skipped: u64,
    /// Calls to [`Stage::tick`].
    pub ticks: u64,
    /// Timer callbacks delivered.
    pub timers_fired: u64,
    /// Frame callbacks delivered.
    pub frames_dispatched: u64,
    /// Owners registered for frames right now.
    pub active_frames: usize,
    /// Timers pending right now.
    pub pending_timers: usize,
    /// Commands produced by the last [`Stage::draw`].
    pub draw_commands: usize,
}

struct Slot {
    id: String,
    owner: OwnerId,
    z_index: i32,
    effect: Box<dyn Effect>,
}

/// The effect host.
pub struct Stage {
    viewport: Viewport,
    scheduler: FrameScheduler,
    surfaces: HashSet<SurfaceKind>,
    /// Sorted by z-index, mount order within equal z.
    slots: Vec<Slot>,
    next_owner: u32,
    fired: Vec<Fired>,
    frame_queue: Vec<OwnerId>,
    draw_list: DrawList,
    stats: StageStats,
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage")
            .field("viewport", &self.viewport)
            .field("effects", &self.ids().collect::<Vec<_>>())
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

impl Stage {
    /// Creates a stage with every surface available.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self::with_surfaces(viewport, &[SurfaceKind::Webgl, SurfaceKind::Canvas2d])
    }

    /// Creates a stage with only `surfaces` (plus the DOM) available.
    #[must_use]
    pub fn with_surfaces(viewport: Viewport, surfaces: &[SurfaceKind]) -> Self {
        let mut available: HashSet<SurfaceKind> = surfaces.iter().copied().collect();
        available.insert(SurfaceKind::Dom);
        Self {
            viewport,
            scheduler: FrameScheduler::new(),
            surfaces: available,
            slots: Vec::new(),
            next_owner: 1,
            fired: Vec::with_capacity(32),
            frame_queue: Vec::with_capacity(8),
            draw_list: DrawList::new(),
            stats: StageStats::default(),
        }
    }

    /// True when effects on `kind` can mount.
    #[must_use]
    pub fn is_available(&self, kind: SurfaceKind) -> bool {
        match kind {
            SurfaceKind::Dom => true,
            SurfaceKind::Webgl | SurfaceKind::Canvas2d => {
                self.surfaces.contains(&kind) && !self.viewport.is_degenerate()
            }
        }
    }

    /// Mounts `effect` under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::DuplicateEffect`] if `id` is already mounted.
    pub fn mount(&mut self, id: impl Into<String>, mut effect: Box<dyn Effect>) -> SiteResult<MountOutcome> {
        let id = id.into();
        if self.slots.iter().any(|s| s.id == id) {
            return Err(SiteError::DuplicateEffect(id));
        }

        let surface = effect.surface();
        if !self.is_available(surface) {
            debug!("Skipping {} ({}): {:?} surface unavailable", id, effect.name(), surface);
            self.stats.skipped += 1;
            return Ok(MountOutcome::Skipped);
        }

        let owner = OwnerId(self.next_owner);
        self.next_owner += 1;
        effect.mount(&mut EffectCtx::new(owner, &mut self.scheduler, self.viewport));

        let z_index = effect.z_index();
        info!("Mounted {} ({}) as owner {} at z {}", id, effect.name(), owner.0, z_index);
        let at = self.slots.partition_point(|s| s.z_index <= z_index);
        self.slots.insert(
            at,
            Slot {
                id,
                owner,
                z_index,
                effect,
            },
        );
        Ok(MountOutcome::Mounted(owner))
    }

    /// Unmounts `id`, cancelling its frame slot and timers. Returns false if
    /// nothing was mounted under `id`.
    pub fn unmount(&mut self, id: &str) -> bool {
        let Some(index) = self.slots.iter().position(|s| s.id == id) else {
            return false;
        };
        let mut slot = self.slots.remove(index);
        slot.effect.unmount();
        let cancelled = self.scheduler.cancel_owner(slot.owner);
        debug!("Unmounted {} ({}), cancelled {} registrations", slot.id, slot.effect.name(), cancelled);
        true
    }

    /// Unmounts everything, topmost first.
    pub fn unmount_all(&mut self) {
        while let Some(id) = self.slots.last().map(|s| s.id.clone()) {
            self.unmount(&id);
        }
    }

    /// Advances time by `dt` seconds and runs due callbacks.
    pub fn tick(&mut self, dt: f32) {
        self.stats.ticks += 1;

        let mut fired = std::mem::take(&mut self.fired);
        fired.clear();
        self.scheduler.advance(f64::from(dt), &mut fired);
        for timer in &fired {
            if let Some(slot) = self.slots.iter_mut().find(|s| s.owner == timer.owner) {
                slot.effect
                    .timer(timer.tag, &mut EffectCtx::new(slot.owner, &mut self.scheduler, self.viewport));
                self.stats.timers_fired += 1;
            }
        }
        self.fired = fired;

        self.frame_queue.clear();
        self.frame_queue.extend_from_slice(self.scheduler.frame_owners());
        for &owner in &self.frame_queue {
            // A timer callback this tick may have dropped the registration.
            if !self.scheduler.has_frame(owner) {
                continue;
            }
            if let Some(slot) = self.slots.iter_mut().find(|s| s.owner == owner) {
                slot.effect
                    .frame(dt, &mut EffectCtx::new(owner, &mut self.scheduler, self.viewport));
                self.stats.frames_dispatched += 1;
            }
        }
    }

    /// Sends `event` to every mounted effect.
    pub fn input(&mut self, event: &InputEvent) {
        for slot in &mut self.slots {
            slot.effect.input(event);
        }
    }

    /// Applies a new viewport to every effect without resetting them.
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        debug!(
            "Resize {}x{} -> {}x{}",
            self.viewport.width, self.viewport.height, viewport.width, viewport.height
        );
        self.viewport = viewport;
        for slot in &mut self.slots {
            slot.effect.resize(viewport);
        }
    }

    /// Builds this frame's draw list, lowest z-index first.
    pub fn draw(&mut self) -> &DrawList {
        self.draw_list.begin_frame();
        for slot in &self.slots {
            slot.effect.draw(&mut self.draw_list);
        }
        self.stats.draw_commands = self.draw_list.len();
        &self.draw_list
    }

    /// Current viewport.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Virtual time in seconds.
    #[must_use]
    pub fn now(&self) -> f64 {
        self.scheduler.now()
    }

    /// The scheduler, for inspection.
    #[must_use]
    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    /// True if `id` is mounted.
    #[must_use]
    pub fn is_mounted(&self, id: &str) -> bool {
        self.slots.iter().any(|s| s.id == id)
    }

    /// The effect mounted under `id`.
    #[must_use]
    pub fn effect(&self, id: &str) -> Option<&dyn Effect> {
        self.slots.iter().find(|s| s.id == id).map(|s| s.effect.as_ref())
    }

    /// Mounted ids in draw order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|s| s.id.as_str())
    }

    /// Number of mounted effects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when nothing is mounted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Current counters.
    #[must_use]
    pub fn stats(&self) -> StageStats {
        StageStats {
            mounted: self.slots.len(),
            active_frames: self.scheduler.active_frames(),
            pending_timers: self.scheduler.pending_timers(),
            ..self.stats
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use blackbolt_fx::DrawCommand;
    use blackbolt_core::Rect;

    use super::*;

    /// Records every callback into a shared log.
    struct Probe {
        name: &'static str,
        surface: SurfaceKind,
        z: i32,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Probe {
        fn boxed(name: &'static str, surface: SurfaceKind, z: i32, log: &Rc<RefCell<Vec<String>>>) -> Box<Self> {
            Box::new(Self {
                name,
                surface,
                z,
                log: Rc::clone(log),
            })
        }
    }

    impl Effect for Probe {
        fn name(&self) -> &'static str {
            self.name
        }

        fn surface(&self) -> SurfaceKind {
            self.surface
        }

        fn z_index(&self) -> i32 {
            self.z
        }

        fn mount(&mut self, ctx: &mut EffectCtx<'_>) {
            ctx.request_frame();
            ctx.set_timeout(0.05, 1);
            ctx.set_interval(0.1, 2);
        }

        fn frame(&mut self, _dt: f32, _ctx: &mut EffectCtx<'_>) {
            self.log.borrow_mut().push(format!("{}:frame", self.name));
        }

        fn timer(&mut self, tag: u32, ctx: &mut EffectCtx<'_>) {
            self.log.borrow_mut().push(format!("{}:timer{}", self.name, tag));
            if tag == 1 {
                ctx.cancel_frame();
            }
        }

        fn resize(&mut self, viewport: Viewport) {
            self.log.borrow_mut().push(format!("{}:resize{}", self.name, viewport.width));
        }

        fn draw(&self, list: &mut DrawList) {
            list.push(DrawCommand::Clear {
                bounds: Rect::new(self.z as f32, 0.0, 1.0, 1.0),
            });
        }

        fn unmount(&mut self) {
            self.log.borrow_mut().push(format!("{}:unmount", self.name));
        }
    }

    fn log() -> Rc<RefCell<Vec<String>>> {
        Rc::new(RefCell::new(Vec::new()))
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let log = log();
        let mut stage = Stage::new(Viewport::default());
        stage.mount("a", Probe::boxed("a", SurfaceKind::Dom, 0, &log)).unwrap();
        let err = stage.mount("a", Probe::boxed("a", SurfaceKind::Dom, 0, &log)).unwrap_err();
        assert!(matches!(err, SiteError::DuplicateEffect(id) if id == "a"));
        assert_eq!(stage.len(), 1);
    }

    #[test]
    fn test_missing_surface_skips_without_registering() {
        let log = log();
        let mut stage = Stage::with_surfaces(Viewport::default(), &[]);
        let outcome = stage.mount("gl", Probe::boxed("gl", SurfaceKind::Webgl, 0, &log)).unwrap();
        assert_eq!(outcome, MountOutcome::Skipped);
        assert!(!stage.is_mounted("gl"));
        assert_eq!(stage.scheduler().active_frames(), 0);
        assert_eq!(stage.scheduler().pending_timers(), 0);
        assert_eq!(stage.stats().skipped, 1);

        let outcome = stage.mount("dom", Probe::boxed("dom", SurfaceKind::Dom, 0, &log)).unwrap();
        assert!(matches!(outcome, MountOutcome::Mounted(_)));
    }

    #[test]
    fn test_degenerate_viewport_skips_canvas() {
        let log = log();
        let mut stage = Stage::new(Viewport::new(0.0, 900.0));
        assert!(!stage.is_available(SurfaceKind::Canvas2d));
        assert!(stage.is_available(SurfaceKind::Dom));
        let outcome = stage.mount("c", Probe::boxed("c", SurfaceKind::Canvas2d, 0, &log)).unwrap();
        assert_eq!(outcome, MountOutcome::Skipped);
    }

    #[test]
    fn test_timers_run_before_frames() {
        let log = log();
        let mut stage = Stage::new(Viewport::default());
        stage.mount("p", Probe::boxed("p", SurfaceKind::Dom, 0, &log)).unwrap();

        stage.tick(0.04);
        assert_eq!(*log.borrow(), ["p:frame"]);

        // The timeout cancels the frame slot, so no frame follows it.
        stage.tick(0.02);
        assert_eq!(*log.borrow(), ["p:frame", "p:timer1"]);

        stage.tick(0.05);
        assert_eq!(log.borrow().last().map(String::as_str), Some("p:timer2"));
        assert_eq!(stage.stats().frames_dispatched, 1);
    }

    #[test]
    fn test_unmount_cancels_everything() {
        let log = log();
        let mut stage = Stage::new(Viewport::default());
        stage.mount("a", Probe::boxed("a", SurfaceKind::Dom, 0, &log)).unwrap();
        stage.mount("b", Probe::boxed("b", SurfaceKind::Canvas2d, 0, &log)).unwrap();
        assert_eq!(stage.stats().active_frames, 2);
        assert_eq!(stage.stats().pending_timers, 4);

        assert!(stage.unmount("a"));
        assert!(!stage.unmount("a"));
        assert_eq!(stage.stats().active_frames, 1);
        assert_eq!(stage.stats().pending_timers, 2);

        log.borrow_mut().clear();
        for _ in 0..30 {
            stage.tick(0.05);
        }
        assert!(log.borrow().iter().all(|entry| entry.starts_with("b:")));
    }

    #[test]
    fn test_draw_follows_z_index() {
        let log = log();
        let mut stage = Stage::new(Viewport::default());
        stage.mount("top", Probe::boxed("top", SurfaceKind::Dom, 15, &log)).unwrap();
        stage.mount("bottom", Probe::boxed("bottom", SurfaceKind::Dom, 1, &log)).unwrap();
        stage.mount("middle", Probe::boxed("middle", SurfaceKind::Dom, 5, &log)).unwrap();

        assert_eq!(stage.ids().collect::<Vec<_>>(), ["bottom", "middle", "top"]);
        let xs: Vec<f32> = stage
            .draw()
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Clear { bounds } => Some(bounds.x),
                _ => None,
            })
            .collect();
        assert_eq!(xs, [1.0, 5.0, 15.0]);
        assert_eq!(stage.stats().draw_commands, 3);
    }

    #[test]
    fn test_resize_reaches_every_effect_once() {
        let log = log();
        let mut stage = Stage::new(Viewport::default());
        stage.mount("a", Probe::boxed("a", SurfaceKind::Dom, 0, &log)).unwrap();
        stage.resize(Viewport::new(800.0, 600.0));
        stage.resize(Viewport::new(800.0, 600.0));
        assert_eq!(*log.borrow(), ["a:resize800"]);
    }

    #[test]
    fn test_unmount_all_runs_unmount_hooks() {
        let log = log();
        let mut stage = Stage::new(Viewport::default());
        stage.mount("a", Probe::boxed("a", SurfaceKind::Dom, 0, &log)).unwrap();
        stage.mount("b", Probe::boxed("b", SurfaceKind::Dom, 1, &log)).unwrap();
        stage.unmount_all();
        assert!(stage.is_empty());
        assert_eq!(*log.borrow(), ["b:unmount", "a:unmount"]);
        assert_eq!(stage.stats().active_frames, 0);
        assert_eq!(stage.stats().pending_timers, 0);
    }
}
