//! # Frame Scheduler
//!
//! Deterministic stand-in for the browser's animation-frame and timer queues.
//!
//! Owners (one per mounted effect) register a per-frame callback slot and
//! any number of timeouts or intervals. The host advances virtual time once
//! per frame, receives the timers that fired in deadline order, and then
//! runs every owner that holds a frame registration.
//!
//! ```text
//! advance(dt) ──► fired timers (deadline order) ──► frame owners
//! ```
//!
//! Unmounting calls [`FrameScheduler::cancel_owner`], which drops the frame
//! registration and every pending timer in one step. A leak shows up in
//! [`FrameScheduler::active_frames`] / [`FrameScheduler::pending_timers`].

/// Identifies whoever registered a frame slot or timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OwnerId(pub u32);

/// Handle to a pending timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// A timer that fired during [`FrameScheduler::advance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fired {
    /// Owner that registered the timer.
    pub owner: OwnerId,
    /// Owner-defined tag.
    pub tag: u32,
    /// Handle of the timer (still live for intervals).
    pub handle: TimerHandle,
    /// Virtual time the timer was due.
    pub due: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Repeat {
    Once,
    Every(f64),
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    handle: TimerHandle,
    owner: OwnerId,
    tag: u32,
    deadline: f64,
    repeat: Repeat,
}

/// Virtual clock with frame registrations and timers.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    now: f64,
    frame_index: u64,
    frames: Vec<OwnerId>,
    timers: Vec<Timer>,
    next_timer: u64,
}

impl FrameScheduler {
    /// Shortest allowed interval period, so one `advance` always terminates.
    pub const MIN_PERIOD: f64 = 0.001;

    /// Creates an empty scheduler at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frames: Vec::with_capacity(16),
            timers: Vec::with_capacity(64),
            ..Self::default()
        }
    }

    /// Current virtual time in seconds.
    #[inline]
    #[must_use]
    pub const fn now(&self) -> f64 {
        self.now
    }

    /// Number of completed `advance` calls.
    #[inline]
    #[must_use]
    pub const fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Registers `owner` for per-frame callbacks. Idempotent.
    pub fn request_frame(&mut self, owner: OwnerId) {
        if !self.frames.contains(&owner) {
            self.frames.push(owner);
        }
    }

    /// Drops `owner`'s frame registration. Returns true if one existed.
    pub fn cancel_frame(&mut self, owner: OwnerId) -> bool {
        let before = self.frames.len();
        self.frames.retain(|&o| o != owner);
        before != self.frames.len()
    }

    /// True if `owner` receives per-frame callbacks.
    #[must_use]
    pub fn has_frame(&self, owner: OwnerId) -> bool {
        self.frames.contains(&owner)
    }

    /// Owners with a frame registration, in registration order.
    #[must_use]
    pub fn frame_owners(&self) -> &[OwnerId] {
        &self.frames
    }

    /// Fires once after `delay` seconds.
    pub fn set_timeout(&mut self, owner: OwnerId, delay: f64, tag: u32) -> TimerHandle {
        self.insert(owner, self.now + delay.max(0.0), tag, Repeat::Once)
    }

    /// Fires every `period` seconds, first after one period.
    pub fn set_interval(&mut self, owner: OwnerId, period: f64, tag: u32) -> TimerHandle {
        let period = period.max(Self::MIN_PERIOD);
        self.insert(owner, self.now + period, tag, Repeat::Every(period))
    }

    /// Cancels a pending timer. Returns true if it was still pending.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.handle != handle);
        before != self.timers.len()
    }

    /// True if the timer is still pending.
    #[must_use]
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|t| t.handle == handle)
    }

    /// Drops the frame registration and every timer of `owner`.
    ///
    /// Returns the number of timers cancelled.
    pub fn cancel_owner(&mut self, owner: OwnerId) -> usize {
        self.cancel_frame(owner);
        let before = self.timers.len();
        self.timers.retain(|t| t.owner != owner);
        let cancelled = before - self.timers.len();
        tracing::trace!(owner = owner.0, cancelled, "owner cancelled");
        cancelled
    }

    /// Number of frame registrations.
    #[must_use]
    pub fn active_frames(&self) -> usize {
        self.frames.len()
    }

    /// Number of pending timers.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Number of pending timers belonging to `owner`.
    #[must_use]
    pub fn pending_timers_of(&self, owner: OwnerId) -> usize {
        self.timers.iter().filter(|t| t.owner == owner).count()
    }

    /// Advances time by `dt` seconds and appends fired timers to `fired`.
    ///
    /// Timers fire in deadline order (ties by creation order). Intervals
    /// re-arm and may fire several times if `dt` spans several periods.
    pub fn advance(&mut self, dt: f64, fired: &mut Vec<Fired>) {
        self.now += dt.max(0.0);
        self.frame_index += 1;

        while let Some(position) = self.next_due() {
            let timer = self.timers[position];
            fired.push(Fired {
                owner: timer.owner,
                tag: timer.tag,
                handle: timer.handle,
                due: timer.deadline,
            });
            match timer.repeat {
                Repeat::Once => {
                    self.timers.remove(position);
                }
                Repeat::Every(period) => {
                    self.timers[position].deadline += period;
                }
            }
        }
    }

    fn next_due(&self) -> Option<usize> {
        self.timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline <= self.now)
            .min_by(|(_, a), (_, b)| {
                a.deadline
                    .total_cmp(&b.deadline)
                    .then(a.handle.0.cmp(&b.handle.0))
            })
            .map(|(position, _)| position)
    }

    fn insert(&mut self, owner: OwnerId, deadline: f64, tag: u32, repeat: Repeat) -> TimerHandle {
        let handle = TimerHandle(self.next_timer);
        self.next_timer += 1;
        self.timers.push(Timer {
            handle,
            owner,
            tag,
            deadline,
            repeat,
        });
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: OwnerId = OwnerId(1);
    const B: OwnerId = OwnerId(2);

    #[test]
    fn test_timeout_fires_once() {
        let mut sched = FrameScheduler::new();
        let mut fired = Vec::new();
        sched.set_timeout(A, 0.1, 7);

        sched.advance(0.05, &mut fired);
        assert!(fired.is_empty());

        sched.advance(0.06, &mut fired);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].tag, 7);
        assert_eq!(sched.pending_timers(), 0);
    }

    #[test]
    fn test_interval_catches_up() {
        let mut sched = FrameScheduler::new();
        let mut fired = Vec::new();
        sched.set_interval(A, 0.05, 1);

        sched.advance(0.21, &mut fired);
        assert_eq!(fired.len(), 4);
        assert_eq!(sched.pending_timers(), 1);
    }

    #[test]
    fn test_deadline_order() {
        let mut sched = FrameScheduler::new();
        let mut fired = Vec::new();
        sched.set_timeout(A, 0.3, 3);
        sched.set_timeout(B, 0.1, 1);
        sched.set_timeout(A, 0.2, 2);

        sched.advance(1.0, &mut fired);
        let tags: Vec<u32> = fired.iter().map(|f| f.tag).collect();
        assert_eq!(tags, vec![1, 2, 3]);
    }

    #[test]
    fn test_cancel_owner_clears_everything() {
        let mut sched = FrameScheduler::new();
        sched.request_frame(A);
        sched.request_frame(B);
        sched.set_interval(A, 0.05, 0);
        sched.set_timeout(A, 2.0, 1);
        sched.set_timeout(B, 2.0, 1);

        assert_eq!(sched.cancel_owner(A), 2);
        assert!(!sched.has_frame(A));
        assert!(sched.has_frame(B));
        assert_eq!(sched.pending_timers_of(A), 0);
        assert_eq!(sched.pending_timers(), 1);
    }

    #[test]
    fn test_request_frame_is_idempotent() {
        let mut sched = FrameScheduler::new();
        sched.request_frame(A);
        sched.request_frame(A);
        assert_eq!(sched.active_frames(), 1);
    }

    #[test]
    fn test_cancel_single_timer() {
        let mut sched = FrameScheduler::new();
        let handle = sched.set_timeout(A, 1.0, 0);
        assert!(sched.is_pending(handle));
        assert!(sched.cancel(handle));
        assert!(!sched.cancel(handle));
    }
}
