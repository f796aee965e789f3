//! # Tail Pool
//!
//! Fixed-capacity slot array with a live-count cursor.

/// A fixed-capacity pool whose live region is always `0..live_count`.
///
/// Slots are never freed individually. A dead particle is rewritten in place
/// by its owner; growth appends at the tail and shrinking trims from the tail,
/// so indices of in-use slots are never invalidated mid-frame.
///
/// # Thread Safety
///
/// This pool is NOT thread-safe. Effects run on a single frame loop.
///
/// # Example
///
/// ```rust
/// use blackbolt_core::TailPool;
///
/// let mut pool: TailPool<u32> = TailPool::new(2);
/// assert!(pool.spawn(1).is_some());
/// assert!(pool.spawn(2).is_some());
/// assert!(pool.spawn(3).is_none()); // full, nothing reallocated
/// ```
#[derive(Debug, Clone)]
pub struct TailPool<T> {
    /// Live slots. Reserved to `capacity` at construction.
    slots: Vec<T>,
    /// Hard upper bound on live slots.
    capacity: usize,
}

/// Handle to a live slot in a pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PoolHandle {
    /// Index into the pool.
    index: usize,
}

impl PoolHandle {
    /// Returns the slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }
}

impl<T> TailPool<T> {
    /// Creates an empty pool with the specified capacity.
    ///
    /// All memory is reserved upfront.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Creates a pool and fills the first `live` slots from `spawn`.
    ///
    /// `live` is clamped to `capacity`.
    #[must_use]
    pub fn with_live(capacity: usize, live: usize, mut spawn: impl FnMut(usize) -> T) -> Self {
        let mut pool = Self::new(capacity);
        for index in 0..live.min(capacity) {
            pool.slots.push(spawn(index));
        }
        pool
    }

    /// Returns the hard capacity.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of live slots.
    #[inline]
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if no slot is live.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns true if every slot is live.
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }

    /// Appends a value at the tail.
    ///
    /// This is a **O(1)** operation with **zero heap allocations**.
    /// Returns None if the pool is full.
    pub fn spawn(&mut self, value: T) -> Option<PoolHandle> {
        if self.is_full() {
            return None;
        }
        let index = self.slots.len();
        self.slots.push(value);
        Some(PoolHandle { index })
    }

    /// Removes up to `count` slots from the tail.
    ///
    /// Never drops below zero live slots. Returns how many were removed.
    pub fn trim_tail(&mut self, count: usize) -> usize {
        let removed = count.min(self.slots.len());
        self.slots.truncate(self.slots.len() - removed);
        removed
    }

    /// Gets a reference to a live slot.
    #[inline]
    #[must_use]
    pub fn get(&self, handle: PoolHandle) -> Option<&T> {
        self.slots.get(handle.index)
    }

    /// Gets a mutable reference to a live slot.
    #[inline]
    pub fn get_mut(&mut self, handle: PoolHandle) -> Option<&mut T> {
        self.slots.get_mut(handle.index)
    }

    /// Returns the live slots.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.slots
    }

    /// Iterates over live slots.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.slots.iter()
    }

    /// Iterates mutably over live slots.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.slots.iter_mut()
    }

    /// Drops every live slot. Reserved memory is kept.
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
