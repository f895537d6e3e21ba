//! Bounded decoded-signal history
//!
//! Fixed-depth ring that keeps the most recent `N` entries per channel.
//! Once full, each push overwrites the oldest entry; indexing is logical,
//! with 0 always the oldest retained entry. Reads clone out, so a caller
//! can keep inspecting an entry while new captures land.

/// Fixed-capacity ring of the most recent `N` values
#[derive(Debug)]
pub struct History<T: Clone, const N: usize> {
    slots: [Option<T>; N],
    // Physical index the next push writes to
    cursor: usize,
    // Saturates at N
    count: usize,
}

impl<T: Clone, const N: usize> History<T, N> {
    /// Create an empty history
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| None),
            cursor: 0,
            count: 0,
        }
    }

    /// Number of retained entries (saturates at capacity)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Check whether the history holds no entries
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Total capacity
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Append an entry, overwriting the oldest once full
    pub fn push(&mut self, value: T) {
        self.slots[self.cursor] = Some(value);
        self.cursor = (self.cursor + 1) % N;
        if self.count < N {
            self.count += 1;
        }
    }

    /// Clone out the entry at logical index (0 = oldest retained)
    #[must_use]
    pub fn get(&self, index: usize) -> Option<T> {
        if index >= self.count {
            return None;
        }
        // cursor - count is the physical slot of the oldest entry
        let physical = (self.cursor + N - self.count + index) % N;
        self.slots[physical].clone()
    }

    /// Clone out the most recent entry
    #[must_use]
    pub fn latest(&self) -> Option<T> {
        if self.count == 0 {
            None
        } else {
            self.get(self.count - 1)
        }
    }

    /// Forget all entries
    ///
    /// Only the counters reset; slot contents are dropped lazily as new
    /// pushes overwrite them.
    pub fn clear(&mut self) {
        self.cursor = 0;
        self.count = 0;
    }
}

impl<T: Clone, const N: usize> Default for History<T, N> {
    fn default() -> Self {
        Self::new()
    }
}
