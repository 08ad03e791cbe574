//! Growth policy configuration.

/// Capacity allocated by the first write when it is small.
pub const DEFAULT_INITIAL_CAPACITY: usize = 32;

/// Largest first write that still gets [`DEFAULT_INITIAL_CAPACITY`].
pub const DEFAULT_SMALL_WRITE_THRESHOLD: usize = 16;

/// Multiplier applied to a large first write.
pub const DEFAULT_FIRST_WRITE_FACTOR: usize = 2;

/// Controls how a [`StringBuilder`](crate::StringBuilder) sizes its
/// storage.
///
/// The first allocation is `initial_capacity` bytes, unless the first
/// write is larger than `small_write_threshold`, in which case it is
/// `first_write_factor` times the write. Later growth always doubles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthPolicy {
    /// Capacity of the first allocation for small writes.
    pub initial_capacity: usize,

    /// Writes up to this many bytes count as small.
    pub small_write_threshold: usize,

    /// Multiplier for a large first write.
    pub first_write_factor: usize,
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            small_write_threshold: DEFAULT_SMALL_WRITE_THRESHOLD,
            first_write_factor: DEFAULT_FIRST_WRITE_FACTOR,
        }
    }
}

impl GrowthPolicy {
    /// Creates a policy with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the capacity of the first allocation for small writes.
    #[must_use]
    pub const fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Sets the largest write that counts as small.
    #[must_use]
    pub const fn small_write_threshold(mut self, threshold: usize) -> Self {
        self.small_write_threshold = threshold;
        self
    }

    /// Sets the multiplier for a large first write.
    #[must_use]
    pub const fn first_write_factor(mut self, factor: usize) -> Self {
        self.first_write_factor = factor;
        self
    }

    /// Capacity chosen for the first allocation of an empty buffer
    /// receiving `extra` bytes.
    ///
    /// Returns `None` if the computation overflows. The result is never
    /// zero so that doubling always makes progress.
    #[must_use]
    pub fn initial_capacity_for(&self, extra: usize) -> Option<usize> {
        let capacity = if extra <= self.small_write_threshold {
            self.initial_capacity
        } else {
            extra.checked_mul(self.first_write_factor)?
        };
        Some(capacity.max(1))
    }
}
