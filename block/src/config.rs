//! Configuration for [crate::Writer].

/// Smallest capacity a grown buffer is ever given.
pub const GROWTH_BASE: usize = 32 * 4;

/// Factor by which the capacity is multiplied until it fits.
pub const GROWTH_FACTOR: usize = 4;

/// Configuration of a [crate::Writer].
///
/// # Examples
///
/// ```
/// use commonware_block::{config::WriterConfig, Writer};
///
/// let writer = Writer::with_config(WriterConfig { initial_capacity: 16 });
/// assert_eq!(writer.capacity(), 16);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WriterConfig {
    /// Capacity of the buffer allocated before the first write.
    pub initial_capacity: usize,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            initial_capacity: GROWTH_BASE,
        }
    }
}

/// Returns the capacity a buffer grows to when it must hold at least `min` bytes.
///
/// The result is the smallest `GROWTH_BASE * GROWTH_FACTOR^k` that is `>= min`, independent of
/// the current capacity (which may have been configured to any value). Returns `None` if no
/// such capacity fits in a `usize`.
pub fn grown_capacity(min: usize) -> Option<usize> {
    let mut capacity = GROWTH_BASE;
    while capacity < min {
        capacity = capacity.checked_mul(GROWTH_FACTOR)?;
    }
    Some(capacity)
}
