use thiserror::Error;

/// Failures reported by [`crate::LineStore`] mutations.
///
/// Every failing call leaves the store exactly as it was, except a failed
/// `load`, which leaves it empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The document already holds `max` lines.
    #[error("out of space")]
    CapacityExceeded { max: usize },
    /// A line buffer (or the line table) could not be allocated.
    #[error("alloc failed")]
    AllocationFailure,
    /// Addressed a row outside `[0, line_count)`.
    #[error("line {idx} outside document of {line_count} line(s)")]
    OutOfRange { idx: usize, line_count: usize },
}
