use integer_base::{IntegerError, IntegerResult};

use crate::sequence::{SequenceKind, SequenceValue};

/// A sequence that can produce its nth element or its first n elements.
///
/// Indices and counts are signed because they come straight from the request path; each
/// implementation decides which indices are in its domain.
pub trait SequenceCalculator: std::fmt::Debug + Send + Sync {
    /// The sequence this calculator produces.
    fn kind(&self) -> SequenceKind;

    /// The element at index `n`, or `InvalidElement` if `n` is outside the domain.
    fn nth_element(&self, n: i64) -> IntegerResult<SequenceValue>;

    /// The first `n` elements. Counts of zero or below yield an empty list.
    fn prefix(&self, n: i64) -> Vec<SequenceValue>;
}

/// Number of elements to take for a requested prefix length.
pub(crate) fn prefix_len(n: i64) -> usize {
    usize::try_from(n.max(0)).unwrap_or(usize::MAX)
}

/// Iterator offset of `n` for a sequence whose first index is `first_index`.
pub(crate) fn element_offset(n: i64, first_index: i64) -> IntegerResult<usize> {
    n.checked_sub(first_index)
        .and_then(|offset| usize::try_from(offset).ok())
        .ok_or_else(|| Box::new(IntegerError::invalid_element(n)))
}
