use integer_base::{IntegerResult, err};
use num_bigint::BigUint;
use tracing::debug;

use crate::calculator::{SequenceCalculator, element_offset, prefix_len};
use crate::sequence::{SequenceKind, SequenceValue};

/// Unbounded iterator over the Fibonacci numbers, starting at F(0) = 0.
///
/// # Example
///
/// ```
/// use integer_engine::fibonacci::FibonacciIter;
///
/// let first: Vec<u32> = FibonacciIter::new()
///     .take(8)
///     .map(|value| u32::try_from(&value).unwrap())
///     .collect();
/// assert_eq!(first, vec![0, 1, 1, 2, 3, 5, 8, 13]);
/// ```
#[derive(Debug, Clone)]
pub struct FibonacciIter {
    current: BigUint,
    next: BigUint,
}

impl FibonacciIter {
    pub fn new() -> Self {
        Self {
            current: BigUint::from(0u8),
            next: BigUint::from(1u8),
        }
    }
}

impl Default for FibonacciIter {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for FibonacciIter {
    type Item = BigUint;

    fn next(&mut self) -> Option<BigUint> {
        // (x, y) -> (y, x + y), handing out the old x
        let following = &self.current + &self.next;
        let next = std::mem::replace(&mut self.next, following);
        Some(std::mem::replace(&mut self.current, next))
    }
}

/// Fibonacci calculator. Stateless; every call iterates from the start.
#[derive(Debug, Clone, Default)]
pub struct FibonacciCalculator;

impl FibonacciCalculator {
    pub fn new() -> Self {
        Self
    }
}

impl SequenceCalculator for FibonacciCalculator {
    fn kind(&self) -> SequenceKind {
        SequenceKind::Fibonacci
    }

    fn nth_element(&self, n: i64) -> IntegerResult<SequenceValue> {
        let offset = element_offset(n, 0)?;
        debug!(n, "computing fibonacci element");
        FibonacciIter::new()
            .nth(offset)
            .map(SequenceValue::from)
            .ok_or_else(|| err!("Fibonacci iterator ended before index {}", n))
    }

    fn prefix(&self, n: i64) -> Vec<SequenceValue> {
        debug!(n, "computing fibonacci prefix");
        FibonacciIter::new()
            .take(prefix_len(n))
            .map(SequenceValue::from)
            .collect()
    }
}
