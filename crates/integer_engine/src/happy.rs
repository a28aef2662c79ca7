/* 📖 # Why record every visited value?

Classifying one candidate walks a chain of digit-square sums, and every value on that chain
shares the candidate's fate: it either reaches 1 or falls into the same cycle. Recording the
whole chain means later candidates usually stop after a step or two, because their chain runs
into a value some earlier request already settled.

The cache is consulted and updated through a CacheHandle owned by the calculator, so the
same memo serves every request thread for the lifetime of the process.
*/

use std::collections::HashSet;

use integer_base::{IntegerResult, err};
use tracing::{debug, trace};

use crate::cache::{CacheHandle, Verdict};
use crate::calculator::{SequenceCalculator, element_offset, prefix_len};
use crate::sequence::{SequenceKind, SequenceValue};

const DIGIT_SQUARES: [u64; 10] = [0, 1, 4, 9, 16, 25, 36, 49, 64, 81];

/// Sum of the squares of the decimal digits of `value`.
pub fn digit_square_sum(mut value: u64) -> u64 {
    let mut sum = 0;
    while value > 0 {
        sum += DIGIT_SQUARES[(value % 10) as usize];
        value /= 10;
    }
    sum
}

/// Outcome of classifying a single number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub verdict: Verdict,
    /// Values walked through before the verdict was known; they all share it.
    pub visited: HashSet<u64>,
}

impl Classification {
    pub fn is_happy(&self) -> bool {
        self.verdict.is_happy()
    }
}

/// Decide whether `value` is happy, consulting `cache` along the way.
///
/// The cache is only read here; merging `visited` back is left to the caller.
pub fn classify(value: u64, cache: &CacheHandle) -> Classification {
    let mut visited = HashSet::new();
    let mut current = value;
    while current > 1 && !visited.contains(&current) {
        if let Some(verdict) = cache.lookup(current) {
            trace!(value, current, ?verdict, "classification found in cache");
            return Classification { verdict, visited };
        }
        visited.insert(current);
        current = digit_square_sum(current);
    }
    Classification {
        verdict: Verdict::from_happy(current == 1),
        visited,
    }
}

/// Unbounded iterator over the happy numbers, in ascending order.
///
/// Every classification it performs is recorded in the shared cache.
#[derive(Debug, Clone)]
pub struct HappyNumbers {
    cache: CacheHandle,
    next_candidate: Option<u64>,
}

impl HappyNumbers {
    pub fn new(cache: CacheHandle) -> Self {
        Self {
            cache,
            next_candidate: Some(1),
        }
    }
}

impl Iterator for HappyNumbers {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        loop {
            let candidate = self.next_candidate?;
            self.next_candidate = candidate.checked_add(1);

            let classification = classify(candidate, &self.cache);
            self.cache
                .record(&classification.visited, classification.verdict);
            if classification.is_happy() {
                return Some(candidate);
            }
        }
    }
}

/// Happy number calculator. The first happy number (1) has index 1.
#[derive(Debug, Clone)]
pub struct HappyNumberCalculator {
    cache: CacheHandle,
}

impl HappyNumberCalculator {
    pub fn new(cache: CacheHandle) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &CacheHandle {
        &self.cache
    }

    fn numbers(&self) -> HappyNumbers {
        HappyNumbers::new(self.cache.clone())
    }
}

impl SequenceCalculator for HappyNumberCalculator {
    fn kind(&self) -> SequenceKind {
        SequenceKind::HappyNumber
    }

    fn nth_element(&self, n: i64) -> IntegerResult<SequenceValue> {
        let offset = element_offset(n, 1)?;
        debug!(n, cached = self.cache.len(), "computing happy number");
        self.numbers()
            .nth(offset)
            .map(SequenceValue::from)
            .ok_or_else(|| err!("Ran out of happy number candidates before index {}", n))
    }

    fn prefix(&self, n: i64) -> Vec<SequenceValue> {
        debug!(n, cached = self.cache.len(), "computing happy number prefix");
        self.numbers()
            .take(prefix_len(n))
            .map(SequenceValue::from)
            .collect()
    }
}
