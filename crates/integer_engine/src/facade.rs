/* 📖 # Why a facade over the calculators?

Callers (the HTTP service, tests) deal in sequence names and integers. The facade turns a name
into a calculator and hands back results tagged with the sequence they came from. It holds no
logic of its own beyond that dispatch.

The happy number cache is injected here, once, so every request served by one facade shares it.
*/

use integer_base::IntegerResult;
use tracing::instrument;

use crate::cache::CacheHandle;
use crate::calculator::SequenceCalculator;
use crate::domain::{SequenceElement, SequenceList};
use crate::fibonacci::FibonacciCalculator;
use crate::happy::HappyNumberCalculator;
use crate::sequence::{SequenceKind, SequenceValue};

#[derive(Debug, Clone)]
pub struct SequenceFacade {
    fibonacci: FibonacciCalculator,
    happy: HappyNumberCalculator,
}

impl SequenceFacade {
    pub fn new(cache: CacheHandle) -> Self {
        Self {
            fibonacci: FibonacciCalculator::new(),
            happy: HappyNumberCalculator::new(cache),
        }
    }

    /// The calculator for a sequence.
    pub fn calculator(&self, kind: SequenceKind) -> &dyn SequenceCalculator {
        match kind {
            SequenceKind::Fibonacci => &self.fibonacci,
            SequenceKind::HappyNumber => &self.happy,
        }
    }

    /// The calculator for a sequence name, or `InvalidSequence` if the name is unknown.
    pub fn resolve(&self, name: &str) -> IntegerResult<&dyn SequenceCalculator> {
        let kind: SequenceKind = name.parse()?;
        Ok(self.calculator(kind))
    }

    pub fn nth_element(&self, kind: SequenceKind, n: i64) -> IntegerResult<SequenceValue> {
        self.calculator(kind).nth_element(n)
    }

    pub fn prefix(&self, kind: SequenceKind, n: i64) -> Vec<SequenceValue> {
        self.calculator(kind).prefix(n)
    }

    /// Resolve `name` and compute its element at index `n`.
    #[instrument(level = "debug", skip(self))]
    pub fn element(&self, name: &str, n: i64) -> IntegerResult<SequenceElement> {
        let calculator = self.resolve(name)?;
        let value = calculator.nth_element(n)?;
        Ok(SequenceElement::new(calculator.kind(), n, value))
    }

    /// Resolve `name` and compute its first `n` elements.
    #[instrument(level = "debug", skip(self))]
    pub fn list(&self, name: &str, n: i64) -> IntegerResult<SequenceList> {
        let calculator = self.resolve(name)?;
        Ok(SequenceList::new(calculator.kind(), calculator.prefix(n)))
    }

    pub fn cache(&self) -> &CacheHandle {
        self.happy.cache()
    }
}

impl Default for SequenceFacade {
    fn default() -> Self {
        Self::new(CacheHandle::default())
    }
}
