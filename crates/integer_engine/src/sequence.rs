/* 📖 # Why arbitrary precision sequence values?

Fibonacci numbers outgrow a u64 at index 94. Silently wrapping (or saturating) would hand out
wrong answers, so every value leaving a calculator is a BigUint. Happy numbers comfortably fit
in a u64 and are widened only at the boundary.

Values are serialized as plain JSON numbers with all digits intact; the workspace enables
serde_json's `arbitrary_precision` feature for this.
*/

use std::fmt;
use std::str::FromStr;

use integer_base::{IntegerError, IntegerResult};
use num_bigint::BigUint;
use serde::{Serialize, Serializer};

/// The sequences the server knows how to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceKind {
    Fibonacci,
    HappyNumber,
}

impl SequenceKind {
    /// Every supported sequence, in a stable order.
    pub const ALL: [SequenceKind; 2] = [SequenceKind::Fibonacci, SequenceKind::HappyNumber];

    /// The identifier used in URLs and response bodies.
    pub fn name(&self) -> &'static str {
        match self {
            SequenceKind::Fibonacci => "fibonacci",
            SequenceKind::HappyNumber => "happy",
        }
    }
}

impl fmt::Display for SequenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SequenceKind {
    type Err = Box<IntegerError>;

    fn from_str(name: &str) -> IntegerResult<Self> {
        SequenceKind::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| Box::new(IntegerError::invalid_sequence(name)))
    }
}

impl Serialize for SequenceKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// A single non-negative sequence value of unbounded size.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SequenceValue(BigUint);

impl SequenceValue {
    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }
}

impl From<BigUint> for SequenceValue {
    fn from(value: BigUint) -> Self {
        Self(value)
    }
}

impl From<u64> for SequenceValue {
    fn from(value: u64) -> Self {
        Self(BigUint::from(value))
    }
}

impl fmt::Display for SequenceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for SequenceValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match u64::try_from(&self.0) {
            Ok(small) => serializer.serialize_u64(small),
            Err(_) => {
                let number = serde_json::Number::from_str(&self.0.to_string())
                    .map_err(serde::ser::Error::custom)?;
                number.serialize(serializer)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use integer_base::ErrorKind;

    #[test]
    fn test_kind_round_trips_through_name() {
        for kind in SequenceKind::ALL {
            assert_eq!(kind.name().parse::<SequenceKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_kind_is_invalid_sequence() {
        let err = "primes".parse::<SequenceKind>().unwrap_err();
        match err.kind() {
            ErrorKind::InvalidSequence { name } => assert_eq!(name, "primes"),
            other => panic!("Expected InvalidSequence, got {:?}", other),
        }
    }

    #[test]
    fn test_kind_names_are_case_sensitive() {
        assert!("Fibonacci".parse::<SequenceKind>().is_err());
        assert!("".parse::<SequenceKind>().is_err());
    }

    #[test]
    fn test_small_value_serializes_as_number() {
        let json = serde_json::to_string(&SequenceValue::from(233u64)).unwrap();
        assert_eq!(json, "233");
    }

    #[test]
    fn test_large_value_keeps_every_digit() {
        let value: BigUint = "354224848179261915075".parse().unwrap();
        let json = serde_json::to_string(&SequenceValue::from(value)).unwrap();
        assert_eq!(json, "354224848179261915075");
    }

    #[test]
    fn test_kind_serializes_as_name() {
        let json = serde_json::to_string(&SequenceKind::HappyNumber).unwrap();
        assert_eq!(json, "\"happy\"");
    }
}
