use crate::sequence::{SequenceKind, SequenceValue};

/// A single computed element, tagged with the sequence and index it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceElement {
    pub sequence: SequenceKind,
    pub index: i64,
    pub value: SequenceValue,
}

impl SequenceElement {
    pub fn new(sequence: SequenceKind, index: i64, value: SequenceValue) -> Self {
        Self {
            sequence,
            index,
            value,
        }
    }
}

/// The first values of a sequence, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceList {
    pub sequence: SequenceKind,
    pub values: Vec<SequenceValue>,
}

impl SequenceList {
    pub fn new(sequence: SequenceKind, values: Vec<SequenceValue>) -> Self {
        Self { sequence, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
