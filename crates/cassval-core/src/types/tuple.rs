use crate::{cass_type::CassType, value::Value};
use cassval_primitives::ValueKind;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// TupleError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum TupleError {
    #[error("{kind} is not a tuple type")]
    NotATuple { kind: String },

    #[error("tuple index {index} out of range for {len} slots")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("{values} values supplied for a tuple of {slots} slots")]
    TooManyValues { values: usize, slots: usize },
}

///
/// Tuple
///
/// Fixed-arity heterogeneous value. `kind` is a tuple type with one subtype
/// per slot; a slot type may be `unknown` until the encoder resolves it.
///

#[derive(Clone, Debug, Deserialize, Hash, PartialEq, Serialize)]
pub struct Tuple {
    kind: CassType,
    values: Vec<Value>,
}

impl Tuple {
    /// Tuple of the given type with every slot NULL.
    pub fn new(kind: CassType) -> Result<Self, TupleError> {
        Self::with_values(kind, Vec::new())
    }

    /// Tuple of the given type filled from `values`; trailing slots stay NULL.
    pub fn with_values(kind: CassType, mut values: Vec<Value>) -> Result<Self, TupleError> {
        if kind.primary() != ValueKind::Tuple {
            return Err(TupleError::NotATuple {
                kind: kind.to_string(),
            });
        }

        let slots = kind.subtypes().len();
        if values.len() > slots {
            return Err(TupleError::TooManyValues {
                values: values.len(),
                slots,
            });
        }
        values.resize(slots, Value::Null);

        Ok(Self { kind, values })
    }

    /// Tuple whose slot types are left for the encoder to infer.
    #[must_use]
    pub fn from_values(values: Vec<Value>) -> Self {
        let kind = CassType::tuple_of(vec![CassType::UNKNOWN; values.len()]);

        Self { kind, values }
    }

    // `kind` carries exactly one subtype per value.
    pub(crate) const fn from_parts(kind: CassType, values: Vec<Value>) -> Self {
        Self { kind, values }
    }

    #[must_use]
    pub const fn kind(&self) -> &CassType {
        &self.kind
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    #[must_use]
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    pub fn get(&self, index: usize) -> Result<&Value, TupleError> {
        self.values.get(index).ok_or(TupleError::IndexOutOfRange {
            index,
            len: self.values.len(),
        })
    }

    pub fn set(&mut self, index: usize, value: Value) -> Result<(), TupleError> {
        let len = self.values.len();
        let slot = self
            .values
            .get_mut(index)
            .ok_or(TupleError::IndexOutOfRange { index, len })?;
        *slot = value;

        Ok(())
    }
}

impl Default for Tuple {
    fn default() -> Self {
        Self::from_values(Vec::new())
    }
}
