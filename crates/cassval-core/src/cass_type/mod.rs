mod parse;

#[cfg(test)]
mod tests;

use cassval_primitives::{KindArity, ValueKind};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

///
/// DataTypeHandle
///
/// Read-only view of a driver-side data type descriptor. Implemented by the
/// protocol type option parser and by any native driver binding.
///

pub trait DataTypeHandle {
    fn value_kind(&self) -> ValueKind;

    fn sub_type_count(&self) -> usize;

    fn sub_type(&self, index: usize) -> Option<&Self>;
}

///
/// CassType
///
/// Immutable descriptor of a CQL type: a primary tag plus ordered subtypes.
/// Collections without subtypes are unspecialized and only appear while the
/// encoder is still inferring element types.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct CassType {
    primary: ValueKind,
    subtypes: Vec<Self>,
}

impl CassType {
    pub const UNKNOWN: Self = Self::scalar(ValueKind::Unknown);
    pub const CUSTOM: Self = Self::scalar(ValueKind::Custom);
    pub const ASCII: Self = Self::scalar(ValueKind::Ascii);
    pub const BIGINT: Self = Self::scalar(ValueKind::BigInt);
    pub const BLOB: Self = Self::scalar(ValueKind::Blob);
    pub const BOOLEAN: Self = Self::scalar(ValueKind::Boolean);
    pub const COUNTER: Self = Self::scalar(ValueKind::Counter);
    pub const DECIMAL: Self = Self::scalar(ValueKind::Decimal);
    pub const DOUBLE: Self = Self::scalar(ValueKind::Double);
    pub const FLOAT: Self = Self::scalar(ValueKind::Float);
    pub const INT: Self = Self::scalar(ValueKind::Int);
    pub const TEXT: Self = Self::scalar(ValueKind::Text);
    pub const TIMESTAMP: Self = Self::scalar(ValueKind::Timestamp);
    pub const UUID: Self = Self::scalar(ValueKind::Uuid);
    pub const VARCHAR: Self = Self::scalar(ValueKind::Varchar);
    pub const VARINT: Self = Self::scalar(ValueKind::Varint);
    pub const TIMEUUID: Self = Self::scalar(ValueKind::TimeUuid);
    pub const INET: Self = Self::scalar(ValueKind::Inet);
    pub const DATE: Self = Self::scalar(ValueKind::Date);
    pub const TIME: Self = Self::scalar(ValueKind::Time);
    pub const SMALLINT: Self = Self::scalar(ValueKind::SmallInt);
    pub const TINYINT: Self = Self::scalar(ValueKind::TinyInt);

    // unspecialized collection and composite heads
    pub const LIST: Self = Self::scalar(ValueKind::List);
    pub const MAP: Self = Self::scalar(ValueKind::Map);
    pub const SET: Self = Self::scalar(ValueKind::Set);
    pub const UDT: Self = Self::scalar(ValueKind::Udt);
    pub const TUPLE: Self = Self::scalar(ValueKind::Tuple);

    const fn scalar(primary: ValueKind) -> Self {
        Self {
            primary,
            subtypes: Vec::new(),
        }
    }

    #[must_use]
    pub const fn new(primary: ValueKind, subtypes: Vec<Self>) -> Self {
        Self { primary, subtypes }
    }

    #[must_use]
    pub fn list_of(element: Self) -> Self {
        Self::new(ValueKind::List, vec![element])
    }

    #[must_use]
    pub fn set_of(element: Self) -> Self {
        Self::new(ValueKind::Set, vec![element])
    }

    #[must_use]
    pub fn map_of(key: Self, value: Self) -> Self {
        Self::new(ValueKind::Map, vec![key, value])
    }

    #[must_use]
    pub const fn tuple_of(slots: Vec<Self>) -> Self {
        Self::new(ValueKind::Tuple, slots)
    }

    #[must_use]
    pub const fn primary(&self) -> ValueKind {
        self.primary
    }

    #[must_use]
    pub fn subtypes(&self) -> &[Self] {
        &self.subtypes
    }

    #[must_use]
    pub fn subtype(&self, index: usize) -> Option<&Self> {
        self.subtypes.get(index)
    }

    /// Return a copy of this type with `subtypes` replacing the current ones.
    #[must_use]
    pub const fn specialize(&self, subtypes: Vec<Self>) -> Self {
        Self::new(self.primary, subtypes)
    }

    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        self.primary.is_unknown()
    }

    /// True when the subtype count matches what the primary kind requires.
    #[must_use]
    pub fn is_specialized(&self) -> bool {
        match self.primary.arity() {
            KindArity::Variadic => true,
            arity => arity.expected() == Some(self.subtypes.len()),
        }
    }

    /// True when this type and every nested subtype is concrete.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        !self.is_unknown()
            && self.is_specialized()
            && self.subtypes.iter().all(Self::is_resolved)
    }

    /// Canonical CQL rendering, e.g. `map<text, list<int>>`.
    #[must_use]
    pub fn name(&self) -> String {
        self.to_string()
    }

    /// Resolve a descriptor tree from a driver data type handle.
    ///
    /// Subtype handles are read according to the primary kind's arity; a
    /// collection handle that exposes no subtypes stays unspecialized.
    pub fn from_wire_descriptor<H: DataTypeHandle + ?Sized>(handle: &H) -> Self {
        let primary = handle.value_kind();
        let wanted = match primary.arity() {
            KindArity::Variadic => handle.sub_type_count(),
            arity => arity.expected().unwrap_or(0).min(handle.sub_type_count()),
        };

        let subtypes = (0..wanted)
            .map(|i| {
                handle
                    .sub_type(i)
                    .map_or(Self::UNKNOWN, Self::from_wire_descriptor)
            })
            .collect();

        Self::new(primary, subtypes)
    }
}

impl Default for CassType {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

impl From<ValueKind> for CassType {
    fn from(primary: ValueKind) -> Self {
        Self::scalar(primary)
    }
}

impl fmt::Display for CassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.primary.name();

        match self.primary.arity() {
            KindArity::Scalar => f.write_str(name),
            KindArity::One => match self.subtypes.first() {
                Some(element) => write!(f, "{name}<{element}>"),
                None => write!(f, "{name}<?>"),
            },
            KindArity::Two => match self.subtypes.as_slice() {
                [key, value, ..] => write!(f, "{name}<{key}, {value}>"),
                _ => write!(f, "{name}<?, ?>"),
            },
            KindArity::Variadic => {
                write!(f, "{name}<")?;
                for (i, sub) in self.subtypes.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{sub}")?;
                }
                f.write_str(">")
            }
        }
    }
}

impl Serialize for CassType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CassType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
