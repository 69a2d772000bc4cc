mod host;


pub use host::HostValue;

use crate::types::{Date, Decimal, Time, Timestamp, Tuple, Uuid, Varint};
use serde::{Deserialize, Serialize};
use std::{
    hash::{Hash, Hasher},
    mem,
    net::IpAddr,
};

///
/// Value
///
/// Dynamically typed host value. This is what the decoder produces for
/// untyped destinations and what the encoder dispatches on.
///
/// `Integer` is an integer whose width the caller did not pin down; the
/// encoder picks `int` or `bigint` for it by magnitude. `Set` is a sequence
/// explicitly marked for CQL `set` binding.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    TinyInt(i8),
    SmallInt(i16),
    Int(i32),
    BigInt(i64),
    Integer(i64),
    Varint(Varint),
    Float(f32),
    Double(f64),
    Decimal(Decimal),
    Text(String),
    Blob(#[serde(with = "serde_bytes")] Vec<u8>),
    Timestamp(Timestamp),
    Date(Date),
    Time(Time),
    Uuid(Uuid),
    Inet(IpAddr),
    List(Vec<Self>),
    Set(Vec<Self>),
    Map(Vec<(Self, Self)>),
    Tuple(Tuple),
}

// Floats hash by bit pattern; adding `0.0` folds `-0.0` into `0.0` so
// values that compare equal also hash equal.
impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(self).hash(state);
        match self {
            Self::Null => {}
            Self::Bool(v) => v.hash(state),
            Self::TinyInt(v) => v.hash(state),
            Self::SmallInt(v) => v.hash(state),
            Self::Int(v) => v.hash(state),
            Self::BigInt(v) | Self::Integer(v) => v.hash(state),
            Self::Varint(v) => v.hash(state),
            Self::Float(v) => (v + 0.0).to_bits().hash(state),
            Self::Double(v) => (v + 0.0).to_bits().hash(state),
            Self::Decimal(v) => v.hash(state),
            Self::Text(v) => v.hash(state),
            Self::Blob(v) => v.hash(state),
            Self::Timestamp(v) => v.hash(state),
            Self::Date(v) => v.hash(state),
            Self::Time(v) => v.hash(state),
            Self::Uuid(v) => v.hash(state),
            Self::Inet(v) => v.hash(state),
            Self::List(items) | Self::Set(items) => items.hash(state),
            Self::Map(entries) => entries.hash(state),
            Self::Tuple(v) => v.hash(state),
        }
    }
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short host-side type label used in error messages.
    #[must_use]
    pub const fn host_type(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::TinyInt(_) => "i8",
            Self::SmallInt(_) => "i16",
            Self::Int(_) => "i32",
            Self::BigInt(_) => "i64",
            Self::Integer(_) => "integer",
            Self::Varint(_) => "Varint",
            Self::Float(_) => "f32",
            Self::Double(_) => "f64",
            Self::Decimal(_) => "Decimal",
            Self::Text(_) => "String",
            Self::Blob(_) => "Vec<u8>",
            Self::Timestamp(_) => "Timestamp",
            Self::Date(_) => "Date",
            Self::Time(_) => "Time",
            Self::Uuid(_) => "Uuid",
            Self::Inet(_) => "IpAddr",
            Self::List(_) => "list",
            Self::Set(_) => "set",
            Self::Map(_) => "map",
            Self::Tuple(_) => "Tuple",
        }
    }

    /// Integer payload widened to i64, for any fixed-width integer variant.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::TinyInt(v) => Some(v as i64),
            Self::SmallInt(v) => Some(v as i64),
            Self::Int(v) => Some(v as i64),
            Self::BigInt(v) | Self::Integer(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Wrap a host value.
    pub fn from_host<T: HostValue>(value: &T) -> Self {
        value.to_value()
    }

    /// Collect items into a `Set`-marked value.
    pub fn set_of<T: HostValue>(items: impl IntoIterator<Item = T>) -> Self {
        Self::Set(items.into_iter().map(|item| item.to_value()).collect())
    }
}
