use crate::{
    types::{Date, Decimal, Set, Time, Timestamp, Tuple, Uuid, Varint},
    value::Value,
};
use num_bigint::BigInt;
use std::{
    collections::{BTreeMap, BTreeSet, HashMap, HashSet},
    hash::Hash,
    net::{IpAddr, Ipv4Addr},
};

///
/// HostValue
///
/// Static host types that can cross the CQL boundary. `from_value` returns
/// `None` when the decoded value cannot be represented without loss.
///

pub trait HostValue: Sized {
    fn to_value(&self) -> Value;

    fn from_value(value: Value) -> Option<Self>;

    /// What a NULL column reads as.
    fn null_value() -> Self;

    #[must_use]
    fn host_type_name() -> &'static str {
        std::any::type_name::<Self>()
    }
}

// Scalars that map one-to-one onto a single `Value` variant.
macro_rules! impl_host_value {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl HostValue for $type {
                fn to_value(&self) -> Value {
                    Value::$variant(self.clone())
                }

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => Some(v),
                        _ => None,
                    }
                }

                fn null_value() -> Self {
                    Self::default()
                }
            }
        )*
    };
}

impl_host_value!(
    bool => Bool,
    i8 => TinyInt,
    f64 => Double,
    String => Text,
    Varint => Varint,
    Decimal => Decimal,
    Timestamp => Timestamp,
    Date => Date,
    Time => Time,
    Uuid => Uuid,
    Tuple => Tuple,
);

// Integers accept narrower integer variants only.
macro_rules! impl_host_value_int {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl HostValue for $type {
                fn to_value(&self) -> Value {
                    Value::$variant(*self)
                }

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::TinyInt(v) => Some(Self::from(v)),
                        Value::SmallInt(v) if <$type>::BITS >= i16::BITS => Self::try_from(v).ok(),
                        Value::Int(v) if <$type>::BITS >= i32::BITS => Self::try_from(v).ok(),
                        Value::BigInt(v) | Value::Integer(v) if <$type>::BITS >= i64::BITS => {
                            Self::try_from(v).ok()
                        }
                        _ => None,
                    }
                }

                fn null_value() -> Self {
                    0
                }
            }
        )*
    };
}

impl_host_value_int!(i16 => SmallInt, i32 => Int, i64 => BigInt);

impl HostValue for isize {
    fn to_value(&self) -> Value {
        Value::Integer(*self as i64)
    }

    fn from_value(value: Value) -> Option<Self> {
        value.as_i64().and_then(|v| Self::try_from(v).ok())
    }

    fn null_value() -> Self {
        0
    }
}

impl HostValue for f32 {
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float(v) => Some(v),
            _ => None,
        }
    }

    fn null_value() -> Self {
        0.0
    }
}

impl HostValue for BigInt {
    fn to_value(&self) -> Value {
        Value::Varint(Varint::new(self.clone()))
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Varint(v) => Some(v.into_inner()),
            other => other.as_i64().map(Self::from),
        }
    }

    fn null_value() -> Self {
        Self::default()
    }
}

impl HostValue for Vec<u8> {
    fn to_value(&self) -> Value {
        Value::Blob(self.clone())
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Blob(v) => Some(v),
            _ => None,
        }
    }

    fn null_value() -> Self {
        Self::new()
    }
}

impl HostValue for IpAddr {
    fn to_value(&self) -> Value {
        Value::Inet(*self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Inet(v) => Some(v),
            _ => None,
        }
    }

    fn null_value() -> Self {
        Self::V4(Ipv4Addr::UNSPECIFIED)
    }
}

impl HostValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }

    fn from_value(value: Value) -> Option<Self> {
        Some(value)
    }

    fn null_value() -> Self {
        Self::Null
    }

    fn host_type_name() -> &'static str {
        "Value"
    }
}

impl<T: HostValue> HostValue for Option<T> {
    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, HostValue::to_value)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            other => T::from_value(other).map(Some),
        }
    }

    fn null_value() -> Self {
        None
    }

    fn host_type_name() -> &'static str {
        T::host_type_name()
    }
}

//
// Collections
//

// List- or set-shaped payload, in wire order.
fn sequence_items(value: Value) -> Option<Vec<Value>> {
    match value {
        Value::List(items) | Value::Set(items) => Some(items),
        _ => None,
    }
}

fn collect_items<T: HostValue, C: FromIterator<T>>(value: Value) -> Option<C> {
    sequence_items(value)?.into_iter().map(T::from_value).collect()
}

fn collect_entries<K: HostValue, V: HostValue, C: FromIterator<(K, V)>>(value: Value) -> Option<C> {
    match value {
        Value::Map(entries) => entries
            .into_iter()
            .map(|(k, v)| Some((K::from_value(k)?, V::from_value(v)?)))
            .collect(),
        _ => None,
    }
}

fn map_value<'a, K, V>(entries: impl Iterator<Item = (&'a K, &'a V)>) -> Value
where
    K: HostValue + 'a,
    V: HostValue + 'a,
{
    Value::Map(entries.map(|(k, v)| (k.to_value(), v.to_value())).collect())
}

impl<T: HostValue> HostValue for Vec<T> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(HostValue::to_value).collect())
    }

    fn from_value(value: Value) -> Option<Self> {
        collect_items(value)
    }

    fn null_value() -> Self {
        Self::new()
    }
}

impl<T: HostValue> HostValue for Set<T> {
    fn to_value(&self) -> Value {
        Value::Set(self.iter().map(HostValue::to_value).collect())
    }

    fn from_value(value: Value) -> Option<Self> {
        collect_items(value)
    }

    fn null_value() -> Self {
        Self::new()
    }
}

impl<T: HostValue + Eq + Hash> HostValue for HashSet<T> {
    fn to_value(&self) -> Value {
        Value::Set(self.iter().map(HostValue::to_value).collect())
    }

    fn from_value(value: Value) -> Option<Self> {
        collect_items(value)
    }

    fn null_value() -> Self {
        Self::new()
    }
}

impl<T: HostValue + Ord> HostValue for BTreeSet<T> {
    fn to_value(&self) -> Value {
        Value::Set(self.iter().map(HostValue::to_value).collect())
    }

    fn from_value(value: Value) -> Option<Self> {
        collect_items(value)
    }

    fn null_value() -> Self {
        Self::new()
    }
}

impl<K: HostValue + Eq + Hash, V: HostValue> HostValue for HashMap<K, V> {
    fn to_value(&self) -> Value {
        map_value(self.iter())
    }

    fn from_value(value: Value) -> Option<Self> {
        collect_entries(value)
    }

    fn null_value() -> Self {
        Self::new()
    }
}

impl<K: HostValue + Ord, V: HostValue> HostValue for BTreeMap<K, V> {
    fn to_value(&self) -> Value {
        map_value(self.iter())
    }

    fn from_value(value: Value) -> Option<Self> {
        collect_entries(value)
    }

    fn null_value() -> Self {
        Self::new()
    }
}

// Rust tuples bind as CQL tuples with every slot type left to inference.
macro_rules! impl_host_value_tuple {
    ( $( ( $( $name:ident : $idx:tt ),+ ) ),* $(,)? ) => {
        $(
            impl<$( $name: HostValue ),+> HostValue for ( $( $name, )+ ) {
                fn to_value(&self) -> Value {
                    Value::Tuple(Tuple::from_values(vec![ $( self.$idx.to_value() ),+ ]))
                }

                fn from_value(value: Value) -> Option<Self> {
                    let Value::Tuple(tuple) = value else {
                        return None;
                    };
                    let mut slots = tuple.into_values().into_iter();
                    let out = ( $( $name::from_value(slots.next()?)?, )+ );

                    slots.next().is_none().then_some(out)
                }

                fn null_value() -> Self {
                    ( $( $name::null_value(), )+ )
                }
            }
        )*
    };
}

impl_host_value_tuple!(
    (A: 0, B: 1),
    (A: 0, B: 1, C: 2),
    (A: 0, B: 1, C: 2, D: 3),
);
