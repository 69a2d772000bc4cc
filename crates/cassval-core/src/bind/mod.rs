mod raw;
mod slot;

#[cfg(test)]
mod tests;

pub use raw::{RawCollection, RawStatement, RawTuple};

use crate::{cass_type::CassType, types::Uuid};
use std::net::IpAddr;

///
/// StatementSink
///
/// Positional parameters of a statement about to be executed.
///

pub trait StatementSink {
    type Collection: CollectionSink<Tuple = Self::Tuple>;
    type Tuple: TupleSink<Collection = Self::Collection>;

    fn bind_null(&mut self, index: usize);
    fn bind_string(&mut self, index: usize, value: &str);
    fn bind_bool(&mut self, index: usize, value: bool);
    fn bind_int8(&mut self, index: usize, value: i8);
    fn bind_int16(&mut self, index: usize, value: i16);
    fn bind_int32(&mut self, index: usize, value: i32);
    fn bind_int64(&mut self, index: usize, value: i64);
    fn bind_uint32(&mut self, index: usize, value: u32);
    fn bind_float(&mut self, index: usize, value: f32);
    fn bind_double(&mut self, index: usize, value: f64);
    fn bind_decimal(&mut self, index: usize, unscaled: &[u8], scale: i32);
    fn bind_uuid(&mut self, index: usize, value: &Uuid);
    fn bind_inet(&mut self, index: usize, value: IpAddr);
    fn bind_bytes(&mut self, index: usize, value: &[u8]);
    fn bind_collection(&mut self, index: usize, value: Self::Collection);
    fn bind_tuple(&mut self, index: usize, value: Self::Tuple);
}

///
/// CollectionSink
///
/// Append-only builder for a list, set or map. Map entries are appended as
/// key then value. Collections never hold NULL items.
///

pub trait CollectionSink: Sized {
    type Tuple: TupleSink<Collection = Self>;

    fn new(cass_type: &CassType, item_count: usize) -> Self;

    fn append_string(&mut self, value: &str);
    fn append_bool(&mut self, value: bool);
    fn append_int8(&mut self, value: i8);
    fn append_int16(&mut self, value: i16);
    fn append_int32(&mut self, value: i32);
    fn append_int64(&mut self, value: i64);
    fn append_uint32(&mut self, value: u32);
    fn append_float(&mut self, value: f32);
    fn append_double(&mut self, value: f64);
    fn append_decimal(&mut self, unscaled: &[u8], scale: i32);
    fn append_uuid(&mut self, value: &Uuid);
    fn append_inet(&mut self, value: IpAddr);
    fn append_bytes(&mut self, value: &[u8]);
    fn append_collection(&mut self, value: Self);
    fn append_tuple(&mut self, value: Self::Tuple);
}

///
/// TupleSink
///
/// Index-addressed builder for a tuple value.
///

pub trait TupleSink: Sized {
    type Collection: CollectionSink<Tuple = Self>;

    fn new(cass_type: &CassType) -> Self;

    fn set_null(&mut self, index: usize);
    fn set_string(&mut self, index: usize, value: &str);
    fn set_bool(&mut self, index: usize, value: bool);
    fn set_int8(&mut self, index: usize, value: i8);
    fn set_int16(&mut self, index: usize, value: i16);
    fn set_int32(&mut self, index: usize, value: i32);
    fn set_int64(&mut self, index: usize, value: i64);
    fn set_uint32(&mut self, index: usize, value: u32);
    fn set_float(&mut self, index: usize, value: f32);
    fn set_double(&mut self, index: usize, value: f64);
    fn set_decimal(&mut self, index: usize, unscaled: &[u8], scale: i32);
    fn set_uuid(&mut self, index: usize, value: &Uuid);
    fn set_inet(&mut self, index: usize, value: IpAddr);
    fn set_bytes(&mut self, index: usize, value: &[u8]);
    fn set_collection(&mut self, index: usize, value: Self::Collection);
    fn set_tuple(&mut self, index: usize, value: Self);
}

///
/// Primitive
///
/// Scalar payload in the exact shape one sink call expects.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    String(String),
    Bool(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Uint32(u32),
    Float(f32),
    Double(f64),
    Decimal { unscaled: Vec<u8>, scale: i32 },
    Uuid(Uuid),
    Inet(IpAddr),
    Bytes(Vec<u8>),
}

///
/// TypedValue
///
/// Output of the encoder: a value paired with its resolved CQL type, ready
/// to hand to any of the three sinks. Map items are flattened key, value.
///

#[derive(Clone, Debug, PartialEq)]
pub enum TypedValue {
    Null(CassType),
    Primitive {
        cass_type: CassType,
        value: Primitive,
    },
    /// Items must not be `Null`: CQL collections cannot hold NULL and the
    /// encoder rejects them. Binding one anyway is a debug-build panic.
    Collection {
        cass_type: CassType,
        items: Vec<Self>,
    },
    Tuple {
        cass_type: CassType,
        slots: Vec<Self>,
    },
}

impl TypedValue {
    #[must_use]
    pub const fn cass_type(&self) -> &CassType {
        match self {
            Self::Null(cass_type)
            | Self::Primitive { cass_type, .. }
            | Self::Collection { cass_type, .. }
            | Self::Tuple { cass_type, .. } => cass_type,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null(_))
    }

    /// Bind as statement parameter `index`.
    pub fn bind<S: StatementSink>(&self, sink: &mut S, index: usize) {
        slot::emit(self, slot::StatementSlot { sink, index });
    }

    /// Append to a collection under construction. `Null` has no collection
    /// encoding and is skipped.
    pub fn append<C: CollectionSink>(&self, sink: &mut C) {
        slot::emit(self, slot::CollectionSlot { sink });
    }

    /// Set tuple slot `index`.
    pub fn set<T: TupleSink>(&self, sink: &mut T, index: usize) {
        slot::emit(self, slot::TupleSlot { sink, index });
    }
}
