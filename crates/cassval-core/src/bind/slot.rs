use super::{CollectionSink, Primitive, StatementSink, TupleSink, TypedValue};
use crate::types::Uuid;
use std::net::IpAddr;

// One addressable position in a statement, collection or tuple.
pub(super) trait Slot {
    type Collection: CollectionSink<Tuple = Self::Tuple>;
    type Tuple: TupleSink<Collection = Self::Collection>;

    fn put_null(self);
    fn put_string(self, value: &str);
    fn put_bool(self, value: bool);
    fn put_int8(self, value: i8);
    fn put_int16(self, value: i16);
    fn put_int32(self, value: i32);
    fn put_int64(self, value: i64);
    fn put_uint32(self, value: u32);
    fn put_float(self, value: f32);
    fn put_double(self, value: f64);
    fn put_decimal(self, unscaled: &[u8], scale: i32);
    fn put_uuid(self, value: &Uuid);
    fn put_inet(self, value: IpAddr);
    fn put_bytes(self, value: &[u8]);
    fn put_collection(self, value: Self::Collection);
    fn put_tuple(self, value: Self::Tuple);
}

pub(super) fn emit<P: Slot>(value: &TypedValue, slot: P) {
    match value {
        TypedValue::Null(_) => slot.put_null(),

        TypedValue::Primitive { value, .. } => match value {
            Primitive::String(v) => slot.put_string(v),
            Primitive::Bool(v) => slot.put_bool(*v),
            Primitive::Int8(v) => slot.put_int8(*v),
            Primitive::Int16(v) => slot.put_int16(*v),
            Primitive::Int32(v) => slot.put_int32(*v),
            Primitive::Int64(v) => slot.put_int64(*v),
            Primitive::Uint32(v) => slot.put_uint32(*v),
            Primitive::Float(v) => slot.put_float(*v),
            Primitive::Double(v) => slot.put_double(*v),
            Primitive::Decimal { unscaled, scale } => slot.put_decimal(unscaled, *scale),
            Primitive::Uuid(v) => slot.put_uuid(v),
            Primitive::Inet(v) => slot.put_inet(*v),
            Primitive::Bytes(v) => slot.put_bytes(v),
        },

        TypedValue::Collection { cass_type, items } => {
            debug_assert!(
                !items.iter().any(TypedValue::is_null),
                "NULL item in {cass_type} collection"
            );
            let mut collection = <P::Collection as CollectionSink>::new(cass_type, items.len());
            for item in items {
                emit(
                    item,
                    CollectionSlot {
                        sink: &mut collection,
                    },
                );
            }
            slot.put_collection(collection);
        }

        TypedValue::Tuple { cass_type, slots } => {
            let mut tuple = <P::Tuple as TupleSink>::new(cass_type);
            for (index, item) in slots.iter().enumerate() {
                emit(
                    item,
                    TupleSlot {
                        sink: &mut tuple,
                        index,
                    },
                );
            }
            slot.put_tuple(tuple);
        }
    }
}

///
/// StatementSlot
///

pub(super) struct StatementSlot<'a, S> {
    pub sink: &'a mut S,
    pub index: usize,
}

impl<S: StatementSink> Slot for StatementSlot<'_, S> {
    type Collection = S::Collection;
    type Tuple = S::Tuple;

    fn put_null(self) {
        self.sink.bind_null(self.index);
    }

    fn put_string(self, value: &str) {
        self.sink.bind_string(self.index, value);
    }

    fn put_bool(self, value: bool) {
        self.sink.bind_bool(self.index, value);
    }

    fn put_int8(self, value: i8) {
        self.sink.bind_int8(self.index, value);
    }

    fn put_int16(self, value: i16) {
        self.sink.bind_int16(self.index, value);
    }

    fn put_int32(self, value: i32) {
        self.sink.bind_int32(self.index, value);
    }

    fn put_int64(self, value: i64) {
        self.sink.bind_int64(self.index, value);
    }

    fn put_uint32(self, value: u32) {
        self.sink.bind_uint32(self.index, value);
    }

    fn put_float(self, value: f32) {
        self.sink.bind_float(self.index, value);
    }

    fn put_double(self, value: f64) {
        self.sink.bind_double(self.index, value);
    }

    fn put_decimal(self, unscaled: &[u8], scale: i32) {
        self.sink.bind_decimal(self.index, unscaled, scale);
    }

    fn put_uuid(self, value: &Uuid) {
        self.sink.bind_uuid(self.index, value);
    }

    fn put_inet(self, value: IpAddr) {
        self.sink.bind_inet(self.index, value);
    }

    fn put_bytes(self, value: &[u8]) {
        self.sink.bind_bytes(self.index, value);
    }

    fn put_collection(self, value: Self::Collection) {
        self.sink.bind_collection(self.index, value);
    }

    fn put_tuple(self, value: Self::Tuple) {
        self.sink.bind_tuple(self.index, value);
    }
}

///
/// CollectionSlot
///

pub(super) struct CollectionSlot<'a, C> {
    pub sink: &'a mut C,
}

impl<C: CollectionSink> Slot for CollectionSlot<'_, C> {
    type Collection = C;
    type Tuple = C::Tuple;

    // collection sinks have no NULL item; `emit` asserts none arrive
    fn put_null(self) {}

    fn put_string(self, value: &str) {
        self.sink.append_string(value);
    }

    fn put_bool(self, value: bool) {
        self.sink.append_bool(value);
    }

    fn put_int8(self, value: i8) {
        self.sink.append_int8(value);
    }

    fn put_int16(self, value: i16) {
        self.sink.append_int16(value);
    }

    fn put_int32(self, value: i32) {
        self.sink.append_int32(value);
    }

    fn put_int64(self, value: i64) {
        self.sink.append_int64(value);
    }

    fn put_uint32(self, value: u32) {
        self.sink.append_uint32(value);
    }

    fn put_float(self, value: f32) {
        self.sink.append_float(value);
    }

    fn put_double(self, value: f64) {
        self.sink.append_double(value);
    }

    fn put_decimal(self, unscaled: &[u8], scale: i32) {
        self.sink.append_decimal(unscaled, scale);
    }

    fn put_uuid(self, value: &Uuid) {
        self.sink.append_uuid(value);
    }

    fn put_inet(self, value: IpAddr) {
        self.sink.append_inet(value);
    }

    fn put_bytes(self, value: &[u8]) {
        self.sink.append_bytes(value);
    }

    fn put_collection(self, value: Self::Collection) {
        self.sink.append_collection(value);
    }

    fn put_tuple(self, value: Self::Tuple) {
        self.sink.append_tuple(value);
    }
}

///
/// TupleSlot
///

pub(super) struct TupleSlot<'a, T> {
    pub sink: &'a mut T,
    pub index: usize,
}

impl<T: TupleSink> Slot for TupleSlot<'_, T> {
    type Collection = T::Collection;
    type Tuple = T;

    fn put_null(self) {
        self.sink.set_null(self.index);
    }

    fn put_string(self, value: &str) {
        self.sink.set_string(self.index, value);
    }

    fn put_bool(self, value: bool) {
        self.sink.set_bool(self.index, value);
    }

    fn put_int8(self, value: i8) {
        self.sink.set_int8(self.index, value);
    }

    fn put_int16(self, value: i16) {
        self.sink.set_int16(self.index, value);
    }

    fn put_int32(self, value: i32) {
        self.sink.set_int32(self.index, value);
    }

    fn put_int64(self, value: i64) {
        self.sink.set_int64(self.index, value);
    }

    fn put_uint32(self, value: u32) {
        self.sink.set_uint32(self.index, value);
    }

    fn put_float(self, value: f32) {
        self.sink.set_float(self.index, value);
    }

    fn put_double(self, value: f64) {
        self.sink.set_double(self.index, value);
    }

    fn put_decimal(self, unscaled: &[u8], scale: i32) {
        self.sink.set_decimal(self.index, unscaled, scale);
    }

    fn put_uuid(self, value: &Uuid) {
        self.sink.set_uuid(self.index, value);
    }

    fn put_inet(self, value: IpAddr) {
        self.sink.set_inet(self.index, value);
    }

    fn put_bytes(self, value: &[u8]) {
        self.sink.set_bytes(self.index, value);
    }

    fn put_collection(self, value: Self::Collection) {
        self.sink.set_collection(self.index, value);
    }

    fn put_tuple(self, value: Self::Tuple) {
        self.sink.set_tuple(self.index, value);
    }
}
