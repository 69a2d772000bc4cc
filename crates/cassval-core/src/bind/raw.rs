use super::{CollectionSink, StatementSink, TupleSink};
use crate::{
    cass_type::CassType,
    types::Uuid,
    wire::{RawValue, write_count, write_item},
};
use cassval_primitives::ValueKind;
use std::net::IpAddr;

// Native protocol encodings for single sink calls.
mod cell {
    use crate::types::Uuid;
    use std::net::IpAddr;

    pub(super) fn string(v: &str) -> Vec<u8> {
        v.as_bytes().to_vec()
    }

    pub(super) fn bool(v: bool) -> Vec<u8> {
        vec![u8::from(v)]
    }

    pub(super) fn decimal(unscaled: &[u8], scale: i32) -> Vec<u8> {
        let mut out = scale.to_be_bytes().to_vec();
        out.extend_from_slice(unscaled);
        out
    }

    pub(super) fn uuid(v: &Uuid) -> Vec<u8> {
        v.as_bytes().to_vec()
    }

    pub(super) fn inet(v: IpAddr) -> Vec<u8> {
        match v {
            IpAddr::V4(ip) => ip.octets().to_vec(),
            IpAddr::V6(ip) => ip.octets().to_vec(),
        }
    }
}

///
/// RawStatement
///
/// Statement parameter buffer holding each bound value in protocol
/// encoding. Unbound positions read as NULL.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RawStatement {
    params: Vec<Option<Vec<u8>>>,
}

impl RawStatement {
    #[must_use]
    pub const fn new() -> Self {
        Self { params: Vec::new() }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.params.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Encoded parameter; `Some(None)` is a bound NULL.
    #[must_use]
    pub fn param(&self, index: usize) -> Option<Option<&[u8]>> {
        self.params.get(index).map(Option::as_deref)
    }

    /// Parameter `index` as a wire value of the given type.
    #[must_use]
    pub fn value(&self, index: usize, cass_type: CassType) -> Option<RawValue> {
        self.params.get(index).map(|param| match param {
            Some(bytes) => RawValue::new(cass_type, bytes.clone()),
            None => RawValue::null(cass_type),
        })
    }

    fn put(&mut self, index: usize, bytes: Option<Vec<u8>>) {
        if self.params.len() <= index {
            self.params.resize(index + 1, None);
        }
        self.params[index] = bytes;
    }
}

impl StatementSink for RawStatement {
    type Collection = RawCollection;
    type Tuple = RawTuple;

    fn bind_null(&mut self, index: usize) {
        self.put(index, None);
    }

    fn bind_string(&mut self, index: usize, value: &str) {
        self.put(index, Some(cell::string(value)));
    }

    fn bind_bool(&mut self, index: usize, value: bool) {
        self.put(index, Some(cell::bool(value)));
    }

    fn bind_int8(&mut self, index: usize, value: i8) {
        self.put(index, Some(value.to_be_bytes().to_vec()));
    }

    fn bind_int16(&mut self, index: usize, value: i16) {
        self.put(index, Some(value.to_be_bytes().to_vec()));
    }

    fn bind_int32(&mut self, index: usize, value: i32) {
        self.put(index, Some(value.to_be_bytes().to_vec()));
    }

    fn bind_int64(&mut self, index: usize, value: i64) {
        self.put(index, Some(value.to_be_bytes().to_vec()));
    }

    fn bind_uint32(&mut self, index: usize, value: u32) {
        self.put(index, Some(value.to_be_bytes().to_vec()));
    }

    fn bind_float(&mut self, index: usize, value: f32) {
        self.put(index, Some(value.to_be_bytes().to_vec()));
    }

    fn bind_double(&mut self, index: usize, value: f64) {
        self.put(index, Some(value.to_be_bytes().to_vec()));
    }

    fn bind_decimal(&mut self, index: usize, unscaled: &[u8], scale: i32) {
        self.put(index, Some(cell::decimal(unscaled, scale)));
    }

    fn bind_uuid(&mut self, index: usize, value: &Uuid) {
        self.put(index, Some(cell::uuid(value)));
    }

    fn bind_inet(&mut self, index: usize, value: IpAddr) {
        self.put(index, Some(cell::inet(value)));
    }

    fn bind_bytes(&mut self, index: usize, value: &[u8]) {
        self.put(index, Some(value.to_vec()));
    }

    fn bind_collection(&mut self, index: usize, value: RawCollection) {
        self.put(index, value.into_raw().into_bytes());
    }

    fn bind_tuple(&mut self, index: usize, value: RawTuple) {
        self.put(index, value.into_raw().into_bytes());
    }
}

///
/// RawCollection
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RawCollection {
    cass_type: CassType,
    items: Vec<Vec<u8>>,
}

impl RawCollection {
    /// Finish the collection as a single encoded value.
    #[must_use]
    pub fn into_raw(self) -> RawValue {
        let count = match self.cass_type.primary() {
            ValueKind::Map => self.items.len() / 2,
            _ => self.items.len(),
        };

        let mut buf = Vec::new();
        write_count(&mut buf, count);
        for item in &self.items {
            write_item(&mut buf, Some(item));
        }

        RawValue::new(self.cass_type, buf)
    }
}

impl CollectionSink for RawCollection {
    type Tuple = RawTuple;

    fn new(cass_type: &CassType, item_count: usize) -> Self {
        Self {
            cass_type: cass_type.clone(),
            items: Vec::with_capacity(item_count),
        }
    }

    fn append_string(&mut self, value: &str) {
        self.items.push(cell::string(value));
    }

    fn append_bool(&mut self, value: bool) {
        self.items.push(cell::bool(value));
    }

    fn append_int8(&mut self, value: i8) {
        self.items.push(value.to_be_bytes().to_vec());
    }

    fn append_int16(&mut self, value: i16) {
        self.items.push(value.to_be_bytes().to_vec());
    }

    fn append_int32(&mut self, value: i32) {
        self.items.push(value.to_be_bytes().to_vec());
    }

    fn append_int64(&mut self, value: i64) {
        self.items.push(value.to_be_bytes().to_vec());
    }

    fn append_uint32(&mut self, value: u32) {
        self.items.push(value.to_be_bytes().to_vec());
    }

    fn append_float(&mut self, value: f32) {
        self.items.push(value.to_be_bytes().to_vec());
    }

    fn append_double(&mut self, value: f64) {
        self.items.push(value.to_be_bytes().to_vec());
    }

    fn append_decimal(&mut self, unscaled: &[u8], scale: i32) {
        self.items.push(cell::decimal(unscaled, scale));
    }

    fn append_uuid(&mut self, value: &Uuid) {
        self.items.push(cell::uuid(value));
    }

    fn append_inet(&mut self, value: IpAddr) {
        self.items.push(cell::inet(value));
    }

    fn append_bytes(&mut self, value: &[u8]) {
        self.items.push(value.to_vec());
    }

    fn append_collection(&mut self, value: Self) {
        self.items
            .push(value.into_raw().into_bytes().unwrap_or_default());
    }

    fn append_tuple(&mut self, value: RawTuple) {
        self.items
            .push(value.into_raw().into_bytes().unwrap_or_default());
    }
}

///
/// RawTuple
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RawTuple {
    cass_type: CassType,
    slots: Vec<Option<Vec<u8>>>,
}

impl RawTuple {
    #[must_use]
    pub fn into_raw(self) -> RawValue {
        let mut buf = Vec::new();
        for slot in &self.slots {
            write_item(&mut buf, slot.as_deref());
        }

        RawValue::new(self.cass_type, buf)
    }

    fn put(&mut self, index: usize, bytes: Option<Vec<u8>>) {
        if self.slots.len() <= index {
            self.slots.resize(index + 1, None);
        }
        self.slots[index] = bytes;
    }
}

impl TupleSink for RawTuple {
    type Collection = RawCollection;

    fn new(cass_type: &CassType) -> Self {
        Self {
            cass_type: cass_type.clone(),
            slots: vec![None; cass_type.subtypes().len()],
        }
    }

    fn set_null(&mut self, index: usize) {
        self.put(index, None);
    }

    fn set_string(&mut self, index: usize, value: &str) {
        self.put(index, Some(cell::string(value)));
    }

    fn set_bool(&mut self, index: usize, value: bool) {
        self.put(index, Some(cell::bool(value)));
    }

    fn set_int8(&mut self, index: usize, value: i8) {
        self.put(index, Some(value.to_be_bytes().to_vec()));
    }

    fn set_int16(&mut self, index: usize, value: i16) {
        self.put(index, Some(value.to_be_bytes().to_vec()));
    }

    fn set_int32(&mut self, index: usize, value: i32) {
        self.put(index, Some(value.to_be_bytes().to_vec()));
    }

    fn set_int64(&mut self, index: usize, value: i64) {
        self.put(index, Some(value.to_be_bytes().to_vec()));
    }

    fn set_uint32(&mut self, index: usize, value: u32) {
        self.put(index, Some(value.to_be_bytes().to_vec()));
    }

    fn set_float(&mut self, index: usize, value: f32) {
        self.put(index, Some(value.to_be_bytes().to_vec()));
    }

    fn set_double(&mut self, index: usize, value: f64) {
        self.put(index, Some(value.to_be_bytes().to_vec()));
    }

    fn set_decimal(&mut self, index: usize, unscaled: &[u8], scale: i32) {
        self.put(index, Some(cell::decimal(unscaled, scale)));
    }

    fn set_uuid(&mut self, index: usize, value: &Uuid) {
        self.put(index, Some(cell::uuid(value)));
    }

    fn set_inet(&mut self, index: usize, value: IpAddr) {
        self.put(index, Some(cell::inet(value)));
    }

    fn set_bytes(&mut self, index: usize, value: &[u8]) {
        self.put(index, Some(value.to_vec()));
    }

    fn set_collection(&mut self, index: usize, value: RawCollection) {
        self.put(index, value.into_raw().into_bytes());
    }

    fn set_tuple(&mut self, index: usize, value: Self) {
        self.put(index, value.into_raw().into_bytes());
    }
}
