
use crate::{
    cass_type::CassType,
    config::CodecConfig,
    error::CodecError,
    types::{Date, Decimal, Time, Timestamp, Tuple, Uuid, Varint},
    value::{HostValue, Value},
    wire::WireValue,
};
use cassval_primitives::ValueKind;
use std::{
    collections::HashMap,
    hash::{BuildHasher, RandomState},
};
use tracing::trace;

/// Decode a wire value into its canonical dynamic host value.
pub fn decode_value<W: WireValue>(wire: &W, cass_type: &CassType) -> Result<Value, CodecError> {
    Decoder::default().decode(wire, cass_type)
}

/// Decode into `dst`. Returns `Ok(false)` when the wire value was NULL and
/// `dst` was reset to its null representation.
pub fn read<W: WireValue, T: HostValue>(
    wire: &W,
    cass_type: &CassType,
    dst: &mut T,
) -> Result<bool, CodecError> {
    Decoder::default().read(wire, cass_type, dst)
}

/// [`read`] for a result-set column; errors name the column.
pub fn read_column<W: WireValue, T: HostValue>(
    wire: &W,
    cass_type: &CassType,
    index: usize,
    name: &str,
    dst: &mut T,
) -> Result<bool, CodecError> {
    Decoder::default().read_column(wire, cass_type, index, name, dst)
}

///
/// Decoder
///
/// Wire value to host value dispatcher, keyed on the CQL type tag.
///
/// Collection items and tuple slots are decoded with the type the wire
/// reports for them, falling back to the declared subtype when the wire
/// does not say.
///

#[derive(Clone, Debug, Default)]
pub struct Decoder {
    config: CodecConfig,
}

impl Decoder {
    #[must_use]
    pub const fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn decode<W: WireValue>(&self, wire: &W, cass_type: &CassType) -> Result<Value, CodecError> {
        self.decode_at(wire, cass_type, 0)
    }

    pub fn read<W: WireValue, T: HostValue>(
        &self,
        wire: &W,
        cass_type: &CassType,
        dst: &mut T,
    ) -> Result<bool, CodecError> {
        if wire.is_null() {
            *dst = T::null_value();
            return Ok(false);
        }

        let value = self.decode(wire, cass_type)?;
        *dst = T::from_value(value)
            .ok_or_else(|| CodecError::type_mismatch(T::host_type_name(), cass_type))?;

        Ok(true)
    }

    pub fn read_column<W: WireValue, T: HostValue>(
        &self,
        wire: &W,
        cass_type: &CassType,
        index: usize,
        name: &str,
        dst: &mut T,
    ) -> Result<bool, CodecError> {
        self.read(wire, cass_type, dst)
            .map_err(|err| err.with_column(index, name))
    }

    fn decode_at<W: WireValue>(
        &self,
        wire: &W,
        ty: &CassType,
        depth: usize,
    ) -> Result<Value, CodecError> {
        self.config.check_depth(depth)?;

        if wire.is_null() {
            return Ok(Value::Null);
        }
        trace!(cql_type = %ty, "decoding value");

        let value = match ty.primary() {
            ValueKind::Ascii | ValueKind::Text | ValueKind::Varchar => {
                Value::Text(wire.get_string()?.to_owned())
            }
            ValueKind::Boolean => Value::Bool(wire.get_bool()?),

            ValueKind::TinyInt => Value::TinyInt(wire.get_int8()?),
            ValueKind::SmallInt => Value::SmallInt(wire.get_int16()?),
            ValueKind::Int => Value::Int(wire.get_int32()?),
            ValueKind::BigInt | ValueKind::Counter => Value::BigInt(wire.get_int64()?),
            ValueKind::Varint => Value::Varint(Varint::from_bytes(wire.get_bytes()?)),

            ValueKind::Float => Value::Float(wire.get_float()?),
            ValueKind::Double => Value::Double(wire.get_double()?),
            ValueKind::Decimal => {
                let (unscaled, scale) = wire.get_decimal()?;
                Value::Decimal(Decimal::from_wire(unscaled, scale))
            }

            ValueKind::Blob => Value::Blob(wire.get_bytes()?.to_vec()),

            ValueKind::Timestamp => Value::Timestamp(Timestamp::from_seconds(wire.get_int64()?)),
            ValueKind::Date => Value::Date(Date::from_raw(wire.get_uint32()?)),
            ValueKind::Time => Value::Time(Time::from_nanos(wire.get_int64()?)?),

            ValueKind::Uuid | ValueKind::TimeUuid => {
                Value::Uuid(Uuid::parse(&wire.get_uuid_string()?)?)
            }
            ValueKind::Inet => Value::Inet(wire.get_inet()?),

            ValueKind::List => Value::List(self.decode_elements(wire, ty, depth)?),
            ValueKind::Set => Value::Set(dedupe(self.decode_elements(wire, ty, depth)?)),
            ValueKind::Map => Value::Map(self.decode_entries(wire, ty, depth)?),
            ValueKind::Tuple => Value::Tuple(self.decode_tuple(wire, ty, depth)?),

            ValueKind::Udt | ValueKind::Custom | ValueKind::Unknown => {
                return Err(CodecError::unsupported(ty));
            }
        };

        Ok(value)
    }

    fn decode_elements<W: WireValue>(
        &self,
        wire: &W,
        ty: &CassType,
        depth: usize,
    ) -> Result<Vec<Value>, CodecError> {
        let items = wire.elements()?;
        self.config.check_len(items.len())?;

        items
            .iter()
            .map(|item| self.decode_at(item, &item_type(item, ty.subtype(0)), depth + 1))
            .collect()
    }

    fn decode_entries<W: WireValue>(
        &self,
        wire: &W,
        ty: &CassType,
        depth: usize,
    ) -> Result<Vec<(Value, Value)>, CodecError> {
        let entries = wire.entries()?;
        self.config.check_len(entries.len())?;

        entries
            .iter()
            .map(|(key, value)| {
                Ok((
                    self.decode_at(key, &item_type(key, ty.subtype(0)), depth + 1)?,
                    self.decode_at(value, &item_type(value, ty.subtype(1)), depth + 1)?,
                ))
            })
            .collect()
    }

    fn decode_tuple<W: WireValue>(
        &self,
        wire: &W,
        ty: &CassType,
        depth: usize,
    ) -> Result<Tuple, CodecError> {
        let fields = wire.fields()?;
        self.config.check_len(fields.len())?;

        let mut kinds = Vec::with_capacity(fields.len());
        let mut values = Vec::with_capacity(fields.len());
        for (index, field) in fields.iter().enumerate() {
            let slot_type = item_type(field, ty.subtype(index));
            values.push(self.decode_at(field, &slot_type, depth + 1)?);
            kinds.push(slot_type);
        }

        Ok(Tuple::from_parts(CassType::tuple_of(kinds), values))
    }
}

// The item's own wire type unless the wire left it unknown.
fn item_type<W: WireValue>(item: &W, declared: Option<&CassType>) -> CassType {
    let own = item.data_type();
    if own.is_unknown() {
        declared.cloned().unwrap_or(own)
    } else {
        own
    }
}

// Drop repeated set members, keeping wire order of first occurrence.
// Members are bucketed by hash and only compared within a bucket.
fn dedupe(items: Vec<Value>) -> Vec<Value> {
    let state = RandomState::new();
    let mut buckets: HashMap<u64, Vec<usize>> = HashMap::with_capacity(items.len());
    let mut out: Vec<Value> = Vec::with_capacity(items.len());
    for item in items {
        let bucket = buckets.entry(state.hash_one(&item)).or_default();
        if bucket.iter().any(|&seen| out[seen] == item) {
            continue;
        }
        bucket.push(out.len());
        out.push(item);
    }

    out
}
