mod infer;

#[cfg(test)]
mod tests;

pub use infer::infer_type;

use crate::{
    bind::{Primitive, StatementSink, TypedValue},
    cass_type::CassType,
    config::CodecConfig,
    error::{CodecError, MalformedValueError},
    types::{Date, Time, Tuple, Uuid, Varint},
    value::{HostValue, Value},
};
use cassval_primitives::ValueKind;
use tracing::{debug, trace};

/// Encode one value against its declared CQL type using the default config.
/// Pass `CassType::UNKNOWN` to have the type inferred from the value.
pub fn to_typed_value(value: &Value, declared: &CassType) -> Result<TypedValue, CodecError> {
    Encoder::default().encode(value, declared)
}

/// Encode a static host value.
pub fn encode<T: HostValue>(value: &T, declared: &CassType) -> Result<TypedValue, CodecError> {
    to_typed_value(&value.to_value(), declared)
}

/// Bind `args` positionally. Missing declared types are inferred.
pub fn bind_arguments<S: StatementSink>(
    sink: &mut S,
    args: &[Value],
    declared: &[CassType],
) -> Result<(), CodecError> {
    Encoder::default().bind_arguments(sink, args, declared)
}

///
/// Encoder
///
/// Host value to `TypedValue` dispatcher.
///
/// A concrete declared type is honoured strictly: the host value is coerced
/// to it or rejected. An unknown declared type is inferred from the value.
/// Inside collections the first element that resolves a type fixes it for
/// all of its siblings.
///

#[derive(Clone, Debug, Default)]
pub struct Encoder {
    config: CodecConfig,
}

impl Encoder {
    #[must_use]
    pub const fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn encode(&self, value: &Value, declared: &CassType) -> Result<TypedValue, CodecError> {
        self.encode_at(value, declared, 0)
    }

    /// Encode and bind a single statement parameter. NULL binds as NULL
    /// without consulting the declared type.
    pub fn write<S: StatementSink>(
        &self,
        sink: &mut S,
        index: usize,
        value: &Value,
        declared: &CassType,
    ) -> Result<(), CodecError> {
        if value.is_null() {
            sink.bind_null(index);
            return Ok(());
        }

        let typed = self
            .encode(value, declared)
            .map_err(|err| err.with_argument(index))?;
        typed.bind(sink, index);

        Ok(())
    }

    pub fn bind_arguments<S: StatementSink>(
        &self,
        sink: &mut S,
        args: &[Value],
        declared: &[CassType],
    ) -> Result<(), CodecError> {
        let unknown = CassType::UNKNOWN;
        for (index, value) in args.iter().enumerate() {
            let declared = declared.get(index).unwrap_or(&unknown);
            self.write(sink, index, value, declared)?;
        }

        Ok(())
    }

    fn encode_at(
        &self,
        value: &Value,
        declared: &CassType,
        depth: usize,
    ) -> Result<TypedValue, CodecError> {
        self.config.check_depth(depth)?;

        if let Value::Set(items) = value {
            return self.encode_set(items, declared, depth);
        }

        if declared.is_unknown() {
            let inferred = infer_type(value)?;
            debug!(host_type = value.host_type(), cql_type = %inferred, "inferred CQL type");

            return self.encode_as(value, &inferred, depth);
        }

        self.encode_as(value, declared, depth)
    }

    fn encode_set(
        &self,
        items: &[Value],
        declared: &CassType,
        depth: usize,
    ) -> Result<TypedValue, CodecError> {
        match declared.primary() {
            ValueKind::Unknown => self.encode_sequence(items, &CassType::SET, depth),
            ValueKind::Set => self.encode_sequence(items, declared, depth),
            _ => Err(CodecError::type_mismatch("set", declared)),
        }
    }

    fn encode_as(
        &self,
        value: &Value,
        ty: &CassType,
        depth: usize,
    ) -> Result<TypedValue, CodecError> {
        trace!(host_type = value.host_type(), cql_type = %ty, "encoding value");

        if value.is_null() {
            return Ok(TypedValue::Null(ty.clone()));
        }

        let primitive = match (ty.primary(), value) {
            (ValueKind::Ascii | ValueKind::Text | ValueKind::Varchar, Value::Text(s)) => {
                payload_len(s.len(), ty)?;
                Primitive::String(s.clone())
            }
            (ValueKind::Boolean, Value::Bool(b)) => Primitive::Bool(*b),

            (ValueKind::TinyInt, _) => Primitive::Int8(narrow(value, ty)?),
            (ValueKind::SmallInt, _) => Primitive::Int16(narrow(value, ty)?),
            (ValueKind::Int, _) => Primitive::Int32(narrow(value, ty)?),
            (ValueKind::BigInt | ValueKind::Counter, _) => Primitive::Int64(narrow(value, ty)?),
            (ValueKind::Varint, Value::Varint(v)) => Primitive::Bytes(v.to_bytes()),
            (ValueKind::Varint, _) => Primitive::Bytes(Varint::from(integer(value, ty)?).to_bytes()),

            (ValueKind::Float, Value::Float(f)) => Primitive::Float(*f),
            (ValueKind::Double, Value::Double(f)) => Primitive::Double(*f),
            (ValueKind::Double, Value::Float(f)) => Primitive::Double(f64::from(*f)),
            (ValueKind::Decimal, Value::Decimal(d)) => Primitive::Decimal {
                unscaled: d.unscaled_bytes(),
                scale: d.scale(),
            },

            (ValueKind::Blob, Value::Blob(b)) => {
                payload_len(b.len(), ty)?;
                Primitive::Bytes(b.clone())
            }

            (ValueKind::Timestamp, Value::Timestamp(t)) => Primitive::Int64(t.seconds()),
            (ValueKind::Timestamp, Value::BigInt(v) | Value::Integer(v)) => Primitive::Int64(*v),
            (ValueKind::Date, Value::Date(d)) => Primitive::Uint32(d.raw()),
            (ValueKind::Date, Value::Text(s)) => Primitive::Uint32(Date::parse(s)?.raw()),
            (ValueKind::Time, Value::Time(t)) => Primitive::Int64(t.nanos()),
            (ValueKind::Time, Value::BigInt(v) | Value::Integer(v)) => {
                Primitive::Int64(Time::from_nanos(*v)?.nanos())
            }

            (ValueKind::Uuid | ValueKind::TimeUuid, Value::Uuid(u)) => Primitive::Uuid(*u),
            (ValueKind::Uuid | ValueKind::TimeUuid, Value::Text(s)) => {
                Primitive::Uuid(Uuid::parse(s)?)
            }
            (ValueKind::Inet, Value::Inet(ip)) => Primitive::Inet(*ip),
            (ValueKind::Inet, Value::Text(s)) => Primitive::Inet(
                s.parse()
                    .map_err(|_| MalformedValueError::literal("inet", s.as_str()))?,
            ),

            (ValueKind::List | ValueKind::Set, Value::List(items)) => {
                return self.encode_sequence(items, ty, depth);
            }
            (ValueKind::Map, Value::Map(entries)) => return self.encode_map(entries, ty, depth),
            (ValueKind::Tuple, Value::Tuple(tuple)) => {
                return self.encode_tuple(tuple, ty, depth);
            }

            (ValueKind::Udt | ValueKind::Custom | ValueKind::Unknown, _) => {
                return Err(CodecError::unsupported(ty));
            }
            _ => return Err(CodecError::type_mismatch(value.host_type(), ty)),
        };

        Ok(TypedValue::Primitive {
            cass_type: ty.clone(),
            value: primitive,
        })
    }

    fn encode_sequence(
        &self,
        items: &[Value],
        ty: &CassType,
        depth: usize,
    ) -> Result<TypedValue, CodecError> {
        self.config.check_len(items.len())?;
        payload_len(items.len(), ty)?;

        let mut element = ty.subtype(0).cloned().unwrap_or(CassType::UNKNOWN);
        let declared = element.is_resolved();
        let items = items
            .iter()
            .map(|item| self.encode_element(item, &mut element, declared, depth))
            .collect::<Result<Vec<_>, _>>()?;

        let cass_type = if element.is_unknown() {
            ty.clone()
        } else {
            ty.specialize(vec![element])
        };

        Ok(TypedValue::Collection { cass_type, items })
    }

    fn encode_map(
        &self,
        entries: &[(Value, Value)],
        ty: &CassType,
        depth: usize,
    ) -> Result<TypedValue, CodecError> {
        self.config.check_len(entries.len())?;
        payload_len(entries.len(), ty)?;

        let mut key_type = ty.subtype(0).cloned().unwrap_or(CassType::UNKNOWN);
        let mut value_type = ty.subtype(1).cloned().unwrap_or(CassType::UNKNOWN);
        let (key_declared, value_declared) = (key_type.is_resolved(), value_type.is_resolved());
        let mut items = Vec::with_capacity(entries.len() * 2);
        for (key, value) in entries {
            items.push(self.encode_element(key, &mut key_type, key_declared, depth)?);
            items.push(self.encode_element(value, &mut value_type, value_declared, depth)?);
        }

        let cass_type = if key_type.is_unknown() && value_type.is_unknown() {
            ty.clone()
        } else {
            ty.specialize(vec![key_type, value_type])
        };

        Ok(TypedValue::Collection { cass_type, items })
    }

    // Encodes one collection item. A declared element type coerces the item.
    // Otherwise the item is inferred on its own and must agree with the
    // type its earlier siblings fixed.
    fn encode_element(
        &self,
        item: &Value,
        element: &mut CassType,
        declared: bool,
        depth: usize,
    ) -> Result<TypedValue, CodecError> {
        if item.is_null() {
            return Err(CodecError::type_mismatch(item.host_type(), element));
        }
        if declared {
            return self.encode_at(item, element, depth + 1);
        }

        let encoded = self.encode_at(item, &CassType::UNKNOWN, depth + 1)?;
        if let Some(merged) = unify(element, encoded.cass_type()) {
            if merged != *element {
                debug!(cql_type = %merged, "collection element type fixed");
                *element = merged;
            }
            return Ok(encoded);
        }

        // an untyped integer literal may take the width its siblings fixed
        if matches!(item, Value::Integer(_)) && is_integer(element.primary()) {
            return self
                .encode_as(item, element, depth + 1)
                .map_err(|_| CodecError::type_mismatch(item.host_type(), element));
        }

        Err(CodecError::type_mismatch(item.host_type(), element))
    }

    fn encode_tuple(
        &self,
        tuple: &Tuple,
        ty: &CassType,
        depth: usize,
    ) -> Result<TypedValue, CodecError> {
        let declared = if ty.subtypes().is_empty() {
            tuple.kind().subtypes()
        } else {
            ty.subtypes()
        };
        if declared.len() != tuple.len() {
            return Err(CodecError::type_mismatch(
                format!("tuple of {} values", tuple.len()),
                ty,
            ));
        }

        let mut slots = Vec::with_capacity(tuple.len());
        let mut kinds = Vec::with_capacity(tuple.len());
        for (index, (value, declared)) in tuple.values().iter().zip(declared).enumerate() {
            let slot_type = match tuple.kind().subtype(index) {
                Some(own) if declared.is_unknown() => own,
                _ => declared,
            };

            let encoded = if value.is_null() {
                TypedValue::Null(slot_type.clone())
            } else {
                self.encode_at(value, slot_type, depth + 1)?
            };
            kinds.push(encoded.cass_type().clone());
            slots.push(encoded);
        }

        Ok(TypedValue::Tuple {
            cass_type: CassType::tuple_of(kinds),
            slots,
        })
    }
}

// Most resolved type both sides agree on, or `None` when they conflict.
fn unify(fixed: &CassType, own: &CassType) -> Option<CassType> {
    if fixed.is_unknown() {
        return Some(own.clone());
    }
    if own.is_unknown() || (own.subtypes().is_empty() && fixed.primary() == own.primary()) {
        return Some(fixed.clone());
    }
    if fixed.primary() != own.primary() {
        return None;
    }
    if fixed.subtypes().is_empty() {
        return Some(own.clone());
    }
    if fixed.subtypes().len() != own.subtypes().len() {
        return None;
    }

    let subtypes = fixed
        .subtypes()
        .iter()
        .zip(own.subtypes())
        .map(|(fixed, own)| unify(fixed, own))
        .collect::<Option<Vec<_>>>()?;

    Some(fixed.specialize(subtypes))
}

const fn is_integer(kind: ValueKind) -> bool {
    matches!(
        kind,
        ValueKind::TinyInt
            | ValueKind::SmallInt
            | ValueKind::Int
            | ValueKind::BigInt
            | ValueKind::Varint
    )
}

// Native protocol lengths and counts are i32-prefixed.
fn payload_len(len: usize, ty: &CassType) -> Result<(), CodecError> {
    i32::try_from(len)
        .map(|_| ())
        .map_err(|_| CodecError::out_of_range(format!("length {len}"), ty))
}

// Integer payload of any integer-valued host variant.
fn integer(value: &Value, ty: &CassType) -> Result<i64, CodecError> {
    match value {
        Value::Varint(v) => i64::try_from(&**v).map_err(|_| CodecError::out_of_range(v, ty)),
        other => other
            .as_i64()
            .ok_or_else(|| CodecError::type_mismatch(other.host_type(), ty)),
    }
}

fn narrow<T: TryFrom<i64>>(value: &Value, ty: &CassType) -> Result<T, CodecError> {
    let wide = integer(value, ty)?;
    T::try_from(wide).map_err(|_| CodecError::out_of_range(wide, ty))
}
