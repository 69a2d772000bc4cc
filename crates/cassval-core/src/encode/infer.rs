use crate::{cass_type::CassType, error::CodecError, value::Value};

/// CQL type a host value binds as when the schema gives no type.
///
/// Collections come back unspecialized; their element types are fixed by
/// the first element the encoder resolves. Tuples report their own kind.
pub fn infer_type(value: &Value) -> Result<CassType, CodecError> {
    let ty = match value {
        Value::Null => return Err(CodecError::unresolved(value.host_type())),
        Value::Bool(_) => CassType::BOOLEAN,
        Value::TinyInt(_) => CassType::TINYINT,
        Value::SmallInt(_) => CassType::SMALLINT,
        Value::Int(_) => CassType::INT,
        Value::BigInt(_) => CassType::BIGINT,
        Value::Integer(v) => {
            if i32::try_from(*v).is_ok() {
                CassType::INT
            } else {
                CassType::BIGINT
            }
        }
        Value::Varint(_) => CassType::VARINT,
        Value::Float(_) => CassType::FLOAT,
        Value::Double(_) => CassType::DOUBLE,
        Value::Decimal(_) => CassType::DECIMAL,
        Value::Text(_) => CassType::TEXT,
        Value::Blob(_) => CassType::BLOB,
        Value::Timestamp(_) => CassType::TIMESTAMP,
        Value::Date(_) => CassType::DATE,
        Value::Time(_) => CassType::TIME,
        Value::Uuid(u) => {
            if u.is_time_based() {
                CassType::TIMEUUID
            } else {
                CassType::UUID
            }
        }
        Value::Inet(_) => CassType::INET,
        Value::List(_) => CassType::LIST,
        Value::Set(_) => CassType::SET,
        Value::Map(_) => CassType::MAP,
        Value::Tuple(t) => t.kind().clone(),
    };

    Ok(ty)
}
