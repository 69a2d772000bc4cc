mod descriptor;
mod raw;


pub use descriptor::{TypeOption, UdtName};
pub use raw::RawValue;

pub(crate) use raw::{write_count, write_item};

use crate::{cass_type::CassType, error::CodecError};
use std::net::IpAddr;

///
/// WireValue
///
/// One value as handed over by the driver: null-checkable, self-describing,
/// and able to yield its payload as a primitive or as nested wire values.
///
/// Borrowed `&str`/`&[u8]` results point into driver-owned memory and must
/// be copied before the call that obtained them returns.
///

pub trait WireValue: Sized {
    fn is_null(&self) -> bool;

    /// Type the driver attached to this value.
    fn data_type(&self) -> CassType;

    fn get_bool(&self) -> Result<bool, CodecError>;

    fn get_int8(&self) -> Result<i8, CodecError>;

    fn get_int16(&self) -> Result<i16, CodecError>;

    fn get_int32(&self) -> Result<i32, CodecError>;

    fn get_int64(&self) -> Result<i64, CodecError>;

    fn get_uint32(&self) -> Result<u32, CodecError>;

    fn get_float(&self) -> Result<f32, CodecError>;

    fn get_double(&self) -> Result<f64, CodecError>;

    fn get_string(&self) -> Result<&str, CodecError>;

    fn get_bytes(&self) -> Result<&[u8], CodecError>;

    /// Two's-complement unscaled bytes and scale.
    fn get_decimal(&self) -> Result<(&[u8], i32), CodecError>;

    /// Canonical 36-character hex rendering.
    fn get_uuid_string(&self) -> Result<String, CodecError>;

    fn get_inet(&self) -> Result<IpAddr, CodecError>;

    /// Items of a list or set, in wire order.
    fn elements(&self) -> Result<Vec<Self>, CodecError>;

    /// Key/value pairs of a map, in wire order.
    fn entries(&self) -> Result<Vec<(Self, Self)>, CodecError>;

    /// Slots of a tuple.
    fn fields(&self) -> Result<Vec<Self>, CodecError>;
}
