//! Core runtime for cassval: CQL type descriptors, host and wire value
//! models, the decode/encode dispatchers, and the binding sinks.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod bind;
pub mod cass_type;
pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod types;
pub mod value;
pub mod wire;

///
/// Prelude
///
/// Domain vocabulary plus the entry points most callers need.
///

pub mod prelude {
    pub use crate::{
        bind::{StatementSink, TypedValue},
        cass_type::CassType,
        config::CodecConfig,
        decode::{Decoder, decode_value, read, read_column},
        encode::{Encoder, bind_arguments, encode, to_typed_value},
        error::{CodecError, ErrorKind},
        types::{Date, Decimal, Set, Time, Timestamp, Tuple, Uuid, Varint},
        value::{HostValue, Value},
        wire::WireValue,
    };
}
