//! ## Crate layout
//! - `core`: type descriptors, host/wire value models, the decode and
//!   encode dispatchers, and the binding sinks.
//! - `primitives`: the CQL type tag registry.
//!
//! The `prelude` module is what a driver integration usually needs: decode a
//! column into a host value, or encode host arguments into a statement.

pub use cassval_core as core;
pub use cassval_primitives as primitives;

pub use cassval_core::{
    decode::{decode_value, read, read_column},
    encode::{bind_arguments, encode, infer_type, to_typed_value},
    error::CodecError,
};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use cassval_core::prelude::*;
    pub use cassval_primitives::ValueKind;
}
