use crate::error::{CodecError, Limit};
use serde::{Deserialize, Serialize};

///
/// CodecConfig
///
/// Resource bounds applied by the decoder and encoder. Missing fields
/// deserialize to their defaults.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// Maximum collection/tuple nesting depth.
    pub max_depth: usize,

    /// Maximum number of items in a single decoded collection.
    pub max_collection_len: usize,
}

impl CodecConfig {
    pub const DEFAULT_MAX_DEPTH: usize = 32;
    pub const DEFAULT_MAX_COLLECTION_LEN: usize = 65_535;

    pub(crate) fn check_depth(&self, depth: usize) -> Result<(), CodecError> {
        if depth > self.max_depth {
            return Err(CodecError::limit_exceeded(Limit::Depth, self.max_depth));
        }

        Ok(())
    }

    pub(crate) fn check_len(&self, len: usize) -> Result<(), CodecError> {
        if len > self.max_collection_len {
            return Err(CodecError::limit_exceeded(
                Limit::CollectionLength,
                self.max_collection_len,
            ));
        }

        Ok(())
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            max_collection_len: Self::DEFAULT_MAX_COLLECTION_LEN,
        }
    }
}
