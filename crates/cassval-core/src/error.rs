use crate::cass_type::CassType;
use std::fmt;
use thiserror::Error as ThisError;

///
/// CodecError
///
/// Failure raised while moving one value across the host/CQL boundary.
/// Carries a typed detail plus whatever position context the caller knew.
///

#[derive(Debug, ThisError)]
#[error("{detail}{context}")]
pub struct CodecError {
    pub detail: ErrorDetail,
    pub context: ErrorContext,
}

impl CodecError {
    #[must_use]
    pub fn new(detail: ErrorDetail) -> Self {
        Self {
            detail,
            context: ErrorContext::default(),
        }
    }

    pub(crate) fn type_mismatch(host_type: impl Into<String>, cql_type: &CassType) -> Self {
        Self::new(ErrorDetail::TypeMismatch {
            host_type: host_type.into(),
            cql_type: cql_type.clone(),
        })
    }

    pub(crate) fn unsupported(cql_type: &CassType) -> Self {
        Self::new(ErrorDetail::UnsupportedType {
            cql_type: cql_type.clone(),
        })
    }

    pub(crate) fn out_of_range(value: impl fmt::Display, cql_type: &CassType) -> Self {
        Self::new(ErrorDetail::EncodingRange {
            value: value.to_string(),
            cql_type: cql_type.clone(),
        })
    }

    pub(crate) fn unresolved(host_type: impl Into<String>) -> Self {
        Self::new(ErrorDetail::UnresolvedType {
            host_type: host_type.into(),
        })
    }

    pub(crate) fn limit_exceeded(limit: Limit, max: usize) -> Self {
        Self::new(ErrorDetail::LimitExceeded { limit, max })
    }

    /// Stable classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.detail.kind()
    }

    /// Attach the result-set column this error was raised for.
    #[must_use]
    pub fn with_column(mut self, index: usize, name: impl Into<String>) -> Self {
        self.context.column_index = Some(index);
        self.context.column_name = Some(name.into());
        self
    }

    /// Attach the bound argument position this error was raised for.
    #[must_use]
    pub const fn with_argument(mut self, index: usize) -> Self {
        self.context.argument = Some(index);
        self
    }
}

impl From<ErrorDetail> for CodecError {
    fn from(detail: ErrorDetail) -> Self {
        Self::new(detail)
    }
}

impl From<MalformedValueError> for CodecError {
    fn from(err: MalformedValueError) -> Self {
        Self::new(ErrorDetail::MalformedValue(err))
    }
}

///
/// ErrorDetail
///

#[derive(Debug, ThisError)]
pub enum ErrorDetail {
    #[error("cannot convert between {host_type} and CQL {cql_type}")]
    TypeMismatch { host_type: String, cql_type: CassType },

    #[error("CQL type {cql_type} is not supported")]
    UnsupportedType { cql_type: CassType },

    #[error(transparent)]
    MalformedValue(#[from] MalformedValueError),

    #[error("value {value} does not fit CQL {cql_type}")]
    EncodingRange { value: String, cql_type: CassType },

    #[error("cannot infer a CQL type for {host_type}")]
    UnresolvedType { host_type: String },

    #[error("{limit} limit of {max} exceeded")]
    LimitExceeded { limit: Limit, max: usize },
}

impl ErrorDetail {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::UnsupportedType { .. } => ErrorKind::UnsupportedType,
            Self::MalformedValue(_) => ErrorKind::MalformedValue,
            Self::EncodingRange { .. } => ErrorKind::EncodingRange,
            Self::UnresolvedType { .. } => ErrorKind::UnresolvedType,
            Self::LimitExceeded { .. } => ErrorKind::LimitExceeded,
        }
    }
}

///
/// ErrorKind
///
/// Stable error taxonomy; `as_str` values are safe to match on in logs.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    TypeMismatch,
    UnsupportedType,
    MalformedValue,
    EncodingRange,
    UnresolvedType,
    LimitExceeded,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TypeMismatch => "type_mismatch",
            Self::UnsupportedType => "unsupported_type",
            Self::MalformedValue => "malformed_value",
            Self::EncodingRange => "encoding_range",
            Self::UnresolvedType => "unresolved_type",
            Self::LimitExceeded => "limit_exceeded",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// Limit
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Limit {
    Depth,
    CollectionLength,
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Depth => f.write_str("nesting depth"),
            Self::CollectionLength => f.write_str("collection length"),
        }
    }
}

///
/// ErrorContext
///
/// Position of the failing value. Renders as a suffix of the error message.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ErrorContext {
    pub column_index: Option<usize>,
    pub column_name: Option<String>,
    pub argument: Option<usize>,
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.column_index, self.column_name.as_deref()) {
            (Some(index), Some(name)) => write!(f, " (column {index} '{name}')")?,
            (Some(index), None) => write!(f, " (column {index})")?,
            (None, Some(name)) => write!(f, " (column '{name}')")?,
            (None, None) => {}
        }
        if let Some(argument) = self.argument {
            write!(f, " (argument {argument})")?;
        }

        Ok(())
    }
}

///
/// MalformedValueError
///
/// Raised by text parsers and by wire payloads that do not match their type.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum MalformedValueError {
    #[error("invalid {what} literal '{input}'")]
    InvalidLiteral { what: &'static str, input: String },

    #[error("{what} out of range: {reason}")]
    OutOfRange { what: &'static str, reason: String },

    #[error("invalid {what} payload length {len}")]
    PayloadLength { what: &'static str, len: usize },

    #[error("truncated {what} payload")]
    Truncated { what: &'static str },

    #[error("{len} trailing bytes after {what} payload")]
    TrailingBytes { what: &'static str, len: usize },

    #[error("{what} nests deeper than {max} levels")]
    TooDeep { what: &'static str, max: usize },
}

impl MalformedValueError {
    pub(crate) fn literal(what: &'static str, input: impl Into<String>) -> Self {
        Self::InvalidLiteral {
            what,
            input: input.into(),
        }
    }

    pub(crate) fn out_of_range(what: &'static str, reason: impl Into<String>) -> Self {
        Self::OutOfRange {
            what,
            reason: reason.into(),
        }
    }
}
