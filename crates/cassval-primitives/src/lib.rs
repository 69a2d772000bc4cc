#[macro_use]
mod macros;

///
/// ValueKind
///
/// Primary CQL type tag. Every column type, collection element type and
/// tuple slot type carries exactly one of these.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ValueKind {
    Custom,
    Ascii,
    BigInt,
    Blob,
    Boolean,
    Counter,
    Decimal,
    Double,
    Float,
    Int,
    Text,
    Timestamp,
    Uuid,
    Varchar,
    Varint,
    TimeUuid,
    Inet,
    Date,
    Time,
    SmallInt,
    TinyInt,
    List,
    Map,
    Set,
    Udt,
    Tuple,
    Unknown,
}

impl ValueKind {
    /// Return the full metadata descriptor for one kind.
    #[must_use]
    pub const fn metadata(self) -> KindMetadata {
        value_kind_registry!(metadata_from_registry, self)
    }

    /// Native protocol option id.
    #[must_use]
    pub const fn code(self) -> u16 {
        self.metadata().code
    }

    /// Canonical lower-case CQL name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.metadata().name
    }

    #[must_use]
    pub const fn family(self) -> KindFamily {
        self.metadata().family
    }

    #[must_use]
    pub const fn arity(self) -> KindArity {
        self.metadata().arity
    }

    /// Encoded width in bytes for fixed-size kinds.
    #[must_use]
    pub const fn fixed_width(self) -> Option<usize> {
        self.metadata().fixed_width
    }

    #[must_use]
    pub const fn is_collection(self) -> bool {
        matches!(self.family(), KindFamily::Collection)
    }

    #[must_use]
    pub const fn is_textual(self) -> bool {
        matches!(self.family(), KindFamily::Textual)
    }

    #[must_use]
    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Resolve a native protocol option id.
    #[must_use]
    pub const fn from_code(code: u16) -> Option<Self> {
        let mut i = 0;
        while i < ALL_VALUE_KINDS.len() {
            let kind = ALL_VALUE_KINDS[i];
            if kind.code() == code {
                return Some(kind);
            }
            i += 1;
        }

        None
    }

    /// Resolve a CQL type name, ignoring ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        ALL_VALUE_KINDS
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

///
/// KindMetadata
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct KindMetadata {
    pub code: u16,
    pub name: &'static str,
    pub family: KindFamily,
    pub arity: KindArity,
    pub fixed_width: Option<usize>,
}

///
/// KindFamily
///
/// Coarse routing family used by the decode and encode dispatchers.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum KindFamily {
    Binary,
    Boolean,
    Collection,
    Composite,
    Identifier,
    Integer,
    Network,
    Numeric,
    Opaque,
    Temporal,
    Textual,
}

///
/// KindArity
///
/// Number of subtypes a fully specialized descriptor of this kind carries.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum KindArity {
    Scalar,
    One,
    Two,
    Variadic,
}

impl KindArity {
    /// Exact subtype count, or `None` for variadic kinds.
    #[must_use]
    pub const fn expected(self) -> Option<usize> {
        match self {
            Self::Scalar => Some(0),
            Self::One => Some(1),
            Self::Two => Some(2),
            Self::Variadic => None,
        }
    }
}

/// Ordered list of all value kinds in registry order.
pub const ALL_VALUE_KINDS: [ValueKind; 27] = value_kind_registry!(all_kinds_from_registry);
