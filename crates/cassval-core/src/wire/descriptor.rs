use crate::{
    cass_type::{CassType, DataTypeHandle},
    config::CodecConfig,
    error::MalformedValueError,
};
use cassval_primitives::ValueKind;

///
/// TypeOption
///
/// Native protocol `[option]` type descriptor as found in result metadata.
/// Custom types keep their Java class name; UDTs keep their keyspace, name
/// and field names alongside the positional field types.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TypeOption {
    kind: ValueKind,
    subtypes: Vec<Self>,
    class_name: Option<String>,
    udt: Option<UdtName>,
}

///
/// UdtName
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UdtName {
    pub keyspace: String,
    pub name: String,
    pub fields: Vec<String>,
}

impl TypeOption {
    /// Parse one option from the front of `buf`, advancing it. Nesting is
    /// capped at `CodecConfig::DEFAULT_MAX_DEPTH`.
    pub fn read(buf: &mut &[u8]) -> Result<Self, MalformedValueError> {
        Self::read_at(buf, 0)
    }

    fn read_at(buf: &mut &[u8], depth: usize) -> Result<Self, MalformedValueError> {
        if depth > CodecConfig::DEFAULT_MAX_DEPTH {
            return Err(MalformedValueError::TooDeep {
                what: "type option",
                max: CodecConfig::DEFAULT_MAX_DEPTH,
            });
        }

        let code = read_u16(buf)?;
        let kind = ValueKind::from_code(code).ok_or_else(|| {
            MalformedValueError::out_of_range("type option", format!("unknown id {code:#06x}"))
        })?;

        let mut option = Self {
            kind,
            subtypes: Vec::new(),
            class_name: None,
            udt: None,
        };

        match kind {
            ValueKind::Custom => option.class_name = Some(read_string(buf)?),
            ValueKind::List | ValueKind::Set => option.subtypes.push(Self::read_at(buf, depth + 1)?),
            ValueKind::Map => {
                option.subtypes.push(Self::read_at(buf, depth + 1)?);
                option.subtypes.push(Self::read_at(buf, depth + 1)?);
            }
            ValueKind::Tuple => {
                let n = read_u16(buf)?;
                for _ in 0..n {
                    option.subtypes.push(Self::read_at(buf, depth + 1)?);
                }
            }
            ValueKind::Udt => {
                let keyspace = read_string(buf)?;
                let name = read_string(buf)?;
                let n = read_u16(buf)?;
                let mut fields = Vec::with_capacity(usize::from(n));
                for _ in 0..n {
                    fields.push(read_string(buf)?);
                    option.subtypes.push(Self::read_at(buf, depth + 1)?);
                }
                option.udt = Some(UdtName {
                    keyspace,
                    name,
                    fields,
                });
            }
            _ => {}
        }

        Ok(option)
    }

    /// Parse a complete option; trailing bytes are an error.
    pub fn from_bytes(mut bytes: &[u8]) -> Result<Self, MalformedValueError> {
        let option = Self::read(&mut bytes)?;
        if !bytes.is_empty() {
            return Err(MalformedValueError::TrailingBytes {
                what: "type option",
                len: bytes.len(),
            });
        }

        Ok(option)
    }

    /// Option for a descriptor. UDT and custom names are not recoverable
    /// from a `CassType` and are written empty.
    #[must_use]
    pub fn from_cass_type(ty: &CassType) -> Self {
        let udt = (ty.primary() == ValueKind::Udt).then(|| UdtName {
            keyspace: String::new(),
            name: String::new(),
            fields: vec![String::new(); ty.subtypes().len()],
        });

        Self {
            kind: ty.primary(),
            subtypes: ty.subtypes().iter().map(Self::from_cass_type).collect(),
            class_name: (ty.primary() == ValueKind::Custom).then(String::new),
            udt,
        }
    }

    /// Append the encoded option. Counts and strings that do not fit the
    /// protocol's u16 fields are an error.
    pub fn write(&self, out: &mut Vec<u8>) -> Result<(), MalformedValueError> {
        out.extend_from_slice(&self.kind.code().to_be_bytes());

        match self.kind {
            ValueKind::Custom => write_string(out, self.class_name.as_deref().unwrap_or_default())?,
            ValueKind::List | ValueKind::Set | ValueKind::Map => {
                for sub in &self.subtypes {
                    sub.write(out)?;
                }
            }
            ValueKind::Tuple => {
                write_u16(out, self.subtypes.len())?;
                for sub in &self.subtypes {
                    sub.write(out)?;
                }
            }
            ValueKind::Udt => {
                let (keyspace, name, fields) = match &self.udt {
                    Some(udt) => (udt.keyspace.as_str(), udt.name.as_str(), udt.fields.as_slice()),
                    None => ("", "", &[][..]),
                };
                write_string(out, keyspace)?;
                write_string(out, name)?;
                write_u16(out, self.subtypes.len())?;
                for (i, sub) in self.subtypes.iter().enumerate() {
                    write_string(out, fields.get(i).map_or("", String::as_str))?;
                    sub.write(out)?;
                }
            }
            _ => {}
        }

        Ok(())
    }

    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        self.kind
    }

    #[must_use]
    pub fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    #[must_use]
    pub const fn udt(&self) -> Option<&UdtName> {
        self.udt.as_ref()
    }

    #[must_use]
    pub fn to_cass_type(&self) -> CassType {
        CassType::from_wire_descriptor(self)
    }
}

impl DataTypeHandle for TypeOption {
    fn value_kind(&self) -> ValueKind {
        self.kind
    }

    fn sub_type_count(&self) -> usize {
        self.subtypes.len()
    }

    fn sub_type(&self, index: usize) -> Option<&Self> {
        self.subtypes.get(index)
    }
}

fn read_u16(buf: &mut &[u8]) -> Result<u16, MalformedValueError> {
    let slice: &[u8] = *buf;
    let (head, rest) = slice
        .split_first_chunk::<2>()
        .ok_or(MalformedValueError::Truncated {
            what: "type option",
        })?;
    *buf = rest;

    Ok(u16::from_be_bytes(*head))
}

fn read_string(buf: &mut &[u8]) -> Result<String, MalformedValueError> {
    let len = usize::from(read_u16(buf)?);
    let slice: &[u8] = *buf;
    if slice.len() < len {
        return Err(MalformedValueError::Truncated {
            what: "type option",
        });
    }
    let (s, rest) = slice.split_at(len);
    *buf = rest;

    String::from_utf8(s.to_vec())
        .map_err(|_| MalformedValueError::literal("type option", String::from_utf8_lossy(s)))
}

fn write_u16(out: &mut Vec<u8>, n: usize) -> Result<(), MalformedValueError> {
    let n = u16::try_from(n).map_err(|_| {
        MalformedValueError::out_of_range("type option", format!("{n} does not fit a u16 field"))
    })?;
    out.extend_from_slice(&n.to_be_bytes());

    Ok(())
}

fn write_string(out: &mut Vec<u8>, s: &str) -> Result<(), MalformedValueError> {
    write_u16(out, s.len())?;
    out.extend_from_slice(s.as_bytes());

    Ok(())
}
