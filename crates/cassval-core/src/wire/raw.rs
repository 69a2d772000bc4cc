use crate::{
    cass_type::CassType,
    error::{CodecError, MalformedValueError},
    types::Uuid,
    wire::WireValue,
};
use cassval_primitives::ValueKind;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

///
/// RawValue
///
/// Owned CQL value in native protocol (v4) encoding, tagged with its type.
/// `bytes == None` is NULL.
///
/// Collections are `[i32 count]` followed by `[i32 len][bytes]` items
/// (maps alternate key and value), tuples are one `[i32 len][bytes]` item
/// per slot, and a negative length marks a NULL item.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RawValue {
    cass_type: CassType,
    bytes: Option<Vec<u8>>,
}

impl RawValue {
    #[must_use]
    pub const fn new(cass_type: CassType, bytes: Vec<u8>) -> Self {
        Self {
            cass_type,
            bytes: Some(bytes),
        }
    }

    #[must_use]
    pub const fn null(cass_type: CassType) -> Self {
        Self {
            cass_type,
            bytes: None,
        }
    }

    /// Encode a list or set from already-encoded items.
    #[must_use]
    pub fn collection(cass_type: CassType, items: &[Self]) -> Self {
        let mut buf = Vec::new();
        write_count(&mut buf, items.len());
        for item in items {
            write_item(&mut buf, item.bytes());
        }

        Self::new(cass_type, buf)
    }

    #[must_use]
    pub fn map(cass_type: CassType, entries: &[(Self, Self)]) -> Self {
        let mut buf = Vec::new();
        write_count(&mut buf, entries.len());
        for (key, value) in entries {
            write_item(&mut buf, key.bytes());
            write_item(&mut buf, value.bytes());
        }

        Self::new(cass_type, buf)
    }

    #[must_use]
    pub fn tuple(cass_type: CassType, slots: &[Self]) -> Self {
        let mut buf = Vec::new();
        for slot in slots {
            write_item(&mut buf, slot.bytes());
        }

        Self::new(cass_type, buf)
    }

    #[must_use]
    pub const fn cass_type(&self) -> &CassType {
        &self.cass_type
    }

    #[must_use]
    pub fn bytes(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }

    #[must_use]
    pub fn into_bytes(self) -> Option<Vec<u8>> {
        self.bytes
    }

    fn kind_name(&self) -> &'static str {
        self.cass_type.primary().name()
    }

    fn payload(&self) -> Result<&[u8], CodecError> {
        self.bytes.as_deref().ok_or_else(|| {
            MalformedValueError::Truncated {
                what: self.kind_name(),
            }
            .into()
        })
    }

    fn fixed<const N: usize>(&self) -> Result<[u8; N], CodecError> {
        let payload = self.payload()?;
        payload.try_into().map_err(|_| {
            MalformedValueError::PayloadLength {
                what: self.kind_name(),
                len: payload.len(),
            }
            .into()
        })
    }

    fn subtype_or_unknown(&self, index: usize) -> CassType {
        self.cass_type
            .subtype(index)
            .cloned()
            .unwrap_or(CassType::UNKNOWN)
    }

    fn child(cass_type: CassType, item: Option<&[u8]>) -> Self {
        Self {
            cass_type,
            bytes: item.map(<[u8]>::to_vec),
        }
    }
}

impl WireValue for RawValue {
    fn is_null(&self) -> bool {
        self.bytes.is_none()
    }

    fn data_type(&self) -> CassType {
        self.cass_type.clone()
    }

    fn get_bool(&self) -> Result<bool, CodecError> {
        let [b] = self.fixed::<1>()?;
        Ok(b != 0)
    }

    fn get_int8(&self) -> Result<i8, CodecError> {
        self.fixed().map(i8::from_be_bytes)
    }

    fn get_int16(&self) -> Result<i16, CodecError> {
        self.fixed().map(i16::from_be_bytes)
    }

    fn get_int32(&self) -> Result<i32, CodecError> {
        self.fixed().map(i32::from_be_bytes)
    }

    fn get_int64(&self) -> Result<i64, CodecError> {
        self.fixed().map(i64::from_be_bytes)
    }

    fn get_uint32(&self) -> Result<u32, CodecError> {
        self.fixed().map(u32::from_be_bytes)
    }

    fn get_float(&self) -> Result<f32, CodecError> {
        self.fixed().map(f32::from_be_bytes)
    }

    fn get_double(&self) -> Result<f64, CodecError> {
        self.fixed().map(f64::from_be_bytes)
    }

    fn get_string(&self) -> Result<&str, CodecError> {
        let payload = self.payload()?;
        let s = std::str::from_utf8(payload).map_err(|_| {
            MalformedValueError::literal(self.kind_name(), String::from_utf8_lossy(payload))
        })?;
        if self.cass_type.primary() == ValueKind::Ascii && !s.is_ascii() {
            return Err(MalformedValueError::literal("ascii", s).into());
        }

        Ok(s)
    }

    fn get_bytes(&self) -> Result<&[u8], CodecError> {
        self.payload()
    }

    fn get_decimal(&self) -> Result<(&[u8], i32), CodecError> {
        let payload = self.payload()?;
        let Some((scale, unscaled)) = payload.split_first_chunk::<4>() else {
            return Err(MalformedValueError::PayloadLength {
                what: "decimal",
                len: payload.len(),
            }
            .into());
        };

        Ok((unscaled, i32::from_be_bytes(*scale)))
    }

    fn get_uuid_string(&self) -> Result<String, CodecError> {
        let uuid = Uuid::from_slice(self.payload()?)?;
        Ok(uuid.to_string())
    }

    fn get_inet(&self) -> Result<IpAddr, CodecError> {
        let payload = self.payload()?;
        if let Ok(octets) = <[u8; 4]>::try_from(payload) {
            return Ok(IpAddr::V4(Ipv4Addr::from(octets)));
        }
        if let Ok(octets) = <[u8; 16]>::try_from(payload) {
            return Ok(IpAddr::V6(Ipv6Addr::from(octets)));
        }

        Err(MalformedValueError::PayloadLength {
            what: "inet",
            len: payload.len(),
        }
        .into())
    }

    fn elements(&self) -> Result<Vec<Self>, CodecError> {
        let mut reader = Reader::new(self.payload()?, self.kind_name());
        let count = reader.read_count()?;
        let element = self.subtype_or_unknown(0);

        let items = (0..count)
            .map(|_| Ok(Self::child(element.clone(), reader.read_item()?)))
            .collect::<Result<Vec<_>, CodecError>>()?;
        reader.finish()?;

        Ok(items)
    }

    fn entries(&self) -> Result<Vec<(Self, Self)>, CodecError> {
        let mut reader = Reader::new(self.payload()?, self.kind_name());
        let count = reader.read_count()?;
        let key = self.subtype_or_unknown(0);
        let value = self.subtype_or_unknown(1);

        let entries = (0..count)
            .map(|_| {
                let k = Self::child(key.clone(), reader.read_item()?);
                let v = Self::child(value.clone(), reader.read_item()?);
                Ok((k, v))
            })
            .collect::<Result<Vec<_>, CodecError>>()?;
        reader.finish()?;

        Ok(entries)
    }

    // Slots missing from the end of the payload read as NULL. Without slot
    // types every item in the payload becomes an untyped slot.
    fn fields(&self) -> Result<Vec<Self>, CodecError> {
        let mut reader = Reader::new(self.payload()?, self.kind_name());
        let slots = self.cass_type.subtypes();

        if slots.is_empty() {
            let mut fields = Vec::new();
            while !reader.is_empty() {
                fields.push(Self::child(CassType::UNKNOWN, reader.read_item()?));
            }
            return Ok(fields);
        }

        let fields = slots
            .iter()
            .map(|slot| {
                let item = if reader.is_empty() {
                    None
                } else {
                    reader.read_item()?
                };
                Ok(Self::child(slot.clone(), item))
            })
            .collect::<Result<Vec<_>, CodecError>>()?;
        reader.finish()?;

        Ok(fields)
    }
}

//
// Framing
//

pub(crate) fn write_item(buf: &mut Vec<u8>, item: Option<&[u8]>) {
    match item {
        Some(bytes) => {
            write_count(buf, bytes.len());
            buf.extend_from_slice(bytes);
        }
        None => buf.extend_from_slice(&(-1_i32).to_be_bytes()),
    }
}

// The encoder rejects text, blobs and collections whose length overflows
// the i32 prefix.
pub(crate) fn write_count(buf: &mut Vec<u8>, count: usize) {
    debug_assert!(i32::try_from(count).is_ok(), "length prefix overflow: {count}");
    let count = i32::try_from(count).unwrap_or(i32::MAX);
    buf.extend_from_slice(&count.to_be_bytes());
}

///
/// Reader
///

struct Reader<'a> {
    buf: &'a [u8],
    what: &'static str,
}

impl<'a> Reader<'a> {
    const fn new(buf: &'a [u8], what: &'static str) -> Self {
        Self { buf, what }
    }

    const fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    fn truncated(&self) -> CodecError {
        MalformedValueError::Truncated { what: self.what }.into()
    }

    fn finish(&self) -> Result<(), CodecError> {
        if self.buf.is_empty() {
            return Ok(());
        }

        Err(MalformedValueError::TrailingBytes {
            what: self.what,
            len: self.buf.len(),
        }
        .into())
    }

    fn read_i32(&mut self) -> Result<i32, CodecError> {
        let buf: &'a [u8] = self.buf;
        let (head, rest) = buf
            .split_first_chunk::<4>()
            .ok_or_else(|| self.truncated())?;
        self.buf = rest;

        Ok(i32::from_be_bytes(*head))
    }

    fn read_count(&mut self) -> Result<usize, CodecError> {
        let count = self.read_i32()?;
        usize::try_from(count).map_err(|_| {
            MalformedValueError::out_of_range(self.what, format!("negative item count {count}"))
                .into()
        })
    }

    fn read_item(&mut self) -> Result<Option<&'a [u8]>, CodecError> {
        let Ok(len) = usize::try_from(self.read_i32()?) else {
            return Ok(None);
        };
        let buf: &'a [u8] = self.buf;
        if buf.len() < len {
            return Err(self.truncated());
        }
        let (item, rest) = buf.split_at(len);
        self.buf = rest;

        Ok(Some(item))
    }
}
