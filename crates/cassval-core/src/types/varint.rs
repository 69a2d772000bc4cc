use crate::error::MalformedValueError;
use derive_more::{Deref, Display, From};
use num_bigint::{BigInt, BigUint, Sign};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

///
/// Varint
///
/// Arbitrary-precision signed integer carried as minimal big-endian
/// two's-complement on the wire.
///

#[derive(Clone, Debug, Default, Deref, Display, Eq, From, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Varint(BigInt);

impl Varint {
    #[must_use]
    pub const fn new(value: BigInt) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(import_twos_complement(bytes))
    }

    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        export_twos_complement(&self.0)
    }

    #[must_use]
    pub fn into_inner(self) -> BigInt {
        self.0
    }
}

impl From<i64> for Varint {
    fn from(n: i64) -> Self {
        Self(BigInt::from(n))
    }
}

impl FromStr for Varint {
    type Err = MalformedValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BigInt::from_str(s)
            .map(Self)
            .map_err(|_| MalformedValueError::literal("varint", s))
    }
}

impl Serialize for Varint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Varint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Decode big-endian two's-complement bytes. Empty input is zero.
#[must_use]
pub fn import_twos_complement(bytes: &[u8]) -> BigInt {
    let Some(&first) = bytes.first() else {
        return BigInt::default();
    };

    let magnitude = BigInt::from(BigUint::from_bytes_be(bytes));
    if first & 0x80 == 0 {
        return magnitude;
    }

    magnitude - modulus(bytes.len())
}

/// Encode as minimal big-endian two's-complement.
#[must_use]
pub fn export_twos_complement(n: &BigInt) -> Vec<u8> {
    match n.sign() {
        Sign::NoSign => vec![0x00],

        Sign::Plus => {
            let mut bytes = n.magnitude().to_bytes_be();
            if bytes[0] & 0x80 != 0 {
                bytes.insert(0, 0x00);
            }
            bytes
        }

        Sign::Minus => {
            let magnitude = n.magnitude();
            let bits = magnitude.bits();

            // -2^(8k-1) is the one negative magnitude that fits k bytes exactly
            let exact_power = bits % 8 == 0 && magnitude.trailing_zeros() == Some(bits - 1);
            let len = if exact_power { bits / 8 } else { bits / 8 + 1 };
            let len = usize::try_from(len).unwrap_or(usize::MAX);

            let complement = modulus(len) + n;
            complement.magnitude().to_bytes_be()
        }
    }
}

// 2^(8 * len)
fn modulus(len: usize) -> BigInt {
    BigInt::from(1u8) << (8 * len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn enc(n: i64) -> Vec<u8> {
        export_twos_complement(&BigInt::from(n))
    }

    #[test]
    fn encodes_boundary_values() {
        assert_eq!(enc(0), [0x00]);
        assert_eq!(enc(1), [0x01]);
        assert_eq!(enc(-1), [0xFF]);
        assert_eq!(enc(127), [0x7F]);
        assert_eq!(enc(128), [0x00, 0x80]);
        assert_eq!(enc(-128), [0x80]);
        assert_eq!(enc(-129), [0xFF, 0x7F]);
        assert_eq!(enc(-255), [0xFF, 0x01]);
        assert_eq!(enc(-256), [0xFF, 0x00]);
        assert_eq!(enc(32_767), [0x7F, 0xFF]);
        assert_eq!(enc(-32_768), [0x80, 0x00]);
        assert_eq!(enc(i64::MIN), i64::MIN.to_be_bytes());
    }

    #[test]
    fn decodes_sign_from_top_bit() {
        assert_eq!(import_twos_complement(&[]), BigInt::from(0));
        assert_eq!(import_twos_complement(&[0x80]), BigInt::from(-128));
        assert_eq!(import_twos_complement(&[0x00, 0x80]), BigInt::from(128));
        assert_eq!(import_twos_complement(&[0xFF, 0xFF]), BigInt::from(-1));
    }

    #[test]
    fn large_values_round_trip() {
        let n: BigInt = "-340282366920938463463374607431768211456".parse().unwrap();
        let bytes = export_twos_complement(&n);
        assert_eq!(bytes.len(), 17);
        assert_eq!(import_twos_complement(&bytes), n);
    }

    #[test]
    fn varint_parses_and_serializes_as_string() {
        let v: Varint = "-12345678901234567890".parse().unwrap();
        assert_eq!(
            serde_json::to_string(&v).unwrap(),
            r#""-12345678901234567890""#
        );
        assert!("12a".parse::<Varint>().is_err());
    }

    proptest! {
        #[test]
        fn matches_minimal_signed_encoding(bytes in proptest::collection::vec(any::<u8>(), 1..24)) {
            let n = BigInt::from_signed_bytes_be(&bytes);
            prop_assert_eq!(export_twos_complement(&n), n.to_signed_bytes_be());
        }

        #[test]
        fn decode_inverts_encode(bytes in proptest::collection::vec(any::<u8>(), 1..24)) {
            let n = BigInt::from_signed_bytes_be(&bytes);
            prop_assert_eq!(import_twos_complement(&export_twos_complement(&n)), n);
        }

        #[test]
        fn encode_inverts_decode_for_minimal_input(n in any::<i128>()) {
            let minimal = BigInt::from(n).to_signed_bytes_be();
            prop_assert_eq!(export_twos_complement(&import_twos_complement(&minimal)), minimal);
        }
    }
}
