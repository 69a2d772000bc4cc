use crate::error::MalformedValueError;
use derive_more::{Deref, Display};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use uuid::Uuid as WrappedUuid;

///
/// Uuid
///
/// 16-byte identifier backing both CQL `uuid` and `timeuuid`.
///

#[derive(Clone, Copy, Debug, Default, Deref, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Uuid(WrappedUuid);

impl Uuid {
    pub const NIL: Self = Self(WrappedUuid::nil());

    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(WrappedUuid::from_bytes(bytes))
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }

    /// Version nibble (high nibble of byte 6). 1 is time-based.
    #[must_use]
    pub const fn version(&self) -> u8 {
        self.0.as_bytes()[6] >> 4
    }

    #[must_use]
    pub const fn is_time_based(&self) -> bool {
        self.version() == 1
    }

    /// Parse the canonical hyphenated form only: 36 characters with dashes
    /// at 8, 13, 18 and 23. Hex digits may be either case.
    pub fn parse(s: &str) -> Result<Self, MalformedValueError> {
        let err = || MalformedValueError::literal("uuid", s);

        let bytes = s.as_bytes();
        if bytes.len() != 36 || [8, 13, 18, 23].iter().any(|&i| bytes[i] != b'-') {
            return Err(err());
        }

        WrappedUuid::try_parse(s).map(Self).map_err(|_| err())
    }

    /// Build from a wire payload; anything other than 16 bytes is rejected.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, MalformedValueError> {
        WrappedUuid::from_slice(bytes)
            .map(Self)
            .map_err(|_| MalformedValueError::PayloadLength {
                what: "uuid",
                len: bytes.len(),
            })
    }
}

impl From<WrappedUuid> for Uuid {
    fn from(uuid: WrappedUuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for Uuid {
    type Err = MalformedValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Uuid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Uuid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIME_BASED: &str = "9ecc5dd0-a548-11e5-83b1-dfa924dad615";
    const RANDOM: &str = "f0d07136-62f9-4d18-a6ce-cd5f4beb4348";

    #[test]
    fn parse_round_trips_through_display() {
        for s in [TIME_BASED, RANDOM, "97294c90-a549-11e5-83b1-dfa924dad615"] {
            assert_eq!(Uuid::parse(s).unwrap().to_string(), s);
        }
    }

    #[test]
    fn version_comes_from_byte_six() {
        assert_eq!(Uuid::parse(TIME_BASED).unwrap().version(), 1);
        assert_eq!(
            Uuid::parse("97294c90-a549-11e5-83b1-dfa924dad615")
                .unwrap()
                .version(),
            1
        );
        assert_eq!(Uuid::parse(RANDOM).unwrap().version(), 4);
        assert!(!Uuid::parse(RANDOM).unwrap().is_time_based());
    }

    #[test]
    fn parse_accepts_upper_case() {
        let upper = Uuid::parse(&RANDOM.to_uppercase()).unwrap();
        assert_eq!(upper, Uuid::parse(RANDOM).unwrap());
    }

    #[test]
    fn parse_rejects_non_canonical_forms() {
        for input in [
            "",
            "f0d0713662f94d18a6cecd5f4beb4348",
            "{f0d07136-62f9-4d18-a6ce-cd5f4beb4348}",
            "f0d07136-62f94-d18-a6ce-cd5f4beb4348",
            "f0d07136-62f9-4d18-a6ce-cd5f4beb434g",
            "urn:uuid:f0d07136-62f9-4d18-a6ce-cd5f4beb4348",
        ] {
            assert!(Uuid::parse(input).is_err(), "{input}");
        }
    }

    #[test]
    fn from_slice_checks_length() {
        assert!(Uuid::from_slice(&[0; 15]).is_err());
        assert_eq!(Uuid::from_slice(&[0; 16]).unwrap(), Uuid::NIL);
    }
}
