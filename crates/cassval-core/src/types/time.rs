use crate::error::MalformedValueError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

const NANOS_PER_SECOND: i64 = 1_000_000_000;
const NANOS_PER_MINUTE: i64 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: i64 = 60 * NANOS_PER_MINUTE;

///
/// Time
///
/// CQL `time`: nanoseconds since midnight, no date and no zone.
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Time(i64);

impl Time {
    pub const NANOS_PER_DAY: i64 = 24 * NANOS_PER_HOUR;

    pub const MIDNIGHT: Self = Self(0);

    pub fn new(hours: u32, minutes: u32, seconds: u32, nanos: u32) -> Result<Self, MalformedValueError> {
        if hours >= 24 || minutes >= 60 || seconds >= 60 || nanos >= 1_000_000_000 {
            return Err(MalformedValueError::out_of_range(
                "time",
                format!("{hours}:{minutes}:{seconds}.{nanos} is not a time of day"),
            ));
        }

        let nanos = i64::from(hours) * NANOS_PER_HOUR
            + i64::from(minutes) * NANOS_PER_MINUTE
            + i64::from(seconds) * NANOS_PER_SECOND
            + i64::from(nanos);

        Self::from_nanos(nanos)
    }

    /// Wrap a nanosecond-of-day count; must lie in `0..NANOS_PER_DAY`.
    pub fn from_nanos(nanos: i64) -> Result<Self, MalformedValueError> {
        if !(0..Self::NANOS_PER_DAY).contains(&nanos) {
            return Err(MalformedValueError::out_of_range(
                "time",
                format!("{nanos}ns is outside a single day"),
            ));
        }

        Ok(Self(nanos))
    }

    #[must_use]
    pub const fn nanos(self) -> i64 {
        self.0
    }

    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const fn hours(self) -> u32 {
        (self.0 / NANOS_PER_HOUR) as u32
    }

    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const fn minutes(self) -> u32 {
        (self.0 % NANOS_PER_HOUR / NANOS_PER_MINUTE) as u32
    }

    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const fn seconds(self) -> u32 {
        (self.0 % NANOS_PER_MINUTE / NANOS_PER_SECOND) as u32
    }

    /// Sub-second part in nanoseconds.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const fn subsec_nanos(self) -> u32 {
        (self.0 % NANOS_PER_SECOND) as u32
    }

    /// Parse `hh:mm:ss[.fffffffff]`. A short fraction is right-padded to
    /// nine digits, so `.3` is 300ms.
    pub fn parse(s: &str) -> Result<Self, MalformedValueError> {
        let err = || MalformedValueError::literal("time", s);

        let (hms, fraction) = match s.split_once('.') {
            Some((hms, fraction)) => (hms, Some(fraction)),
            None => (s, None),
        };

        let mut fields = hms.split(':');
        let (Some(h), Some(m), Some(sec), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(err());
        };

        let number = |part: &str, max_len: usize| -> Result<u32, MalformedValueError> {
            if part.is_empty() || part.len() > max_len || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(err());
            }
            part.parse().map_err(|_| err())
        };

        let nanos = match fraction {
            Some(f) => {
                let padded = format!("{f:0<9}");
                number(&padded, 9)?
            }
            None => 0,
        };

        Self::new(number(h, 2)?, number(m, 2)?, number(sec, 2)?, nanos)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}.{:09}",
            self.hours(),
            self.minutes(),
            self.seconds(),
            self.subsec_nanos()
        )
    }
}

impl FromStr for Time {
    type Err = MalformedValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Time {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Time {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
