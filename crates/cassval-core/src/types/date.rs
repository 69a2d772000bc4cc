use crate::error::MalformedValueError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};
use time::{Date as TimeDate, Duration as TimeDuration, Month};

///
/// Date
///
/// CQL `date`: unsigned day count with 1970-01-01 at 2^31.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Date(u32);

impl Date {
    pub const EPOCH: Self = Self(1 << 31);
    pub const MIN: Self = Self(u32::MIN);
    pub const MAX: Self = Self(u32::MAX);

    const EPOCH_OFFSET: i64 = 1 << 31;

    const fn epoch_date() -> TimeDate {
        match TimeDate::from_calendar_date(1970, Month::January, 1) {
            Ok(d) => d,
            Err(_) => unreachable!(),
        }
    }

    /// Build from calendar parts, rejecting dates that do not exist.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, MalformedValueError> {
        let month = Month::try_from(month)
            .map_err(|_| MalformedValueError::out_of_range("date", format!("month {month}")))?;
        let date = TimeDate::from_calendar_date(year, month, day).map_err(|_| {
            MalformedValueError::out_of_range("date", format!("{year}-{month}-{day}"))
        })?;

        Ok(Self::from_time_date(date))
    }

    #[must_use]
    pub const fn from_raw(days: u32) -> Self {
        Self(days)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Signed day offset from 1970-01-01.
    #[must_use]
    pub const fn days_since_epoch(self) -> i64 {
        self.0 as i64 - Self::EPOCH_OFFSET
    }

    #[must_use]
    pub fn from_days_since_epoch(days: i64) -> Option<Self> {
        u32::try_from(days + Self::EPOCH_OFFSET).ok().map(Self)
    }

    /// Calendar date, if the day count lies inside the supported year range.
    #[must_use]
    pub fn to_time_date(self) -> Option<TimeDate> {
        Self::epoch_date().checked_add(TimeDuration::days(self.days_since_epoch()))
    }

    /// Parse `yyyy-mm-dd`; month and day may use one or two digits.
    pub fn parse(s: &str) -> Result<Self, MalformedValueError> {
        let err = || MalformedValueError::literal("date", s);

        let mut parts = s.split('-');
        let (Some(y), Some(m), Some(d), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(err());
        };

        let numeric = |part: &str, max_len: usize| {
            !part.is_empty() && part.len() <= max_len && part.bytes().all(|b| b.is_ascii_digit())
        };
        if y.len() != 4 || !numeric(y, 4) || !numeric(m, 2) || !numeric(d, 2) {
            return Err(err());
        }

        let year = y.parse().map_err(|_| err())?;
        let month = m.parse().map_err(|_| err())?;
        let day = d.parse().map_err(|_| err())?;

        Self::new(year, month, day).map_err(|_| err())
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn from_time_date(date: TimeDate) -> Self {
        let days = (date - Self::epoch_date()).whole_days();
        Self((days + Self::EPOCH_OFFSET) as u32)
    }
}

impl Default for Date {
    fn default() -> Self {
        Self::EPOCH
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_time_date() {
            Some(date) => write!(
                f,
                "{:04}-{:02}-{:02}",
                date.year(),
                u8::from(date.month()),
                date.day()
            ),
            None => write!(f, "{}", self.days_since_epoch()),
        }
    }
}

impl FromStr for Date {
    type Err = MalformedValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Date {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(|_| serde::de::Error::custom(format!("invalid date: {s}")))
    }
}
