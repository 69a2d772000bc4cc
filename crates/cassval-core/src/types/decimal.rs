use crate::{
    error::MalformedValueError,
    types::varint::{export_twos_complement, import_twos_complement},
};
use num_bigint::{BigInt, Sign};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

// Zero padding beyond this many digits switches `Display` to exponent form.
const MAX_PLAIN_PADDING: i64 = 64;

///
/// Decimal
///
/// Arbitrary-precision decimal: value == unscaled * 10^-scale.
///
/// Equality is on the representation, so `1.0` and `1.00` differ.
///

#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Decimal {
    unscaled: BigInt,
    scale: i32,
}

impl Decimal {
    #[must_use]
    pub fn new(unscaled: impl Into<BigInt>, scale: i32) -> Self {
        Self {
            unscaled: unscaled.into(),
            scale,
        }
    }

    /// Rebuild from the wire pair: two's-complement unscaled bytes and scale.
    #[must_use]
    pub fn from_wire(unscaled: &[u8], scale: i32) -> Self {
        Self::new(import_twos_complement(unscaled), scale)
    }

    #[must_use]
    pub const fn unscaled(&self) -> &BigInt {
        &self.unscaled
    }

    #[must_use]
    pub const fn scale(&self) -> i32 {
        self.scale
    }

    /// Unscaled value as minimal two's-complement bytes.
    #[must_use]
    pub fn unscaled_bytes(&self) -> Vec<u8> {
        export_twos_complement(&self.unscaled)
    }

    /// Parse `[-]digits[.digits][E[-]digits]`. The scale is the fraction
    /// length minus the exponent.
    pub fn parse(s: &str) -> Result<Self, MalformedValueError> {
        let err = || MalformedValueError::literal("decimal", s);

        let (negative, body) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };

        let (body, exponent) = match body.split_once(['E', 'e']) {
            Some((mantissa, exponent)) => (mantissa, parse_exponent(exponent).ok_or_else(err)?),
            None => (body, 0),
        };

        let (int_part, frac_part) = match body.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (body, ""),
        };

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(int_part)
            || !all_digits(frac_part)
            || int_part.len() + frac_part.len() == 0
        {
            return Err(err());
        }

        let scale = i64::try_from(frac_part.len())
            .ok()
            .and_then(|frac| frac.checked_sub(exponent))
            .and_then(|scale| i32::try_from(scale).ok())
            .ok_or_else(|| MalformedValueError::out_of_range("decimal", "scale outside i32"))?;
        let digits = format!("{int_part}{frac_part}");
        let magnitude = BigInt::from_str(&digits).map_err(|_| err())?;
        let unscaled = if negative { -magnitude } else { magnitude };

        Ok(Self { unscaled, scale })
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unscaled.sign() == Sign::Minus {
            f.write_str("-")?;
        }
        let digits = self.unscaled.magnitude().to_string();

        let scale = i64::from(self.scale);
        let len = i64::try_from(digits.len()).unwrap_or(i64::MAX);
        let padding = if scale < 0 { -scale } else { scale - len };
        if padding > MAX_PLAIN_PADDING {
            return write!(f, "{digits}E{}", -scale);
        }

        if self.scale <= 0 {
            f.write_str(&digits)?;
            if self.unscaled.sign() != Sign::NoSign {
                for _ in 0..self.scale.unsigned_abs() {
                    f.write_str("0")?;
                }
            }
            return Ok(());
        }

        let scale = self.scale.unsigned_abs() as usize;
        if digits.len() > scale {
            let (int_part, frac_part) = digits.split_at(digits.len() - scale);
            write!(f, "{int_part}.{frac_part}")
        } else {
            write!(f, "0.{digits:0>scale$}")
        }
    }
}

// Signed exponent digits after `E`.
fn parse_exponent(s: &str) -> Option<i64> {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    s.parse().ok()
}

impl FromStr for Decimal {
    type Err = MalformedValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Decimal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Decimal {
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

    #[test]
    fn parse_rejects_malformed_literals() {
        for input in ["", "-", ".", "123.456.789", "12vv34.56789", "1e", "1e+", "1e5.5", "--1"] {
            assert!(Decimal::parse(input).is_err(), "{input}");
        }
    }

    #[test]
    fn parse_tracks_fraction_length_as_scale() {
        let d = Decimal::parse("-12345.6789").unwrap();
        assert_eq!(d.scale(), 4);
        assert_eq!(d.unscaled(), &BigInt::from(-123_456_789));
        assert_eq!(d.to_string(), "-12345.6789");

        let d = Decimal::parse("1313123123.234234234234234234123").unwrap();
        assert_eq!(d.scale(), 21);
        assert_eq!(d.to_string(), "1313123123.234234234234234234123");

        let d = Decimal::parse("42").unwrap();
        assert_eq!(d.scale(), 0);
        assert_eq!(d.to_string(), "42");
    }

    #[test]
    fn display_places_point_by_scale() {
        assert_eq!(
            Decimal::new(131_312_312_323_423_423_i64, 11).to_string(),
            "1313123.12323423423"
        );
        assert_eq!(Decimal::new(5, 3).to_string(), "0.005");
        assert_eq!(Decimal::new(-5, 3).to_string(), "-0.005");
        assert_eq!(Decimal::new(5, -2).to_string(), "500");
        assert_eq!(Decimal::new(0, 2).to_string(), "0.00");
        assert_eq!(Decimal::new(0, -2).to_string(), "0");
    }

    #[test]
    fn extreme_scales_render_in_exponent_form() {
        let tiny = Decimal::new(-5, i32::MAX);
        assert_eq!(tiny.to_string(), "-5E-2147483647");
        assert_eq!(Decimal::parse(&tiny.to_string()).unwrap(), tiny);

        let huge = Decimal::new(7, i32::MIN);
        assert_eq!(huge.to_string(), "7E2147483648");
        assert_eq!(Decimal::parse(&huge.to_string()).unwrap(), huge);

        assert_eq!(Decimal::new(0, i32::MIN).to_string(), "0E2147483648");
    }

    #[test]
    fn parse_folds_exponent_into_scale() {
        let d = Decimal::parse("1.25E3").unwrap();
        assert_eq!(d.scale(), -1);
        assert_eq!(d.to_string(), "1250");

        assert_eq!(Decimal::parse("15e-3").unwrap(), Decimal::new(15, 3));
        assert!(Decimal::parse("1E99999999999").is_err());
    }

    #[test]
    fn wire_pair_round_trips() {
        let d = Decimal::parse("-0.0000129").unwrap();
        let back = Decimal::from_wire(&d.unscaled_bytes(), d.scale());
        assert_eq!(back, d);
    }

    #[test]
    fn serializes_as_string() {
        let d = Decimal::parse("3.1400").unwrap();
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, r#""3.1400""#);
        assert_eq!(serde_json::from_str::<Decimal>(&json).unwrap(), d);
    }
}
