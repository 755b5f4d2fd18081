//! Minor/major currency unit conversion.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AmountError;

/// Minor units in one major unit. Fixed for every supported currency.
pub const MINOR_PER_MAJOR: i64 = 100;

/// Currencies the gateway settles in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    NGN,
    GHS,
    ZAR,
    KES,
    USD,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "NGN" => Ok(Currency::NGN),
            "GHS" => Ok(Currency::GHS),
            "ZAR" => Ok(Currency::ZAR),
            "KES" => Ok(Currency::KES),
            "USD" => Ok(Currency::USD),
            _ => Err(format!("Unknown currency: {}", s)),
        }
    }
}

/// An amount in the smallest denomination (kobo, pesewas, cents).
///
/// This is the unit the gateway returns and accepts.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MinorUnits(i64);

impl MinorUnits {
    pub fn new(minor: i64) -> Self {
        Self(minor)
    }

    /// Converts a major-unit amount (e.g. naira) to minor units exactly.
    ///
    /// `10.50` becomes 1050. Fails on a fraction finer than one minor unit
    /// or a result outside `i64`.
    pub fn from_major(major: Decimal) -> Result<Self, AmountError> {
        let minor = major
            .checked_mul(Decimal::from(MINOR_PER_MAJOR))
            .ok_or(AmountError::OutOfRange(major))?;
        if !minor.fract().is_zero() {
            return Err(AmountError::SubMinor(major));
        }
        minor.to_i64().map(Self).ok_or(AmountError::OutOfRange(major))
    }

    pub fn minor(&self) -> i64 {
        self.0
    }

    /// Major-unit value, truncating any fractional part (1050 → 10).
    pub fn major(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }
}

impl fmt::Display for MinorUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let major = (self.0 / MINOR_PER_MAJOR).abs();
        let minor = (self.0 % MINOR_PER_MAJOR).abs();
        write!(f, "{}{}.{:02}", sign, major, minor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_major_truncates() {
        assert_eq!(MinorUnits::new(1050).major(), 10);
        assert_eq!(MinorUnits::new(1099).major(), 10);
        assert_eq!(MinorUnits::new(100000).major(), 1000);
        assert_eq!(MinorUnits::new(99).major(), 0);
    }

    #[test]
    fn test_from_major() {
        assert_eq!(MinorUnits::from_major(Decimal::from(25)).unwrap().minor(), 2500);
        assert_eq!(MinorUnits::from_major(Decimal::new(1050, 2)).unwrap().minor(), 1050);
        assert_eq!(MinorUnits::from_major(Decimal::new(-75, 1)).unwrap().minor(), -750);

        let major: Decimal = "10.5".parse().unwrap();
        assert_eq!(MinorUnits::from_major(major).unwrap().minor(), 1050);
    }

    #[test]
    fn test_from_major_rejects_sub_minor_fraction() {
        let major = Decimal::new(10505, 3);
        assert_eq!(MinorUnits::from_major(major), Err(AmountError::SubMinor(major)));
    }

    #[test]
    fn test_from_major_out_of_range() {
        let major = Decimal::from(i64::MAX);
        assert_eq!(MinorUnits::from_major(major), Err(AmountError::OutOfRange(major)));
    }

    #[test]
    fn test_display() {
        assert_eq!(MinorUnits::new(1050).to_string(), "10.50");
        assert_eq!(MinorUnits::new(-5).to_string(), "-0.05");
    }

    #[test]
    fn test_currency_parse() {
        assert_eq!("ngn".parse::<Currency>().unwrap(), Currency::NGN);
        assert!("XYZ".parse::<Currency>().is_err());
        assert_eq!(Currency::default().to_string(), "NGN");
    }
}
