//! Field parsing utilities for NEM12 records
//!
//! This module provides helper functions for parsing and validating the
//! individual fields of `200` and `300` records.

use crate::app::models::{EnergyUnit, Quality, validate_nmi};
use crate::constants::{DATE_FIELD_WIDTH, DEFAULT_DATE_FORMAT};
use crate::{Error, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Validate an NMI field, returning it unchanged
pub fn parse_nmi(value: &str, min_length: usize) -> Result<&str> {
    validate_nmi(value, min_length)?;
    Ok(value)
}

/// Parse a unit of measure code
pub fn parse_unit(value: &str) -> Result<EnergyUnit> {
    EnergyUnit::from_str(value)
}

/// Parse a `YYYYMMDD` reading date
///
/// The field must be exactly eight ASCII digits and name a real calendar day.
pub fn parse_reading_date(value: &str) -> Result<NaiveDate> {
    if value.len() != DATE_FIELD_WIDTH || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::invalid_date(value));
    }

    NaiveDate::parse_from_str(value, DEFAULT_DATE_FORMAT).map_err(|_| Error::invalid_date(value))
}

/// Parse a volume as an exact decimal
///
/// Plain notation is tried first, then scientific notation (`1.5E+2`).
pub fn parse_volume(value: &str) -> Result<Decimal> {
    Decimal::from_str_exact(value).or_else(|plain_err| {
        if value.contains(['e', 'E']) {
            Decimal::from_scientific(value).map_err(|e| Error::invalid_volume(value, e))
        } else {
            Err(Error::invalid_volume(value, plain_err))
        }
    })
}

/// Parse a quality flag
pub fn parse_quality(value: &str) -> Result<Quality> {
    Quality::from_str(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nmi() {
        assert_eq!(parse_nmi("6123456789", 10).unwrap(), "6123456789");
        assert_eq!(parse_nmi("NEM1201009", 10).unwrap(), "NEM1201009");
        assert!(matches!(
            parse_nmi("12345", 10),
            Err(Error::InvalidIdentifier { .. })
        ));
        assert!(parse_nmi("", 10).is_err());
    }

    #[test]
    fn test_parse_reading_date() {
        assert_eq!(
            parse_reading_date("20161113").unwrap(),
            NaiveDate::from_ymd_opt(2016, 11, 13).unwrap()
        );
        assert_eq!(
            parse_reading_date("20160229").unwrap(),
            NaiveDate::from_ymd_opt(2016, 2, 29).unwrap()
        );
    }

    #[test]
    fn test_parse_reading_date_rejects_bad_values() {
        for value in [
            "",
            "2016111",
            "201611133",
            "2016-11-13",
            "20161313",
            "20161132",
            "20170229",
            "2016111A",
            "+2016111",
            "13112016",
        ] {
            assert!(
                matches!(parse_reading_date(value), Err(Error::InvalidDate { .. })),
                "expected '{}' to be rejected",
                value
            );
        }
    }

    #[test]
    fn test_parse_volume_exact() {
        assert_eq!(parse_volume("-50.8").unwrap(), Decimal::new(-508, 1));
        assert_eq!(parse_volume("0").unwrap(), Decimal::ZERO);
        assert_eq!(parse_volume("25.300").unwrap(), Decimal::new(253, 1));
        assert_eq!(parse_volume("1.5E+2").unwrap(), Decimal::new(150, 0));
    }

    #[test]
    fn test_parse_volume_precision_limit() {
        assert_eq!(
            parse_volume("0.0000000000000000000000000001").unwrap(),
            Decimal::new(1, 28)
        );
        assert!(matches!(
            parse_volume("0.00000000000000000000000000001"),
            Err(Error::InvalidVolume { .. })
        ));
    }

    #[test]
    fn test_parse_volume_rejects_non_numbers() {
        for value in ["", "abc", "1,5", "--1", "NaN"] {
            assert!(
                matches!(parse_volume(value), Err(Error::InvalidVolume { .. })),
                "expected '{}' to be rejected",
                value
            );
        }
    }

    #[test]
    fn test_parse_unit_and_quality() {
        assert_eq!(parse_unit("KWH").unwrap(), EnergyUnit::Kwh);
        assert_eq!(parse_unit("E1").unwrap(), EnergyUnit::E1);
        assert!(matches!(parse_unit("XYZ"), Err(Error::InvalidUnit { .. })));

        assert_eq!(parse_quality("A").unwrap(), Quality::Actual);
        assert_eq!(parse_quality("E").unwrap(), Quality::Estimated);
        assert!(matches!(parse_quality(""), Err(Error::InvalidQuality { .. })));
    }
}
