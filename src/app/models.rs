//! Core data models for NEM12 meter readings
//!
//! This module defines the meter read aggregate, the per-day volume entry and
//! the closed code sets for units of measure and quality flags.

use crate::constants::{MIN_NMI_LENGTH, quality_codes, unit_codes};
use crate::{Error, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Meter Read
// =============================================================================

/// All volume readings for one National Meter Identifier
///
/// Volumes are keyed by reading date. Appending a second volume for a date that
/// is already present replaces the earlier one. The total is kept as volumes
/// are appended, so it never leaves the range of [`Decimal`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeterRead {
    nmi: String,
    energy_unit: EnergyUnit,
    volumes: BTreeMap<NaiveDate, MeterVolume>,
    total_volume: Decimal,
}

impl MeterRead {
    /// Create an empty meter read, validating the NMI against the default length rule
    pub fn new(nmi: impl Into<String>, energy_unit: EnergyUnit) -> Result<Self> {
        Self::with_min_nmi_length(nmi, energy_unit, MIN_NMI_LENGTH)
    }

    /// Create an empty meter read with a custom minimum NMI length
    pub fn with_min_nmi_length(
        nmi: impl Into<String>,
        energy_unit: EnergyUnit,
        min_nmi_length: usize,
    ) -> Result<Self> {
        let nmi = nmi.into();
        validate_nmi(&nmi, min_nmi_length)?;

        Ok(Self {
            nmi,
            energy_unit,
            volumes: BTreeMap::new(),
            total_volume: Decimal::ZERO,
        })
    }

    pub fn nmi(&self) -> &str {
        &self.nmi
    }

    pub fn energy_unit(&self) -> EnergyUnit {
        self.energy_unit
    }

    /// Volumes in date order
    pub fn volumes(&self) -> &BTreeMap<NaiveDate, MeterVolume> {
        &self.volumes
    }

    pub fn volume_count(&self) -> usize {
        self.volumes.len()
    }

    pub fn volume_on(&self, date: NaiveDate) -> Option<&MeterVolume> {
        self.volumes.get(&date)
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.volumes.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.volumes.keys().next_back().copied()
    }

    /// Add a volume for a date, returning the volume it replaced if any
    ///
    /// Fails with [`Error::InvalidVolume`] and leaves the read unchanged when
    /// the new total would overflow.
    pub fn append_volume(
        &mut self,
        date: NaiveDate,
        volume: MeterVolume,
    ) -> Result<Option<MeterVolume>> {
        let base = match self.volumes.get(&date) {
            Some(previous) => self.total_volume.checked_sub(previous.volume),
            None => Some(self.total_volume),
        };

        let total = base
            .and_then(|base| base.checked_add(volume.volume))
            .ok_or_else(|| {
                let source = if volume.volume.is_sign_negative() {
                    rust_decimal::Error::LessThanMinimumPossibleValue
                } else {
                    rust_decimal::Error::ExceedsMaximumPossibleValue
                };
                Error::invalid_volume(volume.volume.to_string(), source)
            })?;

        self.total_volume = total;
        Ok(self.volumes.insert(date, volume))
    }

    /// Exact sum of all volumes
    pub fn total_volume(&self) -> Decimal {
        self.total_volume
    }
}

/// Check an NMI is non-empty and at least `min_length` characters long
pub fn validate_nmi(nmi: &str, min_length: usize) -> Result<()> {
    if nmi.is_empty() || nmi.chars().count() < min_length {
        return Err(Error::invalid_identifier(nmi));
    }
    Ok(())
}

// =============================================================================
// Meter Volume
// =============================================================================

/// A single day's volume with its quality flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeterVolume {
    pub volume: Decimal,
    pub quality: Quality,
}

impl MeterVolume {
    pub fn new(volume: Decimal, quality: Quality) -> Self {
        Self { volume, quality }
    }
}

// =============================================================================
// Energy Unit Enumeration
// =============================================================================

/// Unit of measure declared by a `200` record
///
/// Codes are matched exactly and case-sensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnergyUnit {
    Kwh,
    Mwh,
    Wh,
    Kvarh,
    Kvah,
    /// General supply import stream (kWh)
    E1,
}

impl EnergyUnit {
    /// The code as it appears in the file
    pub fn code(self) -> &'static str {
        match self {
            EnergyUnit::Kwh => unit_codes::KWH,
            EnergyUnit::Mwh => unit_codes::MWH,
            EnergyUnit::Wh => unit_codes::WH,
            EnergyUnit::Kvarh => unit_codes::KVARH,
            EnergyUnit::Kvah => unit_codes::KVAH,
            EnergyUnit::E1 => unit_codes::E1,
        }
    }

    pub fn all_values() -> [EnergyUnit; 6] {
        [
            EnergyUnit::Kwh,
            EnergyUnit::Mwh,
            EnergyUnit::Wh,
            EnergyUnit::Kvarh,
            EnergyUnit::Kvah,
            EnergyUnit::E1,
        ]
    }
}

impl FromStr for EnergyUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            unit_codes::KWH => Ok(EnergyUnit::Kwh),
            unit_codes::MWH => Ok(EnergyUnit::Mwh),
            unit_codes::WH => Ok(EnergyUnit::Wh),
            unit_codes::KVARH => Ok(EnergyUnit::Kvarh),
            unit_codes::KVAH => Ok(EnergyUnit::Kvah),
            unit_codes::E1 => Ok(EnergyUnit::E1),
            _ => Err(Error::invalid_unit(s)),
        }
    }
}

impl fmt::Display for EnergyUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// =============================================================================
// Quality Flag Enumeration
// =============================================================================

/// Quality method flag carried by a `300` record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quality {
    /// Actual meter reading
    Actual,
    /// Forward estimate
    Estimated,
    /// Final substitute
    FinalSubstitute,
    /// Substituted value
    Substituted,
    /// Null data
    Null,
}

impl Quality {
    pub fn code(self) -> &'static str {
        match self {
            Quality::Actual => quality_codes::ACTUAL,
            Quality::Estimated => quality_codes::ESTIMATED,
            Quality::FinalSubstitute => quality_codes::FINAL_SUBSTITUTE,
            Quality::Substituted => quality_codes::SUBSTITUTED,
            Quality::Null => quality_codes::NULL,
        }
    }

    /// Get human-readable description of this quality flag
    pub fn description(self) -> &'static str {
        match self {
            Quality::Actual => "Actual reading",
            Quality::Estimated => "Estimated reading",
            Quality::FinalSubstitute => "Final substituted reading",
            Quality::Substituted => "Substituted reading",
            Quality::Null => "Null reading",
        }
    }

    pub fn is_actual(self) -> bool {
        self == Quality::Actual
    }
}

impl FromStr for Quality {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            quality_codes::ACTUAL => Ok(Quality::Actual),
            quality_codes::ESTIMATED => Ok(Quality::Estimated),
            quality_codes::FINAL_SUBSTITUTE => Ok(Quality::FinalSubstitute),
            quality_codes::SUBSTITUTED => Ok(Quality::Substituted),
            quality_codes::NULL => Ok(Quality::Null),
            _ => Err(Error::invalid_quality(s)),
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
