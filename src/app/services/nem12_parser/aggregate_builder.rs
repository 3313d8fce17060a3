//! Grouping of volume readings under their NMI block
//!
//! Each `200` record selects the meter read that subsequent `300` records are
//! appended to. A header repeating an earlier NMI and unit reopens that meter
//! read instead of creating a second one, so the output holds one meter read
//! per distinct header in the order each was first declared.

use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::debug;

use crate::app::models::{EnergyUnit, MeterRead, MeterVolume};
use crate::{Error, Result};

/// Builds the ordered list of meter reads for one parse
#[derive(Debug)]
pub struct AggregateBuilder {
    reads: Vec<MeterRead>,
    index_by_header: HashMap<(String, EnergyUnit), usize>,
    current: Option<usize>,
    min_nmi_length: usize,
}

impl AggregateBuilder {
    pub fn new(min_nmi_length: usize) -> Self {
        Self {
            reads: Vec::new(),
            index_by_header: HashMap::new(),
            current: None,
            min_nmi_length,
        }
    }

    /// Open the block for `nmi`, making it the target of later volumes
    ///
    /// Returns `true` when a new meter read was created and `false` when an
    /// existing one with the same NMI and unit was reopened.
    pub fn start_block(&mut self, nmi: &str, energy_unit: EnergyUnit) -> Result<bool> {
        let key = (nmi.to_string(), energy_unit);
        if let Some(&index) = self.index_by_header.get(&key) {
            debug!("Reopening NMI block {} ({})", nmi, energy_unit);
            self.current = Some(index);
            return Ok(false);
        }

        let read = MeterRead::with_min_nmi_length(nmi, energy_unit, self.min_nmi_length)?;
        let index = self.reads.len();
        self.reads.push(read);
        self.index_by_header.insert(key, index);
        self.current = Some(index);
        Ok(true)
    }

    /// NMI of the block that volumes are currently appended to
    pub fn current_nmi(&self) -> Option<&str> {
        self.current.map(|index| self.reads[index].nmi())
    }

    /// Fail with [`Error::OrphanVolume`] when no block has been opened yet
    pub fn require_current(&self, line_number: usize) -> Result<()> {
        match self.current {
            Some(_) => Ok(()),
            None => Err(Error::orphan_volume(line_number)),
        }
    }

    /// Append a volume to the current block
    ///
    /// Returns the volume it replaced when the date was already present.
    pub fn append_volume(
        &mut self,
        line_number: usize,
        date: NaiveDate,
        volume: MeterVolume,
    ) -> Result<Option<MeterVolume>> {
        let index = self
            .current
            .ok_or_else(|| Error::orphan_volume(line_number))?;
        self.reads[index].append_volume(date, volume)
    }

    pub fn len(&self) -> usize {
        self.reads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reads.is_empty()
    }

    pub fn finish(self) -> Vec<MeterRead> {
        self.reads
    }
}
