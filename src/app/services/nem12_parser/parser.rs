//! Core NEM12 parser implementation
//!
//! This module provides the parser entry points and the per-call parse
//! context that dispatches each record line.

use std::io::BufRead;
use std::path::Path;
use tracing::{debug, info, warn};

use super::aggregate_builder::AggregateBuilder;
use super::boundary::BoundaryTracker;
use super::field_parsers::{parse_nmi, parse_quality, parse_reading_date, parse_unit, parse_volume};
use super::reader::{read_file_lines, read_lines};
use super::record_parser::{RawRecord, RecordType, classify_line};
use super::stats::{ParseResult, ParseStats};
use crate::app::models::{MeterRead, MeterVolume};
use crate::config::ParserConfig;
use crate::constants::{interval_fields, nmi_fields};
use crate::{Error, Result};

/// Parser for simplified NEM12 meter data
///
/// The parser only holds configuration. Every call builds its own parse
/// state, so one parser can be reused for any number of files and calls are
/// independent of each other.
#[derive(Debug, Clone, Default)]
pub struct Nem12Parser {
    config: ParserConfig,
}

impl Nem12Parser {
    /// Create a parser for the standard format
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with a validated custom configuration
    pub fn with_config(config: ParserConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse record lines into meter reads, one per NMI in first-seen order
    pub fn parse<I, S>(&self, lines: I) -> Result<Vec<MeterRead>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(self.parse_with_stats(lines)?.meter_reads)
    }

    /// Parse record lines and return the meter reads with parse statistics
    pub fn parse_with_stats<I, S>(&self, lines: I) -> Result<ParseResult>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut context = ParseContext::new(&self.config);

        for (index, line) in lines.into_iter().enumerate() {
            context.process_line(index + 1, line.as_ref())?;
        }

        context.finish()
    }

    /// Read all lines from `reader`, then parse them
    pub fn parse_reader<R: BufRead>(&self, reader: R) -> Result<ParseResult> {
        let lines = read_lines(reader)?;
        self.parse_with_stats(lines)
    }

    /// Read the file at `path`, then parse it
    pub fn parse_file(&self, path: &Path) -> Result<ParseResult> {
        info!("Parsing NEM12 file: {}", path.display());
        let lines = read_file_lines(path)?;
        self.parse_with_stats(lines)
    }
}

/// Mutable state for a single parse
struct ParseContext<'c> {
    config: &'c ParserConfig,
    boundaries: BoundaryTracker,
    builder: AggregateBuilder,
    stats: ParseStats,
}

impl<'c> ParseContext<'c> {
    fn new(config: &'c ParserConfig) -> Self {
        Self {
            config,
            boundaries: BoundaryTracker::new(),
            builder: AggregateBuilder::new(config.min_nmi_length),
            stats: ParseStats::new(),
        }
    }

    /// Process one line, skipping it on a recoverable error
    fn process_line(&mut self, line_number: usize, line: &str) -> Result<()> {
        self.stats.total_lines += 1;
        let record = classify_line(line, line_number, self.config.delimiter);

        match self.dispatch(&record) {
            Ok(()) => Ok(()),
            Err(e) if e.is_recoverable() => {
                self.skip(&record, e);
                Ok(())
            }
            Err(e) => {
                debug!("Aborting parse at line {}: {}", line_number, e);
                Err(e)
            }
        }
    }

    fn dispatch(&mut self, record: &RawRecord<'_>) -> Result<()> {
        record.check_field_count()?;

        match &record.record_type {
            RecordType::FileStart => {
                self.boundaries.record_start();
                Ok(())
            }
            RecordType::NmiDataDetails => self.handle_nmi_data_details(record),
            RecordType::IntervalData => self.handle_interval_data(record),
            RecordType::FileEnd => {
                self.boundaries.record_end();
                Ok(())
            }
            RecordType::Unknown(code) => Err(Error::unknown_record_type(code.as_str())),
        }
    }

    fn handle_nmi_data_details(&mut self, record: &RawRecord<'_>) -> Result<()> {
        let nmi = parse_nmi(record.field(nmi_fields::NMI), self.config.min_nmi_length)?;
        let unit = parse_unit(record.field(nmi_fields::UNIT))?;

        if self.builder.start_block(nmi, unit)? {
            debug!("Line {}: new NMI block {} ({})", record.line_number, nmi, unit);
        }
        self.stats.nmi_blocks += 1;
        Ok(())
    }

    fn handle_interval_data(&mut self, record: &RawRecord<'_>) -> Result<()> {
        let date = parse_reading_date(record.field(interval_fields::DATE))?;
        self.builder.require_current(record.line_number)?;
        let volume = parse_volume(record.field(interval_fields::VOLUME))?;
        let quality = parse_quality(record.field(interval_fields::QUALITY))?;

        let replaced = self.builder.append_volume(
            record.line_number,
            date,
            MeterVolume::new(volume, quality),
        )?;

        if let Some(previous) = replaced {
            debug!(
                "Line {}: volume for {} on {} replaces earlier value {}",
                record.line_number,
                self.builder.current_nmi().unwrap_or_default(),
                date,
                previous.volume
            );
            self.stats.volumes_replaced += 1;
        }
        self.stats.volumes_parsed += 1;
        Ok(())
    }

    fn skip(&mut self, record: &RawRecord<'_>, error: Error) {
        match error {
            Error::UnknownRecordType { .. } => {
                info!("Line {}: {}, record skipped", record.line_number, error)
            }
            _ => warn!("Line {}: {}, record skipped", record.line_number, error),
        }

        self.stats
            .record_skip(record.line_number, &error, self.config.max_recorded_errors);
    }

    /// Check the file boundaries and hand back the meter reads
    fn finish(mut self) -> Result<ParseResult> {
        self.stats.start_markers = self.boundaries.start_markers();
        self.stats.end_markers = self.boundaries.end_markers();

        if let Err(e) = self.boundaries.validate() {
            warn!(
                "Discarding {} meter reads: {} start and {} end markers found",
                self.builder.len(),
                self.stats.start_markers,
                self.stats.end_markers
            );
            return Err(e);
        }

        info!(
            "Parsed {} meter reads ({} volumes) from {} lines, {} skipped",
            self.builder.len(),
            self.stats.volumes_parsed,
            self.stats.total_lines,
            self.stats.records_skipped
        );

        Ok(ParseResult {
            meter_reads: self.builder.finish(),
            stats: self.stats,
        })
    }
}
