//! Record line classification for NEM12 files
//!
//! This module splits a raw line into fields and identifies its record type
//! from the leading code.

use crate::constants::{field_counts, record_codes};
use crate::{Error, Result};
use std::fmt;

/// Record type identified by the first field of a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordType {
    /// `100` start of file
    FileStart,
    /// `200` NMI block header
    NmiDataDetails,
    /// `300` dated volume reading
    IntervalData,
    /// `900` end of file
    FileEnd,
    /// Any other leading code
    Unknown(String),
}

impl RecordType {
    pub fn from_code(code: &str) -> Self {
        match code {
            record_codes::FILE_START => RecordType::FileStart,
            record_codes::NMI_DATA_DETAILS => RecordType::NmiDataDetails,
            record_codes::INTERVAL_DATA => RecordType::IntervalData,
            record_codes::FILE_END => RecordType::FileEnd,
            other => RecordType::Unknown(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            RecordType::FileStart => record_codes::FILE_START,
            RecordType::NmiDataDetails => record_codes::NMI_DATA_DETAILS,
            RecordType::IntervalData => record_codes::INTERVAL_DATA,
            RecordType::FileEnd => record_codes::FILE_END,
            RecordType::Unknown(code) => code.as_str(),
        }
    }

    /// Minimum number of fields (including the code) this record type needs
    pub fn min_fields(&self) -> usize {
        match self {
            RecordType::FileStart => field_counts::FILE_START,
            RecordType::NmiDataDetails => field_counts::NMI_DATA_DETAILS,
            RecordType::IntervalData => field_counts::INTERVAL_DATA,
            RecordType::FileEnd => field_counts::FILE_END,
            RecordType::Unknown(_) => 1,
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A classified line with its raw fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord<'a> {
    /// 1-based line number in the input stream
    pub line_number: usize,
    pub record_type: RecordType,
    pub fields: Vec<&'a str>,
}

impl<'a> RawRecord<'a> {
    /// Field at `index`, or an empty string past the end
    pub fn field(&self, index: usize) -> &'a str {
        self.fields.get(index).copied().unwrap_or("")
    }

    /// Check the record carries enough fields for its type
    pub fn check_field_count(&self) -> Result<()> {
        let expected = self.record_type.min_fields();
        if self.fields.len() < expected {
            return Err(Error::malformed_record(
                self.record_type.code(),
                expected,
                self.fields.len(),
            ));
        }
        Ok(())
    }
}

/// Split a line on `delimiter` and classify it by its first field
///
/// A trailing carriage return is removed first and trailing empty fields are
/// dropped, so `300,20161113,-50.8,` counts as three fields. Other fields are
/// kept verbatim.
pub fn classify_line(line: &str, line_number: usize, delimiter: char) -> RawRecord<'_> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let mut fields: Vec<&str> = line.split(delimiter).collect();
    while fields.len() > 1 && fields.last().is_some_and(|field| field.is_empty()) {
        fields.pop();
    }
    let record_type = RecordType::from_code(fields[0]);

    RawRecord {
        line_number,
        record_type,
        fields,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_codes() {
        assert_eq!(classify_line("100", 1, ',').record_type, RecordType::FileStart);
        assert_eq!(
            classify_line("200,6123456789,KWH", 2, ',').record_type,
            RecordType::NmiDataDetails
        );
        assert_eq!(
            classify_line("300,20161113,-50.8,A", 3, ',').record_type,
            RecordType::IntervalData
        );
        assert_eq!(classify_line("900", 4, ',').record_type, RecordType::FileEnd);
    }

    #[test]
    fn test_classify_unknown_code() {
        let record = classify_line("400,1,2", 5, ',');
        assert_eq!(record.record_type, RecordType::Unknown("400".to_string()));
        assert_eq!(record.record_type.code(), "400");

        let blank = classify_line("", 6, ',');
        assert_eq!(blank.record_type, RecordType::Unknown(String::new()));
    }

    #[test]
    fn test_codes_are_not_trimmed() {
        assert_eq!(
            classify_line(" 100", 1, ',').record_type,
            RecordType::Unknown(" 100".to_string())
        );
    }

    #[test]
    fn test_strips_carriage_return() {
        let record = classify_line("300,20161113,-50.8,A\r", 3, ',');
        assert_eq!(record.field(3), "A");

        let end = classify_line("900\r", 9, ',');
        assert_eq!(end.record_type, RecordType::FileEnd);
    }

    #[test]
    fn test_field_count_check() {
        assert!(classify_line("300,20161113,-50.8,A", 1, ',')
            .check_field_count()
            .is_ok());
        assert!(classify_line("300,20161113,-50.8,A,extra", 1, ',')
            .check_field_count()
            .is_ok());

        let short = classify_line("300,20161113", 1, ',');
        match short.check_field_count() {
            Err(Error::MalformedRecord {
                record_type,
                expected,
                found,
            }) => {
                assert_eq!(record_type, "300");
                assert_eq!(expected, 4);
                assert_eq!(found, 2);
            }
            other => panic!("expected MalformedRecord, got {:?}", other),
        }

        assert!(classify_line("200,6123456789", 1, ',')
            .check_field_count()
            .is_err());
    }

    #[test]
    fn test_empty_nmi_keeps_field_position() {
        let record = classify_line("200,,KWH", 1, ',');
        assert!(record.check_field_count().is_ok());
        assert_eq!(record.field(1), "");
        assert_eq!(record.field(2), "KWH");
    }

    #[test]
    fn test_custom_delimiter() {
        let record = classify_line("300|20161113|-50.8|A", 1, '|');
        assert_eq!(record.record_type, RecordType::IntervalData);
        assert_eq!(record.field(2), "-50.8");
    }

    #[test]
    fn test_trailing_empty_fields_are_dropped() {
        let record = classify_line("300,20161113,-50.8,", 1, ',');
        assert_eq!(record.fields, vec!["300", "20161113", "-50.8"]);
        assert!(matches!(
            record.check_field_count(),
            Err(Error::MalformedRecord { found: 3, .. })
        ));

        let header = classify_line("200,6123456789,,\r", 2, ',');
        assert_eq!(header.fields.len(), 2);
        assert!(header.check_field_count().is_err());

        let padded = classify_line("300,20161113,-50.8,A,,", 3, ',');
        assert_eq!(padded.fields.len(), 4);
        assert!(padded.check_field_count().is_ok());

        assert_eq!(classify_line(",,", 4, ',').fields, vec![""]);
    }
}
