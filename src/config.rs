//! Configuration management and validation.
//!
//! Provides the parser configuration. The defaults describe the simplified
//! NEM12 format exactly; the builders exist for feeds that use a different
//! delimiter or a different NMI length rule.

use crate::constants::{DEFAULT_DELIMITER, MIN_NMI_LENGTH};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default cap on recoverable error messages kept in [`crate::ParseStats`]
pub const DEFAULT_MAX_RECORDED_ERRORS: usize = 1000;

/// Configuration for [`crate::Nem12Parser`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Field delimiter within a record line
    pub delimiter: char,

    /// Shortest NMI accepted in a `200` record
    pub min_nmi_length: usize,

    /// Maximum number of recoverable error messages retained in the statistics
    pub max_recorded_errors: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            min_nmi_length: MIN_NMI_LENGTH,
            max_recorded_errors: DEFAULT_MAX_RECORDED_ERRORS,
        }
    }
}

impl ParserConfig {
    /// Create configuration with a custom delimiter
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Create configuration with a custom minimum NMI length
    pub fn with_min_nmi_length(mut self, min_nmi_length: usize) -> Self {
        self.min_nmi_length = min_nmi_length;
        self
    }

    /// Create configuration with a custom cap on retained error messages
    pub fn with_max_recorded_errors(mut self, max_recorded_errors: usize) -> Self {
        self.max_recorded_errors = max_recorded_errors;
        self
    }

    /// Validate configuration values
    ///
    /// The delimiter must not be a character that can appear inside a date,
    /// volume or code field.
    pub fn validate(&self) -> Result<()> {
        let d = self.delimiter;
        if d.is_ascii_alphanumeric() || d == '.' || d == '-' || d == '+' || d == '\r' || d == '\n'
        {
            return Err(Error::configuration(format!(
                "Delimiter {:?} collides with record field content",
                d
            )));
        }

        if self.min_nmi_length == 0 {
            return Err(Error::configuration(
                "Minimum NMI length must be at least 1",
            ));
        }

        debug!(
            "Parser configuration valid: delimiter={:?}, min_nmi_length={}",
            self.delimiter, self.min_nmi_length
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ParserConfig::default();
        assert_eq!(config.delimiter, ',');
        assert_eq!(config.min_nmi_length, 10);
        assert_eq!(config.max_recorded_errors, DEFAULT_MAX_RECORDED_ERRORS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let config = ParserConfig::default()
            .with_delimiter('|')
            .with_min_nmi_length(11)
            .with_max_recorded_errors(5);

        assert_eq!(config.delimiter, '|');
        assert_eq!(config.min_nmi_length, 11);
        assert_eq!(config.max_recorded_errors, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_delimiter_inside_fields() {
        for delimiter in ['.', '-', '7', 'A'] {
            let config = ParserConfig::default().with_delimiter(delimiter);
            assert!(matches!(
                config.validate(),
                Err(Error::Configuration { .. })
            ));
        }
    }

    #[test]
    fn test_rejects_zero_nmi_length() {
        let config = ParserConfig::default().with_min_nmi_length(0);
        assert!(config.validate().is_err());
    }
}
