//! Start/end marker tracking
//!
//! The file is valid when the start and end markers together appear exactly
//! twice. Position is not checked, so two end markers and no start marker
//! also pass.

use crate::constants::EXPECTED_BOUNDARY_MARKERS;
use crate::{Error, Result};

/// Counts `100` and `900` records seen in a stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundaryTracker {
    start_markers: usize,
    end_markers: usize,
}

impl BoundaryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_start(&mut self) {
        self.start_markers += 1;
    }

    pub fn record_end(&mut self) {
        self.end_markers += 1;
    }

    pub fn start_markers(&self) -> usize {
        self.start_markers
    }

    pub fn end_markers(&self) -> usize {
        self.end_markers
    }

    /// Combined number of markers seen
    pub fn total(&self) -> usize {
        self.start_markers + self.end_markers
    }

    pub fn is_complete(&self) -> bool {
        self.total() == EXPECTED_BOUNDARY_MARKERS
    }

    /// Fail with [`Error::MalformedStream`] unless the marker count is exactly two
    pub fn validate(&self) -> Result<()> {
        if self.is_complete() {
            Ok(())
        } else {
            Err(Error::malformed_stream(self.start_markers, self.end_markers))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_of_each_is_complete() {
        let mut tracker = BoundaryTracker::new();
        tracker.record_start();
        tracker.record_end();
        assert!(tracker.is_complete());
        assert!(tracker.validate().is_ok());
    }

    #[test]
    fn test_missing_markers() {
        let mut tracker = BoundaryTracker::new();
        assert!(tracker.validate().is_err());

        tracker.record_start();
        match tracker.validate() {
            Err(Error::MalformedStream {
                start_markers,
                end_markers,
            }) => {
                assert_eq!(start_markers, 1);
                assert_eq!(end_markers, 0);
            }
            other => panic!("expected MalformedStream, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_markers() {
        let mut tracker = BoundaryTracker::new();
        tracker.record_start();
        tracker.record_start();
        tracker.record_end();
        assert_eq!(tracker.total(), 3);
        assert!(tracker.validate().is_err());
    }

    #[test]
    fn test_count_only_rule_accepts_two_end_markers() {
        let mut tracker = BoundaryTracker::new();
        tracker.record_end();
        tracker.record_end();
        assert!(tracker.validate().is_ok());
    }
}
