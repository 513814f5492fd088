//! Log extraction: free-text tool output to typed run tables
//!
//! The external tool reports progress as loosely structured text. Each line
//! is normalized ([`markers::normalize`]) and classified by prefix against
//! the marker rule table ([`markers::MARKER_RULES`]). Every marker family is
//! a parallel positional sequence: the k-th `Iteration:` line and the k-th
//! `Highest Network Fitness:` line belong to the same record. The source
//! format guarantees equal family lengths; a log where they diverge is
//! malformed and extraction fails for that trial.
//!
//! A line starting with `fitness` opens the coverage-summary block: that
//! header line plus a fixed number of following lines are captured verbatim
//! as CSV text. The window size is an explicit parameter (the tool emits a
//! header plus exactly one data row, so the default is one).

pub mod markers;

use tracing::debug;

use crate::error::{Error, Result};
use crate::table::{MetricRecord, RunTable};

/// Result of extracting one trial's captured output.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// Per-iteration metric records, in order of appearance.
    pub table: RunTable,
    /// Captured coverage-summary CSV text, when the log contained the block.
    pub coverage_csv: Option<String>,
}

/// Parses one trial's raw text output into a [`RunTable`] and, when present,
/// the coverage-summary CSV block.
#[derive(Debug, Clone)]
pub struct LogExtractor {
    coverage_data_lines: usize,
}

impl Default for LogExtractor {
    fn default() -> Self {
        Self {
            coverage_data_lines: 1,
        }
    }
}

impl LogExtractor {
    /// Create an extractor with the default one-data-row coverage window.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how many lines after the coverage header are captured.
    #[must_use]
    pub const fn with_coverage_window(mut self, data_lines: usize) -> Self {
        self.coverage_data_lines = data_lines;
        self
    }

    /// Extract metric records and the coverage block from raw log text.
    ///
    /// Lines matching no marker and lying outside a coverage window are
    /// discarded. A marker value that fails numeric parsing leaves that field
    /// unknown for its record; a record whose *iteration* value is unusable
    /// is dropped whole so the families stay positionally aligned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FamilyLengthMismatch`] if the marker families have
    /// unequal lengths, or [`Error::UnorderedIterations`] if iteration values
    /// decrease.
    pub fn extract(&self, text: &str) -> Result<Extraction> {
        let mut families: Vec<Vec<Option<f64>>> = vec![Vec::new(); markers::MARKER_RULES.len()];
        let mut coverage = String::new();
        let mut coverage_seen = false;
        let mut pending_coverage = 0usize;

        for raw_line in text.lines() {
            let line = markers::normalize(raw_line);

            if pending_coverage > 0 {
                coverage.push_str(line);
                coverage.push('\n');
                pending_coverage -= 1;
                continue;
            }
            if line.starts_with(markers::COVERAGE_MARKER) {
                coverage_seen = true;
                coverage.push_str(line);
                coverage.push('\n');
                pending_coverage = self.coverage_data_lines;
                continue;
            }
            if let Some((index, value)) = markers::match_rule(line) {
                families[index].push(value.parse().ok());
            }
        }

        let table = zip_families(&families)?;
        debug!(
            records = table.len(),
            coverage = coverage_seen,
            "extracted trial log"
        );
        Ok(Extraction {
            table,
            coverage_csv: coverage_seen.then_some(coverage),
        })
    }
}

/// Zip the parallel marker families into one record per position.
fn zip_families(families: &[Vec<Option<f64>>]) -> Result<RunTable> {
    let iteration_index = markers::field_index(markers::ITERATION_FIELD).unwrap_or(0);
    let expected = families[iteration_index].len();

    for (rule, family) in markers::MARKER_RULES.iter().zip(families) {
        // A marker that never appeared means the metric is unknown for the
        // whole trial; only a partially present family is malformed.
        if !family.is_empty() && family.len() != expected {
            return Err(Error::FamilyLengthMismatch {
                field: rule.field.to_owned(),
                reference: markers::ITERATION_FIELD.to_owned(),
                expected,
                found: family.len(),
            });
        }
    }

    let mut records = Vec::with_capacity(expected);
    for position in 0..expected {
        let Some(iteration) = families[iteration_index][position].and_then(to_iteration) else {
            continue;
        };
        let mut record = MetricRecord::new(iteration);
        for (rule, family) in markers::MARKER_RULES.iter().zip(families) {
            if rule.field == markers::ITERATION_FIELD || family.is_empty() {
                continue;
            }
            if let Some(value) = family[position] {
                record.set(rule.field, value);
            }
        }
        records.push(record);
    }
    RunTable::from_records(records)
}

fn to_iteration(value: f64) -> Option<u64> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Some(value as u64)
    } else {
        None
    }
}
