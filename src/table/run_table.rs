//! Run Table - the ordered, typed result of one trial

use serde::{Deserialize, Serialize};

use super::{MetricRecord, Table};
use crate::error::{Error, Result};
use crate::extract::markers::{ITERATION_FIELD, MARKER_RULES};

/// The typed result of one trial: metric records ordered by iteration.
///
/// Iteration values need not be contiguous but must be non-decreasing; the
/// constructor enforces this. Once built from a fully parsed log the table is
/// immutable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunTable {
    records: Vec<MetricRecord>,
}

impl RunTable {
    /// Build a run table from records, validating iteration ordering.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnorderedIterations`] if iteration values decrease.
    pub fn from_records(records: Vec<MetricRecord>) -> Result<Self> {
        for (position, pair) in records.windows(2).enumerate() {
            if pair[1].iteration() < pair[0].iteration() {
                return Err(Error::UnorderedIterations {
                    position: position + 1,
                });
            }
        }
        Ok(Self { records })
    }

    /// Create an empty run table.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// The records in iteration order.
    #[must_use]
    pub fn records(&self) -> &[MetricRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The values of one metric field across all records, in order.
    ///
    /// Unknown fields become `f64::NAN` so the series keeps its positions.
    #[must_use]
    pub fn series(&self, field: &str) -> Vec<f64> {
        self.records
            .iter()
            .map(|record| record.get(field).unwrap_or(f64::NAN))
            .collect()
    }

    /// Convert to a generic [`Table`] using the marker table's CSV headers.
    ///
    /// The iteration column is rendered as an integer; unknown fields become
    /// empty cells.
    #[must_use]
    pub fn to_table(&self) -> Table {
        let columns: Vec<String> = MARKER_RULES
            .iter()
            .map(|rule| rule.header.to_owned())
            .collect();
        let mut table = Table::new(columns);
        for record in &self.records {
            let row: Vec<String> = MARKER_RULES
                .iter()
                .map(|rule| {
                    if rule.field == ITERATION_FIELD {
                        record.iteration().to_string()
                    } else {
                        record
                            .get(rule.field)
                            .map(|value| value.to_string())
                            .unwrap_or_default()
                    }
                })
                .collect();
            // Arity always matches: both sides iterate MARKER_RULES.
            table.push_row(row).unwrap_or_default();
        }
        table
    }
}
