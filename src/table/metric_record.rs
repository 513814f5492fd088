//! Metric Record - one observation of the external tool at a given iteration

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One observation at a given iteration of the tool's evolutionary loop.
///
/// Holds the iteration index plus a mapping of named numeric fields
/// (e.g. `highestNetworkFitness`, `averageNetworkFitness`). A field that is
/// absent from the map is semantically *unknown* for this record, not zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricRecord {
    iteration: u64,
    values: BTreeMap<String, f64>,
}

impl MetricRecord {
    /// Create an empty record for the given iteration.
    #[must_use]
    pub fn new(iteration: u64) -> Self {
        Self {
            iteration,
            values: BTreeMap::new(),
        }
    }

    /// Get the iteration index.
    #[must_use]
    pub const fn iteration(&self) -> u64 {
        self.iteration
    }

    /// Set a named metric field.
    pub fn set(&mut self, field: impl Into<String>, value: f64) {
        self.values.insert(field.into(), value);
    }

    /// Get a named metric field, or `None` when it is unknown.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<f64> {
        self.values.get(field).copied()
    }

    /// Number of known fields on this record.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.values.len()
    }
}
