//! Coverage-summary interpretation
//!
//! Reads one row of a (merged) coverage table into a typed summary, applying
//! the domain policies of the experiment: coverage fractions are reported as
//! percentages, and a missing "time to reach full coverage" means the trial
//! never got there within the time budget, so the budget ceiling is
//! substituted before any averaging or plotting.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::table::Table;

/// Sentinel substituted when full coverage was never reached: the
/// experiment's per-trial time budget, in seconds.
pub const FULL_COVERAGE_CEILING_SECS: f64 = 30.0;

/// Column holding the best coverage fraction.
pub const BEST_COVERAGE: &str = "bestCoverage";
/// Column holding the number of covered fitness functions.
pub const COVERED_BLOCKS: &str = "coveredFitnessFunctionCount";
/// Column holding the total number of fitness functions.
pub const TOTAL_BLOCKS: &str = "fitnessFunctionCount";
/// Column holding the time to reach full coverage, in milliseconds.
pub const TIME_TO_FULL_COVERAGE: &str = "timeToReachFullCoverage";

/// One trial's coverage result in reporting units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoverageSummary {
    /// Best coverage as a percentage.
    pub best_coverage_pct: f64,
    /// Covered fitness functions ("blocks").
    pub covered_blocks: f64,
    /// Total fitness functions defined by the project.
    pub total_blocks: f64,
    /// Seconds until full coverage, or [`FULL_COVERAGE_CEILING_SECS`] when
    /// it was never reached.
    pub time_to_full_secs: f64,
}

/// Summarize one row of a coverage table.
///
/// # Errors
///
/// Returns [`Error::RowOutOfBounds`] for a bad row index and
/// [`Error::MissingColumn`] when a required column is absent.
pub fn summarize_row(table: &Table, row: usize) -> Result<CoverageSummary> {
    if row >= table.row_count() {
        return Err(Error::RowOutOfBounds {
            row,
            rows: table.row_count(),
        });
    }
    let coverage = table.column_f64(BEST_COVERAGE)?[row];
    let covered = table.column_f64(COVERED_BLOCKS)?[row];
    let total = table.column_f64(TOTAL_BLOCKS)?[row];
    let raw_time = table.column_f64(TIME_TO_FULL_COVERAGE)?[row];

    let time_to_full_secs = if raw_time.is_nan() {
        FULL_COVERAGE_CEILING_SECS
    } else {
        raw_time / 1000.0
    };

    Ok(CoverageSummary {
        best_coverage_pct: coverage * 100.0,
        covered_blocks: covered,
        total_blocks: total,
        time_to_full_secs,
    })
}

/// Summarize the first row of a coverage table.
///
/// # Errors
///
/// Same conditions as [`summarize_row`].
pub fn summarize(table: &Table) -> Result<CoverageSummary> {
    summarize_row(table, 0)
}

/// Block counts and mean coverage across a whole campaign.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct CampaignTotals {
    /// Sum of total blocks across projects.
    pub total_blocks: f64,
    /// Sum of covered blocks across projects.
    pub covered_blocks: f64,
    /// Mean best coverage across projects, as a percentage.
    pub mean_coverage_pct: f64,
}

/// Fold per-project summaries into campaign totals.
#[must_use]
pub fn campaign_totals(summaries: &[CoverageSummary]) -> CampaignTotals {
    if summaries.is_empty() {
        return CampaignTotals::default();
    }
    let total_blocks = summaries.iter().map(|s| s.total_blocks).sum();
    let covered_blocks = summaries.iter().map(|s| s.covered_blocks).sum();
    #[allow(clippy::cast_precision_loss)]
    let mean_coverage_pct = summaries
        .iter()
        .map(|s| s.best_coverage_pct)
        .sum::<f64>()
        / summaries.len() as f64;
    CampaignTotals {
        total_blocks,
        covered_blocks,
        mean_coverage_pct,
    }
}
