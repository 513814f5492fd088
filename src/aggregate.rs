//! Multi-trial aggregation: fold per-trial tables into one merged table
//!
//! The merge itself is a pure function from a sequence of trial tables to one
//! table with a prepended `Round` column. Artifact cleanup is a separate,
//! idempotent step the filesystem driver runs only after the merged artifact
//! has been persisted.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::layout::{ArtifactKind, ProjectLayout};
use crate::table::Table;

/// Name of the trial-index column prepended by a merge.
pub const ROUND_COLUMN: &str = "Round";

/// How trial rows map to round values in the merged table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeShape {
    /// Each trial contributes exactly one summary row (coverage tables);
    /// any other row count is a fatal inconsistency.
    SummaryRowPerTrial,
    /// Each trial contributes one row per retained iteration (fitness
    /// trajectories); every row carries its trial's round value.
    RowPerIteration,
}

/// Merge trial tables into one table tagged with a `Round` column.
///
/// The first table seeds the merge; every subsequent table must carry the
/// same column set. Round values are `1..=N` in trial order, repeated per
/// row for the [`MergeShape::RowPerIteration`] shape.
///
/// # Errors
///
/// Returns [`Error::NoTrials`] for an empty input, [`Error::ColumnMismatch`]
/// when a trial's columns differ from the seed's, and
/// [`Error::ShapeViolation`] when a summary-shaped trial does not have
/// exactly one row.
pub fn merge_trials(tables: &[Table], shape: MergeShape) -> Result<Table> {
    let Some((seed, rest)) = tables.split_first() else {
        return Err(Error::NoTrials);
    };

    let mut merged = seed.clone();
    let mut row_counts = vec![seed.row_count()];
    for (offset, table) in rest.iter().enumerate() {
        merged.append(table, offset + 2)?;
        row_counts.push(table.row_count());
    }

    if shape == MergeShape::SummaryRowPerTrial {
        for (offset, &rows) in row_counts.iter().enumerate() {
            if rows != 1 {
                return Err(Error::ShapeViolation {
                    trial: offset + 1,
                    rows,
                });
            }
        }
    }

    let rounds: Vec<String> = row_counts
        .iter()
        .enumerate()
        .flat_map(|(offset, &rows)| std::iter::repeat((offset + 1).to_string()).take(rows))
        .collect();
    merged.insert_column(0, ROUND_COLUMN, rounds)?;
    Ok(merged)
}

/// Merge one project's per-trial artifacts on disk and clean them up.
///
/// If the trial count is zero or the first trial's artifact does not exist,
/// nothing has been produced yet and the merge is silently skipped
/// (`Ok(None)`). Otherwise all trial CSVs are loaded, merged, persisted as
/// the project-named artifact, and the per-trial CSVs (seed included) are
/// deleted.
///
/// # Errors
///
/// Returns an error if a later trial's artifact is unreadable or the merge
/// itself fails; the per-trial artifacts are only removed after the merged
/// table has been written.
pub fn aggregate_project(
    layout: &ProjectLayout,
    kind: ArtifactKind,
    trials: usize,
    shape: MergeShape,
) -> Result<Option<PathBuf>> {
    if trials == 0 {
        return Ok(None);
    }
    let seed_path = layout.trial_csv(kind, 1);
    if !seed_path.is_file() {
        debug!(
            project = layout.project(),
            kind = kind.dir_name(),
            "no trial artifacts yet, skipping merge"
        );
        return Ok(None);
    }

    let mut tables = Vec::with_capacity(trials);
    for round in 1..=trials {
        tables.push(Table::from_csv_path(layout.trial_csv(kind, round))?);
    }

    let merged = merge_trials(&tables, shape)?;
    let merged_path = layout.merged_csv(kind);
    merged.write_csv_path(&merged_path)?;
    cleanup_trial_artifacts(layout, kind, trials)?;

    info!(
        project = layout.project(),
        kind = kind.dir_name(),
        trials,
        rows = merged.row_count(),
        "merged trial artifacts"
    );
    Ok(Some(merged_path))
}

/// Delete the per-trial artifacts superseded by a merge.
///
/// Idempotent: artifacts already gone are skipped.
///
/// # Errors
///
/// Returns an error if an existing artifact cannot be removed.
pub fn cleanup_trial_artifacts(
    layout: &ProjectLayout,
    kind: ArtifactKind,
    trials: usize,
) -> Result<()> {
    for round in 1..=trials {
        let path = layout.trial_csv(kind, round);
        if path.is_file() {
            std::fs::remove_file(path)?;
        }
    }
    Ok(())
}
