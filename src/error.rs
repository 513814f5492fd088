//! Error types for evobench
//!
//! Inconsistencies between trials (mismatched column sets, unbalanced marker
//! families) are fatal for the affected trial and surface as typed variants;
//! they are never silently patched.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Evobench error types
#[derive(Error, Debug)]
pub enum Error {
    /// Column sets of two trial tables being merged differ
    #[error("column mismatch in trial {trial}: expected {expected:?}, found {found:?}")]
    ColumnMismatch {
        /// 1-based trial index of the offending table
        trial: usize,
        /// Column set of the seed table
        expected: Vec<String>,
        /// Column set of the offending table
        found: Vec<String>,
    },

    /// Parallel marker families in one log have unequal lengths
    #[error("marker family `{field}` has {found} values but `{reference}` has {expected}")]
    FamilyLengthMismatch {
        /// Field whose family length diverges
        field: String,
        /// Reference family (the iteration marker)
        reference: String,
        /// Length of the reference family
        expected: usize,
        /// Length of the diverging family
        found: usize,
    },

    /// Iteration values in an extracted run table decreased
    #[error("iteration values decrease at record {position}")]
    UnorderedIterations {
        /// 0-based index of the offending record
        position: usize,
    },

    /// A trial violated the selected merge shape
    #[error("trial {trial} contributes {rows} rows but the summary shape requires exactly one")]
    ShapeViolation {
        /// 1-based trial index
        trial: usize,
        /// Number of rows the trial contributed
        rows: usize,
    },

    /// A merge was requested with no trial tables at all
    #[error("no trial tables to merge")]
    NoTrials,

    /// A named column is absent from a table
    #[error("column `{0}` not found")]
    MissingColumn(String),

    /// A row index is past the end of a table
    #[error("row {row} out of bounds for table with {rows} rows")]
    RowOutOfBounds {
        /// Requested 0-based row index
        row: usize,
        /// Number of rows in the table
        rows: usize,
    },

    /// A row or column carries the wrong number of values for its table
    #[error("expected {expected} values, found {found}")]
    Arity {
        /// Number of values the table requires
        expected: usize,
        /// Number of values supplied
        found: usize,
    },

    /// Padding requires at least one element to repeat
    #[error("cannot pad an empty series")]
    EmptySeries,

    /// The rescale constant for baseline alignment must be non-zero
    #[error("rescale constant must be non-zero")]
    ZeroScale,

    /// A series handed to the plotter does not match the expected length
    #[error("series `{label}` has {found} points, expected {expected}")]
    SeriesLength {
        /// Label of the offending series
        label: String,
        /// Expected point count
        expected: usize,
        /// Actual point count
        found: usize,
    },

    /// Chart rendering failed
    #[error("chart rendering failed: {0}")]
    Plot(String),

    /// External tool invocation failed
    #[error("tool invocation failed: {0}")]
    Tool(String),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON error (campaign plans)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
