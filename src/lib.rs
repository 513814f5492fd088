//! # Evobench: evaluation pipeline for evolutionary test generation
//!
//! Evobench automates repeated runs of an external evolutionary
//! test-generation tool against a set of target projects and turns the
//! tool's free-text log output into structured, comparable performance
//! data: per-iteration fitness trajectories and code-coverage summaries.
//!
//! ## Pipeline
//!
//! ```text
//! tool stdout ──> extract::LogExtractor ──> table::RunTable (one per trial)
//!                                                 │
//!                        aggregate::merge_trials  ▼
//!                        one merged, Round-tagged table per project
//!                                                 │
//!              align::{pad_to_match, truncate_and_rescale}
//!                                                 ▼
//!                        plot::ComparativePlotter ──> SVG charts
//! ```
//!
//! ## Example
//!
//! ```rust
//! use evobench::extract::LogExtractor;
//!
//! let log = "INFO: Iteration: 3\nINFO: Highest Network Fitness: 12.5\n";
//! let extraction = LogExtractor::new().extract(log)?;
//! assert_eq!(extraction.table.records()[0].iteration(), 3);
//! # Ok::<(), evobench::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod aggregate;
pub mod align;
pub mod campaign;
pub mod coverage;
pub mod error;
pub mod extract;
pub mod invoke;
pub mod layout;
pub mod plot;
pub mod table;

pub use error::{Error, Result};
