//! Typed and generic tables for trial results
//!
//! Two layers:
//!
//! - [`MetricRecord`] / [`RunTable`]: the typed, iteration-ordered result of
//!   extracting one trial's log.
//! - [`Table`]: a plain header-plus-rows table, the common currency for CSV
//!   persistence and multi-trial aggregation. Cells stay raw text; numeric
//!   reads go through [`Table::column_f64`].

mod metric_record;
mod run_table;

pub use metric_record::MetricRecord;
pub use run_table::RunTable;

use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A header row plus string-cell data rows, as read from or written to CSV.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table with the given column headers.
    #[must_use]
    pub const fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Read a table from CSV with a header row.
    ///
    /// # Errors
    ///
    /// Returns an error if the CSV is malformed (including ragged rows).
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);
        let columns = csv_reader
            .headers()?
            .iter()
            .map(str::to_owned)
            .collect();
        let mut rows = Vec::new();
        for record in csv_reader.records() {
            rows.push(record?.iter().map(str::to_owned).collect());
        }
        Ok(Self { columns, rows })
    }

    /// Read a table from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsed.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Read a table from CSV text, e.g. a captured coverage block.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not well-formed CSV.
    pub fn from_csv_str(text: &str) -> Result<Self> {
        Self::from_csv_reader(text.as_bytes())
    }

    /// Write the table as CSV with a header row.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(&self.columns)?;
        for row in &self.rows {
            csv_writer.write_record(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Write the table to a CSV file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn write_csv_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_csv(file)
    }

    /// The column headers.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The data rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append one data row.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Arity`] if the cell count does not match the
    /// column count.
    pub fn push_row(&mut self, row: Vec<String>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(Error::Arity {
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Append all rows of another table.
    ///
    /// Column sets must match by name and order; `trial` is the 1-based trial
    /// index reported on mismatch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ColumnMismatch`] if the column sets differ.
    pub fn append(&mut self, other: &Self, trial: usize) -> Result<()> {
        if self.columns != other.columns {
            return Err(Error::ColumnMismatch {
                trial,
                expected: self.columns.clone(),
                found: other.columns.clone(),
            });
        }
        self.rows.extend(other.rows.iter().cloned());
        Ok(())
    }

    /// Insert a column at the given position, one value per existing row.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Arity`] if the value count does not match the row
    /// count.
    pub fn insert_column(
        &mut self,
        index: usize,
        name: impl Into<String>,
        values: Vec<String>,
    ) -> Result<()> {
        if values.len() != self.rows.len() {
            return Err(Error::Arity {
                expected: self.rows.len(),
                found: values.len(),
            });
        }
        self.columns.insert(index, name.into());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.insert(index, value);
        }
        Ok(())
    }

    /// Position of a named column.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Read a named column as numbers.
    ///
    /// Empty or unparsable cells become `f64::NAN`; a missing value is
    /// unknown, never zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingColumn`] if the column does not exist.
    pub fn column_f64(&self, name: &str) -> Result<Vec<f64>> {
        let index = self
            .column_index(name)
            .ok_or_else(|| Error::MissingColumn(name.to_owned()))?;
        Ok(self
            .rows
            .iter()
            .map(|row| row[index].trim().parse().unwrap_or(f64::NAN))
            .collect())
    }
}
