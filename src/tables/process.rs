//! Phase-keyed unit-process table
//!
//! `ProcessTable` models the unit-process input and emission matrices: rows
//! keyed by (phase, unit process), named numeric columns. Requirement
//! columns are named after the unit process whose output they draw on, which
//! is what lets the matrix products align columns against rows by name.

use nalgebra::DMatrix;

use crate::core::error::SchemaError;
use crate::core::phase::Phase;

/// Row key of a unit-process table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessKey {
    pub phase: Phase,
    pub name: String,
}

impl ProcessKey {
    pub fn new(phase: Phase, name: impl Into<String>) -> Self {
        Self {
            phase,
            name: name.into(),
        }
    }
}

/// A (phase, unit process)-keyed matrix of f64 values
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessTable {
    name: String,
    keys: Vec<ProcessKey>,
    columns: Vec<String>,
    data: DMatrix<f64>,
}

impl ProcessTable {
    /// Create a zero-filled table with the given keys and column labels
    pub fn new(name: impl Into<String>, keys: Vec<ProcessKey>, columns: Vec<String>) -> Self {
        let data = DMatrix::zeros(keys.len(), columns.len());
        Self {
            name: name.into(),
            keys,
            columns,
            data,
        }
    }

    /// Create a table from keyed rows of values
    pub fn from_rows(
        name: impl Into<String>,
        columns: Vec<String>,
        rows: Vec<(ProcessKey, Vec<f64>)>,
    ) -> Result<Self, SchemaError> {
        let name = name.into();
        let mut keys = Vec::with_capacity(rows.len());
        let mut data = DMatrix::zeros(rows.len(), columns.len());
        for (i, (key, values)) in rows.into_iter().enumerate() {
            if values.len() != columns.len() {
                return Err(SchemaError::ShapeMismatch {
                    left: name,
                    left_cols: columns.len(),
                    right: key.name,
                    right_rows: values.len(),
                });
            }
            for (j, v) in values.into_iter().enumerate() {
                data[(i, j)] = v;
            }
            keys.push(key);
        }
        Ok(Self {
            name,
            keys,
            columns,
            data,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn keys(&self) -> &[ProcessKey] {
        &self.keys
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn nrows(&self) -> usize {
        self.keys.len()
    }

    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    /// Rename the table (derived tables keep provenance in their name)
    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Position of a unit-process row; process names are unique across phases
    pub fn row_position(&self, process: &str) -> Result<usize, SchemaError> {
        self.keys
            .iter()
            .position(|k| k.name == process)
            .ok_or_else(|| SchemaError::MissingUnitProcess(process.to_string()))
    }

    /// Position of a column label
    pub fn column_position(&self, column: &str) -> Result<usize, SchemaError> {
        self.columns
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| SchemaError::MissingColumn {
                table: self.name.clone(),
                column: column.to_string(),
            })
    }

    /// Row positions of every process in a phase, in table order
    pub fn phase_rows(&self, phase: Phase) -> Vec<usize> {
        self.keys
            .iter()
            .enumerate()
            .filter(|(_, k)| k.phase == phase)
            .map(|(i, _)| i)
            .collect()
    }

    /// Value at a labeled cell
    pub fn get(&self, process: &str, column: &str) -> Result<f64, SchemaError> {
        let i = self.row_position(process)?;
        let j = self.column_position(column)?;
        Ok(self.data[(i, j)])
    }

    /// Overwrite a labeled cell
    pub fn set(&mut self, process: &str, column: &str, value: f64) -> Result<(), SchemaError> {
        let i = self.row_position(process)?;
        let j = self.column_position(column)?;
        self.data[(i, j)] = value;
        Ok(())
    }

    /// Value at a positional cell
    pub fn value_at(&self, i: usize, j: usize) -> f64 {
        self.data[(i, j)]
    }

    /// Overwrite a positional cell
    pub fn set_at(&mut self, i: usize, j: usize, value: f64) {
        self.data[(i, j)] = value;
    }

    /// Scale an entire row by a factor, reading base coefficients from
    /// `base` (same shape) rather than from self
    pub fn scale_row_from(&mut self, base: &ProcessTable, i: usize, factor: f64) {
        for j in 0..self.ncols() {
            self.data[(i, j)] = base.data[(i, j)] * factor;
        }
    }

    /// Overwrite a unit-process row with the given values
    pub fn set_process_row(&mut self, process: &str, values: &[f64]) -> Result<(), SchemaError> {
        let i = self.row_position(process)?;
        if values.len() != self.ncols() {
            return Err(SchemaError::ShapeMismatch {
                left: self.name.clone(),
                left_cols: self.ncols(),
                right: process.to_string(),
                right_rows: values.len(),
            });
        }
        for (j, v) in values.iter().enumerate() {
            self.data[(i, j)] = *v;
        }
        Ok(())
    }

    /// Matrix product with rows of `other` matched by name against the
    /// columns of `self`
    ///
    /// A column of self with no matching row in `other` is accepted only if
    /// it is entirely zero (it contributes nothing); a nonzero unmatched
    /// column means a pipeline stage was skipped and is a hard error. The
    /// result keeps this table's keys and takes the other table's columns.
    pub fn dot(
        &self,
        other: &ProcessTable,
        name: impl Into<String>,
    ) -> Result<ProcessTable, SchemaError> {
        let mut rhs = DMatrix::zeros(self.ncols(), other.ncols());
        for (k, column) in self.columns.iter().enumerate() {
            match other.keys.iter().position(|key| &key.name == column) {
                Some(i) => rhs.row_mut(k).copy_from(&other.data.row(i)),
                None => {
                    if self.data.column(k).iter().any(|v| *v != 0.0) {
                        return Err(SchemaError::UnmatchedNonzeroColumn {
                            column: column.clone(),
                            table: other.name.clone(),
                        });
                    }
                    // zero column times anything is zero; leave the rhs row zero
                }
            }
        }
        Ok(ProcessTable {
            name: name.into(),
            keys: self.keys.clone(),
            columns: other.columns.clone(),
            data: &self.data * &rhs,
        })
    }
}
