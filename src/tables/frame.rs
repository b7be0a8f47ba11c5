//! String-indexed numeric table
//!
//! `Frame` is the workhorse for country-, fuel-, and summary-keyed tables:
//! labeled rows, labeled columns, `f64` cells. Every labeled lookup is
//! checked; a missing label is a typed error, never a silent zero.

use nalgebra::DMatrix;

use crate::core::error::SchemaError;

/// A row-labeled, column-labeled matrix of f64 values
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    name: String,
    index: Vec<String>,
    columns: Vec<String>,
    data: DMatrix<f64>,
}

impl Frame {
    /// Create a zero-filled frame with the given row and column labels
    pub fn new(
        name: impl Into<String>,
        index: Vec<String>,
        columns: Vec<String>,
    ) -> Self {
        let data = DMatrix::zeros(index.len(), columns.len());
        Self {
            name: name.into(),
            index,
            columns,
            data,
        }
    }

    /// Create a frame from labeled rows of values
    ///
    /// Every row must have exactly one value per column.
    pub fn from_rows(
        name: impl Into<String>,
        columns: Vec<String>,
        rows: Vec<(String, Vec<f64>)>,
    ) -> Result<Self, SchemaError> {
        let name = name.into();
        let mut index = Vec::with_capacity(rows.len());
        let mut data = DMatrix::zeros(rows.len(), columns.len());
        for (i, (label, values)) in rows.into_iter().enumerate() {
            if values.len() != columns.len() {
                return Err(SchemaError::ShapeMismatch {
                    left: name,
                    left_cols: columns.len(),
                    right: label,
                    right_rows: values.len(),
                });
            }
            for (j, v) in values.into_iter().enumerate() {
                data[(i, j)] = v;
            }
            index.push(label);
        }
        Ok(Self {
            name,
            index,
            columns,
            data,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index(&self) -> &[String] {
        &self.index
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn nrows(&self) -> usize {
        self.index.len()
    }

    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    /// Position of a row label
    pub fn row_position(&self, row: &str) -> Result<usize, SchemaError> {
        self.index
            .iter()
            .position(|r| r == row)
            .ok_or_else(|| SchemaError::MissingRow {
                table: self.name.clone(),
                row: row.to_string(),
            })
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

    /// Value at a labeled cell
    pub fn get(&self, row: &str, column: &str) -> Result<f64, SchemaError> {
        let i = self.row_position(row)?;
        let j = self.column_position(column)?;
        Ok(self.data[(i, j)])
    }

    /// Overwrite a labeled cell
    pub fn set(&mut self, row: &str, column: &str, value: f64) -> Result<(), SchemaError> {
        let i = self.row_position(row)?;
        let j = self.column_position(column)?;
        self.data[(i, j)] = value;
        Ok(())
    }

    /// Value at a positional cell (bounds are the caller's responsibility)
    pub fn value_at(&self, i: usize, j: usize) -> f64 {
        self.data[(i, j)]
    }

    /// A labeled row as a vector of values
    pub fn row(&self, row: &str) -> Result<Vec<f64>, SchemaError> {
        let i = self.row_position(row)?;
        Ok(self.data.row(i).iter().copied().collect())
    }

    /// Overwrite a labeled row
    pub fn set_row(&mut self, row: &str, values: &[f64]) -> Result<(), SchemaError> {
        let i = self.row_position(row)?;
        if values.len() != self.ncols() {
            return Err(SchemaError::ShapeMismatch {
                left: self.name.clone(),
                left_cols: self.ncols(),
                right: row.to_string(),
                right_rows: values.len(),
            });
        }
        for (j, v) in values.iter().enumerate() {
            self.data[(i, j)] = *v;
        }
        Ok(())
    }

    /// Sum of a labeled row
    pub fn row_sum(&self, row: &str) -> Result<f64, SchemaError> {
        let i = self.row_position(row)?;
        Ok(self.data.row(i).iter().sum())
    }

    /// Per-row sums in index order
    pub fn row_sums(&self) -> Vec<f64> {
        (0..self.nrows()).map(|i| self.data.row(i).iter().sum()).collect()
    }

    /// Sum every row into a single-row frame with the given row label
    pub fn sum_to_row(&self, name: impl Into<String>, row_label: impl Into<String>) -> Frame {
        let mut out = Frame::new(name, vec![row_label.into()], self.columns.clone());
        for j in 0..self.ncols() {
            out.data[(0, j)] = self.data.column(j).iter().sum();
        }
        out
    }

    /// Matrix product with row labels of `other` matched by name against the
    /// columns of `self`
    ///
    /// Every column of `self` must name a row of `other`. The result keeps
    /// this frame's index and takes the other frame's columns.
    pub fn dot(&self, other: &Frame, name: impl Into<String>) -> Result<Frame, SchemaError> {
        let mut rhs = DMatrix::zeros(self.ncols(), other.ncols());
        for (k, column) in self.columns.iter().enumerate() {
            let i = other.row_position(column)?;
            rhs.row_mut(k).copy_from(&other.data.row(i));
        }
        Ok(Frame {
            name: name.into(),
            index: self.index.clone(),
            columns: other.columns.clone(),
            data: &self.data * &rhs,
        })
    }
}
