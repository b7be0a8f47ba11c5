//! CSV boundary for tabular input and output
//!
//! All file I/O lives here and in the CLI; the core calculation functions
//! only ever see in-memory tables. Input tables are read once per scenario
//! run, result tables written once.

use std::path::Path;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::core::error::CalcError;
use crate::core::phase::Phase;
use crate::tables::{Frame, ProcessKey, ProcessTable};

/// Errors reading or writing tabular files
#[derive(Debug, Error)]
pub enum TableIoError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in '{path}': {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("'{path}' row '{row}', column '{column}': '{value}' is not a number")]
    NotANumber {
        path: String,
        row: String,
        column: String,
        value: String,
    },

    #[error("'{path}' is missing the '{column}' header column")]
    MissingHeader { path: String, column: String },

    #[error(transparent)]
    Calc(#[from] CalcError),
}

impl TableIoError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }

    fn csv(path: &Path, source: csv::Error) -> Self {
        Self::Csv {
            path: path.display().to_string(),
            source,
        }
    }
}

fn parse_cell(path: &Path, row: &str, column: &str, value: &str) -> Result<f64, TableIoError> {
    f64::from_str(value.trim()).map_err(|_| TableIoError::NotANumber {
        path: path.display().to_string(),
        row: row.to_string(),
        column: column.to_string(),
        value: value.to_string(),
    })
}

/// Read a string-indexed frame: first CSV column holds row labels, every
/// other column is numeric
pub fn read_frame(path: &Path, table_name: &str) -> Result<Frame, TableIoError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| TableIoError::csv(path, e))?;
    let headers = reader
        .headers()
        .map_err(|e| TableIoError::csv(path, e))?
        .clone();
    let columns: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| TableIoError::csv(path, e))?;
        let label = record.get(0).unwrap_or_default().trim().to_string();
        let mut values = Vec::with_capacity(columns.len());
        for (j, column) in columns.iter().enumerate() {
            let raw = record.get(j + 1).unwrap_or_default();
            values.push(parse_cell(path, &label, column, raw)?);
        }
        rows.push((label, values));
    }
    Frame::from_rows(table_name, columns, rows).map_err(|e| CalcError::from(e).into())
}

/// Write a frame, labeling the row-key column `index_label`
pub fn write_frame(path: &Path, frame: &Frame, index_label: &str) -> Result<(), TableIoError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| TableIoError::csv(path, e))?;
    let mut header = vec![index_label.to_string()];
    header.extend(frame.columns().iter().cloned());
    writer
        .write_record(&header)
        .map_err(|e| TableIoError::csv(path, e))?;
    for (i, label) in frame.index().iter().enumerate() {
        let mut record = vec![label.clone()];
        for j in 0..frame.ncols() {
            record.push(frame.value_at(i, j).to_string());
        }
        writer
            .write_record(&record)
            .map_err(|e| TableIoError::csv(path, e))?;
    }
    writer
        .flush()
        .map_err(|e| TableIoError::io(path, e))?;
    Ok(())
}

/// Read a unit-process table: `phase` and `unit_process` key columns
/// followed by numeric requirement or emission columns
pub fn read_process_table(path: &Path, table_name: &str) -> Result<ProcessTable, TableIoError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| TableIoError::csv(path, e))?;
    let headers = reader
        .headers()
        .map_err(|e| TableIoError::csv(path, e))?
        .clone();
    let key_position = |column: &str| {
        headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| TableIoError::MissingHeader {
                path: path.display().to_string(),
                column: column.to_string(),
            })
    };
    let phase_idx = key_position("phase")?;
    let process_idx = key_position("unit_process")?;
    let value_columns: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != phase_idx && *i != process_idx)
        .map(|(i, h)| (i, h.to_string()))
        .collect();
    let columns: Vec<String> = value_columns.iter().map(|(_, h)| h.clone()).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| TableIoError::csv(path, e))?;
        let phase: Phase = record
            .get(phase_idx)
            .unwrap_or_default()
            .trim()
            .parse()
            .map_err(TableIoError::Calc)?;
        let process = record
            .get(process_idx)
            .unwrap_or_default()
            .trim()
            .to_string();
        let mut values = Vec::with_capacity(columns.len());
        for (source_idx, column) in &value_columns {
            let raw = record.get(*source_idx).unwrap_or_default();
            values.push(parse_cell(path, &process, column, raw)?);
        }
        rows.push((ProcessKey::new(phase, process), values));
    }
    ProcessTable::from_rows(table_name, columns, rows).map_err(|e| CalcError::from(e).into())
}

/// Write a unit-process table with `phase` and `unit_process` key columns
pub fn write_process_table(path: &Path, table: &ProcessTable) -> Result<(), TableIoError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| TableIoError::csv(path, e))?;
    let mut header = vec!["phase".to_string(), "unit_process".to_string()];
    header.extend(table.columns().iter().cloned());
    writer
        .write_record(&header)
        .map_err(|e| TableIoError::csv(path, e))?;
    for (i, key) in table.keys().iter().enumerate() {
        let mut record = vec![key.phase.as_str().to_string(), key.name.clone()];
        for j in 0..table.ncols() {
            record.push(table.value_at(i, j).to_string());
        }
        writer
            .write_record(&record)
            .map_err(|e| TableIoError::csv(path, e))?;
    }
    writer
        .flush()
        .map_err(|e| TableIoError::io(path, e))?;
    Ok(())
}

/// Read a CSV file of serde records (distances, assignments, conversions)
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, TableIoError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| TableIoError::csv(path, e))?;
    let mut records = Vec::new();
    for record in reader.deserialize() {
        records.push(record.map_err(|e| TableIoError::csv(path, e))?);
    }
    Ok(records)
}

/// Write a CSV file of serde records
pub fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<(), TableIoError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| TableIoError::csv(path, e))?;
    for record in records {
        writer
            .serialize(record)
            .map_err(|e| TableIoError::csv(path, e))?;
    }
    writer
        .flush()
        .map_err(|e| TableIoError::io(path, e))?;
    Ok(())
}
