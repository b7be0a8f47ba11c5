//! Error taxonomy for the calculation pipeline
//!
//! Every stage fails fast at its own boundary with a typed error naming the
//! offending key. Missing keys are never silently zero-filled; plausible but
//! wrong final impact numbers are worse than no numbers.

use thiserror::Error;

/// Structural problems: a unit process, phase, row, or column the
/// fixed-topology algorithms assume is present turned out to be absent.
#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    /// A unit process expected in a table index was not found
    #[error("unit process '{0}' not found")]
    MissingUnitProcess(String),

    /// A row label was not found in a table
    #[error("row '{row}' not found in table '{table}'")]
    MissingRow { table: String, row: String },

    /// A column label was not found in a table
    #[error("column '{column}' not found in table '{table}'")]
    MissingColumn { table: String, column: String },

    /// An expected phase has no rows in the input table
    #[error("phase '{0}' has no unit processes in the input table")]
    EmptyPhase(String),

    /// No tabulated trade distance for a (home, supplier) pair
    #[error("no trade distance tabulated for route {home} -> {supplier}")]
    MissingDistance { home: String, supplier: String },

    /// No country assignment for a unit process in the trade scenario
    #[error("trade scenario assigns no country to unit process '{0}'")]
    MissingAssignment(String),

    /// No impact conversion factor for an emission species
    #[error("no impact conversion factor for emission '{0}'")]
    MissingConversion(String),

    /// Operand shapes do not line up for a matrix product
    #[error("shape mismatch multiplying '{left}' ({left_cols} columns) by '{right}' ({right_rows} rows)")]
    ShapeMismatch {
        left: String,
        left_cols: usize,
        right: String,
        right_rows: usize,
    },

    /// A column with nonzero entries has no matching row in the right-hand
    /// operand of a matrix product. Seen when the electricity allocator was
    /// skipped and the generic electricity column still carries values.
    #[error("column '{column}' holds nonzero values but matches no row of '{table}'")]
    UnmatchedNonzeroColumn { column: String, table: String },
}

/// Data-quality problems: values present but outside their contract.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Energy-mix shares for a country do not sum to 100% within tolerance
    #[error("energy mix for {country} sums to {total:.6} of supply, expected 1.0 within {tolerance}")]
    MixNotNormalized {
        country: String,
        total: f64,
        tolerance: f64,
    },

    /// A raw energy supply cell that cannot be normalized into a share
    #[error("energy supply for {country}, fuel '{fuel}', is {value}; cells must be finite and non-negative")]
    SupplyOutOfRange {
        country: String,
        fuel: String,
        value: f64,
    },

    /// An impact-category label outside the closed two-category set
    #[error("impact category '{0}' is not one of global_warming_potential, air_acidification_potential")]
    UnknownImpactCategory(String),

    /// Rail-vs-lorry allocation fraction outside [0, 1]
    #[error("rail allocation fraction {0} is outside [0, 1]")]
    AllocationOutOfRange(f64),

    /// A normalization parameter outside its valid range
    #[error("normalization parameter '{name}' = {value} is out of range: {reason}")]
    ParameterOutOfRange {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

/// Top-level error for a scenario run
#[derive(Debug, Error, PartialEq)]
pub enum CalcError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A country label outside the closed six-country set
    #[error("unknown country '{0}'")]
    UnknownCountry(String),

    /// A phase label outside the closed nine-phase set
    #[error("unknown phase label '{0}'")]
    UnknownPhase(String),
}

/// How strictly data-quality checks are enforced.
///
/// `Strict` turns energy-mix normalization failures into hard errors;
/// `Lenient` keeps the original behavior of warning and carrying on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    #[default]
    Strict,
    Lenient,
}
