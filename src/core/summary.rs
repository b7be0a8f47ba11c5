//! Phase aggregation and impact conversion
//!
//! Sums total emissions by lifecycle phase, condenses the nine detailed
//! phases into three summary phases, converts emission species to impact
//! equivalence totals, and rolls phase impacts into lifetime totals.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::country::Country;
use crate::core::error::{CalcError, SchemaError, ValidationError};
use crate::core::labels;
use crate::core::phase::{CondensedPhase, Phase};
use crate::tables::{Frame, ProcessTable};

/// An impact category of the assessment; the set is closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpactCategory {
    GlobalWarmingPotential,
    AirAcidificationPotential,
}

impl ImpactCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImpactCategory::GlobalWarmingPotential => "global_warming_potential",
            ImpactCategory::AirAcidificationPotential => "air_acidification_potential",
        }
    }

    /// Column label of this category's equivalence total
    pub fn equivalence_column(&self) -> &'static str {
        match self {
            ImpactCategory::GlobalWarmingPotential => labels::CO2_EQ,
            ImpactCategory::AirAcidificationPotential => labels::SO2_EQ,
        }
    }
}

impl FromStr for ImpactCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "global_warming_potential" => Ok(ImpactCategory::GlobalWarmingPotential),
            "air_acidification_potential" => Ok(ImpactCategory::AirAcidificationPotential),
            other => Err(ValidationError::UnknownImpactCategory(other.to_string())),
        }
    }
}

/// One row of the emission-equivalence conversion table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionRecord {
    pub emission: String,
    pub category: String,
    pub conversion: f64,
}

/// Group the total emissions table by phase and reorder into the canonical
/// nine-phase order. A phase with no rows in the input is a schema error;
/// reindexing in missing-value rows and treating them as zero would let a
/// malformed model produce plausible numbers.
pub fn sum_phases(emissions_total: &ProcessTable) -> Result<Frame, CalcError> {
    let index: Vec<String> = Phase::CANONICAL_ORDER
        .iter()
        .map(|p| p.as_str().to_string())
        .collect();
    let mut summary = Frame::new(
        "phase_summary_complete",
        index,
        emissions_total.columns().to_vec(),
    );
    for phase in Phase::CANONICAL_ORDER {
        let rows = emissions_total.phase_rows(phase);
        if rows.is_empty() {
            return Err(SchemaError::EmptyPhase(phase.as_str().to_string()).into());
        }
        for (j, column) in emissions_total.columns().iter().enumerate() {
            let total: f64 = rows.iter().map(|&i| emissions_total.value_at(i, j)).sum();
            summary.set(phase.as_str(), column, total)?;
        }
    }
    Ok(summary)
}

/// Row label of a condensed phase for a given scenario's home country
fn condensed_label(phase: CondensedPhase, home: Country) -> String {
    format!("{}_{}", phase.as_str(), home)
}

/// Condense the nine-phase summary into the three summary phases, labeled
/// with the home country for cross-scenario compilation.
///
/// Electricity generation feeds no condensed phase: its emissions were
/// redistributed into the consuming phases during back-propagation, and
/// counting the phase again here would double them.
pub fn condense_phase_sums(
    phase_summary: &Frame,
    home: Country,
) -> Result<Frame, CalcError> {
    let index: Vec<String> = CondensedPhase::ALL
        .iter()
        .map(|&p| condensed_label(p, home))
        .collect();
    let mut condensed = Frame::new(
        "phase_summary_condensed",
        index,
        phase_summary.columns().to_vec(),
    );
    for phase in Phase::CANONICAL_ORDER {
        let Some(group) = phase.condensed() else {
            continue;
        };
        let label = condensed_label(group, home);
        let values = phase_summary.row(phase.as_str())?;
        for (j, column) in phase_summary.columns().iter().enumerate() {
            let existing = condensed.get(&label, column)?;
            condensed.set(&label, column, existing + values[j])?;
        }
    }
    Ok(condensed)
}

/// Convert the condensed per-species summary into impact equivalence
/// totals: each species column is scaled by its conversion factor and summed
/// into its category's bucket (CO2-equivalent or SO2-equivalent). The
/// per-species columns are dropped from the result.
///
/// A conversion record with a category outside the closed two-category set,
/// or a species with no conversion record, fails immediately.
pub fn phase_impacts(
    condensed: &Frame,
    conversions: &[ConversionRecord],
) -> Result<Frame, CalcError> {
    let mut parsed = Vec::with_capacity(conversions.len());
    for record in conversions {
        let category: ImpactCategory = record.category.parse()?;
        parsed.push((record.emission.as_str(), category, record.conversion));
    }

    let columns: Vec<String> = vec![labels::CO2_EQ.to_string(), labels::SO2_EQ.to_string()];
    let mut impacts = Frame::new("total_impacts_phase", condensed.index().to_vec(), columns);
    for species in condensed.columns() {
        let (_, category, factor) = parsed
            .iter()
            .find(|(emission, _, _)| emission == species)
            .ok_or_else(|| SchemaError::MissingConversion(species.clone()))?;
        let bucket = category.equivalence_column();
        for row in condensed.index() {
            let converted = condensed.get(row, species)? * factor;
            let existing = impacts.get(row, bucket)?;
            impacts.set(row, bucket, existing + converted)?;
        }
    }
    Ok(impacts)
}

/// Sum per-phase equivalence totals into a single lifetime row labeled by
/// the scenario's home country.
pub fn lifetime_impacts(phase_impacts: &Frame, home: Country) -> Frame {
    phase_impacts.sum_to_row(
        "total_impacts_lifetime",
        format!("total_impacts_{home}"),
    )
}
