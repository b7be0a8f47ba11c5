//! Trade scenario builder and transport requirement calculator
//!
//! A trade scenario assigns each unit process a country of origin. The trade
//! schedule fixes (home, supplier) per process; the transport schedule joins
//! it against the tabulated average trade distances; the transport update
//! converts those distances into mode-specific mass-distance requirements in
//! the phase-appropriate columns of the unit-process input table.

use serde::{Deserialize, Serialize};

use crate::core::country::Country;
use crate::core::error::{CalcError, SchemaError, ValidationError};
use crate::core::labels;
use crate::tables::ProcessTable;

/// One row of a trade-scenario assignment file: which country a unit
/// process occurs in under this scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentRecord {
    pub unit_process: String,
    pub country: Country,
}

/// One row of the trade-distance table: the average export distance for
/// goods supplied to `home_country` from `supplying_country`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceRecord {
    pub home_country: Country,
    pub supplying_country: Country,
    pub avg_export_distance: f64,
}

/// A trade entry: one unit process, its home country, and its supplier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TradeEntry {
    pub unit_process: String,
    pub home: Country,
    pub supplier: Country,
}

/// The trade schedule for one scenario: every unit process of the base
/// input table, exactly once
#[derive(Debug, Clone, PartialEq)]
pub struct TradeSchedule {
    entries: Vec<TradeEntry>,
}

impl TradeSchedule {
    /// Build the schedule from a home country, per-process country
    /// assignments, and the base input table (used only for its unit-process
    /// index).
    ///
    /// A process without an assignment is a hard error; the original
    /// implementation let it fall through to an empty join downstream.
    pub fn build(
        home: Country,
        assignments: &[AssignmentRecord],
        inputs_base: &ProcessTable,
    ) -> Result<Self, CalcError> {
        let mut entries = Vec::with_capacity(inputs_base.nrows());
        for key in inputs_base.keys() {
            let supplier = assignments
                .iter()
                .find(|a| a.unit_process == key.name)
                .map(|a| a.country)
                .ok_or_else(|| SchemaError::MissingAssignment(key.name.clone()))?;
            entries.push(TradeEntry {
                unit_process: key.name.clone(),
                home,
                supplier,
            });
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[TradeEntry] {
        &self.entries
    }

    /// The country supplying a unit process under this scenario
    pub fn supplier_of(&self, unit_process: &str) -> Result<Country, SchemaError> {
        self.entries
            .iter()
            .find(|e| e.unit_process == unit_process)
            .map(|e| e.supplier)
            .ok_or_else(|| SchemaError::MissingAssignment(unit_process.to_string()))
    }
}

/// One transport leg: a trade entry joined with its average distance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransportLeg {
    pub unit_process: String,
    pub home: Country,
    pub supplier: Country,
    pub avg_export_distance: f64,
}

/// The transport schedule: estimated average distances for every trade
/// entry of the scenario
#[derive(Debug, Clone, PartialEq)]
pub struct TransportSchedule {
    legs: Vec<TransportLeg>,
}

impl TransportSchedule {
    /// Join the trade schedule against the distance table.
    ///
    /// An untabulated (home, supplier) pair is an error unless home and
    /// supplier coincide, in which case the leg has zero distance.
    pub fn build(
        trade_schedule: &TradeSchedule,
        distances: &[DistanceRecord],
    ) -> Result<Self, CalcError> {
        let mut legs = Vec::with_capacity(trade_schedule.entries().len());
        for entry in trade_schedule.entries() {
            let tabulated = distances
                .iter()
                .find(|d| d.home_country == entry.home && d.supplying_country == entry.supplier)
                .map(|d| d.avg_export_distance);
            let avg_export_distance = match tabulated {
                Some(d) => d,
                None if entry.home == entry.supplier => 0.0,
                None => {
                    return Err(SchemaError::MissingDistance {
                        home: entry.home.to_string(),
                        supplier: entry.supplier.to_string(),
                    }
                    .into())
                }
            };
            legs.push(TransportLeg {
                unit_process: entry.unit_process.clone(),
                home: entry.home,
                supplier: entry.supplier,
                avg_export_distance,
            });
        }
        Ok(Self { legs })
    }

    pub fn legs(&self) -> &[TransportLeg] {
        &self.legs
    }
}

/// Write mode-specific transport requirements into a copy of the base input
/// table.
///
/// Only processes in the four transported phases (raw material extraction,
/// both intermediate component production phases, final component
/// production) receive requirements: `rail = f * distance` and
/// `lorry = (1 - f) * distance` in the phase-appropriate columns, with the
/// generic average-distance placeholder cell zeroed. Electricity, transport,
/// and passenger processes are left untouched.
pub fn apply_transport(
    transport_schedule: &TransportSchedule,
    inputs_base: &ProcessTable,
    rail_allocation: f64,
) -> Result<ProcessTable, CalcError> {
    if !(0.0..=1.0).contains(&rail_allocation) {
        return Err(ValidationError::AllocationOutOfRange(rail_allocation).into());
    }

    let mut updated = inputs_base.clone().renamed("up_inputs_transport_update");
    for leg in transport_schedule.legs() {
        let i = updated.row_position(&leg.unit_process)?;
        let phase = updated.keys()[i].phase;
        if let Some((lorry_column, rail_column)) = phase.transport_columns() {
            let distance = leg.avg_export_distance;
            updated.set(
                &leg.unit_process,
                lorry_column,
                (1.0 - rail_allocation) * distance,
            )?;
            updated.set(&leg.unit_process, rail_column, rail_allocation * distance)?;
            updated.set(&leg.unit_process, labels::AVG_EXPORT_DISTANCE, 0.0)?;
        }
    }
    Ok(updated)
}
