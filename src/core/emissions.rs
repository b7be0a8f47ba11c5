//! Emissions calculator
//!
//! Two matrix products turn requirement tables into absolute emissions per
//! species: the schedule prices one unit of each process's output through
//! its upstream requirements, and the total prices the back-propagated
//! requirements of delivering one passenger-kilometer.

use crate::core::error::CalcError;
use crate::tables::ProcessTable;

/// Emissions associated with one unit of each unit process's output:
/// completed inputs times the completed per-unit emission table.
pub fn emissions_schedule(
    inputs_complete: &ProcessTable,
    emissions_complete: &ProcessTable,
) -> Result<ProcessTable, CalcError> {
    Ok(inputs_complete.dot(emissions_complete, "emissions_schedule")?)
}

/// Total emissions per functional unit: back-propagated total requirements
/// times the emissions schedule.
pub fn emissions_total(
    total_requirements: &ProcessTable,
    schedule: &ProcessTable,
) -> Result<ProcessTable, CalcError> {
    Ok(total_requirements.dot(schedule, "emissions_total")?)
}
