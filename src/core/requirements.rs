//! Total requirements propagator
//!
//! Back-propagates cumulative material and energy requirements through the
//! fixed phase dependency graph, from final passenger transport back to raw
//! material extraction. After the pass, every row states the total
//! requirement of that process needed to deliver one passenger-kilometer.
//!
//! This is a one-pass accumulation with a run-once contract: it must be fed
//! the completed input table, never its own output. A second pass over
//! already-propagated rows double-counts.

use crate::core::error::{CalcError, SchemaError};
use crate::core::phase::Phase;
use crate::tables::ProcessTable;

/// Backward processing order of the propagation walk.
///
/// Passenger transportation is the fixed root: its row is already stated per
/// functional unit and is never recomputed. Every other phase is visited
/// only after all of its consumers.
pub const BACKWARD_ORDER: [Phase; 8] = [
    Phase::FinalComponentProduction,
    Phase::FinalComponentTransportation,
    Phase::IntermediateComponentProductionII,
    Phase::IntermediateComponentProductionI,
    Phase::IntermediateComponentTransportation,
    Phase::RawMaterialExtraction,
    Phase::RawMaterialTransportation,
    Phase::ElectricityGeneration,
];

/// Whether [`BACKWARD_ORDER`] visits every phase only after all of its
/// consumers, with passenger transportation as the root
pub fn walk_order_is_valid() -> bool {
    BACKWARD_ORDER.iter().enumerate().all(|(position, phase)| {
        phase.consumers().iter().all(|consumer| {
            *consumer == Phase::PassengerTransportation
                || BACKWARD_ORDER
                    .iter()
                    .position(|p| p == consumer)
                    .is_some_and(|consumer_position| consumer_position < position)
        })
    })
}

/// Compute the total-requirements table from the completed input table.
///
/// For each process of each phase (walked in [`BACKWARD_ORDER`]), the
/// already-propagated rows of the phase's consumers are summed in that
/// process's requirement column, and the process's base coefficients are
/// scaled by the subtotal. Rows are written once and never revisited.
///
/// Structural assertions, absent from the original silent implementation:
/// every phase must have at least one process, and every propagated process
/// must appear as a requirement column.
pub fn total_requirements(inputs_complete: &ProcessTable) -> Result<ProcessTable, CalcError> {
    debug_assert!(walk_order_is_valid());

    for phase in Phase::CANONICAL_ORDER {
        if inputs_complete.phase_rows(phase).is_empty() {
            return Err(SchemaError::EmptyPhase(phase.as_str().to_string()).into());
        }
    }

    let mut totals = inputs_complete.clone().renamed("up_total_requirements");
    for phase in BACKWARD_ORDER {
        for i in totals.phase_rows(phase) {
            let process = totals.keys()[i].name.clone();
            let j = totals.column_position(&process)?;
            let mut subtotal = 0.0;
            for &consumer in phase.consumers() {
                for r in totals.phase_rows(consumer) {
                    subtotal += totals.value_at(r, j);
                }
            }
            totals.scale_row_from(inputs_complete, i, subtotal);
        }
    }
    Ok(totals)
}
