//! Electricity source allocator
//!
//! Under a trade scenario, each unit process draws electricity from the grid
//! of the country that supplies it. The allocator drains the generic
//! `electricity_kWh` requirement of every non-generation process into the
//! supplying country's electricity column, so the later emission products
//! price the kWh with that country's blended grid profile.

use crate::core::error::CalcError;
use crate::core::labels;
use crate::core::phase::Phase;
use crate::core::trade::TradeSchedule;
use crate::tables::ProcessTable;

/// Move each process's generic electricity requirement into the column of
/// its supplying country and zero the generic cell.
///
/// Electricity-generation processes themselves are left untouched. The
/// moved value lands in exactly one country column per process, so total
/// electricity per process is conserved.
pub fn allocate_electricity(
    inputs: &ProcessTable,
    trade_schedule: &TradeSchedule,
) -> Result<ProcessTable, CalcError> {
    let mut updated = inputs.clone().renamed("up_inputs_elec_update");
    let names: Vec<(String, Phase)> = updated
        .keys()
        .iter()
        .map(|k| (k.name.clone(), k.phase))
        .collect();

    for (process, phase) in names {
        if phase == Phase::ElectricityGeneration {
            continue;
        }
        let requirement = updated.get(&process, labels::ELECTRICITY_GENERIC)?;
        if requirement == 0.0 {
            continue;
        }
        let supplier = trade_schedule.supplier_of(&process)?;
        let column = supplier.electricity_process();
        let existing = updated.get(&process, column)?;
        updated.set(&process, column, existing + requirement)?;
        updated.set(&process, labels::ELECTRICITY_GENERIC, 0.0)?;
    }
    Ok(updated)
}
