//! Lifecycle phases and the fixed phase dependency graph
//!
//! Nine detailed phases describe when in the product's life an activity
//! occurs. The phases form a fixed directed acyclic dependency chain, from
//! passenger transportation back to raw material extraction, with
//! electricity generation feeding every phase that consumes power. The graph
//! is domain knowledge, not discovered at runtime.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::CalcError;

/// One of the nine detailed lifecycle phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    ElectricityGeneration,
    RawMaterialExtraction,
    RawMaterialTransportation,
    // snake_case would split the roman numerals into i_i; the renames pin
    // the serde labels to the table-key contract
    #[serde(rename = "intermediate_component_production_i")]
    IntermediateComponentProductionI,
    #[serde(rename = "intermediate_component_production_ii")]
    IntermediateComponentProductionII,
    IntermediateComponentTransportation,
    FinalComponentProduction,
    FinalComponentTransportation,
    PassengerTransportation,
}

/// One of the three condensed summary phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CondensedPhase {
    MaterialsExtraction,
    Construction,
    UsePhase,
}

impl Phase {
    /// Canonical reporting order for phase summaries
    pub const CANONICAL_ORDER: [Phase; 9] = [
        Phase::ElectricityGeneration,
        Phase::RawMaterialExtraction,
        Phase::RawMaterialTransportation,
        Phase::IntermediateComponentProductionI,
        Phase::IntermediateComponentProductionII,
        Phase::IntermediateComponentTransportation,
        Phase::FinalComponentProduction,
        Phase::FinalComponentTransportation,
        Phase::PassengerTransportation,
    ];

    /// The phase label as it appears in table keys
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::ElectricityGeneration => "electricity_generation",
            Phase::RawMaterialExtraction => "raw_material_extraction",
            Phase::RawMaterialTransportation => "raw_material_transportation",
            Phase::IntermediateComponentProductionI => "intermediate_component_production_i",
            Phase::IntermediateComponentProductionII => "intermediate_component_production_ii",
            Phase::IntermediateComponentTransportation => "intermediate_component_transportation",
            Phase::FinalComponentProduction => "final_component_production",
            Phase::FinalComponentTransportation => "final_component_transportation",
            Phase::PassengerTransportation => "passenger_transportation",
        }
    }

    /// The phases that directly consume this phase's output.
    ///
    /// These edges drive the total-requirements back-propagation: the
    /// cumulative requirement of a phase's processes is summed over the
    /// already-propagated rows of exactly these consumers.
    pub fn consumers(&self) -> &'static [Phase] {
        match self {
            Phase::PassengerTransportation => &[],
            Phase::FinalComponentProduction => &[Phase::PassengerTransportation],
            Phase::FinalComponentTransportation => &[Phase::FinalComponentProduction],
            Phase::IntermediateComponentProductionII => &[
                Phase::FinalComponentProduction,
                Phase::PassengerTransportation,
            ],
            Phase::IntermediateComponentProductionI => &[
                Phase::IntermediateComponentProductionII,
                Phase::FinalComponentProduction,
                Phase::PassengerTransportation,
            ],
            Phase::IntermediateComponentTransportation => &[
                Phase::IntermediateComponentProductionI,
                Phase::IntermediateComponentProductionII,
            ],
            Phase::RawMaterialExtraction => &[
                Phase::IntermediateComponentProductionI,
                Phase::IntermediateComponentProductionII,
                Phase::FinalComponentProduction,
                Phase::PassengerTransportation,
            ],
            Phase::RawMaterialTransportation => &[Phase::RawMaterialExtraction],
            Phase::ElectricityGeneration => &[
                Phase::RawMaterialExtraction,
                Phase::IntermediateComponentProductionI,
                Phase::IntermediateComponentProductionII,
                Phase::FinalComponentProduction,
                Phase::PassengerTransportation,
            ],
        }
    }

    /// The condensed summary phase this phase belongs to.
    ///
    /// Electricity generation belongs to none: its emissions are
    /// redistributed into the consuming phases during back-propagation, so
    /// counting it again here would double it. The exclusion is deliberate.
    pub fn condensed(&self) -> Option<CondensedPhase> {
        match self {
            Phase::RawMaterialExtraction | Phase::RawMaterialTransportation => {
                Some(CondensedPhase::MaterialsExtraction)
            }
            Phase::IntermediateComponentProductionI
            | Phase::IntermediateComponentProductionII
            | Phase::IntermediateComponentTransportation
            | Phase::FinalComponentProduction
            | Phase::FinalComponentTransportation => Some(CondensedPhase::Construction),
            Phase::PassengerTransportation => Some(CondensedPhase::UsePhase),
            Phase::ElectricityGeneration => None,
        }
    }

    /// Whether transport requirements are synthesized for this phase's
    /// processes, and into which pair of (lorry, rail) requirement columns
    pub fn transport_columns(&self) -> Option<(&'static str, &'static str)> {
        use crate::core::labels;
        match self {
            Phase::RawMaterialExtraction => Some((
                labels::LORRY_RAW_MATERIAL_TRANSPORT,
                labels::RAIL_RAW_MATERIAL_TRANSPORT,
            )),
            Phase::IntermediateComponentProductionI | Phase::IntermediateComponentProductionII => {
                Some((
                    labels::LORRY_INTERMEDIATE_COMPONENT_TRANSPORT,
                    labels::RAIL_INTERMEDIATE_COMPONENT_TRANSPORT,
                ))
            }
            Phase::FinalComponentProduction => Some((
                labels::LORRY_FINAL_COMPONENT_TRANSPORT,
                labels::RAIL_FINAL_COMPONENT_TRANSPORT,
            )),
            _ => None,
        }
    }
}

impl CondensedPhase {
    /// All condensed phases, in reporting order
    pub const ALL: [CondensedPhase; 3] = [
        CondensedPhase::MaterialsExtraction,
        CondensedPhase::Construction,
        CondensedPhase::UsePhase,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CondensedPhase::MaterialsExtraction => "materials_extraction",
            CondensedPhase::Construction => "construction",
            CondensedPhase::UsePhase => "use_phase",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for CondensedPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Phase::CANONICAL_ORDER
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| CalcError::UnknownPhase(s.to_string()))
    }
}
