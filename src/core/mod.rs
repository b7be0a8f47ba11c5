//! Core module - the calculation pipeline and its fundamental types

pub mod country;
pub mod electricity;
pub mod emissions;
pub mod energy;
pub mod error;
pub mod labels;
pub mod normalize;
pub mod phase;
pub mod requirements;
pub mod summary;
pub mod trade;

pub use country::Country;
pub use error::{CalcError, SchemaError, ValidationError, ValidationMode};
pub use phase::{CondensedPhase, Phase};

pub use electricity::allocate_electricity;
pub use emissions::{emissions_schedule, emissions_total};
pub use energy::{apply_mix_emissions, energy_mix_emissions, energy_mixes, MIX_TOLERANCE};
pub use normalize::{apply_passenger_normalization, NormalizationParams, ParamsError};
pub use requirements::{total_requirements, walk_order_is_valid, BACKWARD_ORDER};
pub use summary::{
    condense_phase_sums, lifetime_impacts, phase_impacts, sum_phases, ConversionRecord,
    ImpactCategory,
};
pub use trade::{
    apply_transport, AssignmentRecord, DistanceRecord, TradeEntry, TradeSchedule, TransportLeg,
    TransportSchedule,
};
