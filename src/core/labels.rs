//! Column and row label contract
//!
//! These exact strings are part of the input-schema contract shared with the
//! CSV datasets; renaming one here without updating the data is a breaking
//! change.

/// Generic electricity requirement column, drained by the electricity
/// source allocator into one of the country-specific columns
pub const ELECTRICITY_GENERIC: &str = "electricity_kWh";

/// Placeholder average-distance column, zeroed once mode-specific transport
/// requirements have been written
pub const AVG_EXPORT_DISTANCE: &str = "avg_export_distance";

// Mode-specific transport requirement columns, one pair per transported
// component class (mass-distance, kg-km)
pub const LORRY_RAW_MATERIAL_TRANSPORT: &str = "lorry_raw_material_transport_kg-km";
pub const RAIL_RAW_MATERIAL_TRANSPORT: &str = "rail_raw_material_transport_kg-km";
pub const LORRY_INTERMEDIATE_COMPONENT_TRANSPORT: &str =
    "lorry_intermediate_component_transport_kg-km";
pub const RAIL_INTERMEDIATE_COMPONENT_TRANSPORT: &str =
    "rail_intermediate_component_transport_kg-km";
pub const LORRY_FINAL_COMPONENT_TRANSPORT: &str = "lorry_final_component_transport_kg-km";
pub const RAIL_FINAL_COMPONENT_TRANSPORT: &str = "rail_final_component_transport_kg-km";

/// The final passenger-transportation unit process; its output is the
/// functional unit, 1 passenger-kilometer
pub const HIGH_SPEED_RAIL_OPERATION: &str = "high_speed_rail_operation_p-km";

// Passenger-normalization target columns
pub const HIGH_SPEED_TRAIN_CAR: &str = "high_speed_train_car_n";
pub const BALLASTED_TRACK: &str = "ballasted_track_km";
pub const NON_BALLASTED_TRACK: &str = "non-ballasted_track_km";
pub const REQUISITE_TRACK_SYSTEMS: &str = "requisite_track_systems_km";

// Impact equivalence totals
pub const CO2_EQ: &str = "CO2_eq_kg";
pub const SO2_EQ: &str = "SO2_eq_kg";

/// Suffix convention for raw national energy supply columns
pub const SUPPLY_SUFFIX: &str = "_gw";
