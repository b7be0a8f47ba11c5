//! Shared test fixtures for integration tests
//!
//! Builds a small but structurally complete model: twenty unit processes
//! spanning all nine lifecycle phases, four emission species, three fuels,
//! and trade distances for every cross-border country pair.

#![allow(dead_code)]

use std::path::Path;

use railca::core::labels;
use railca::core::normalize::NormalizationParams;
use railca::core::summary::ConversionRecord;
use railca::core::trade::{AssignmentRecord, DistanceRecord};
use railca::core::{Country, Phase, ValidationMode};
use railca::model::{Scenario, ScenarioData};
use railca::tables::{csv, Frame, ProcessKey, ProcessTable};

pub const STEEL: &str = "steel_kg";
pub const ROLLED_STEEL: &str = "rolled_steel_kg";
pub const TRACK_PANEL: &str = "track_panel_n";

/// Every unit process of the fixture model, in table order
pub fn process_index() -> Vec<(Phase, String)> {
    let mut processes: Vec<(Phase, String)> = Country::ALL
        .into_iter()
        .map(|c| {
            (
                Phase::ElectricityGeneration,
                c.electricity_process().to_string(),
            )
        })
        .collect();
    processes.extend(
        [
            (Phase::RawMaterialExtraction, STEEL),
            (
                Phase::RawMaterialTransportation,
                labels::LORRY_RAW_MATERIAL_TRANSPORT,
            ),
            (
                Phase::RawMaterialTransportation,
                labels::RAIL_RAW_MATERIAL_TRANSPORT,
            ),
            (Phase::IntermediateComponentProductionI, ROLLED_STEEL),
            (Phase::IntermediateComponentProductionII, TRACK_PANEL),
            (
                Phase::IntermediateComponentTransportation,
                labels::LORRY_INTERMEDIATE_COMPONENT_TRANSPORT,
            ),
            (
                Phase::IntermediateComponentTransportation,
                labels::RAIL_INTERMEDIATE_COMPONENT_TRANSPORT,
            ),
            (Phase::FinalComponentProduction, labels::HIGH_SPEED_TRAIN_CAR),
            (Phase::FinalComponentProduction, labels::BALLASTED_TRACK),
            (Phase::FinalComponentProduction, labels::NON_BALLASTED_TRACK),
            (
                Phase::FinalComponentProduction,
                labels::REQUISITE_TRACK_SYSTEMS,
            ),
            (
                Phase::FinalComponentTransportation,
                labels::LORRY_FINAL_COMPONENT_TRANSPORT,
            ),
            (
                Phase::FinalComponentTransportation,
                labels::RAIL_FINAL_COMPONENT_TRANSPORT,
            ),
            (
                Phase::PassengerTransportation,
                labels::HIGH_SPEED_RAIL_OPERATION,
            ),
        ]
        .into_iter()
        .map(|(p, n)| (p, n.to_string())),
    );
    processes
}

/// Base unit-process input table: one requirement column per process plus
/// the generic electricity and placeholder distance columns
pub fn inputs_base() -> ProcessTable {
    let processes = process_index();
    let mut columns: Vec<String> = processes.iter().map(|(_, n)| n.clone()).collect();
    columns.push(labels::ELECTRICITY_GENERIC.to_string());
    columns.push(labels::AVG_EXPORT_DISTANCE.to_string());

    let keys = processes
        .iter()
        .map(|(p, n)| ProcessKey::new(*p, n.clone()))
        .collect();
    let mut inputs = ProcessTable::new("up_inputs_base", keys, columns);

    let cells: &[(&str, &str, f64)] = &[
        (STEEL, labels::ELECTRICITY_GENERIC, 2.0),
        (STEEL, labels::AVG_EXPORT_DISTANCE, 1.0),
        (ROLLED_STEEL, STEEL, 1.1),
        (ROLLED_STEEL, labels::ELECTRICITY_GENERIC, 0.5),
        (ROLLED_STEEL, labels::AVG_EXPORT_DISTANCE, 1.0),
        (TRACK_PANEL, ROLLED_STEEL, 50.0),
        (TRACK_PANEL, labels::ELECTRICITY_GENERIC, 10.0),
        (TRACK_PANEL, labels::AVG_EXPORT_DISTANCE, 1.0),
        (labels::HIGH_SPEED_TRAIN_CAR, ROLLED_STEEL, 20_000.0),
        (labels::HIGH_SPEED_TRAIN_CAR, labels::ELECTRICITY_GENERIC, 500.0),
        (labels::HIGH_SPEED_TRAIN_CAR, labels::AVG_EXPORT_DISTANCE, 1.0),
        (labels::BALLASTED_TRACK, TRACK_PANEL, 100.0),
        (labels::BALLASTED_TRACK, labels::ELECTRICITY_GENERIC, 50.0),
        (labels::BALLASTED_TRACK, labels::AVG_EXPORT_DISTANCE, 1.0),
        (labels::NON_BALLASTED_TRACK, TRACK_PANEL, 120.0),
        (labels::NON_BALLASTED_TRACK, labels::ELECTRICITY_GENERIC, 50.0),
        (labels::NON_BALLASTED_TRACK, labels::AVG_EXPORT_DISTANCE, 1.0),
        (labels::REQUISITE_TRACK_SYSTEMS, STEEL, 5_000.0),
        (labels::REQUISITE_TRACK_SYSTEMS, labels::ELECTRICITY_GENERIC, 30.0),
        (labels::REQUISITE_TRACK_SYSTEMS, labels::AVG_EXPORT_DISTANCE, 1.0),
        (
            labels::RAIL_RAW_MATERIAL_TRANSPORT,
            labels::ELECTRICITY_GENERIC,
            0.0002,
        ),
        (
            labels::RAIL_INTERMEDIATE_COMPONENT_TRANSPORT,
            labels::ELECTRICITY_GENERIC,
            0.0002,
        ),
        (
            labels::RAIL_FINAL_COMPONENT_TRANSPORT,
            labels::ELECTRICITY_GENERIC,
            0.0002,
        ),
        (
            labels::HIGH_SPEED_RAIL_OPERATION,
            labels::ELECTRICITY_GENERIC,
            0.09,
        ),
    ];
    for (process, column, value) in cells {
        inputs.set(process, column, *value).unwrap();
    }
    inputs
}

/// Base unit-process emission table over four species
pub fn emissions_base() -> ProcessTable {
    let processes = process_index();
    let columns = vec![
        "CO2_kg".to_string(),
        "CH4_kg".to_string(),
        "SO2_kg".to_string(),
        "NOx_kg".to_string(),
    ];
    let keys = processes
        .iter()
        .map(|(p, n)| ProcessKey::new(*p, n.clone()))
        .collect();
    let mut emissions = ProcessTable::new("up_emissions_base", keys, columns);

    let rows: &[(&str, [f64; 4])] = &[
        (STEEL, [1.8, 0.002, 0.003, 0.002]),
        (labels::LORRY_RAW_MATERIAL_TRANSPORT, [0.0001, 0.0, 0.0, 0.000002]),
        (
            labels::LORRY_INTERMEDIATE_COMPONENT_TRANSPORT,
            [0.0001, 0.0, 0.0, 0.000002],
        ),
        (
            labels::LORRY_FINAL_COMPONENT_TRANSPORT,
            [0.0001, 0.0, 0.0, 0.000002],
        ),
        (ROLLED_STEEL, [0.3, 0.0, 0.0004, 0.0]),
        (TRACK_PANEL, [5.0, 0.0, 0.0, 0.004]),
        (labels::HIGH_SPEED_TRAIN_CAR, [8_000.0, 0.0, 4.0, 0.0]),
        (labels::BALLASTED_TRACK, [20_000.0, 0.0, 0.0, 15.0]),
        (labels::NON_BALLASTED_TRACK, [26_000.0, 0.0, 0.0, 18.0]),
        (labels::REQUISITE_TRACK_SYSTEMS, [9_000.0, 0.0, 3.0, 0.0]),
    ];
    for (process, values) in rows {
        emissions.set_process_row(process, values).unwrap();
    }
    emissions
}

/// Raw national energy supply; China runs entirely on coal so its grid
/// profile is exactly the coal factor row
pub fn energy_supply() -> Frame {
    Frame::from_rows(
        "national_energy_supply",
        vec!["coal_gw".into(), "gas_gw".into(), "hydro_gw".into()],
        vec![
            ("Cambodia".into(), vec![1.0, 1.0, 2.0]),
            ("China".into(), vec![8.0, 0.0, 0.0]),
            ("LaoPDR".into(), vec![0.0, 0.0, 5.0]),
            ("Myanmar".into(), vec![1.0, 2.0, 1.0]),
            ("Thailand".into(), vec![3.0, 3.0, 2.0]),
            ("Vietnam".into(), vec![2.0, 1.0, 1.0]),
        ],
    )
    .unwrap()
}

/// Per-kWh emission factors by fuel
pub fn fuel_emission_factors() -> Frame {
    Frame::from_rows(
        "unit_energy_emissions",
        vec![
            "CO2_kg".into(),
            "CH4_kg".into(),
            "SO2_kg".into(),
            "NOx_kg".into(),
        ],
        vec![
            ("coal".into(), vec![1.0, 0.00001, 0.006, 0.003]),
            ("gas".into(), vec![0.5, 0.00002, 0.0005, 0.001]),
            ("hydro".into(), vec![0.0, 0.0, 0.0, 0.0]),
        ],
    )
    .unwrap()
}

/// Species-to-category conversion factors covering all four fixture species
pub fn impact_conversions() -> Vec<ConversionRecord> {
    let records = [
        ("CO2_kg", "global_warming_potential", 1.0),
        ("CH4_kg", "global_warming_potential", 25.0),
        ("SO2_kg", "air_acidification_potential", 1.0),
        ("NOx_kg", "air_acidification_potential", 0.7),
    ];
    records
        .into_iter()
        .map(|(emission, category, conversion)| ConversionRecord {
            emission: emission.to_string(),
            category: category.to_string(),
            conversion,
        })
        .collect()
}

/// Distance between two countries in the fixture geography; proportional to
/// their separation in canonical table order, so Cambodia to Vietnam is the
/// longest route at 2500 km
pub fn fixture_distance(home: Country, supplier: Country) -> f64 {
    let position = |c: Country| {
        Country::ALL
            .iter()
            .position(|x| *x == c)
            .unwrap() as f64
    };
    500.0 * (position(home) - position(supplier)).abs()
}

/// Trade distances for every ordered cross-border country pair
pub fn trade_distances() -> Vec<DistanceRecord> {
    let mut records = Vec::new();
    for home in Country::ALL {
        for supplier in Country::ALL {
            if home == supplier {
                continue;
            }
            records.push(DistanceRecord {
                home_country: home,
                supplying_country: supplier,
                avg_export_distance: fixture_distance(home, supplier),
            });
        }
    }
    records
}

pub fn scenario_data() -> ScenarioData {
    ScenarioData {
        inputs_base: inputs_base(),
        emissions_base: emissions_base(),
        energy_supply: energy_supply(),
        fuel_emission_factors: fuel_emission_factors(),
        impact_conversions: impact_conversions(),
        trade_distances: trade_distances(),
    }
}

pub fn norm_params() -> NormalizationParams {
    NormalizationParams {
        avg_train_capacity: 500.0,
        avg_capacity_filled: 0.7,
        avg_daily_trips_per_train: 10.0,
        avg_train_trip_distance_km: 500.0,
        avg_train_lifespan_yr: 30.0,
        avg_number_active_trains: 50.0,
        avg_train_mass_kg: 400_000.0,
        avg_infrastructure_lifespan_yr: 60.0,
        avg_pct_ballasted_track: 0.6,
        days_per_year: 365.0,
    }
}

/// Assign every unit process to one supplying country
pub fn assignments(supplier: Country) -> Vec<AssignmentRecord> {
    process_index()
        .into_iter()
        .map(|(_, unit_process)| AssignmentRecord {
            unit_process,
            country: supplier,
        })
        .collect()
}

/// A scenario with every process supplied by one country
pub fn scenario(home: Country, supplier: Country) -> Scenario {
    Scenario {
        home_country: home,
        label: format!("{home}_from_{supplier}"),
        assignments: assignments(supplier),
        rail_allocation: 0.5,
        params: norm_params(),
        mode: ValidationMode::Strict,
    }
}

/// Write the fixture dataset as a data directory for CLI tests, plus an
/// autarky assignment file for the given country
pub fn write_fixture_dir(dir: &Path, autarky: Country) -> std::path::PathBuf {
    csv::write_process_table(&dir.join("up_inputs_base.csv"), &inputs_base()).unwrap();
    csv::write_process_table(&dir.join("up_emissions_base.csv"), &emissions_base()).unwrap();
    csv::write_frame(
        &dir.join("national_energy_supply.csv"),
        &energy_supply(),
        "country",
    )
    .unwrap();
    csv::write_frame(
        &dir.join("unit_energy_emissions.csv"),
        &fuel_emission_factors(),
        "fuel",
    )
    .unwrap();
    csv::write_records(
        &dir.join("emissions_eq_conversion.csv"),
        &impact_conversions(),
    )
    .unwrap();
    csv::write_records(&dir.join("trade_distances.csv"), &trade_distances()).unwrap();
    std::fs::write(
        dir.join("norm_params.yaml"),
        serde_yml::to_string(&norm_params()).unwrap(),
    )
    .unwrap();

    let scenario_path = dir.join(format!("autarky_{}.csv", autarky.as_str().to_lowercase()));
    csv::write_records(&scenario_path, &assignments(autarky)).unwrap();
    scenario_path
}
