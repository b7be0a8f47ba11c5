//! Properties of the total-requirements back-propagation

mod common;

use common::{scenario, scenario_data, ROLLED_STEEL, STEEL};
use railca::core::labels;
use railca::core::{total_requirements, Country, Phase};

#[test]
fn scenario_runs_are_deterministic() {
    let data = scenario_data();
    let s = scenario(Country::Cambodia, Country::Vietnam);
    let first = s.run(&data).unwrap();
    let second = s.run(&data).unwrap();

    assert_eq!(first.inputs_complete, second.inputs_complete);
    assert_eq!(first.total_requirements, second.total_requirements);
    assert_eq!(first.emissions_total, second.emissions_total);
    assert_eq!(first.total_impacts_lifetime, second.total_impacts_lifetime);
}

/// The propagator must only ever be fed the completed input table. Feeding
/// it its own output rescales every non-root row a second time, so the
/// outputs cannot coincide.
#[test]
fn propagation_is_not_idempotent() {
    let data = scenario_data();
    let results = scenario(Country::China, Country::China).run(&data).unwrap();

    let once = &results.total_requirements;
    let twice = total_requirements(once).unwrap();
    assert_ne!(
        once.get(labels::HIGH_SPEED_TRAIN_CAR, ROLLED_STEEL).unwrap(),
        twice.get(labels::HIGH_SPEED_TRAIN_CAR, ROLLED_STEEL).unwrap()
    );
}

#[test]
fn passenger_transportation_row_survives_propagation_unchanged() {
    let data = scenario_data();
    let results = scenario(Country::China, Country::China).run(&data).unwrap();

    for column in results.inputs_complete.columns() {
        assert_eq!(
            results
                .inputs_complete
                .get(labels::HIGH_SPEED_RAIL_OPERATION, column)
                .unwrap(),
            results
                .total_requirements
                .get(labels::HIGH_SPEED_RAIL_OPERATION, column)
                .unwrap()
        );
    }
}

/// Total steel demand must equal the steel drawn by every propagated
/// consumer row, since steel's own base coefficients are what gets scaled.
#[test]
fn propagated_rows_scale_by_their_consumers_demand() {
    let data = scenario_data();
    let results = scenario(Country::China, Country::China).run(&data).unwrap();
    let totals = &results.total_requirements;

    let consumer_demand: f64 = Phase::RawMaterialExtraction
        .consumers()
        .iter()
        .flat_map(|&phase| totals.phase_rows(phase))
        .map(|i| {
            let j = totals.column_position(STEEL).unwrap();
            totals.value_at(i, j)
        })
        .sum();

    // the steel row's electricity coefficient is base 2.0 scaled by demand
    let expected = 2.0 * consumer_demand;
    let actual = totals
        .get(STEEL, Country::China.electricity_process())
        .unwrap();
    assert!((actual - expected).abs() < 1e-15 * expected.abs().max(1.0));
}

#[test]
fn condensation_partitions_the_phase_summary() {
    let data = scenario_data();
    let results = scenario(Country::Myanmar, Country::Myanmar)
        .run(&data)
        .unwrap();
    let complete = &results.phase_summary_complete;
    let condensed = &results.phase_summary_condensed;

    for column in complete.columns() {
        let without_electricity: f64 = Phase::CANONICAL_ORDER
            .iter()
            .filter(|p| **p != Phase::ElectricityGeneration)
            .map(|p| complete.get(p.as_str(), column).unwrap())
            .sum();
        let condensed_total: f64 = condensed
            .index()
            .iter()
            .map(|row| condensed.get(row, column).unwrap())
            .sum();
        assert!((without_electricity - condensed_total).abs() < 1e-9);
    }
}

#[test]
fn cross_border_supply_scales_transport_with_the_route() {
    let data = scenario_data();
    let results = scenario(Country::Cambodia, Country::Vietnam)
        .run(&data)
        .unwrap();

    // Cambodia to Vietnam is the longest fixture route, 2500 km, split 50/50
    let lorry = results
        .inputs_complete
        .get(STEEL, labels::LORRY_RAW_MATERIAL_TRANSPORT)
        .unwrap();
    let rail = results
        .inputs_complete
        .get(STEEL, labels::RAIL_RAW_MATERIAL_TRANSPORT)
        .unwrap();
    assert_eq!(lorry, 1250.0);
    assert_eq!(rail, 1250.0);
}
