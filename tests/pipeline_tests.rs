//! Stage-by-stage checks over the full fixture model

mod common;

use common::{scenario, scenario_data, STEEL};
use railca::core::labels;
use railca::core::{CalcError, Country, Phase, SchemaError};

#[test]
fn full_run_produces_every_table() {
    let data = scenario_data();
    let results = scenario(Country::China, Country::China).run(&data).unwrap();

    assert_eq!(results.trade_schedule.entries().len(), 20);
    assert_eq!(results.transport_schedule.legs().len(), 20);
    assert_eq!(results.inputs_complete.nrows(), 20);
    assert_eq!(results.emissions_complete.nrows(), 20);
    assert_eq!(results.phase_summary_complete.nrows(), 9);
    assert_eq!(results.phase_summary_condensed.nrows(), 3);
    assert_eq!(
        results.total_impacts_phase.columns(),
        &[labels::CO2_EQ, labels::SO2_EQ]
    );
    assert_eq!(
        results.total_impacts_lifetime.index(),
        &["total_impacts_China"]
    );
}

#[test]
fn autarky_leaves_no_transport_requirements() {
    let data = scenario_data();
    let results = scenario(Country::China, Country::China).run(&data).unwrap();

    assert_eq!(
        results
            .inputs_complete
            .get(STEEL, labels::LORRY_RAW_MATERIAL_TRANSPORT)
            .unwrap(),
        0.0
    );
    assert_eq!(
        results
            .inputs_complete
            .get(STEEL, labels::RAIL_RAW_MATERIAL_TRANSPORT)
            .unwrap(),
        0.0
    );
    // the placeholder distance cell is drained even at zero distance
    assert_eq!(
        results
            .inputs_complete
            .get(STEEL, labels::AVG_EXPORT_DISTANCE)
            .unwrap(),
        0.0
    );
}

#[test]
fn generic_electricity_is_fully_drained_before_the_products() {
    let data = scenario_data();
    let results = scenario(Country::China, Country::China).run(&data).unwrap();

    for key in results.inputs_complete.keys() {
        assert_eq!(
            results
                .inputs_complete
                .get(&key.name, labels::ELECTRICITY_GENERIC)
                .unwrap(),
            0.0,
            "generic electricity left in row '{}'",
            key.name
        );
    }
}

/// Steel drawing 2 kWh from China's pure-coal grid embodies exactly 2 kg CO2
/// in its input schedule (it has no other nonzero inputs under autarky).
#[test]
fn schedule_prices_electricity_with_the_supplying_grid() {
    let data = scenario_data();
    let results = scenario(Country::China, Country::China).run(&data).unwrap();

    let co2 = results.emissions_schedule.get(STEEL, "CO2_kg").unwrap();
    assert!((co2 - 2.0).abs() < 1e-12);

    // hydro-only LaoPDR embodies nothing
    let results = scenario(Country::China, Country::LaoPDR).run(&data).unwrap();
    let co2 = results.emissions_schedule.get(STEEL, "CO2_kg").unwrap();
    // steel still carries cross-border transport emissions, but no grid CO2
    let transport_only = results
        .inputs_complete
        .get(STEEL, labels::LORRY_RAW_MATERIAL_TRANSPORT)
        .unwrap()
        * 0.0001;
    assert!((co2 - transport_only).abs() < 1e-12);
}

#[test]
fn skipping_the_allocator_fails_the_emission_product() {
    use railca::core::{
        apply_passenger_normalization, apply_transport, emissions_schedule, energy_mixes,
        energy_mix_emissions, apply_mix_emissions, TradeSchedule, TransportSchedule,
    };
    use railca::core::ValidationMode;

    let data = scenario_data();
    let s = scenario(Country::China, Country::China);

    let trade = TradeSchedule::build(s.home_country, &s.assignments, &data.inputs_base).unwrap();
    let transport = TransportSchedule::build(&trade, &data.trade_distances).unwrap();
    let inputs = apply_transport(&transport, &data.inputs_base, s.rail_allocation).unwrap();
    let mixes = energy_mixes(&data.energy_supply, ValidationMode::Strict).unwrap();
    let blended = energy_mix_emissions(&mixes, &data.fuel_emission_factors).unwrap();
    let emissions = apply_mix_emissions(&data.emissions_base, &blended).unwrap();

    // electricity allocation deliberately skipped
    let inputs = apply_passenger_normalization(&inputs, &s.params).unwrap();
    assert!(matches!(
        emissions_schedule(&inputs, &emissions),
        Err(CalcError::Schema(SchemaError::UnmatchedNonzeroColumn { .. }))
    ));
}

#[test]
fn phase_summary_rows_follow_canonical_order() {
    let data = scenario_data();
    let results = scenario(Country::Thailand, Country::Thailand)
        .run(&data)
        .unwrap();
    let expected: Vec<&str> = Phase::CANONICAL_ORDER.iter().map(|p| p.as_str()).collect();
    assert_eq!(results.phase_summary_complete.index(), expected.as_slice());
}
