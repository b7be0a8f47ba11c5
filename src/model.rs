//! Scenario driver
//!
//! A [`Scenario`] runs the full calculation pipeline for one home-country /
//! trade-scenario combination, retaining every intermediate table for
//! inspection and export. Each run works on fresh copies of the base tables;
//! results of one scenario never leak into the next.

use std::path::Path;

use crate::core::country::Country;
use crate::core::electricity::allocate_electricity;
use crate::core::emissions::{emissions_schedule, emissions_total};
use crate::core::energy::{apply_mix_emissions, energy_mix_emissions, energy_mixes};
use crate::core::error::{CalcError, ValidationMode};
use crate::core::normalize::{apply_passenger_normalization, NormalizationParams};
use crate::core::requirements::total_requirements;
use crate::core::summary::{
    condense_phase_sums, lifetime_impacts, phase_impacts, sum_phases, ConversionRecord,
};
use crate::core::trade::{
    apply_transport, AssignmentRecord, DistanceRecord, TradeSchedule, TransportSchedule,
};
use crate::tables::{csv, Frame, ProcessTable, TableIoError};

/// Base input tables shared by every scenario of a model run
#[derive(Debug, Clone)]
pub struct ScenarioData {
    /// Unit-process requirement matrix
    pub inputs_base: ProcessTable,

    /// Unit-process emission matrix
    pub emissions_base: ProcessTable,

    /// Raw national energy supply (fuel columns, `_gw` suffix)
    pub energy_supply: Frame,

    /// Per-kWh emission factors by fuel type
    pub fuel_emission_factors: Frame,

    /// Emission-species to impact-category conversion factors
    pub impact_conversions: Vec<ConversionRecord>,

    /// Average trade distances by (home, supplier) pair
    pub trade_distances: Vec<DistanceRecord>,
}

impl ScenarioData {
    /// Load the six shared input tables from a data directory with the
    /// conventional file names
    pub fn load(data_dir: &Path) -> Result<Self, TableIoError> {
        Ok(Self {
            inputs_base: csv::read_process_table(
                &data_dir.join("up_inputs_base.csv"),
                "up_inputs_base",
            )?,
            emissions_base: csv::read_process_table(
                &data_dir.join("up_emissions_base.csv"),
                "up_emissions_base",
            )?,
            energy_supply: csv::read_frame(
                &data_dir.join("national_energy_supply.csv"),
                "national_energy_supply",
            )?,
            fuel_emission_factors: csv::read_frame(
                &data_dir.join("unit_energy_emissions.csv"),
                "unit_energy_emissions",
            )?,
            impact_conversions: csv::read_records(
                &data_dir.join("emissions_eq_conversion.csv"),
            )?,
            trade_distances: csv::read_records(&data_dir.join("trade_distances.csv"))?,
        })
    }
}

/// One home-country / trade-scenario combination
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Home country building and operating the line
    pub home_country: Country,

    /// Scenario label used in exported file names
    pub label: String,

    /// Per-unit-process country assignments under this trade scenario
    pub assignments: Vec<AssignmentRecord>,

    /// Fraction of ground transport mass-distance assumed to travel by rail
    pub rail_allocation: f64,

    /// Physical operating assumptions for passenger normalization
    pub params: NormalizationParams,

    /// Strict or lenient data-quality checking
    pub mode: ValidationMode,
}

/// Every table produced by one scenario run, in pipeline order
#[derive(Debug, Clone)]
pub struct ScenarioResults {
    pub trade_schedule: TradeSchedule,
    pub transport_schedule: TransportSchedule,
    pub inputs_transport_update: ProcessTable,
    pub energy_mixes: Frame,
    pub energy_mix_emissions: Frame,
    pub emissions_complete: ProcessTable,
    pub inputs_complete: ProcessTable,
    pub emissions_schedule: ProcessTable,
    pub total_requirements: ProcessTable,
    pub emissions_total: ProcessTable,
    pub phase_summary_complete: Frame,
    pub phase_summary_condensed: Frame,
    pub total_impacts_phase: Frame,
    pub total_impacts_lifetime: Frame,
}

impl Scenario {
    /// Run the full pipeline on fresh copies of the base tables.
    ///
    /// Either every stage succeeds and the results hold fully populated
    /// tables, or the first inconsistency surfaces as a typed error naming
    /// the offending key.
    pub fn run(&self, data: &ScenarioData) -> Result<ScenarioResults, CalcError> {
        let trade_schedule =
            TradeSchedule::build(self.home_country, &self.assignments, &data.inputs_base)?;
        let transport_schedule =
            TransportSchedule::build(&trade_schedule, &data.trade_distances)?;
        let inputs_transport_update =
            apply_transport(&transport_schedule, &data.inputs_base, self.rail_allocation)?;

        let mixes = energy_mixes(&data.energy_supply, self.mode)?;
        let mix_emissions = energy_mix_emissions(&mixes, &data.fuel_emission_factors)?;
        let emissions_complete = apply_mix_emissions(&data.emissions_base, &mix_emissions)?;

        let inputs_elec_update = allocate_electricity(&inputs_transport_update, &trade_schedule)?;
        let inputs_complete = apply_passenger_normalization(&inputs_elec_update, &self.params)?;

        let schedule = emissions_schedule(&inputs_complete, &emissions_complete)?;
        let totals = total_requirements(&inputs_complete)?;
        let em_total = emissions_total(&totals, &schedule)?;

        let phase_summary_complete = sum_phases(&em_total)?;
        let phase_summary_condensed =
            condense_phase_sums(&phase_summary_complete, self.home_country)?;
        let total_impacts_phase =
            phase_impacts(&phase_summary_condensed, &data.impact_conversions)?;
        let total_impacts_lifetime = lifetime_impacts(&total_impacts_phase, self.home_country);

        Ok(ScenarioResults {
            trade_schedule,
            transport_schedule,
            inputs_transport_update,
            energy_mixes: mixes,
            energy_mix_emissions: mix_emissions,
            emissions_complete,
            inputs_complete,
            emissions_schedule: schedule,
            total_requirements: totals,
            emissions_total: em_total,
            phase_summary_complete,
            phase_summary_condensed,
            total_impacts_phase,
            total_impacts_lifetime,
        })
    }
}

impl ScenarioResults {
    /// Export every result table as CSV into a directory, file names
    /// prefixed with the scenario label
    pub fn export(&self, out_dir: &Path, label: &str) -> Result<(), TableIoError> {
        std::fs::create_dir_all(out_dir).map_err(|e| TableIoError::Io {
            path: out_dir.display().to_string(),
            source: e,
        })?;
        let table = |stem: &str| out_dir.join(format!("{label}_{stem}.csv"));

        csv::write_records(&table("trade_schedule"), self.trade_schedule.entries())?;
        csv::write_records(&table("transport_schedule"), self.transport_schedule.legs())?;
        csv::write_process_table(&table("up_inputs_complete"), &self.inputs_complete)?;
        csv::write_process_table(&table("up_emissions_complete"), &self.emissions_complete)?;
        csv::write_process_table(&table("emissions_schedule"), &self.emissions_schedule)?;
        csv::write_process_table(&table("up_total_requirements"), &self.total_requirements)?;
        csv::write_process_table(&table("emissions_total"), &self.emissions_total)?;
        csv::write_frame(&table("national_energy_mixes"), &self.energy_mixes, "country")?;
        csv::write_frame(
            &table("energy_mix_emissions"),
            &self.energy_mix_emissions,
            "country",
        )?;
        csv::write_frame(
            &table("phase_summary_complete"),
            &self.phase_summary_complete,
            "phase",
        )?;
        csv::write_frame(
            &table("phase_summary_condensed"),
            &self.phase_summary_condensed,
            "phase",
        )?;
        csv::write_frame(
            &table("total_impacts_phase"),
            &self.total_impacts_phase,
            "phase",
        )?;
        csv::write_frame(
            &table("total_impacts_lifetime"),
            &self.total_impacts_lifetime,
            "scenario",
        )?;
        Ok(())
    }
}
