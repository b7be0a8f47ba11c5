//! Passenger normalization
//!
//! The single place where "per unit of intermediate good" quantities become
//! "per one passenger-kilometer" functional-unit terms. Fixed algebraic
//! formulas over the operating assumptions yield the rolling-stock and track
//! requirements of delivering one p-km, written into the passenger
//! transportation row.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::error::{CalcError, ValidationError};
use crate::core::labels;
use crate::tables::ProcessTable;

/// Physical operating assumptions used to normalize the model to one
/// passenger-kilometer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizationParams {
    /// Average train capacity (seats)
    pub avg_train_capacity: f64,

    /// Average fraction of capacity filled
    pub avg_capacity_filled: f64,

    /// Average daily trips per train
    pub avg_daily_trips_per_train: f64,

    /// Average train trip distance (km)
    pub avg_train_trip_distance_km: f64,

    /// Average train lifespan (years)
    pub avg_train_lifespan_yr: f64,

    /// Average number of active trains on the line
    pub avg_number_active_trains: f64,

    /// Average train mass (kg); kept with the parameter set for reporting
    /// even though the per-p-km formulas do not use it
    pub avg_train_mass_kg: f64,

    /// Average infrastructure lifespan (years)
    pub avg_infrastructure_lifespan_yr: f64,

    /// Fraction of track that is ballasted
    pub avg_pct_ballasted_track: f64,

    /// Operating days per year
    #[serde(default = "default_days_per_year")]
    pub days_per_year: f64,
}

fn default_days_per_year() -> f64 {
    365.0
}

/// Errors loading a normalization parameter file
#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("failed to read parameter file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed parameter file: {0}")]
    Yaml(#[from] serde_yml::Error),
}

impl NormalizationParams {
    /// Load parameters from a YAML file
    pub fn from_yaml(path: &Path) -> Result<Self, ParamsError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yml::from_str(&contents)?)
    }

    /// Check every parameter against its physical range
    pub fn validate(&self) -> Result<(), ValidationError> {
        let positive: [(&'static str, f64); 7] = [
            ("avg_train_capacity", self.avg_train_capacity),
            ("avg_daily_trips_per_train", self.avg_daily_trips_per_train),
            ("avg_train_trip_distance_km", self.avg_train_trip_distance_km),
            ("avg_train_lifespan_yr", self.avg_train_lifespan_yr),
            ("avg_number_active_trains", self.avg_number_active_trains),
            (
                "avg_infrastructure_lifespan_yr",
                self.avg_infrastructure_lifespan_yr,
            ),
            ("days_per_year", self.days_per_year),
        ];
        for (name, value) in positive {
            if value <= 0.0 {
                return Err(ValidationError::ParameterOutOfRange {
                    name,
                    value,
                    reason: "must be positive",
                });
            }
        }
        if !(0.0..=1.0).contains(&self.avg_capacity_filled) || self.avg_capacity_filled == 0.0 {
            return Err(ValidationError::ParameterOutOfRange {
                name: "avg_capacity_filled",
                value: self.avg_capacity_filled,
                reason: "must be in (0, 1]",
            });
        }
        if !(0.0..=1.0).contains(&self.avg_pct_ballasted_track) {
            return Err(ValidationError::ParameterOutOfRange {
                name: "avg_pct_ballasted_track",
                value: self.avg_pct_ballasted_track,
                reason: "must be in [0, 1]",
            });
        }
        Ok(())
    }

    /// Passenger-kilometers delivered over one unit of lifespan-years
    fn annual_p_km(&self) -> f64 {
        self.avg_train_capacity
            * self.avg_capacity_filled
            * self.avg_daily_trips_per_train
            * self.avg_train_trip_distance_km
            * self.avg_number_active_trains
            * self.days_per_year
    }

    /// Train cars required per passenger-kilometer
    pub fn train_car_requirement(&self) -> f64 {
        1.0 / (self.annual_p_km() * self.avg_train_lifespan_yr)
    }

    /// Ballasted track kilometers required per passenger-kilometer
    pub fn ballasted_track_requirement(&self) -> f64 {
        self.avg_pct_ballasted_track
            / (self.annual_p_km() * self.avg_infrastructure_lifespan_yr)
    }

    /// Non-ballasted track kilometers required per passenger-kilometer
    pub fn non_ballasted_track_requirement(&self) -> f64 {
        (1.0 - self.avg_pct_ballasted_track)
            / (self.annual_p_km() * self.avg_infrastructure_lifespan_yr)
    }

    /// Track-system kilometers required per passenger-kilometer
    pub fn track_systems_requirement(&self) -> f64 {
        1.0 / (self.annual_p_km() * self.avg_infrastructure_lifespan_yr)
    }
}

/// Write the four per-p-km requirements into the passenger transportation
/// row of a copy of the input table. All downstream values are in
/// functional-unit terms thereafter.
pub fn apply_passenger_normalization(
    inputs: &ProcessTable,
    params: &NormalizationParams,
) -> Result<ProcessTable, CalcError> {
    params.validate()?;
    let mut complete = inputs.clone().renamed("up_inputs_complete");
    let operation = labels::HIGH_SPEED_RAIL_OPERATION;
    complete.set(
        operation,
        labels::HIGH_SPEED_TRAIN_CAR,
        params.train_car_requirement(),
    )?;
    complete.set(
        operation,
        labels::BALLASTED_TRACK,
        params.ballasted_track_requirement(),
    )?;
    complete.set(
        operation,
        labels::NON_BALLASTED_TRACK,
        params.non_ballasted_track_requirement(),
    )?;
    complete.set(
        operation,
        labels::REQUISITE_TRACK_SYSTEMS,
        params.track_systems_requirement(),
    )?;
    Ok(complete)
}
