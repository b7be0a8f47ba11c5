//! Energy mix resolver
//!
//! Turns raw national energy-supply data into fractional fuel mixes, blends
//! each country's per-kWh emission profile from the mix and a fuel-to-species
//! factor table, and overwrites the electricity-generation rows of the base
//! emission table with the blended national vectors.

use tracing::warn;

use crate::core::country::Country;
use crate::core::error::{CalcError, ValidationError, ValidationMode};
use crate::core::labels;
use crate::tables::{Frame, ProcessTable};

/// Tolerance on the requirement that mix shares sum to 100%
pub const MIX_TOLERANCE: f64 = 1e-6;

/// Normalize a raw national energy-supply frame (fuel columns with a `_gw`
/// suffix, one row per country) into fractional shares of each country's
/// total supply.
///
/// A non-finite supply cell is an error in either mode. A negative cell is
/// a [`ValidationError`] in strict mode and a warning in lenient mode; its
/// share then falls outside [0, 1] but the row still normalizes. A country
/// whose total supply is not positive cannot be normalized at all and is an
/// error in either mode.
pub fn energy_mixes(supply: &Frame, mode: ValidationMode) -> Result<Frame, CalcError> {
    let fuels: Vec<String> = supply
        .columns()
        .iter()
        .map(|c| {
            c.strip_suffix(labels::SUPPLY_SUFFIX)
                .unwrap_or(c.as_str())
                .to_string()
        })
        .collect();

    let fuel_names = fuels.clone();
    let mut mixes = Frame::new("national_energy_mixes", supply.index().to_vec(), fuels);
    for (i, country) in supply.index().iter().enumerate() {
        let mut total = 0.0;
        for j in 0..supply.ncols() {
            let value = supply.value_at(i, j);
            if !value.is_finite() || value < 0.0 {
                let violation = ValidationError::SupplyOutOfRange {
                    country: country.clone(),
                    fuel: fuel_names[j].clone(),
                    value,
                };
                match mode {
                    // a non-finite cell poisons every share, lenient or not
                    _ if !value.is_finite() => return Err(violation.into()),
                    ValidationMode::Strict => return Err(violation.into()),
                    ValidationMode::Lenient => {
                        warn!(country = %country, fuel = %fuel_names[j], value, "negative energy supply cell")
                    }
                }
            }
            total += value;
        }
        if total <= 0.0 {
            return Err(ValidationError::MixNotNormalized {
                country: country.clone(),
                total,
                tolerance: MIX_TOLERANCE,
            }
            .into());
        }

        for j in 0..supply.ncols() {
            mixes.set(country, &fuel_names[j], supply.value_at(i, j) / total)?;
        }
    }
    Ok(mixes)
}

/// Blend each country's per-kWh emission profile: fractional mixes times the
/// fuel-to-emission-species factor frame (rows keyed by fuel name).
pub fn energy_mix_emissions(mixes: &Frame, fuel_factors: &Frame) -> Result<Frame, CalcError> {
    Ok(mixes.dot(fuel_factors, "energy_mix_emissions")?)
}

/// Overwrite the electricity-generation rows of a copy of the base emission
/// table with the blended national emission vectors, one row per
/// country-specific electricity process.
pub fn apply_mix_emissions(
    emissions_base: &ProcessTable,
    mix_emissions: &Frame,
) -> Result<ProcessTable, CalcError> {
    let mut complete = emissions_base.clone().renamed("up_emissions_complete");
    for country in Country::ALL {
        let process = country.electricity_process();
        // replace the whole row, then fill in the blended species values
        let zeros = vec![0.0; complete.ncols()];
        complete.set_process_row(process, &zeros)?;
        for species in mix_emissions.columns() {
            let value = mix_emissions.get(country.as_str(), species)?;
            complete.set(process, species, value)?;
        }
    }
    Ok(complete)
}
