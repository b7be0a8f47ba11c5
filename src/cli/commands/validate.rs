//! `railca validate` command - check a data directory against the
//! input-schema contract without computing anything

use std::path::PathBuf;

use console::style;
use miette::Result;

use crate::core::energy::energy_mixes;
use crate::core::error::ValidationMode;
use crate::core::labels;
use crate::core::summary::ImpactCategory;
use crate::core::trade::AssignmentRecord;
use crate::core::{Country, Phase};
use crate::model::ScenarioData;
use crate::tables::csv;

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// Directory holding the base input tables
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Also check a trade-scenario assignment file against the process index
    #[arg(long)]
    pub scenario: Option<PathBuf>,
}

/// Validation statistics
#[derive(Default)]
struct ValidationStats {
    checks_run: usize,
    checks_failed: usize,
}

impl ValidationStats {
    fn record(&mut self, name: &str, result: std::result::Result<(), String>) {
        self.checks_run += 1;
        match result {
            Ok(()) => println!("  {} {}", style("✓").green(), name),
            Err(message) => {
                self.checks_failed += 1;
                println!("  {} {}: {}", style("✗").red(), name, message);
            }
        }
    }
}

pub fn run(args: ValidateArgs) -> Result<()> {
    println!(
        "{} Validating data directory {}...\n",
        style("→").blue(),
        args.data_dir.display()
    );

    let data = ScenarioData::load(&args.data_dir).map_err(|e| miette::miette!("{}", e))?;
    let mut stats = ValidationStats::default();

    stats.record("every phase has unit processes", {
        match Phase::CANONICAL_ORDER
            .iter()
            .find(|p| data.inputs_base.phase_rows(**p).is_empty())
        {
            None => Ok(()),
            Some(phase) => Err(format!("phase '{phase}' has no rows")),
        }
    });

    stats.record("requirement columns cover the contract", {
        let mut required: Vec<&str> = vec![
            labels::ELECTRICITY_GENERIC,
            labels::AVG_EXPORT_DISTANCE,
            labels::HIGH_SPEED_TRAIN_CAR,
            labels::BALLASTED_TRACK,
            labels::NON_BALLASTED_TRACK,
            labels::REQUISITE_TRACK_SYSTEMS,
        ];
        required.extend(Country::ALL.iter().map(|c| c.electricity_process()));
        match required
            .iter()
            .find(|c| data.inputs_base.column_position(c).is_err())
        {
            None => Ok(()),
            Some(column) => Err(format!("column '{column}' missing from up_inputs_base")),
        }
    });

    stats.record("every process priced by the emission table", {
        match data
            .inputs_base
            .keys()
            .iter()
            .find(|k| data.emissions_base.row_position(&k.name).is_err())
        {
            None => Ok(()),
            Some(key) => Err(format!("process '{}' missing from up_emissions_base", key.name)),
        }
    });

    stats.record(
        "energy supply normalizes into mixes",
        energy_mixes(&data.energy_supply, ValidationMode::Strict)
            .map(|_| ())
            .map_err(|e| e.to_string()),
    );

    stats.record("fuel factor rows cover the supply columns", {
        match data
            .energy_supply
            .columns()
            .iter()
            .map(|c| c.strip_suffix(labels::SUPPLY_SUFFIX).unwrap_or(c.as_str()))
            .find(|fuel| data.fuel_emission_factors.row_position(fuel).is_err())
        {
            None => Ok(()),
            Some(fuel) => Err(format!("fuel '{fuel}' missing from unit_energy_emissions")),
        }
    });

    stats.record("impact categories are in the closed set", {
        match data
            .impact_conversions
            .iter()
            .find(|r| r.category.parse::<ImpactCategory>().is_err())
        {
            None => Ok(()),
            Some(record) => Err(format!(
                "emission '{}' has category '{}'",
                record.emission, record.category
            )),
        }
    });

    stats.record("every emission species has a conversion factor", {
        match data
            .emissions_base
            .columns()
            .iter()
            .find(|species| {
                !data
                    .impact_conversions
                    .iter()
                    .any(|r| &r.emission == *species)
            }) {
            None => Ok(()),
            Some(species) => Err(format!("species '{species}' has no conversion record")),
        }
    });

    stats.record("trade distances are non-negative", {
        match data
            .trade_distances
            .iter()
            .find(|d| d.avg_export_distance < 0.0)
        {
            None => Ok(()),
            Some(d) => Err(format!(
                "route {} -> {} has distance {}",
                d.home_country, d.supplying_country, d.avg_export_distance
            )),
        }
    });

    if let Some(scenario_path) = &args.scenario {
        let assignments: Vec<AssignmentRecord> =
            csv::read_records(scenario_path).map_err(|e| miette::miette!("{}", e))?;
        stats.record("scenario assigns every unit process", {
            match data
                .inputs_base
                .keys()
                .iter()
                .find(|k| !assignments.iter().any(|a| a.unit_process == k.name))
            {
                None => Ok(()),
                Some(key) => Err(format!("process '{}' has no assignment", key.name)),
            }
        });
    }

    println!(
        "\n{} checks run, {} failed",
        stats.checks_run, stats.checks_failed
    );
    if stats.checks_failed > 0 {
        return Err(miette::miette!(
            "{} validation check(s) failed",
            stats.checks_failed
        ));
    }
    println!("{} Data directory is consistent", style("✓").green());
    Ok(())
}
