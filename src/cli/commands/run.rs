//! `railca run` command - run one scenario end-to-end

use std::path::PathBuf;

use console::style;
use miette::Result;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::core::error::ValidationMode;
use crate::core::labels;
use crate::core::normalize::NormalizationParams;
use crate::core::trade::AssignmentRecord;
use crate::core::Country;
use crate::model::{Scenario, ScenarioData};
use crate::tables::{csv, Frame};

#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// Directory holding the base input tables
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Home country building and operating the line
    #[arg(long)]
    pub home_country: String,

    /// Trade-scenario assignment file (unit_process,country rows)
    #[arg(long)]
    pub scenario: PathBuf,

    /// Normalization parameter file (default: <data-dir>/norm_params.yaml)
    #[arg(long)]
    pub params: Option<PathBuf>,

    /// Fraction of ground transport assumed to travel by rail
    #[arg(long, default_value_t = 0.5)]
    pub rail_allocation: f64,

    /// Label for exported files (default: scenario file stem)
    #[arg(long)]
    pub label: Option<String>,

    /// Write every result table as CSV into this directory
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,

    /// Warn instead of failing when energy mixes do not normalize
    #[arg(long)]
    pub lenient: bool,
}

#[derive(Tabled)]
struct ImpactRow {
    #[tabled(rename = "phase")]
    phase: String,

    #[tabled(rename = "CO2_eq_kg")]
    co2_eq: String,

    #[tabled(rename = "SO2_eq_kg")]
    so2_eq: String,
}

fn impact_rows(frame: &Frame) -> Result<Vec<ImpactRow>> {
    frame
        .index()
        .iter()
        .map(|row| {
            Ok(ImpactRow {
                phase: row.clone(),
                co2_eq: format!(
                    "{:.6e}",
                    frame
                        .get(row, labels::CO2_EQ)
                        .map_err(|e| miette::miette!("{}", e))?
                ),
                so2_eq: format!(
                    "{:.6e}",
                    frame
                        .get(row, labels::SO2_EQ)
                        .map_err(|e| miette::miette!("{}", e))?
                ),
            })
        })
        .collect()
}

pub fn run(args: RunArgs) -> Result<()> {
    let home_country: Country = args
        .home_country
        .parse()
        .map_err(|e| miette::miette!("{}", e))?;

    let data = ScenarioData::load(&args.data_dir).map_err(|e| miette::miette!("{}", e))?;
    let assignments: Vec<AssignmentRecord> =
        csv::read_records(&args.scenario).map_err(|e| miette::miette!("{}", e))?;

    let params_path = args
        .params
        .unwrap_or_else(|| args.data_dir.join("norm_params.yaml"));
    let params =
        NormalizationParams::from_yaml(&params_path).map_err(|e| miette::miette!("{}", e))?;

    let label = args.label.unwrap_or_else(|| {
        args.scenario
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| home_country.to_string())
    });

    let scenario = Scenario {
        home_country,
        label: label.clone(),
        assignments,
        rail_allocation: args.rail_allocation,
        params,
        mode: if args.lenient {
            ValidationMode::Lenient
        } else {
            ValidationMode::Strict
        },
    };

    println!(
        "{} Running scenario '{}' (home country {})...\n",
        style("→").blue(),
        label,
        home_country
    );

    let results = scenario.run(&data).map_err(|e| miette::miette!("{}", e))?;

    let mut rows = impact_rows(&results.total_impacts_phase)?;
    rows.extend(impact_rows(&results.total_impacts_lifetime)?);
    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{table}");

    if let Some(out_dir) = args.out {
        results
            .export(&out_dir, &label)
            .map_err(|e| miette::miette!("{}", e))?;
        println!(
            "\n{} Result tables written to {}",
            style("✓").green(),
            out_dir.display()
        );
    }

    Ok(())
}
