//! CLI module - argument parsing and command dispatch

pub mod commands;

use clap::{Parser, Subcommand};

use commands::run::RunArgs;
use commands::validate::ValidateArgs;

/// Life-cycle assessment of high-speed rail infrastructure and operation
#[derive(Parser, Debug)]
#[command(name = "railca", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one scenario end-to-end and report lifetime impacts
    Run(RunArgs),

    /// Check a data directory against the input-schema contract
    Validate(ValidateArgs),
}
