//! Command implementations

mod config;
mod design;
mod rules;
mod score;

use crate::cli::{Cli, Commands, ConditionArgs};
use crate::output::OutputWriter;
use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use greenplan_core::models::SpecialConditions;

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Design(args) => design::execute(args, config_path, &output),
        Commands::Score(args) => score::execute(args, &output),
        Commands::Rules(args) => rules::execute(args, &output),
        Commands::Config => config::execute(config_path, &output),
    }
}

/// `--at`, or the current local time
fn timestamp_or_now(at: Option<NaiveDateTime>) -> NaiveDateTime {
    at.unwrap_or_else(|| Local::now().naive_local())
}

impl From<&ConditionArgs> for SpecialConditions {
    fn from(args: &ConditionArgs) -> Self {
        SpecialConditions { high_humidity_warning: args.high_humidity, heat_wave: args.heat_wave }
    }
}
