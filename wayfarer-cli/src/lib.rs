//! Command-line interface for the Wayfarer trip planner.
//!
//! `wayfarer plan <request.json>` reads traveller preferences, the requested
//! destination identifiers and an inline destination catalogue, runs the
//! planner, and prints the resulting trip as JSON.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod logging;
mod plan;

pub use error::CliError;
use plan::{PlanArgs, run_plan};

const ARG_PLAN_REQUEST: &str = "request-path";
const ARG_PLAN_MAX_PASSES: &str = "max-passes";
const ARG_PLAN_DEADLINE_MS: &str = "deadline-ms";
const ARG_PLAN_LOG_LEVEL: &str = "log-level";
const ENV_PLAN_REQUEST: &str = "WAYFARER_CMDS_PLAN_REQUEST_PATH";

/// Run the Wayfarer CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when argument parsing, configuration layering,
/// request loading, planning, or writing the output fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => run_plan(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "wayfarer",
    about = "Plan multi-destination trips from a JSON request",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Order destinations, share out days and budget, and schedule each day.
    Plan(PlanArgs),
}

#[cfg(test)]
mod tests;
