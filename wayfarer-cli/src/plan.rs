//! Plan command implementation for the Wayfarer CLI.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::io::{BufReader, Write};
use std::str::FromStr;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use clap::Parser;
use log::LevelFilter;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use wayfarer_core::{
    Destination, DestinationRepository, PlanRequest, PlanResponse, Planner, TripPreferences,
};
use wayfarer_planner::{PlannerConfig, TripPlanner};

use crate::logging::init_logger;
use crate::{
    ARG_PLAN_DEADLINE_MS, ARG_PLAN_LOG_LEVEL, ARG_PLAN_MAX_PASSES, ARG_PLAN_REQUEST, CliError,
    ENV_PLAN_REQUEST,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Plan a trip from a JSON file holding the traveller's \
                 preferences, the destinations to visit, and a catalogue of \
                 destination records. Search limits and logging can come \
                 from CLI flags, configuration files, or environment \
                 variables.",
    about = "Plan a multi-destination trip"
)]
#[ortho_config(prefix = "WAYFARER")]
pub(crate) struct PlanArgs {
    /// Path to a JSON file containing preferences, destination ids and a catalogue.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Cap on 2-opt improvement passes (defaults to the destination count squared).
    #[arg(long = ARG_PLAN_MAX_PASSES, value_name = "count")]
    #[serde(default)]
    pub(crate) max_passes: Option<usize>,
    /// Wall-clock limit for route improvement, in milliseconds (default 250).
    #[arg(long = ARG_PLAN_DEADLINE_MS, value_name = "ms")]
    #[serde(default)]
    pub(crate) deadline_ms: Option<u64>,
    /// Log level: off, error, warn, info, debug or trace (default warn).
    #[arg(long = ARG_PLAN_LOG_LEVEL, value_name = "level")]
    #[serde(default)]
    pub(crate) log_level: Option<String>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlanConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Planner tunables with any CLI overrides applied.
    pub(crate) planner: PlannerConfig,
    /// Maximum level emitted by the logger.
    pub(crate) log_level: LevelFilter,
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_REQUEST,
            env: ENV_PLAN_REQUEST,
        })?;

        if args.max_passes == Some(0) {
            return Err(CliError::InvalidSetting {
                field: ARG_PLAN_MAX_PASSES,
                value: "0".to_owned(),
                reason: "at least one pass is required",
            });
        }

        let defaults = PlannerConfig::default();
        let search_deadline = args
            .deadline_ms
            .map_or(defaults.search_deadline, |ms| Some(Duration::from_millis(ms)));
        let planner = PlannerConfig {
            max_two_opt_passes: args.max_passes,
            search_deadline,
            ..defaults
        };

        let log_level = match args.log_level {
            None => LevelFilter::Warn,
            Some(raw) => LevelFilter::from_str(raw.trim()).map_err(|_| CliError::InvalidSetting {
                field: ARG_PLAN_LOG_LEVEL,
                value: raw,
                reason: "expected off, error, warn, info, debug or trace",
            })?,
        };

        Ok(Self {
            request_path,
            planner,
            log_level,
        })
    }
}

/// On-disk shape of a plan request.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub(crate) struct PlanFile {
    /// Traveller preferences.
    pub(crate) preferences: TripPreferences,
    /// Destinations to visit, in caller order.
    pub(crate) destination_ids: Vec<String>,
    /// Destination records the ids are resolved against.
    #[serde(default)]
    pub(crate) catalogue: Vec<Destination>,
}

/// Destinations supplied inline with the request.
#[derive(Debug, Clone, Default)]
pub(crate) struct CatalogueRepository {
    destinations: HashMap<String, Destination>,
}

impl CatalogueRepository {
    /// Index `catalogue` by id, rejecting repeated identifiers.
    fn from_catalogue(path: &Utf8Path, catalogue: Vec<Destination>) -> Result<Self, CliError> {
        let mut destinations = HashMap::with_capacity(catalogue.len());
        for destination in catalogue {
            match destinations.entry(destination.id.clone()) {
                Entry::Occupied(entry) => {
                    return Err(CliError::DuplicateCatalogueEntry {
                        path: path.to_path_buf(),
                        id: entry.key().clone(),
                    });
                }
                Entry::Vacant(entry) => {
                    entry.insert(destination);
                }
            }
        }
        Ok(Self { destinations })
    }
}

impl DestinationRepository for CatalogueRepository {
    fn get_destination(&self, id: &str) -> Option<Destination> {
        self.destinations.get(id).cloned()
    }
}

pub(super) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let config = args.into_config()?;
    init_logger(config.log_level)?;
    let mut stdout = std::io::stdout().lock();
    run_plan_with(&config, &mut stdout)
}

pub(super) fn run_plan_with(config: &PlanConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    let response = execute_plan(config)?;
    write_plan_response(writer, &response)
}

fn execute_plan(config: &PlanConfig) -> Result<PlanResponse, CliError> {
    let file = load_plan_file(&config.request_path)?;
    let repository = CatalogueRepository::from_catalogue(&config.request_path, file.catalogue)?;
    log::debug!(
        "loaded {} catalogue destinations from {}",
        repository.destinations.len(),
        config.request_path
    );
    let request = PlanRequest {
        destination_ids: file.destination_ids,
        preferences: file.preferences,
    };
    let planner = TripPlanner::with_config(repository, config.planner.clone());
    planner
        .plan(&request)
        .map_err(|source| CliError::Plan { source })
}

/// Loads a JSON-encoded [`PlanFile`] from disk.
pub(super) fn load_plan_file(path: &Utf8Path) -> Result<PlanFile, CliError> {
    let file = fs_utf8::File::open_ambient(path, ambient_authority()).map_err(|source| {
        CliError::OpenPlanRequest {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParsePlanRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_plan_response(writer: &mut dyn Write, response: &PlanResponse) -> Result<(), CliError> {
    let payload =
        serde_json::to_string_pretty(response).map_err(CliError::SerialisePlanResponse)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WritePlanOutput)?;
    writer.write_all(b"\n").map_err(CliError::WritePlanOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
