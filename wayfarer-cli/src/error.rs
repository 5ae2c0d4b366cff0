//! Error types emitted by the Wayfarer CLI.
//!
//! Keep this error type reasonably small, as every CLI helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use wayfarer_core::PlanError;

/// Errors emitted by the Wayfarer CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name without leading dashes.
        field: &'static str,
        /// Environment variable that can supply the value.
        env: &'static str,
    },
    /// A merged setting holds a value the planner cannot use.
    #[error("invalid {field} value {value:?}: {reason}")]
    InvalidSetting {
        /// Flag name without leading dashes.
        field: &'static str,
        /// Offending value as supplied.
        value: String,
        /// What a valid value looks like.
        reason: &'static str,
    },
    /// Installing the logger failed.
    #[error("failed to initialise logging: {0}")]
    InitLogging(#[source] log::SetLoggerError),
    /// Opening the plan request file failed.
    #[error("failed to open plan request at {path:?}: {source}")]
    OpenPlanRequest {
        /// Request path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Plan request JSON could not be decoded.
    #[error("failed to parse plan request JSON at {path:?}: {source}")]
    ParsePlanRequest {
        /// Request path.
        path: Utf8PathBuf,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// The request catalogue lists the same destination twice.
    #[error("plan request at {path:?} lists destination {id:?} more than once")]
    DuplicateCatalogueEntry {
        /// Request path.
        path: Utf8PathBuf,
        /// Repeated destination identifier.
        id: String,
    },
    /// The planner rejected the request.
    #[error("planning failed: {source}")]
    Plan {
        /// Pipeline failure.
        #[source]
        source: PlanError,
    },
    /// Serializing the plan response failed.
    #[error("failed to serialize plan response: {0}")]
    SerialisePlanResponse(#[source] serde_json::Error),
    /// Writing the plan output failed.
    #[error("failed to write plan output: {0}")]
    WritePlanOutput(#[source] std::io::Error),
}
