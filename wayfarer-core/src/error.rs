//! Error taxonomy shared by every pipeline stage.
//!
//! [`ValidationError`] and [`DataError`] describe what went wrong;
//! [`PlanError`] wraps them with the [`PipelineStage`] that raised them. A
//! search that runs out of budget is not an error: it is reported through
//! [`SearchCutoff`](crate::SearchCutoff) in the plan diagnostics.

use std::fmt;

use thiserror::Error;

/// Malformed caller input, rejected before any computation runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The budget total was zero, negative or not finite.
    #[error("budget total must be positive, got {0}")]
    NonPositiveBudget(f64),
    /// The trip had zero days.
    #[error("trip duration must be at least one day")]
    ZeroDuration,
    /// No destinations were requested.
    #[error("at least one destination is required")]
    NoDestinations,
    /// Every destination needs at least one whole day.
    #[error("{days} day(s) cannot cover {destinations} destinations")]
    TooFewDays {
        /// Requested trip length.
        days: u32,
        /// Number of requested destinations.
        destinations: usize,
    },
    /// The same destination was requested twice.
    #[error("destination '{id}' was requested more than once")]
    DuplicateDestination {
        /// Repeated identifier.
        id: String,
    },
    /// A coordinate pair contained NaN or an infinity.
    #[error("coordinate ({latitude}, {longitude}) is not finite")]
    NonFiniteCoordinate {
        /// Latitude in degrees.
        latitude: f64,
        /// Longitude in degrees.
        longitude: f64,
    },
    /// A distance below zero was supplied to the cost estimator.
    #[error("distance must be non-negative, got {0} km")]
    NegativeDistance(f64),
    /// A numeric input was NaN or infinite.
    #[error("{0} must be a finite number")]
    NonFiniteValue(&'static str),
}

/// Destination data that could not be resolved or used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    /// The repository has no destination with this identifier.
    #[error("destination '{id}' was not found")]
    NotFound {
        /// Requested identifier.
        id: String,
    },
    /// The destination's coordinates are missing, non-finite or out of range.
    #[error("destination '{name}' ({id}) has invalid coordinates")]
    InvalidCoordinates {
        /// Destination identifier.
        id: String,
        /// Destination display name.
        name: String,
    },
    /// A destination field holds a value outside its documented range.
    #[error("destination '{id}' has an invalid {field}")]
    InvalidDestination {
        /// Destination identifier.
        id: String,
        /// Offending field.
        field: &'static str,
    },
    /// An attraction field holds a value outside its documented range.
    #[error("attraction '{attraction}' at destination '{id}' has an invalid {field}")]
    InvalidAttraction {
        /// Destination identifier.
        id: String,
        /// Attraction identifier.
        attraction: String,
        /// Offending field.
        field: &'static str,
    },
}

/// Stages of the planning pipeline, in execution order.
///
/// Not every stage can fail today. Repository lookups and destination checks
/// report [`BuildMatrices`](Self::BuildMatrices); the order search always
/// returns a tour, so [`SolveOrder`](Self::SolveOrder) is never attached to a
/// [`PlanError`] and only names the stage in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    /// Request and preference validation.
    Validate,
    /// Distance, cost and weight matrix construction.
    BuildMatrices,
    /// Visiting-order search.
    SolveOrder,
    /// Day and budget apportionment.
    Allocate,
    /// Per-destination day scheduling.
    Schedule,
    /// Aggregation into the final trip.
    Assemble,
}

impl PipelineStage {
    /// Lowercase stage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validate => "validate",
            Self::BuildMatrices => "build-matrices",
            Self::SolveOrder => "solve-order",
            Self::Allocate => "allocate",
            Self::Schedule => "schedule",
            Self::Assemble => "assemble",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by [`Planner::plan`](crate::Planner::plan).
///
/// # Examples
/// ```
/// use wayfarer_core::{PipelineStage, PlanError, ValidationError};
///
/// let err = PlanError::invalid(PipelineStage::Allocate, ValidationError::ZeroDuration);
/// assert_eq!(err.stage(), PipelineStage::Allocate);
/// assert_eq!(
///     err.to_string(),
///     "allocate stage rejected the request: trip duration must be at least one day"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// Input failed validation.
    #[error("{stage} stage rejected the request: {source}")]
    Invalid {
        /// Stage that rejected the input.
        stage: PipelineStage,
        /// Validation failure.
        #[source]
        source: ValidationError,
    },
    /// Destination data could not be resolved.
    #[error("{stage} stage could not use destination data: {source}")]
    Data {
        /// Stage that needed the data.
        stage: PipelineStage,
        /// Data failure.
        #[source]
        source: DataError,
    },
}

impl PlanError {
    /// Wrap a validation failure raised by `stage`.
    #[must_use]
    pub const fn invalid(stage: PipelineStage, source: ValidationError) -> Self {
        Self::Invalid { stage, source }
    }

    /// Wrap a data failure raised by `stage`.
    #[must_use]
    pub const fn data(stage: PipelineStage, source: DataError) -> Self {
        Self::Data { stage, source }
    }

    /// Stage that failed.
    #[must_use]
    pub const fn stage(&self) -> PipelineStage {
        match self {
            Self::Invalid { stage, .. } | Self::Data { stage, .. } => *stage,
        }
    }
}
