//! `TripPlanner`: the linear planning pipeline.

use std::time::{Duration, Instant};

use wayfarer_core::{
    DataError, Destination, DestinationRepository, Diagnostics, PipelineStage, PlanError,
    PlanRequest, PlanResponse, Planner, TimeOfDay,
};

use crate::assemble::optimized_destination;
use crate::schedule::clock;
use crate::{RouteMatrices, SearchBudget, allocate, assemble_trip, schedule_destination, solve_order};

/// Configuration for [`TripPlanner`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Cap on full 2-opt passes. `None` uses the square of the destination
    /// count. Never fewer than one pass runs.
    pub max_two_opt_passes: Option<usize>,
    /// Wall-clock limit for the 2-opt phase. `None` disables the deadline.
    pub search_deadline: Option<Duration>,
    /// When each day's activities may start.
    pub day_start: TimeOfDay,
    /// When each day's activities must end.
    pub day_end: TimeOfDay,
    /// Share of each day's budget reserved for activities; the rest goes to
    /// meals.
    pub activity_share: f64,
    /// Visits shorter than this after truncation are skipped.
    pub min_activity_minutes: u16,
    /// Gap left after every visit.
    pub buffer_minutes: u16,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_two_opt_passes: None,
            search_deadline: Some(Duration::from_millis(250)),
            day_start: clock(9, 0),
            day_end: clock(18, 0),
            activity_share: 0.7,
            min_activity_minutes: 60,
            buffer_minutes: 30,
        }
    }
}

/// Plans trips over destinations read from an injected repository.
///
/// The planner holds no per-request state, so one instance can serve many
/// requests, including from several threads when the repository is
/// `Send + Sync`.
///
/// # Examples
/// ```
/// use wayfarer_core::test_support::{MemoryRepository, lyon, paris};
/// use wayfarer_core::{PlanRequest, Planner, TripPreferences};
/// use wayfarer_planner::TripPlanner;
///
/// let planner = TripPlanner::new(MemoryRepository::with_destinations([paris(), lyon()]));
/// let request = PlanRequest {
///     destination_ids: vec!["paris".into(), "lyon".into()],
///     preferences: TripPreferences::new(3000.0, "EUR", 6),
/// };
/// let response = planner.plan(&request)?;
/// assert_eq!(response.trip.visiting_order(), ["paris", "lyon"]);
/// assert_eq!(response.trip.total_duration_days, 6);
/// # Ok::<(), wayfarer_core::PlanError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TripPlanner<R>
where
    R: DestinationRepository,
{
    repository: R,
    config: PlannerConfig,
}

impl<R> TripPlanner<R>
where
    R: DestinationRepository,
{
    /// Construct a planner using default configuration.
    #[must_use]
    pub fn new(repository: R) -> Self {
        Self::with_config(repository, PlannerConfig::default())
    }

    /// Construct a planner with explicit configuration.
    #[must_use]
    pub const fn with_config(repository: R, config: PlannerConfig) -> Self {
        Self { repository, config }
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Fetch every requested destination, in request order.
    fn resolve(&self, ids: &[String]) -> Result<Vec<Destination>, PlanError> {
        ids.iter()
            .map(|id| {
                self.repository.get_destination(id).ok_or_else(|| {
                    PlanError::data(
                        PipelineStage::BuildMatrices,
                        DataError::NotFound { id: id.clone() },
                    )
                })
            })
            .collect()
    }
}

impl<R> Planner for TripPlanner<R>
where
    R: DestinationRepository + Send + Sync,
{
    fn plan(&self, request: &PlanRequest) -> Result<PlanResponse, PlanError> {
        let started_at = Instant::now();
        request
            .validate()
            .map_err(|err| PlanError::invalid(PipelineStage::Validate, err))?;
        let preferences = &request.preferences;

        let destinations = self.resolve(&request.destination_ids)?;
        let matrices = RouteMatrices::build(&destinations, preferences)
            .map_err(|err| PlanError::data(PipelineStage::BuildMatrices, err))?;

        let budget = SearchBudget::for_size(
            matrices.len(),
            self.config.max_two_opt_passes,
            self.config.search_deadline,
        );
        let solution = solve_order(matrices.weight(), budget);
        let mut slots: Vec<Option<Destination>> = destinations.into_iter().map(Some).collect();
        let ordered: Vec<Destination> = solution
            .order
            .iter()
            .filter_map(|idx| slots.get_mut(*idx).and_then(Option::take))
            .collect();
        debug_assert_eq!(ordered.len(), slots.len(), "order must be a permutation");

        let allocation = allocate(&ordered, preferences)
            .map_err(|err| PlanError::invalid(PipelineStage::Allocate, err))?;

        let stops = ordered
            .into_iter()
            .zip(allocation.iter())
            .map(|(destination, share)| {
                let itinerary = schedule_destination(
                    &destination,
                    share.days,
                    share.budget,
                    preferences,
                    &self.config,
                )
                .map_err(|err| PlanError::invalid(PipelineStage::Schedule, err))?;
                Ok(optimized_destination(destination, share, itinerary))
            })
            .collect::<Result<Vec<_>, PlanError>>()?;

        let trip = assemble_trip(stops, preferences, solution.is_approximate(), &self.config)
            .map_err(|err| PlanError::invalid(PipelineStage::Assemble, err))?;

        let diagnostics = Diagnostics {
            plan_time: started_at.elapsed(),
            two_opt_passes: solution.passes,
            nearest_neighbor_weight: solution.nearest_neighbor_weight,
            tour_weight: solution.weight,
            cutoff: solution.cutoff,
        };
        log::info!(
            "planned {} destinations over {} days: cost {:.2} {}, {:.1} km, score {:.3}{}",
            trip.destinations.len(),
            trip.total_duration_days,
            trip.total_cost,
            trip.currency,
            trip.total_distance_km,
            trip.optimization_score,
            if trip.approximate { " (approximate)" } else { "" }
        );
        Ok(PlanResponse { trip, diagnostics })
    }
}

#[cfg(test)]
mod tests;
