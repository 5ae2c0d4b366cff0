use std::collections::HashSet;
use std::time::Duration;

use crate::{OptimizedTrip, PlanError, TripPreferences, ValidationError};

/// Parameters for a planning run.
///
/// The request names the destinations to visit and carries the traveller's
/// preferences. Destination records are looked up through the planner's
/// repository.
///
/// # Examples
/// ```rust
/// use wayfarer_core::{PlanRequest, TripPreferences};
///
/// let request = PlanRequest {
///     destination_ids: vec!["paris".into(), "lyon".into()],
///     preferences: TripPreferences::new(3000.0, "EUR", 6),
/// };
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanRequest {
    /// Destinations to visit, in caller order.
    pub destination_ids: Vec<String>,
    /// Traveller preferences.
    pub preferences: TripPreferences,
}

impl PlanRequest {
    /// Reject requests the pipeline cannot plan.
    ///
    /// # Errors
    /// Returns the first [`ValidationError`] found: an unusable budget or
    /// duration, an empty or duplicated destination list, or fewer days than
    /// destinations.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.preferences.validate()?;
        if self.destination_ids.is_empty() {
            return Err(ValidationError::NoDestinations);
        }
        let mut seen = HashSet::with_capacity(self.destination_ids.len());
        if let Some(id) = self
            .destination_ids
            .iter()
            .find(|id| !seen.insert(*id))
        {
            return Err(ValidationError::DuplicateDestination { id: id.clone() });
        }
        let days = self.preferences.duration.days;
        let too_few =
            usize::try_from(days).is_ok_and(|days| days < self.destination_ids.len());
        if too_few {
            return Err(ValidationError::TooFewDays {
                days,
                destinations: self.destination_ids.len(),
            });
        }
        Ok(())
    }
}

/// Why the visiting-order search stopped before converging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum SearchCutoff {
    /// The maximum number of improvement passes was used up.
    PassLimit,
    /// The wall-clock deadline elapsed.
    Deadline,
}

/// Run statistics returned alongside the trip.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostics {
    /// Wall-clock time spent planning.
    pub plan_time: Duration,
    /// Completed 2-opt improvement passes.
    pub two_opt_passes: usize,
    /// Weight of the nearest-neighbour tour.
    pub nearest_neighbor_weight: f64,
    /// Weight of the returned tour.
    pub tour_weight: f64,
    /// Set when the search stopped early; the trip is then approximate.
    pub cutoff: Option<SearchCutoff>,
}

/// Response from a successful planning run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanResponse {
    /// The optimised trip.
    pub trip: OptimizedTrip,
    /// Run statistics.
    pub diagnostics: Diagnostics,
}

/// Turn a [`PlanRequest`] into an optimised trip.
///
/// Implementations must return [`PlanError`] for invalid requests rather than
/// panicking, and must be `Send + Sync` so independent requests can be
/// planned from several threads.
pub trait Planner: Send + Sync {
    /// Plan a trip, producing the optimised itinerary or the failing stage.
    ///
    /// # Errors
    /// Returns [`PlanError`] naming the pipeline stage that failed.
    fn plan(&self, request: &PlanRequest) -> Result<PlanResponse, PlanError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn request(ids: &[&str], days: u32) -> PlanRequest {
        PlanRequest {
            destination_ids: ids.iter().map(|id| (*id).to_owned()).collect(),
            preferences: TripPreferences::new(1000.0, "EUR", days),
        }
    }

    #[rstest]
    fn accepts_one_day_per_destination() {
        assert_eq!(request(&["a", "b", "c"], 3).validate(), Ok(()));
    }

    #[rstest]
    fn rejects_empty_destination_lists() {
        assert_eq!(
            request(&[], 3).validate(),
            Err(ValidationError::NoDestinations)
        );
    }

    #[rstest]
    fn rejects_duplicates() {
        assert_eq!(
            request(&["a", "b", "a"], 5).validate(),
            Err(ValidationError::DuplicateDestination { id: "a".into() })
        );
    }

    #[rstest]
    fn rejects_more_destinations_than_days() {
        assert_eq!(
            request(&["a", "b", "c"], 2).validate(),
            Err(ValidationError::TooFewDays {
                days: 2,
                destinations: 3
            })
        );
    }

    #[rstest]
    fn preference_errors_come_first() {
        assert_eq!(request(&[], 0).validate(), Err(ValidationError::ZeroDuration));
    }
}
