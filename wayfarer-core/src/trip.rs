//! Records produced by a planning run.
//!
//! Everything here is built once at the end of the pipeline and never
//! mutated afterwards.

use std::time::Duration;

use crate::{Attraction, Destination, TimeOfDay};

/// How strongly an activity is recommended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Priority {
    /// Score of at least 8.
    MustSee,
    /// Score of at least 6.
    Recommended,
    /// Everything else.
    Optional,
}

impl Priority {
    /// Score at or above which an activity is a must-see.
    pub const MUST_SEE_THRESHOLD: f64 = 8.0;
    /// Score at or above which an activity is recommended.
    pub const RECOMMENDED_THRESHOLD: f64 = 6.0;

    /// Classify an attraction score.
    ///
    /// # Examples
    /// ```
    /// use wayfarer_core::Priority;
    ///
    /// assert_eq!(Priority::from_score(8.0), Priority::MustSee);
    /// assert_eq!(Priority::from_score(7.9), Priority::Recommended);
    /// assert_eq!(Priority::from_score(-2.0), Priority::Optional);
    /// ```
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= Self::MUST_SEE_THRESHOLD {
            Self::MustSee
        } else if score >= Self::RECOMMENDED_THRESHOLD {
            Self::Recommended
        } else {
            Self::Optional
        }
    }
}

/// An attraction placed in a day's timetable.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlannedActivity {
    /// The attraction being visited.
    pub attraction: Attraction,
    /// Start of the visit.
    pub start: TimeOfDay,
    /// End of the visit.
    pub end: TimeOfDay,
    /// Recommendation strength.
    pub priority: Priority,
    /// Ranking score the scheduler assigned.
    pub score: f64,
}

impl PlannedActivity {
    /// Length of the visit in minutes.
    #[must_use]
    pub const fn duration_minutes(&self) -> u16 {
        self.start.minutes_until(self.end)
    }

    /// Whether this visit shares any time with `other`.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Which meal of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum MealKind {
    /// Morning meal.
    Breakfast,
    /// Midday meal.
    Lunch,
    /// Evening meal.
    Dinner,
}

/// A budgeted meal slot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Meal {
    /// Which meal.
    pub kind: MealKind,
    /// Suggested sitting time.
    pub time: TimeOfDay,
    /// Budget set aside for the meal.
    pub budget: f64,
    /// Free-text dining suggestion.
    pub suggestion: String,
}

/// One day at a destination.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DayItinerary {
    /// 1-based day index within the destination stay.
    pub day: u32,
    /// Activities in chronological order.
    pub activities: Vec<PlannedActivity>,
    /// Meal slots.
    pub meals: Vec<Meal>,
    /// Sum of scheduled activity costs.
    pub estimated_cost: f64,
    /// Walking distance between consecutive activities, in kilometres.
    pub walking_distance_km: f64,
}

impl DayItinerary {
    /// Total minutes spent on scheduled activities.
    #[must_use]
    pub fn scheduled_minutes(&self) -> u32 {
        self.activities
            .iter()
            .map(|activity| u32::from(activity.duration_minutes()))
            .sum()
    }

    /// Sum of meal budgets.
    #[must_use]
    pub fn meal_cost(&self) -> f64 {
        self.meals.iter().map(|meal| meal.budget).sum()
    }
}

/// A destination with its share of the trip.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizedDestination {
    /// The destination record.
    pub destination: Destination,
    /// Whole days spent here; at least one.
    pub days_allocated: u32,
    /// Budget apportioned to this destination.
    pub budget_allocated: f64,
    /// Activities plus meals across all days.
    pub estimated_cost: f64,
    /// Day-by-day plan.
    pub itinerary: Vec<DayItinerary>,
}

/// How a leg between destinations is travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum TransportMode {
    /// Scheduled flight between airports.
    Flight,
    /// Rail between stations.
    Train,
    /// Car or coach.
    Road,
}

/// A leg between two consecutive destinations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TravelRoute {
    /// Departure destination identifier.
    pub from: String,
    /// Arrival destination identifier.
    pub to: String,
    /// Great-circle distance in kilometres.
    pub distance_km: f64,
    /// Estimated fare.
    pub cost: f64,
    /// Suggested mode.
    pub mode: TransportMode,
    /// Estimated door-to-door time.
    pub travel_time: Duration,
}

/// The final optimised trip.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizedTrip {
    /// Destinations in visiting order.
    pub destinations: Vec<OptimizedDestination>,
    /// Legs between consecutive destinations.
    pub routes: Vec<TravelRoute>,
    /// Destination costs plus leg fares.
    pub total_cost: f64,
    /// Trip length in days.
    pub total_duration_days: u32,
    /// Sum of leg distances in kilometres.
    pub total_distance_km: f64,
    /// Composite quality score in `0.0..=1.0`.
    pub optimization_score: f64,
    /// Currency of every monetary field.
    pub currency: String,
    /// The visiting order came from a search that ran out of budget.
    pub approximate: bool,
}

impl OptimizedTrip {
    /// Destination identifiers in visiting order.
    #[must_use]
    pub fn visiting_order(&self) -> Vec<&str> {
        self.destinations
            .iter()
            .map(|stop| stop.destination.id.as_str())
            .collect()
    }
}
