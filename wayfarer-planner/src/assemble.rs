//! Aggregate the ordered, allocated and scheduled destinations into a trip.

use std::time::Duration;

use wayfarer_core::{
    DayItinerary, Destination, HubKind, OptimizedDestination, OptimizedTrip, TransportMode,
    TravelRoute, TravelStyle, TripPreferences, ValidationError, estimate_transport_cost,
    haversine_km,
};

use crate::{Allocation, PlannerConfig};

/// Flights are only suggested for legs longer than this.
const MIN_FLIGHT_KM: f64 = 500.0;
const FLIGHT_SPEED_KMH: f64 = 750.0;
/// Check-in, security and transfers for a flight.
const FLIGHT_OVERHEAD_HOURS: f64 = 2.0;
const TRAIN_SPEED_KMH: f64 = 120.0;
const ROAD_SPEED_KMH: f64 = 80.0;

const BUDGET_FIT_WEIGHT: f64 = 0.4;
const ATTRACTION_QUALITY_WEIGHT: f64 = 0.3;
const DAY_FILL_WEIGHT: f64 = 0.3;

/// Components of the optimisation score, each in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TripScore {
    /// How close the total cost lands to the budget.
    pub budget_fit: f64,
    /// Mean normalised score of the scheduled activities.
    pub attraction_quality: f64,
    /// Mean share of each day's window spent on activities.
    pub day_fill: f64,
    /// Weighted combination: 0.4 budget fit, 0.3 quality, 0.3 day fill.
    pub overall: f64,
}

/// Suggest a mode and estimate the leg between `from` and `to`.
///
/// # Errors
/// Returns [`ValidationError::NonFiniteCoordinate`] when either location is
/// not finite.
///
/// # Examples
/// ```
/// use wayfarer_core::test_support::{lyon, paris};
/// use wayfarer_core::{TransportMode, TravelStyle};
/// use wayfarer_planner::travel_route;
///
/// let leg = travel_route(&paris(), &lyon(), TravelStyle::Standard)?;
/// assert_eq!(leg.mode, TransportMode::Train);
/// assert!((leg.cost - leg.distance_km * 0.25).abs() < 1e-9);
/// # Ok::<(), wayfarer_core::ValidationError>(())
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "travel time is distance over an average speed"
)]
pub fn travel_route(
    from: &Destination,
    to: &Destination,
    style: TravelStyle,
) -> Result<TravelRoute, ValidationError> {
    let distance_km = haversine_km(from.location, to.location)?;
    let cost = estimate_transport_cost(distance_km, style)?;
    let both_have = |kind| from.has_hub(kind) && to.has_hub(kind);
    let (mode, hours) = if both_have(HubKind::Airport) && distance_km > MIN_FLIGHT_KM {
        (
            TransportMode::Flight,
            distance_km / FLIGHT_SPEED_KMH + FLIGHT_OVERHEAD_HOURS,
        )
    } else if both_have(HubKind::TrainStation) {
        (TransportMode::Train, distance_km / TRAIN_SPEED_KMH)
    } else {
        (TransportMode::Road, distance_km / ROAD_SPEED_KMH)
    };
    let travel_time = Duration::try_from_secs_f64(hours * 3600.0).unwrap_or_else(|_| {
        log::warn!(
            "travel time of {hours} h from {} to {} is not representable; using zero",
            from.id,
            to.id
        );
        Duration::ZERO
    });
    Ok(TravelRoute {
        from: from.id.clone(),
        to: to.id.clone(),
        distance_km,
        cost,
        mode,
        travel_time,
    })
}

/// Pair a destination with its allocation and schedule.
///
/// The estimated cost covers every day's activities and meals.
#[expect(clippy::float_arithmetic, reason = "cost is a sum of day costs")]
pub(crate) fn optimized_destination(
    destination: Destination,
    allocation: &Allocation,
    itinerary: Vec<DayItinerary>,
) -> OptimizedDestination {
    let estimated_cost = itinerary
        .iter()
        .map(|day| day.estimated_cost + day.meal_cost())
        .sum();
    OptimizedDestination {
        destination,
        days_allocated: allocation.days,
        budget_allocated: allocation.budget,
        estimated_cost,
        itinerary,
    }
}

/// Score a scheduled trip.
///
/// # Examples
/// ```
/// use wayfarer_core::TripPreferences;
/// use wayfarer_planner::{PlannerConfig, optimization_score};
///
/// // Nothing scheduled and nothing spent scores zero on every component.
/// let prefs = TripPreferences::new(1000.0, "EUR", 2);
/// let score = optimization_score(&[], 0.0, &prefs, &PlannerConfig::default());
/// assert_eq!(score.overall, 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the score is a weighted average of floating-point ratios"
)]
pub fn optimization_score(
    destinations: &[OptimizedDestination],
    total_cost: f64,
    preferences: &TripPreferences,
    config: &PlannerConfig,
) -> TripScore {
    let budget = preferences.budget.total;
    let budget_fit = if budget > 0.0 {
        unit(1.0 - (total_cost - budget).abs() / budget)
    } else {
        0.0
    };

    let interest_count = u32::try_from(preferences.interests.len().max(1)).unwrap_or(u32::MAX);
    let best_possible = 5.0 + 2.0 * f64::from(interest_count);
    let days = destinations.iter().flat_map(|stop| &stop.itinerary);
    let attraction_quality = mean(
        days.clone()
            .flat_map(|day| &day.activities)
            .map(|activity| unit(activity.score / best_possible)),
    );

    let window = f64::from(config.day_start.minutes_until(config.day_end));
    let day_fill = if window > 0.0 {
        mean(days.map(|day| unit(f64::from(day.scheduled_minutes()) / window)))
    } else {
        0.0
    };

    let overall = unit(
        BUDGET_FIT_WEIGHT * budget_fit
            + ATTRACTION_QUALITY_WEIGHT * attraction_quality
            + DAY_FILL_WEIGHT * day_fill,
    );
    TripScore {
        budget_fit,
        attraction_quality,
        day_fill,
        overall,
    }
}

/// Build the final trip from destinations in visiting order.
///
/// # Errors
/// Returns [`ValidationError`] when a travel leg cannot be estimated.
#[expect(
    clippy::float_arithmetic,
    reason = "totals are sums of floating-point costs and distances"
)]
pub fn assemble_trip(
    destinations: Vec<OptimizedDestination>,
    preferences: &TripPreferences,
    approximate: bool,
    config: &PlannerConfig,
) -> Result<OptimizedTrip, ValidationError> {
    let routes = destinations
        .windows(2)
        .filter_map(|pair| match pair {
            [from, to] => Some(travel_route(
                &from.destination,
                &to.destination,
                preferences.travel_style,
            )),
            _ => None,
        })
        .collect::<Result<Vec<_>, _>>()?;

    let stay_cost: f64 = destinations.iter().map(|stop| stop.estimated_cost).sum();
    let travel_cost: f64 = routes.iter().map(|route| route.cost).sum();
    let total_cost = stay_cost + travel_cost;
    let total_distance_km = routes.iter().map(|route| route.distance_km).sum();
    let total_duration_days = destinations
        .iter()
        .fold(0_u32, |total, stop| total.saturating_add(stop.days_allocated));
    let score = optimization_score(&destinations, total_cost, preferences, config);

    Ok(OptimizedTrip {
        destinations,
        routes,
        total_cost,
        total_duration_days,
        total_distance_km,
        optimization_score: score.overall,
        currency: preferences.budget.currency.clone(),
        approximate,
    })
}

fn unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[expect(clippy::float_arithmetic, reason = "arithmetic mean")]
fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0_u32), |(sum, count), value| {
        (sum + value, count.saturating_add(1))
    });
    if count == 0 { 0.0 } else { sum / f64::from(count) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Coord;
    use rstest::{fixture, rstest};
    use wayfarer_core::test_support::{attraction, destination, lyon, marseille, paris};
    use wayfarer_core::{Meal, MealKind, PlannedActivity, Priority, TimeOfDay};

    #[fixture]
    fn config() -> PlannerConfig {
        PlannerConfig::default()
    }

    fn at(hour: u16, minute: u16) -> TimeOfDay {
        TimeOfDay::from_hm(hour, minute).expect("valid time")
    }

    fn day_with(minutes: u16, score: f64, cost: f64) -> DayItinerary {
        let end = at(9, 0).checked_add_minutes(minutes).expect("within the day");
        DayItinerary {
            day: 1,
            activities: vec![PlannedActivity {
                attraction: attraction("a", "museum", 4.0, minutes, cost),
                start: at(9, 0),
                end,
                priority: Priority::from_score(score),
                score,
            }],
            meals: vec![Meal {
                kind: MealKind::Lunch,
                time: at(12, 30),
                budget: 10.0,
                suggestion: String::new(),
            }],
            estimated_cost: cost,
            walking_distance_km: 0.0,
        }
    }

    fn stop(destination: Destination, days: Vec<DayItinerary>) -> OptimizedDestination {
        let allocation = Allocation {
            destination_id: destination.id.clone(),
            weight: 1.0,
            days: u32::try_from(days.len()).expect("few days"),
            budget: 0.0,
        };
        optimized_destination(destination, &allocation, days)
    }

    #[rstest]
    fn long_legs_between_airports_fly() {
        let leg = travel_route(&paris(), &marseille(), TravelStyle::Budget).expect("valid leg");
        assert_eq!(leg.mode, TransportMode::Flight);
        let hours = leg.travel_time.as_secs_f64() / 3600.0;
        assert!((hours - (leg.distance_km / 750.0 + 2.0)).abs() < 1e-6);
    }

    #[rstest]
    fn legs_without_hubs_go_by_road() {
        let a = destination("a", 0.0, 0.0, 0.5);
        let b = destination("b", 0.0, 1.0, 0.5);
        let leg = travel_route(&a, &b, TravelStyle::Standard).expect("valid leg");
        assert_eq!(leg.mode, TransportMode::Road);
        let hours = leg.travel_time.as_secs_f64() / 3600.0;
        assert!((hours - leg.distance_km / 80.0).abs() < 1e-6);
    }

    #[rstest]
    fn destination_cost_includes_meals() {
        let optimized = stop(lyon(), vec![day_with(60, 5.0, 12.0), day_with(60, 5.0, 0.0)]);
        assert!((optimized.estimated_cost - 32.0).abs() < 1e-9);
        assert_eq!(optimized.days_allocated, 2);
    }

    #[rstest]
    fn totals_add_stays_and_legs(config: PlannerConfig) {
        let prefs = TripPreferences::new(1000.0, "EUR", 2);
        let trip = assemble_trip(
            vec![
                stop(paris(), vec![day_with(120, 6.0, 20.0)]),
                stop(lyon(), vec![day_with(60, 6.0, 10.0)]),
            ],
            &prefs,
            false,
            &config,
        )
        .expect("assemble");
        let leg = trip.routes.first().expect("one leg");
        assert_eq!(trip.routes.len(), 1);
        assert_eq!((leg.from.as_str(), leg.to.as_str()), ("paris", "lyon"));
        assert!((trip.total_cost - (30.0 + 20.0 + leg.cost)).abs() < 1e-9);
        assert!((trip.total_distance_km - leg.distance_km).abs() < 1e-12);
        assert_eq!(trip.total_duration_days, 2);
        assert_eq!(trip.currency, "EUR");
        assert!((0.0..=1.0).contains(&trip.optimization_score));
    }

    #[rstest]
    fn score_components_follow_their_formulas(config: PlannerConfig) {
        let prefs = TripPreferences::new(1000.0, "EUR", 2).with_interests(["art", "food"]);
        let stops = vec![stop(
            destination("d", 0.0, 0.0, 0.5),
            vec![day_with(540, 9.0, 0.0), day_with(270, 0.0, 0.0)],
        )];
        let score = optimization_score(&stops, 800.0, &prefs, &config);
        assert!((score.budget_fit - 0.8).abs() < 1e-12);
        assert!((score.attraction_quality - 0.5).abs() < 1e-12);
        assert!((score.day_fill - 0.75).abs() < 1e-12);
        assert!((score.overall - (0.32 + 0.15 + 0.225)).abs() < 1e-12);
    }

    #[rstest]
    fn overspending_twice_the_budget_scores_zero_fit(config: PlannerConfig) {
        let prefs = TripPreferences::new(500.0, "EUR", 1);
        let score = optimization_score(&[], 1500.0, &prefs, &config);
        assert_eq!(score.budget_fit, 0.0);
    }

    #[rstest]
    fn single_destination_trips_have_no_legs(config: PlannerConfig) {
        let prefs = TripPreferences::new(1000.0, "EUR", 1);
        let only = stop(
            Destination::new("solo", "Solo", Coord { x: 1.0, y: 1.0 }),
            vec![day_with(60, 5.0, 0.0)],
        );
        let trip = assemble_trip(vec![only], &prefs, true, &config).expect("assemble");
        assert!(trip.routes.is_empty());
        assert_eq!(trip.total_distance_km, 0.0);
        assert!(trip.approximate);
    }
}
