//! Greedy day scheduling within one destination.
//!
//! Attractions are ranked once per destination and the ranked list is shared
//! by every day of the stay: an attraction placed on one day is removed from
//! the pool and never offered again. Each day walks the remaining pool in
//! rank order, placing whatever fits the clock and the day's activity budget.

mod meals;

use wayfarer_core::{
    Attraction, DayItinerary, Destination, PlannedActivity, Priority, TimeOfDay, TripPreferences,
    ValidationError, haversine_km,
};

use crate::PlannerConfig;

/// Score bonus per matching interest.
const INTEREST_MATCH_BONUS: f64 = 2.0;
/// Score penalty when a required accessibility feature is missing.
const ACCESSIBILITY_PENALTY: f64 = 5.0;
/// Cost ratio above which the cost penalty starts.
const COST_RATIO_THRESHOLD: f64 = 0.5;
/// Penalty per unit of cost ratio above the threshold.
const COST_PENALTY_FACTOR: f64 = 5.0;

/// Build a [`TimeOfDay`] in a const context, falling back to midnight for an
/// impossible clock reading.
pub(crate) const fn clock(hour: u16, minute: u16) -> TimeOfDay {
    match TimeOfDay::from_hm(hour, minute) {
        Some(time) => time,
        None => TimeOfDay::MIDNIGHT,
    }
}

/// An attraction paired with its ranking score.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedAttraction {
    /// The attraction.
    pub attraction: Attraction,
    /// Ranking score; higher is better.
    pub score: f64,
}

/// Rank an attraction against the traveller's preferences.
///
/// The score is the rating, plus two per matching interest, minus five when
/// an accessibility need is unmet, minus a cost penalty of
/// `5 × max(0, cost / daily budget − 0.5)`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use wayfarer_core::{Attraction, TripPreferences};
/// use wayfarer_planner::score_attraction;
///
/// let prefs = TripPreferences::new(1000.0, "EUR", 10).with_interests(["art"]);
/// let gallery = Attraction::new("g", "art", Coord { x: 0.0, y: 0.0 })
///     .with_rating(4.0)
///     .with_cost(75.0);
/// // 4 + 2 - 5 × (0.75 - 0.5)
/// assert!((score_attraction(&gallery, &prefs) - 4.75).abs() < 1e-12);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "attraction scores combine ratings, bonuses and penalties"
)]
pub fn score_attraction(attraction: &Attraction, preferences: &TripPreferences) -> f64 {
    let matches = u32::try_from(attraction.matching_interest_count(&preferences.interests))
        .unwrap_or(u32::MAX);
    let accessibility_penalty = if preferences
        .accessibility
        .is_unmet_by(attraction.accessibility)
    {
        ACCESSIBILITY_PENALTY
    } else {
        0.0
    };
    let daily_budget = preferences.daily_budget();
    let cost_ratio = if daily_budget > 0.0 {
        attraction.cost / daily_budget
    } else {
        0.0
    };
    let cost_penalty = COST_PENALTY_FACTOR * (cost_ratio - COST_RATIO_THRESHOLD).max(0.0);
    attraction.rating + INTEREST_MATCH_BONUS * f64::from(matches)
        - accessibility_penalty
        - cost_penalty
}

/// Score `attractions` and sort them best first. Equal scores keep their
/// input order.
///
/// # Errors
/// Returns [`ValidationError::NonFiniteValue`] when an attraction's rating or
/// cost is NaN or infinite.
pub fn rank_attractions(
    attractions: &[Attraction],
    preferences: &TripPreferences,
) -> Result<Vec<RankedAttraction>, ValidationError> {
    let mut ranked = attractions
        .iter()
        .map(|attraction| {
            if !attraction.rating.is_finite() {
                return Err(ValidationError::NonFiniteValue("attraction rating"));
            }
            if !attraction.cost.is_finite() {
                return Err(ValidationError::NonFiniteValue("attraction cost"));
            }
            Ok(RankedAttraction {
                score: score_attraction(attraction, preferences),
                attraction: attraction.clone(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    ranked.sort_by(|lhs, rhs| rhs.score.total_cmp(&lhs.score));
    Ok(ranked)
}

/// Fill `days` itineraries at `destination` within `budget`.
///
/// Each day spends at most `budget / days × activity_share` on activities,
/// runs from `day_start` to `day_end`, skips visits shorter than
/// `min_activity_minutes` once truncated to the end of the day, and leaves
/// `buffer_minutes` between visits. The remainder of the daily budget is
/// split across three meals.
///
/// # Errors
/// Returns [`ValidationError`] when an attraction has a non-finite rating,
/// cost or location.
///
/// # Examples
/// ```
/// use wayfarer_core::TripPreferences;
/// use wayfarer_core::test_support::paris;
/// use wayfarer_planner::{PlannerConfig, schedule_destination};
///
/// let prefs = TripPreferences::new(1200.0, "EUR", 3);
/// let days = schedule_destination(&paris(), 3, 1200.0, &prefs, &PlannerConfig::default())?;
/// assert_eq!(days.len(), 3);
/// assert!(days.iter().all(|day| day.meals.len() == 3));
/// # Ok::<(), wayfarer_core::ValidationError>(())
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "daily budgets are floating-point shares of the destination budget"
)]
pub fn schedule_destination(
    destination: &Destination,
    days: u32,
    budget: f64,
    preferences: &TripPreferences,
    config: &PlannerConfig,
) -> Result<Vec<DayItinerary>, ValidationError> {
    if days == 0 {
        return Ok(Vec::new());
    }
    let mut pool = rank_attractions(&destination.attractions, preferences)?;
    let share = config.activity_share.clamp(0.0, 1.0);
    let day_budget = budget / f64::from(days);
    let activity_budget = day_budget * share;
    let dining_budget = day_budget * (1.0 - share);

    let mut itinerary = Vec::with_capacity(usize::try_from(days).unwrap_or_default());
    for day in 1..=days {
        let activities = fill_day(&mut pool, activity_budget, config);
        let walking_distance_km = walking_distance(&activities)?;
        let estimated_cost = activities
            .iter()
            .map(|activity| activity.attraction.cost)
            .sum();
        itinerary.push(DayItinerary {
            day,
            activities,
            meals: meals::plan_meals(&destination.category, dining_budget),
            estimated_cost,
            walking_distance_km,
        });
    }
    log::debug!(
        "scheduled {} of {} attractions at {} over {days} day(s)",
        destination.attractions.len().saturating_sub(pool.len()),
        destination.attractions.len(),
        destination.id
    );
    Ok(itinerary)
}

/// Place attractions from `pool` into one day, removing every placed
/// attraction from the pool.
#[expect(
    clippy::float_arithmetic,
    reason = "the remaining activity budget is decremented by attraction costs"
)]
fn fill_day(
    pool: &mut Vec<RankedAttraction>,
    activity_budget: f64,
    config: &PlannerConfig,
) -> Vec<PlannedActivity> {
    let mut remaining_budget = activity_budget;
    let mut now = config.day_start;
    let mut activities = Vec::new();
    let mut unplaced = Vec::with_capacity(pool.len());

    for candidate in pool.drain(..) {
        if now >= config.day_end || candidate.attraction.cost > remaining_budget {
            unplaced.push(candidate);
            continue;
        }
        let usable = candidate
            .attraction
            .duration_minutes
            .min(now.minutes_until(config.day_end));
        let Some(end) = now.checked_add_minutes(usable) else {
            unplaced.push(candidate);
            continue;
        };
        if usable < config.min_activity_minutes {
            unplaced.push(candidate);
            continue;
        }
        remaining_budget -= candidate.attraction.cost;
        activities.push(PlannedActivity {
            priority: Priority::from_score(candidate.score),
            score: candidate.score,
            attraction: candidate.attraction,
            start: now,
            end,
        });
        now = end
            .checked_add_minutes(config.buffer_minutes)
            .unwrap_or(config.day_end);
    }
    *pool = unplaced;
    activities
}

#[expect(clippy::float_arithmetic, reason = "walking distance is a sum of legs")]
fn walking_distance(activities: &[PlannedActivity]) -> Result<f64, ValidationError> {
    activities
        .windows(2)
        .filter_map(|pair| match pair {
            [from, to] => Some(haversine_km(from.attraction.location, to.attraction.location)),
            _ => None,
        })
        .try_fold(0.0, |total, leg| Ok(total + leg?))
}
