//! Apportion trip days and budget across the ordered destinations.
//!
//! Each destination's share is its preference weight divided by the sum of
//! all weights. Budget shares are continuous. Day shares are rounded with the
//! largest-remainder method so the allocated days always add up to the trip
//! length, and every destination keeps at least one day.

use std::cmp::Ordering;

use wayfarer_core::{Destination, TripPreferences, ValidationError};

/// Weight added per attraction matching a requested interest.
const INTEREST_BONUS: f64 = 0.1;
/// Lowest weight any destination can have.
const MIN_WEIGHT: f64 = 0.1;

/// One destination's share of the trip.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    /// Destination identifier.
    pub destination_id: String,
    /// Normalised preference weight; all weights sum to one.
    pub weight: f64,
    /// Whole days allocated; at least one.
    pub days: u32,
    /// Budget allocated in trip currency.
    pub budget: f64,
}

/// Allocations for every destination, in route order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AllocationPlan {
    allocations: Vec<Allocation>,
}

impl AllocationPlan {
    /// Allocation for `destination_id`, if present.
    #[must_use]
    pub fn get(&self, destination_id: &str) -> Option<&Allocation> {
        self.allocations
            .iter()
            .find(|allocation| allocation.destination_id == destination_id)
    }

    /// Allocations in route order.
    pub fn iter(&self) -> impl Iterator<Item = &Allocation> {
        self.allocations.iter()
    }

    /// Number of destinations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.allocations.len()
    }

    /// Whether the plan covers no destinations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.allocations.is_empty()
    }

    /// Sum of allocated days.
    #[must_use]
    pub fn total_days(&self) -> u32 {
        self.allocations
            .iter()
            .fold(0_u32, |total, allocation| total.saturating_add(allocation.days))
    }
}

impl IntoIterator for AllocationPlan {
    type Item = Allocation;
    type IntoIter = std::vec::IntoIter<Allocation>;

    fn into_iter(self) -> Self::IntoIter {
        self.allocations.into_iter()
    }
}

/// Un-normalised preference weight of a destination.
///
/// The weight is the destination's popularity plus 0.1 for every attraction
/// matching one of `interests`, floored at 0.1.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use wayfarer_core::{Attraction, Destination};
/// use wayfarer_planner::destination_weight;
///
/// let origin = Coord { x: 0.0, y: 0.0 };
/// let town = Destination::new("t", "Town", origin)
///     .with_popularity(0.5)
///     .with_attraction(Attraction::new("gallery", "art", origin))
///     .with_attraction(Attraction::new("park", "nature", origin));
/// assert!((destination_weight(&town, &["art".into()]) - 0.6).abs() < 1e-12);
///
/// let quiet = Destination::new("q", "Quiet", origin);
/// assert!((destination_weight(&quiet, &[]) - 0.1).abs() < 1e-12);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "weights combine popularity with an interest bonus"
)]
pub fn destination_weight(destination: &Destination, interests: &[String]) -> f64 {
    let matching = u32::try_from(destination.attractions_matching(interests)).unwrap_or(u32::MAX);
    (destination.popularity + INTEREST_BONUS * f64::from(matching)).max(MIN_WEIGHT)
}

/// Split the trip's days and budget across `destinations`.
///
/// # Errors
/// Returns [`ValidationError::NoDestinations`] for an empty list,
/// [`ValidationError::TooFewDays`] when there are fewer days than
/// destinations, [`ValidationError::NonPositiveBudget`] or
/// [`ValidationError::ZeroDuration`] for unusable preferences, and
/// [`ValidationError::NonFiniteValue`] when a popularity is not finite.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use wayfarer_core::{Destination, TripPreferences};
/// use wayfarer_planner::allocate;
///
/// let paris = Destination::new("paris", "Paris", Coord { x: 2.35, y: 48.86 })
///     .with_popularity(0.95);
/// let lyon = Destination::new("lyon", "Lyon", Coord { x: 4.84, y: 45.76 })
///     .with_popularity(0.40);
/// let plan = allocate(&[paris, lyon], &TripPreferences::new(3000.0, "EUR", 6))?;
///
/// assert_eq!(plan.get("paris").map(|a| a.days), Some(4));
/// assert_eq!(plan.get("lyon").map(|a| a.days), Some(2));
/// assert_eq!(plan.total_days(), 6);
/// # Ok::<(), wayfarer_core::ValidationError>(())
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "shares are floating-point fractions of the totals"
)]
pub fn allocate(
    destinations: &[Destination],
    preferences: &TripPreferences,
) -> Result<AllocationPlan, ValidationError> {
    preferences.validate()?;
    if destinations.is_empty() {
        return Err(ValidationError::NoDestinations);
    }
    let total_days = preferences.duration.days;
    if usize::try_from(total_days).is_ok_and(|days| days < destinations.len()) {
        return Err(ValidationError::TooFewDays {
            days: total_days,
            destinations: destinations.len(),
        });
    }
    if destinations
        .iter()
        .any(|destination| !destination.popularity.is_finite())
    {
        return Err(ValidationError::NonFiniteValue("popularity"));
    }

    let raw: Vec<f64> = destinations
        .iter()
        .map(|destination| destination_weight(destination, &preferences.interests))
        .collect();
    let sum: f64 = raw.iter().sum();
    let weights: Vec<f64> = raw.iter().map(|weight| weight / sum).collect();
    let shares: Vec<f64> = weights
        .iter()
        .map(|weight| weight * f64::from(total_days))
        .collect();
    let days = apportion(&shares, total_days);

    let allocations = destinations
        .iter()
        .zip(weights)
        .zip(days)
        .map(|((destination, weight), days)| Allocation {
            destination_id: destination.id.clone(),
            weight,
            days,
            budget: weight * preferences.budget.total,
        })
        .collect();
    let plan = AllocationPlan { allocations };
    debug_assert_eq!(plan.total_days(), total_days, "allocated days must sum exactly");
    log::debug!("allocated {total_days} days across {} destinations", plan.len());
    Ok(plan)
}

/// Largest-remainder rounding of `shares` to whole units summing to `total`,
/// with at least one unit per share.
///
/// Callers guarantee `total >= shares.len()`.
fn apportion(shares: &[f64], total: u32) -> Vec<u32> {
    let mut units: Vec<u32> = shares.iter().map(|share| floor_units(*share)).collect();
    let remainders: Vec<f64> = shares
        .iter()
        .zip(&units)
        .map(|(share, floor)| fractional(*share, *floor))
        .collect();

    // Hand out what flooring lost, largest remainder first, earlier position
    // on ties.
    let mut by_remainder: Vec<usize> = (0..shares.len()).collect();
    by_remainder.sort_by(|lhs, rhs| {
        remainder_at(&remainders, *rhs)
            .partial_cmp(&remainder_at(&remainders, *lhs))
            .unwrap_or(Ordering::Equal)
            .then_with(|| lhs.cmp(rhs))
    });
    let assigned = units.iter().fold(0_u32, |acc, unit| acc.saturating_add(*unit));
    let missing = usize::try_from(total.saturating_sub(assigned)).unwrap_or(usize::MAX);
    for idx in by_remainder.iter().cycle().take(missing) {
        if let Some(unit) = units.get_mut(*idx) {
            *unit = unit.saturating_add(1);
        }
    }

    // Every destination needs a day. Take it from whoever holds the most,
    // preferring the smallest remainder and then the latest position.
    while let Some(empty) = units.iter().position(|unit| *unit == 0) {
        let donor = units
            .iter()
            .enumerate()
            .filter(|(_, unit)| **unit > 1)
            .max_by(|(lhs_idx, lhs), (rhs_idx, rhs)| {
                lhs.cmp(rhs)
                    .then_with(|| {
                        remainder_at(&remainders, *rhs_idx)
                            .partial_cmp(&remainder_at(&remainders, *lhs_idx))
                            .unwrap_or(Ordering::Equal)
                    })
                    .then_with(|| lhs_idx.cmp(rhs_idx))
            })
            .map(|(idx, _)| idx);
        let Some(donor) = donor else {
            debug_assert!(false, "no destination can spare a day");
            break;
        };
        if let Some(unit) = units.get_mut(donor) {
            *unit = unit.saturating_sub(1);
        }
        if let Some(unit) = units.get_mut(empty) {
            *unit = 1;
        }
    }
    units
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "shares are finite, non-negative and bounded by the trip length"
)]
fn floor_units(share: f64) -> u32 {
    share.floor().max(0.0) as u32
}

#[expect(clippy::float_arithmetic, reason = "fractional part of a share")]
fn fractional(share: f64, floor: u32) -> f64 {
    share - f64::from(floor)
}

fn remainder_at(remainders: &[f64], idx: usize) -> f64 {
    remainders.get(idx).copied().unwrap_or(0.0)
}
