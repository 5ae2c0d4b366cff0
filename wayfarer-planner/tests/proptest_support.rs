//! Proptest strategies for planner property-based tests.
//!
//! Generated destinations sit inside western Europe with unique identifiers,
//! so every generated set is a valid planning input.

use geo::Coord;
use proptest::prelude::*;
use wayfarer_core::{Accessibility, Attraction, Destination, TravelStyle, TripPreferences};

const CATEGORIES: [&str; 5] = ["museum", "landmark", "nature", "food", "history"];

/// Strategy for a coordinate between the Atlantic coast and the Alps.
pub fn location_strategy() -> impl Strategy<Value = Coord<f64>> {
    (-5.0_f64..15.0_f64, 40.0_f64..55.0_f64).prop_map(|(x, y)| Coord { x, y })
}

fn attraction_strategy() -> impl Strategy<Value = Attraction> {
    (
        0_usize..CATEGORIES.len(),
        0.0_f64..=5.0_f64,
        15_u16..=300_u16,
        0.0_f64..120.0_f64,
        any::<bool>(),
    )
        .prop_map(|(category, rating, minutes, cost, accessible)| {
            let category = CATEGORIES.get(category).copied().unwrap_or("museum");
            let access = if accessible {
                Accessibility::FULL
            } else {
                Accessibility::default()
            };
            Attraction::new("placeholder", category, Coord { x: 0.0, y: 0.0 })
                .with_rating(rating)
                .with_duration_minutes(minutes)
                .with_cost(cost)
                .with_accessibility(access)
        })
}

/// Strategy for a destination with up to `max_attractions` attractions.
///
/// Identifiers are placeholders; [`destination_set_strategy`] assigns unique
/// ones.
pub fn destination_strategy(max_attractions: usize) -> impl Strategy<Value = Destination> {
    (
        location_strategy(),
        0.0_f64..=1.0_f64,
        proptest::collection::vec(attraction_strategy(), 0..=max_attractions),
    )
        .prop_map(|(location, popularity, attractions)| {
            attractions.into_iter().enumerate().fold(
                Destination::new("placeholder", "Placeholder", location)
                    .with_popularity(popularity),
                |destination, (idx, attraction)| {
                    let id = format!("attraction-{idx}");
                    let located = Attraction {
                        id: id.clone(),
                        name: id,
                        location: destination.location,
                        ..attraction
                    };
                    destination.with_attraction(located)
                },
            )
        })
}

/// Strategy for `min..=max` destinations with ids `d0`, `d1`, …
pub fn destination_set_strategy(
    min: usize,
    max: usize,
    max_attractions: usize,
) -> impl Strategy<Value = Vec<Destination>> {
    proptest::collection::vec(destination_strategy(max_attractions), min..=max).prop_map(
        |destinations| {
            destinations
                .into_iter()
                .enumerate()
                .map(|(idx, destination)| Destination {
                    id: format!("d{idx}"),
                    name: format!("Destination {idx}"),
                    ..destination
                })
                .collect()
        },
    )
}

/// Strategy for preferences covering at least `min_days` days.
pub fn preferences_strategy(min_days: u32) -> impl Strategy<Value = TripPreferences> {
    (
        100.0_f64..20_000.0_f64,
        min_days..=min_days + 14,
        prop_oneof![
            Just(TravelStyle::Budget),
            Just(TravelStyle::Standard),
            Just(TravelStyle::Luxury),
            Just(TravelStyle::Backpacker),
        ],
        proptest::collection::vec(0_usize..CATEGORIES.len(), 0..3),
    )
        .prop_map(|(budget, days, style, interests)| {
            TripPreferences::new(budget, "EUR", days)
                .with_travel_style(style)
                .with_interests(
                    interests
                        .into_iter()
                        .filter_map(|idx| CATEGORIES.get(idx).copied()),
                )
        })
}

/// Days needed to give each of `count` destinations one day.
pub fn days_for(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX).max(1)
}
