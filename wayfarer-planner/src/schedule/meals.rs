//! Meal slots and dining suggestions.

use wayfarer_core::{Meal, MealKind, TimeOfDay};

use super::clock;

/// Meal, sitting time and share of the dining budget.
const MEAL_PLAN: [(MealKind, TimeOfDay, f64); 3] = [
    (MealKind::Breakfast, clock(8, 0), 0.2),
    (MealKind::Lunch, clock(12, 30), 0.3),
    (MealKind::Dinner, clock(19, 0), 0.5),
];

/// Breakfast, lunch and dinner splitting `dining_budget` 20/30/50.
#[expect(clippy::float_arithmetic, reason = "meal budgets are shares of the dining budget")]
pub(super) fn plan_meals(category: &str, dining_budget: f64) -> Vec<Meal> {
    MEAL_PLAN
        .iter()
        .map(|&(kind, time, share)| Meal {
            kind,
            time,
            budget: dining_budget * share,
            suggestion: suggestion(category, kind),
        })
        .collect()
}

fn suggestion(category: &str, kind: MealKind) -> String {
    let cuisine = match category.to_ascii_lowercase().as_str() {
        "coastal" | "beach" => "fresh seafood near the water",
        "mountain" | "alpine" => "hearty alpine cooking",
        "urban" | "city" => "a neighbourhood bistro",
        "cultural" | "historic" => "traditional regional dishes",
        _ => "local cuisine",
    };
    let meal = match kind {
        MealKind::Breakfast => "Breakfast",
        MealKind::Lunch => "Lunch",
        MealKind::Dinner => "Dinner",
    };
    format!("{meal}: {cuisine}")
}
