//! Tests for `TripPlanner`.

use super::*;
use geo::Coord;
use rstest::{fixture, rstest};
use wayfarer_core::test_support::{MemoryRepository, lyon, marseille, paris};
use wayfarer_core::{Attraction, SearchCutoff, TripPreferences, ValidationError};

use crate::test_support::scattered_destinations;

#[fixture]
fn repository() -> MemoryRepository {
    MemoryRepository::with_destinations([paris(), lyon(), marseille()])
}

fn request(ids: &[&str], budget: f64, days: u32) -> PlanRequest {
    PlanRequest {
        destination_ids: ids.iter().map(|id| (*id).to_owned()).collect(),
        preferences: TripPreferences::new(budget, "EUR", days),
    }
}

#[rstest]
fn paris_and_lyon_share_six_days(repository: MemoryRepository) {
    let planner = TripPlanner::new(repository);
    let response = planner
        .plan(&request(&["paris", "lyon"], 3000.0, 6))
        .expect("plan succeeds");
    let trip = response.trip;
    let days: Vec<u32> = trip.destinations.iter().map(|stop| stop.days_allocated).collect();
    assert_eq!(days, [4, 2]);
    let budgets: Vec<f64> = trip
        .destinations
        .iter()
        .map(|stop| stop.budget_allocated)
        .collect();
    assert!(budgets.iter().zip([2111.1, 888.9]).all(|(got, want)| (got - want).abs() < 1.0));
    assert_eq!(trip.routes.len(), 1);
    assert!(!trip.approximate);
    assert_eq!(response.diagnostics.two_opt_passes, 0);
}

#[rstest]
fn single_destination_gets_the_whole_trip(repository: MemoryRepository) {
    let planner = TripPlanner::new(repository);
    let response = planner
        .plan(&request(&["marseille"], 900.0, 3))
        .expect("plan succeeds");
    let only = response.trip.destinations.first().expect("one stop");
    assert_eq!(only.days_allocated, 3);
    assert!((only.budget_allocated - 900.0).abs() < 1e-9);
    assert_eq!(only.itinerary.len(), 3);
}

#[rstest]
fn unknown_destinations_are_data_errors(repository: MemoryRepository) {
    let planner = TripPlanner::new(repository);
    let err = planner
        .plan(&request(&["paris", "oslo"], 1000.0, 4))
        .expect_err("oslo is missing");
    assert_eq!(
        err,
        PlanError::data(
            PipelineStage::BuildMatrices,
            DataError::NotFound { id: "oslo".into() }
        )
    );
}

#[rstest]
fn negative_attraction_costs_abort_before_scheduling() {
    let mut refunded = paris();
    refunded.attractions.push(Attraction {
        cost: -500.0,
        ..Attraction::new("refund", "museum", Coord { x: 2.34, y: 48.86 })
    });
    let planner = TripPlanner::new(MemoryRepository::with_destination(refunded));
    let err = planner
        .plan(&request(&["paris"], 100.0, 1))
        .expect_err("negative cost");
    assert_eq!(
        err,
        PlanError::data(
            PipelineStage::BuildMatrices,
            DataError::InvalidAttraction {
                id: "paris".into(),
                attraction: "refund".into(),
                field: "cost",
            }
        )
    );
}

#[rstest]
fn popularity_outside_unit_range_is_rejected() {
    let overhyped = Destination {
        popularity: 1.5,
        ..lyon()
    };
    let planner = TripPlanner::new(MemoryRepository::with_destinations([paris(), overhyped]));
    let err = planner
        .plan(&request(&["paris", "lyon"], 2000.0, 4))
        .expect_err("popularity above one");
    assert_eq!(
        err,
        PlanError::data(
            PipelineStage::BuildMatrices,
            DataError::InvalidDestination {
                id: "lyon".into(),
                field: "popularity",
            }
        )
    );
}

#[rstest]
fn invalid_coordinates_abort_at_matrix_construction() {
    let broken = Destination::new("nowhere", "Nowhere", Coord { x: 200.0, y: 0.0 });
    let planner = TripPlanner::new(MemoryRepository::with_destinations([paris(), broken]));
    let err = planner
        .plan(&request(&["paris", "nowhere"], 1000.0, 2))
        .expect_err("invalid coordinates");
    assert_eq!(err.stage(), PipelineStage::BuildMatrices);
    assert!(err.to_string().contains("Nowhere"));
}

#[rstest]
fn validation_runs_before_lookup(repository: MemoryRepository) {
    let planner = TripPlanner::new(repository);
    let err = planner
        .plan(&request(&["a", "b", "c"], 1000.0, 2))
        .expect_err("too few days");
    assert_eq!(
        err,
        PlanError::invalid(
            PipelineStage::Validate,
            ValidationError::TooFewDays {
                days: 2,
                destinations: 3
            }
        )
    );
}

#[rstest]
fn expired_deadline_yields_an_approximate_trip() {
    let stops = scattered_destinations(10, 5);
    let ids: Vec<String> = stops.iter().map(|stop| stop.id.clone()).collect();
    let config = PlannerConfig {
        search_deadline: Some(Duration::ZERO),
        ..PlannerConfig::default()
    };
    let planner = TripPlanner::with_config(MemoryRepository::with_destinations(stops), config);
    let response = planner
        .plan(&PlanRequest {
            destination_ids: ids,
            preferences: TripPreferences::new(5000.0, "EUR", 12),
        })
        .expect("degraded plans still succeed");
    assert!(response.trip.approximate);
    assert_eq!(response.diagnostics.cutoff, Some(SearchCutoff::Deadline));
    assert_eq!(response.trip.destinations.len(), 10);
    assert_eq!(response.trip.total_duration_days, 12);
}

#[rstest]
fn diagnostics_report_tour_weights(repository: MemoryRepository) {
    let planner = TripPlanner::new(repository);
    let response = planner
        .plan(&request(&["paris", "marseille", "lyon"], 2400.0, 6))
        .expect("plan succeeds");
    let diagnostics = response.diagnostics;
    assert!(diagnostics.tour_weight <= diagnostics.nearest_neighbor_weight);
    assert!(diagnostics.two_opt_passes >= 1);
    assert_eq!(
        response.trip.visiting_order().first().copied(),
        Some("paris"),
        "nearest neighbour starts from the first requested destination"
    );
}

#[rstest]
fn default_config_matches_the_documented_day() {
    let config = PlannerConfig::default();
    assert_eq!(config.day_start.to_string(), "09:00");
    assert_eq!(config.day_end.to_string(), "18:00");
    assert_eq!(config.search_deadline, Some(Duration::from_millis(250)));
    assert!((config.activity_share - 0.7).abs() < f64::EPSILON);
}
