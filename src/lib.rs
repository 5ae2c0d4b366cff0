//! Facade crate for the Wayfarer trip planning engine.
//!
//! This crate re-exports the core domain types and, behind the default
//! `planner` feature, the pipeline that orders destinations, shares out days
//! and budget, and schedules each day.

#![forbid(unsafe_code)]

pub use wayfarer_core::{
    Accessibility, AccessibilityNeeds, ActivityLevel, Attraction, Budget, BudgetFlexibility,
    DataError, DayItinerary, Destination, DestinationRepository, Diagnostics, GroupProfile,
    GroupType, HubKind, Meal, MealKind, OptimizedDestination, OptimizedTrip, PipelineStage,
    PlanError, PlanRequest, PlanResponse, PlannedActivity, Planner, Priority, SearchCutoff,
    TimeOfDay, TransportHub, TransportMode, TravelRoute, TravelStyle, TripDuration,
    TripPreferences, ValidationError, estimate_transport_cost, haversine_km, is_valid_location,
    transport_rate_per_km,
};

#[cfg(feature = "planner")]
pub use wayfarer_planner::{PlannerConfig, TripPlanner};
