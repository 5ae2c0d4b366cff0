//! Core domain types for the Wayfarer trip optimisation engine.
//!
//! The crate holds everything the planning pipeline shares: destinations and
//! their attractions, the traveller's preferences, the optimised trip records
//! produced at the end of a run, and the error taxonomy. It also provides the
//! two leaf calculators the pipeline is built on: great-circle distance
//! ([`haversine_km`]) and per-kilometre transport cost
//! ([`estimate_transport_cost`]).
//!
//! Destination data is owned by the caller and reached through the read-only
//! [`DestinationRepository`] trait. Nothing in this crate performs I/O.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod cost;
pub mod destination;
pub mod distance;
mod error;
mod planner;
pub mod preferences;
pub mod repository;
mod time;
pub mod trip;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use cost::{estimate_transport_cost, transport_rate_per_km};
pub use destination::{Accessibility, Attraction, Destination, HubKind, TransportHub};
pub use distance::{haversine_km, is_valid_location};
pub use error::{DataError, PipelineStage, PlanError, ValidationError};
pub use planner::{Diagnostics, PlanRequest, PlanResponse, Planner, SearchCutoff};
pub use preferences::{
    AccessibilityNeeds, ActivityLevel, Budget, BudgetFlexibility, GroupProfile, GroupType,
    TravelStyle, TripDuration, TripPreferences,
};
pub use repository::DestinationRepository;
pub use time::{TimeOfDay, TimeOfDayError};
pub use trip::{
    DayItinerary, Meal, MealKind, OptimizedDestination, OptimizedTrip, PlannedActivity, Priority,
    TransportMode, TravelRoute,
};
