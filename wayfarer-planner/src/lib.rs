//! Route optimisation and day scheduling for Wayfarer trips.
//!
//! This crate provides [`TripPlanner`], the default implementation of the
//! [`Planner`](wayfarer_core::Planner) trait. A planning run is a strictly
//! linear pipeline over caller-owned destination data:
//!
//! 1. validate the request,
//! 2. build normalised distance, cost and weight matrices ([`RouteMatrices`]),
//! 3. solve an open-path visiting order with nearest-neighbour construction
//!    and bounded 2-opt improvement ([`solve_order`]),
//! 4. apportion days and budget with the largest-remainder method
//!    ([`allocate`]),
//! 5. greedily fill each allocated day with ranked attractions
//!    ([`schedule_destination`]),
//! 6. assemble travel legs, totals and the optimisation score
//!    ([`assemble_trip`]).
//!
//! Each stage is also exported as a free function so callers can run parts
//! of the pipeline on their own data. Nothing here performs I/O or keeps
//! state between requests.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod allocation;
mod assemble;
mod matrix;
mod planner;
mod route;
mod schedule;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use allocation::{Allocation, AllocationPlan, allocate, destination_weight};
pub use assemble::{TripScore, assemble_trip, optimization_score, travel_route};
pub use matrix::{Matrix, RouteMatrices};
pub use planner::{PlannerConfig, TripPlanner};
pub use route::{RouteSolution, SearchBudget, solve_order};
pub use schedule::{RankedAttraction, rank_attractions, schedule_destination, score_attraction};
