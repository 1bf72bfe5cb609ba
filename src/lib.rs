//! # cvrp-local-search
//!
//! Capacitated vehicle routing by nested variable-neighborhood descent:
//! a fleet-level search relocates customers between vehicles, and every
//! candidate assignment is priced by a route-level search over each
//! vehicle's visiting order.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Customer, ProblemInstance, RouteSet)
//! - [`distance`] — Euclidean distance matrix
//! - [`constructive`] — Constructive heuristics (Nearest Neighbor)
//! - [`search`] — Generic local search engine and the SearchState trait
//! - [`tsp`] — Single-vehicle route ordering, solver, and route cache
//! - [`fleet`] — Customer-to-vehicle assignment search
//! - [`oracle`] — Feasibility oracle interface and a bin packing reference
//! - [`config`] — Search configuration (JSON via serde)
//! - [`solver`] — End-to-end solve pipeline
//! - [`error`] — Crate error type

pub mod config;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod fleet;
pub mod models;
pub mod oracle;
pub mod search;
pub mod solver;
pub mod tsp;
