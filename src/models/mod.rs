//! Domain model types for the capacitated vehicle routing problem.
//!
//! Provides customers with demands and coordinates, the immutable problem
//! instance, and the route set that candidate solutions are expressed in.

mod customer;
mod problem;
mod route_set;

pub use customer::Customer;
pub use problem::ProblemInstance;
pub use route_set::RouteSet;
