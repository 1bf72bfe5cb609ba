//! Fleet assignment search.
//!
//! - [`FleetContext`] — problem, oracle, route solver, and route cache for one run
//! - [`FleetState`] — customer-to-vehicle assignment priced by per-route solves
//! - [`Relocations`] — single-customer moves between route pairs
//! - [`FleetSolver`] — local search over fleet states
//! - [`badness()`] — centroid-distance weights for biased perturbation

mod badness;
mod context;
mod solver;
mod state;

pub use badness::badness;
pub use context::FleetContext;
pub use solver::FleetSolver;
pub use state::{FleetState, Relocations};
