//! Single-vehicle tour optimization.
//!
//! - [`RouteState`] — route ordering under pairwise swaps
//! - [`RouteSolver`] — nearest-neighbor construction plus local search
//! - [`RouteCache`] — per-run memo keyed by customer set

mod cache;
mod solver;
mod state;

pub use cache::RouteCache;
pub use solver::RouteSolver;
pub use state::{RouteState, Swaps};
