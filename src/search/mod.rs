//! Generic local search over any [`SearchState`].
//!
//! - [`SearchState`] — lazily valued state with neighbor, validity, and jump operators
//! - [`Neighborhood`] — depth-first composition of the elementary move
//! - [`LocalSearch`] — variable-neighborhood descent with randomized escape
//! - [`SearchLimit`] — distance and/or wall-clock termination

mod engine;
mod limit;
mod neighborhood;
mod state;

pub use engine::LocalSearch;
pub use limit::{SearchLimit, Timer};
pub use neighborhood::Neighborhood;
pub use state::SearchState;
