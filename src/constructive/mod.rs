//! Constructive heuristics.
//!
//! - [`nearest_neighbor_tour`] — Greedy nearest-neighbor route ordering, O(n²)

mod nearest_neighbor;

pub use nearest_neighbor::nearest_neighbor_tour;
