//! The state abstraction driven by the local search engine.

use rand::Rng;

use crate::error::Result;

/// A point in a search space.
///
/// Implementations wrap a payload (a route ordering, a whole route set)
/// and compute its cost lazily, at most once per instance. The engine
/// minimizes [`value`](SearchState::value).
///
/// # Examples
///
/// ```
/// use std::cell::OnceCell;
/// use rand::Rng;
/// use cvrp_local_search::error::Result;
/// use cvrp_local_search::search::{LocalSearch, SearchLimit, SearchState};
///
/// /// Integers in `0..=10`, minimizing distance to 7.
/// #[derive(Clone)]
/// struct Point { x: i32, value: OnceCell<f64> }
///
/// impl Point {
///     fn new(x: i32) -> Self { Self { x, value: OnceCell::new() } }
/// }
///
/// impl SearchState for Point {
///     type Neighbors = std::vec::IntoIter<Point>;
///
///     fn value(&self) -> f64 {
///         *self.value.get_or_init(|| (self.x - 7).abs() as f64)
///     }
///     fn neighbors(&self) -> Self::Neighbors {
///         vec![Point::new(self.x - 1), Point::new(self.x + 1)].into_iter()
///     }
///     fn is_valid(&self) -> bool { (0..=10).contains(&self.x) }
///     fn random_jump<R: Rng>(&self, _fraction: f64, _rng: &mut R) -> Result<Self> {
///         Ok(self.clone())
///     }
/// }
///
/// let engine = LocalSearch::default().with_walk_probability(0.0);
/// let mut rng = rand::rng();
/// let best = engine.search(Point::new(0), &SearchLimit::distance(1), &mut rng);
/// assert_eq!(best.x, 7);
/// ```
pub trait SearchState: Clone {
    /// Lazy sequence of one-step neighbors. It owns what it needs, so it
    /// may outlive the borrow of the state that produced it and can be
    /// dropped mid-stream.
    type Neighbors: Iterator<Item = Self>;

    /// Exact cost of this state. Computed once and memoized.
    fn value(&self) -> f64;

    /// Cost evaluation that may stop early once the running total
    /// exceeds `hint`.
    ///
    /// When the result is `>= hint` it is only a lower bound on the true
    /// cost; otherwise it is exact. Never memoized.
    fn value_bounded(&self, _hint: f64) -> f64 {
        self.value()
    }

    /// One-step neighbors under the elementary move.
    fn neighbors(&self) -> Self::Neighbors;

    /// Whether this state satisfies the problem constraints.
    fn is_valid(&self) -> bool;

    /// Random perturbation whose magnitude grows with `fraction` in `[0, 1]`.
    ///
    /// An `Err` means the perturbation could not produce a valid state and
    /// must be treated as not taken.
    fn random_jump<R: Rng>(&self, fraction: f64, rng: &mut R) -> Result<Self>;
}
