//! Single-vehicle route solver.

use std::rc::Rc;

use rand::Rng;
use tracing::trace;

use super::{RouteCache, RouteState};
use crate::config::SearchConfig;
use crate::constructive::nearest_neighbor_tour;
use crate::error::Result;
use crate::models::ProblemInstance;
use crate::search::{LocalSearch, SearchLimit, SearchState};

/// Finds a short depot-to-depot ordering for one vehicle's customers.
///
/// Orders are built by nearest neighbor, then improved by the generic
/// local search under pairwise swaps. Results are memoized per customer set
/// in the caller's [`RouteCache`].
///
/// # Examples
///
/// ```
/// use cvrp_local_search::config::SearchConfig;
/// use cvrp_local_search::models::ProblemInstance;
/// use cvrp_local_search::search::SearchState;
/// use cvrp_local_search::tsp::{RouteCache, RouteSolver};
///
/// let problem: ProblemInstance = "4 1 10\n0 0 0\n1 1 0\n1 2 0\n1 3 0".parse().unwrap();
/// let solver = RouteSolver::new(&problem, &SearchConfig::default()).unwrap();
/// let mut cache = RouteCache::new();
/// let mut rng = rand::rng();
///
/// let route = solver.solve(&[3, 1, 2], &mut cache, &mut rng);
/// assert!((route.value() - 6.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct RouteSolver<'p> {
    problem: &'p ProblemInstance,
    engine: LocalSearch,
    limit: SearchLimit,
}

impl<'p> RouteSolver<'p> {
    /// Fails if the route time budget is not a valid duration.
    pub fn new(problem: &'p ProblemInstance, config: &SearchConfig) -> Result<Self> {
        Ok(Self {
            problem,
            engine: LocalSearch::new(config),
            limit: config.route_limit()?,
        })
    }

    /// Overrides the termination policy.
    pub fn with_limit(mut self, limit: SearchLimit) -> Self {
        self.limit = limit;
        self
    }

    /// Returns the best known ordering of `customers`.
    ///
    /// A customer set solved earlier in this run is answered from `cache`
    /// regardless of the order it is given in.
    pub fn solve<R: Rng>(
        &self,
        customers: &[usize],
        cache: &mut RouteCache<'p>,
        rng: &mut R,
    ) -> Rc<RouteState<'p>> {
        if let Some(known) = cache.get(customers) {
            return known;
        }

        let initial = self.construct(customers);
        let best = self.engine.search(initial, &self.limit, rng);
        trace!(customers = customers.len(), cost = best.value(), "route solved");
        cache.insert(best)
    }

    /// Nearest-neighbor ordering from the depot.
    pub fn construct(&self, customers: &[usize]) -> RouteState<'p> {
        let order = nearest_neighbor_tour(self.problem.distances(), 0, customers);
        RouteState::new(self.problem, order)
    }
}
