//! Run-scoped collaborators shared by every fleet state.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::SearchConfig;
use crate::error::Result;
use crate::models::ProblemInstance;
use crate::oracle::FeasibilityOracle;
use crate::tsp::{RouteCache, RouteSolver, RouteState};

/// Everything one fleet search needs besides the routes themselves.
///
/// Fleet states hold a shared reference to the context. The route cache
/// and the route-level RNG sit behind `RefCell`s so that evaluating a
/// state through `&self` can still solve and memoize routes.
pub struct FleetContext<'p> {
    problem: &'p ProblemInstance,
    oracle: &'p dyn FeasibilityOracle,
    route_solver: RouteSolver<'p>,
    use_badness: bool,
    cache: RefCell<RouteCache<'p>>,
    rng: RefCell<StdRng>,
}

impl<'p> FleetContext<'p> {
    pub fn new(
        problem: &'p ProblemInstance,
        config: &SearchConfig,
        oracle: &'p dyn FeasibilityOracle,
    ) -> Result<Self> {
        Ok(Self {
            problem,
            oracle,
            route_solver: RouteSolver::new(problem, config)?,
            use_badness: config.use_badness_heuristic,
            cache: RefCell::new(RouteCache::new()),
            rng: RefCell::new(StdRng::seed_from_u64(config.seed)),
        })
    }

    pub fn problem(&self) -> &'p ProblemInstance {
        self.problem
    }

    pub fn oracle(&self) -> &'p dyn FeasibilityOracle {
        self.oracle
    }

    pub fn use_badness(&self) -> bool {
        self.use_badness
    }

    /// Best known ordering of one vehicle's customers.
    pub fn solve_route(&self, customers: &[usize]) -> Rc<RouteState<'p>> {
        // Route searches never reach back into the context, so these
        // borrows cannot overlap.
        let mut cache = self.cache.borrow_mut();
        let mut rng = self.rng.borrow_mut();
        self.route_solver.solve(customers, &mut cache, &mut *rng)
    }

    /// Number of distinct customer sets solved so far.
    pub fn cached_routes(&self) -> usize {
        self.cache.borrow().len()
    }
}

impl fmt::Debug for FleetContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FleetContext")
            .field("customers", &self.problem.num_customers())
            .field("use_badness", &self.use_badness)
            .field("cached_routes", &self.cached_routes())
            .finish_non_exhaustive()
    }
}
