//! Fleet-level search driver.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use super::{FleetContext, FleetState};
use crate::config::SearchConfig;
use crate::error::Result;
use crate::models::RouteSet;
use crate::search::{LocalSearch, SearchLimit, SearchState};

/// Improves a feasible route set by relocating customers between vehicles.
///
/// Every candidate assignment is priced by solving each of its routes,
/// memoized in the context's route cache.
#[derive(Debug, Clone)]
pub struct FleetSolver {
    engine: LocalSearch,
    limit: SearchLimit,
    seed: u64,
}

impl FleetSolver {
    /// Fails if the fleet time budget is not a valid duration.
    pub fn new(config: &SearchConfig) -> Result<Self> {
        Ok(Self {
            engine: LocalSearch::new(config),
            limit: config.fleet_limit()?,
            // Route searches draw from the context RNG seeded with `seed`.
            seed: config.seed.wrapping_add(1),
        })
    }

    /// Overrides the termination policy.
    pub fn with_limit(mut self, limit: SearchLimit) -> Self {
        self.limit = limit;
        self
    }

    /// Runs the fleet search from `initial` and returns the best state.
    pub fn solve<'c, 'p>(&self, ctx: &'c FleetContext<'p>, initial: RouteSet) -> FleetState<'c, 'p> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let initial = FleetState::from_route_set(ctx, initial);
        let initial_cost = initial.value();
        let best = self.engine.search(initial, &self.limit, &mut rng);
        debug!(
            initial_cost,
            cost = best.value(),
            cached_routes = ctx.cached_routes(),
            "fleet search finished"
        );
        best
    }
}
