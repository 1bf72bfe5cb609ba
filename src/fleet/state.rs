//! Whole-fleet assignment as a search state.

use std::cell::OnceCell;
use std::rc::Rc;

use rand::Rng;
use tracing::debug;

use super::{badness, FleetContext};
use crate::error::{Result, SolverError};
use crate::models::RouteSet;
use crate::oracle::PartialAssignment;
use crate::search::SearchState;
use crate::tsp::RouteState;

/// Assignment of customers to vehicles.
///
/// Only route membership matters to this state: its cost is the sum of the
/// costs the route solver finds for each vehicle's customer set. Once
/// evaluated, the state's routes are those solved orderings.
///
/// The elementary move relocates one customer to the tail of another route.
#[derive(Clone)]
pub struct FleetState<'c, 'p> {
    ctx: &'c FleetContext<'p>,
    routes: Vec<Vec<usize>>,
    solved: OnceCell<Solved>,
}

#[derive(Clone)]
struct Solved {
    cost: f64,
    orders: Vec<Vec<usize>>,
}

impl<'c, 'p> FleetState<'c, 'p> {
    pub fn new(ctx: &'c FleetContext<'p>, routes: Vec<Vec<usize>>) -> Self {
        Self {
            ctx,
            routes,
            solved: OnceCell::new(),
        }
    }

    pub fn from_route_set(ctx: &'c FleetContext<'p>, route_set: RouteSet) -> Self {
        Self::new(ctx, route_set.into_routes())
    }

    /// Customers per vehicle: the route solver's visiting order once this
    /// state has been evaluated, the order it was built with before.
    pub fn routes(&self) -> &[Vec<usize>] {
        match self.solved.get() {
            Some(solved) => &solved.orders,
            None => &self.routes,
        }
    }

    /// Customers per vehicle in the route solver's visiting order.
    pub fn ordered_routes(&self) -> &[Vec<usize>] {
        &self.solve().orders
    }

    pub fn into_route_set(self) -> RouteSet {
        RouteSet::new(self.ordered_routes().to_vec())
    }

    fn solve(&self) -> &Solved {
        self.solved.get_or_init(|| {
            let solved: Vec<Rc<RouteState<'p>>> = self
                .routes
                .iter()
                .map(|r| self.ctx.solve_route(r))
                .collect();
            Solved {
                cost: solved.iter().map(|r| r.value()).sum(),
                orders: solved.iter().map(|r| r.order().to_vec()).collect(),
            }
        })
    }
}

impl std::fmt::Debug for FleetState<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FleetState")
            .field("routes", &self.routes())
            .field("cost", &self.solved.get().map(|s| s.cost))
            .finish()
    }
}

impl<'c, 'p> SearchState for FleetState<'c, 'p> {
    type Neighbors = Relocations<'c, 'p>;

    fn value(&self) -> f64 {
        self.solve().cost
    }

    fn value_bounded(&self, hint: f64) -> f64 {
        if let Some(solved) = self.solved.get() {
            return solved.cost;
        }
        let mut total = 0.0;
        for route in &self.routes {
            total += self.ctx.solve_route(route).value();
            if total > hint {
                break;
            }
        }
        total
    }

    fn neighbors(&self) -> Relocations<'c, 'p> {
        Relocations::new(self.ctx, self.routes().to_vec())
    }

    fn is_valid(&self) -> bool {
        let problem = self.ctx.problem();
        self.routes
            .iter()
            .all(|r| problem.route_demand(r) <= problem.capacity())
    }

    fn random_jump<R: Rng>(&self, fraction: f64, rng: &mut R) -> Result<Self> {
        let problem = self.ctx.problem();
        let scores = if self.ctx.use_badness() {
            Some(badness(problem, self.routes()))
        } else {
            None
        };

        let mut pinned = vec![Vec::new(); self.routes.len()];
        let mut free = Vec::new();
        for (pins, route) in pinned.iter_mut().zip(self.routes()) {
            for &c in route {
                let p = match &scores {
                    Some(scores) => fraction * (1.0 + scores[c]),
                    None => fraction,
                };
                if rng.random::<f64>() < p {
                    free.push(c);
                } else {
                    pins.push(c);
                }
            }
        }

        let removed = free.len();
        let partial = PartialAssignment::new(pinned, free);
        let capacities = vec![problem.capacity(); self.routes.len()];
        match self.ctx.oracle().pack(&partial, &capacities, problem.demands()) {
            Some(repaired) => Ok(Self::from_route_set(self.ctx, repaired)),
            None => {
                debug!(removed, "oracle found no completion");
                Err(SolverError::Infeasible)
            }
        }
    }
}

/// Single-customer relocations of a route set.
///
/// For every route pair `i < j`, first each customer of route `i` moves to
/// the tail of route `j`, in position order; then each customer of route
/// `j` moves to the tail of route `i`.
pub struct Relocations<'c, 'p> {
    ctx: &'c FleetContext<'p>,
    routes: Vec<Vec<usize>>,
    i: usize,
    j: usize,
    backward: bool,
    pos: usize,
}

impl<'c, 'p> Relocations<'c, 'p> {
    fn new(ctx: &'c FleetContext<'p>, routes: Vec<Vec<usize>>) -> Self {
        Self {
            ctx,
            routes,
            i: 0,
            j: 1,
            backward: false,
            pos: 0,
        }
    }

    /// Moves on to the next route pair; `false` once all are done.
    fn advance_pair(&mut self) -> bool {
        self.backward = false;
        self.pos = 0;
        self.j += 1;
        if self.j >= self.routes.len() {
            self.i += 1;
            self.j = self.i + 1;
        }
        self.j < self.routes.len()
    }
}

impl<'c, 'p> Iterator for Relocations<'c, 'p> {
    type Item = FleetState<'c, 'p>;

    fn next(&mut self) -> Option<FleetState<'c, 'p>> {
        if self.j >= self.routes.len() {
            return None;
        }
        loop {
            let (from, to) = if self.backward {
                (self.j, self.i)
            } else {
                (self.i, self.j)
            };
            if self.pos < self.routes[from].len() {
                let mut routes = self.routes.clone();
                let customer = routes[from].remove(self.pos);
                routes[to].push(customer);
                self.pos += 1;
                return Some(FleetState::new(self.ctx, routes));
            }
            if self.backward {
                if !self.advance_pair() {
                    return None;
                }
            } else {
                self.backward = true;
                self.pos = 0;
            }
        }
    }
}
