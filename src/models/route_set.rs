//! Route set: one ordered customer sequence per vehicle.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ProblemInstance;

/// A candidate solution: one route per vehicle.
///
/// Routes are stored as customer ID sequences; the depot is implicit at
/// both ends and never stored. Well-formedness and feasibility are checked
/// on demand rather than enforced by construction.
///
/// # Examples
///
/// ```
/// use cvrp_local_search::models::{ProblemInstance, RouteSet};
///
/// let problem: ProblemInstance = "4 2 4\n0 0 0\n2 1 0\n2 2 0\n2 3 0".parse().unwrap();
/// let routes = RouteSet::new(vec![vec![1, 2], vec![3]]);
/// assert!(routes.is_well_formed(&problem));
/// assert!(routes.is_feasible(&problem));
/// assert!((routes.cost(&problem) - 10.0).abs() < 1e-10);
/// assert_eq!(routes.to_string(), "0 1 2 0 0 3 0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSet {
    routes: Vec<Vec<usize>>,
}

impl RouteSet {
    /// Creates a route set from customer sequences.
    pub fn new(routes: Vec<Vec<usize>>) -> Self {
        Self { routes }
    }

    /// Creates `num_vehicles` empty routes.
    pub fn empty(num_vehicles: usize) -> Self {
        Self {
            routes: vec![Vec::new(); num_vehicles],
        }
    }

    /// Returns the routes as customer ID sequences.
    pub fn routes(&self) -> &[Vec<usize>] {
        &self.routes
    }

    /// Consumes the set, returning its routes.
    pub fn into_routes(self) -> Vec<Vec<usize>> {
        self.routes
    }

    /// Number of routes (one per vehicle).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Total number of customers across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.len()).sum()
    }

    /// Total Euclidean distance over all routes, depot to depot.
    pub fn cost(&self, problem: &ProblemInstance) -> f64 {
        self.routes
            .iter()
            .filter(|r| !r.is_empty())
            .map(|r| problem.distances().tour_length(0, r))
            .sum()
    }

    /// `true` if there is one route per vehicle and every customer
    /// `1..n` appears exactly once.
    pub fn is_well_formed(&self, problem: &ProblemInstance) -> bool {
        if self.routes.len() != problem.num_vehicles() {
            return false;
        }
        let mut seen = vec![false; problem.num_locations()];
        for &c in self.routes.iter().flatten() {
            if c == 0 || c >= seen.len() || seen[c] {
                return false;
            }
            seen[c] = true;
        }
        seen.iter().skip(1).all(|&s| s)
    }

    /// `true` if no route carries more than the vehicle capacity.
    pub fn is_feasible(&self, problem: &ProblemInstance) -> bool {
        self.routes
            .iter()
            .all(|r| problem.route_demand(r) <= problem.capacity())
    }
}

impl fmt::Display for RouteSet {
    /// Writes each route as `0 c1 c2 … 0`, routes separated by a space.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for route in &self.routes {
            if !first {
                write!(f, " ")?;
            }
            first = false;
            write!(f, "0")?;
            for c in route {
                write!(f, " {}", c)?;
            }
            write!(f, " 0")?;
        }
        Ok(())
    }
}
