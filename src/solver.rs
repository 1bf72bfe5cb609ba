//! End-to-end solve: initial packing, then fleet local search.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::SearchConfig;
use crate::error::{Result, SolverError};
use crate::fleet::{FleetContext, FleetSolver};
use crate::models::{ProblemInstance, RouteSet};
use crate::oracle::{FeasibilityOracle, PartialAssignment};
use crate::search::{SearchState, Timer};

/// Result of a solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub routes: RouteSet,
    pub cost: f64,
}

impl fmt::Display for Solution {
    /// Writes the optimality flag, then the route line. Local search never
    /// proves optimality, so the flag is always `0`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0 {}", self.routes)
    }
}

/// Solves a capacitated routing instance.
///
/// The oracle supplies a first feasible route set with every customer
/// free; the fleet search then improves it within the configured budgets.
///
/// # Errors
///
/// [`SolverError::Config`] if `config` fails validation, and
/// [`SolverError::Infeasible`] if the oracle finds no initial packing.
///
/// # Examples
///
/// ```
/// use cvrp_local_search::config::SearchConfig;
/// use cvrp_local_search::models::ProblemInstance;
/// use cvrp_local_search::oracle::BinPacker;
/// use cvrp_local_search::solver::solve;
///
/// let problem: ProblemInstance = "4 2 4\n0 0 0\n2 1 0\n2 2 0\n2 3 0".parse().unwrap();
/// let config = SearchConfig::default().with_vrp_time_budget(1.0);
/// let solution = solve(&problem, &config, &BinPacker::default()).unwrap();
/// assert!(solution.routes.is_feasible(&problem));
/// assert!((solution.cost - 8.0).abs() < 1e-9);
/// ```
pub fn solve(
    problem: &ProblemInstance,
    config: &SearchConfig,
    oracle: &dyn FeasibilityOracle,
) -> Result<Solution> {
    config.validate()?;
    let timer = Timer::start();

    let k = problem.num_vehicles();
    let partial = PartialAssignment::unassigned(k, problem.num_customers());
    let capacities = vec![problem.capacity(); k];
    let initial = oracle
        .pack(&partial, &capacities, problem.demands())
        .ok_or(SolverError::Infeasible)?;
    info!(
        customers = problem.num_customers(),
        vehicles = k,
        initial_cost = initial.cost(problem),
        "initial packing found"
    );

    let ctx = FleetContext::new(problem, config, oracle)?;
    let best = FleetSolver::new(config)?.solve(&ctx, initial);
    let cost = best.value();
    let routes = best.into_route_set();

    info!(
        cost,
        elapsed = timer.elapsed_secs_as_float(),
        "solve finished"
    );
    Ok(Solution { routes, cost })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchLimitMode;
    use crate::constructive::nearest_neighbor_tour;
    use crate::models::Customer;
    use crate::oracle::BinPacker;

    fn distance_config() -> SearchConfig {
        SearchConfig::default()
            .with_limit_mode(SearchLimitMode::Distance)
            .with_vrp_distance_budget(3)
            .with_tsp_distance_budget(3)
            .with_seed(42)
    }

    #[test]
    fn test_collinear_two_vehicles() {
        let p = ProblemInstance::new(
            vec![
                Customer::depot(0.0, 0.0),
                Customer::new(1, 1.0, 0.0, 2),
                Customer::new(2, 2.0, 0.0, 2),
                Customer::new(3, 3.0, 0.0, 2),
            ],
            2,
            4,
        );
        let solution = solve(&p, &distance_config(), &BinPacker::default()).expect("feasible");
        assert!(solution.routes.is_well_formed(&p));
        assert!(solution.routes.is_feasible(&p));
        // One route takes the far customer and a neighbor: 6, the other 2.
        assert!((solution.cost - 8.0).abs() < 1e-9);
        assert!((solution.routes.cost(&p) - solution.cost).abs() < 1e-9);
    }

    #[test]
    fn test_solution_line() {
        let solution = Solution {
            routes: RouteSet::new(vec![vec![1, 2], vec![3]]),
            cost: 10.0,
        };
        assert_eq!(solution.to_string(), "0 0 1 2 0 0 3 0");
    }

    #[test]
    fn test_single_customer() {
        let p: ProblemInstance = "2 1 5\n0 0 0\n3 3 4".parse().expect("valid");
        let solution = solve(&p, &distance_config(), &BinPacker::default()).expect("feasible");
        assert_eq!(solution.routes.routes(), &[vec![1]]);
        assert!((solution.cost - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_never_worse_than_initial_packing() {
        let mut customers = vec![Customer::depot(50.0, 50.0)];
        for id in 1..=12 {
            let angle = id as f64 * 2.4;
            let radius = 10.0 + (id * 7 % 30) as f64;
            customers.push(Customer::new(
                id,
                50.0 + radius * angle.cos(),
                50.0 + radius * angle.sin(),
                1 + (id % 4) as i32,
            ));
        }
        let p = ProblemInstance::new(customers, 3, 12);
        let oracle = BinPacker::default();
        let initial = oracle
            .pack(&PartialAssignment::unassigned(3, 12), &[12, 12, 12], p.demands())
            .expect("feasible");
        // Route searches never return worse than nearest neighbor, so this
        // bounds the fleet search's starting cost.
        let initial_cost: f64 = initial
            .routes()
            .iter()
            .filter(|r| !r.is_empty())
            .map(|r| {
                let tour = nearest_neighbor_tour(p.distances(), 0, r);
                p.distances().tour_length(0, &tour)
            })
            .sum();

        for badness in [false, true] {
            let config = distance_config().with_badness(badness).with_walk_probability(0.3);
            let solution = solve(&p, &config, &oracle).expect("feasible");
            assert!(solution.routes.is_well_formed(&p));
            assert!(solution.routes.is_feasible(&p));
            assert!(solution.cost <= initial_cost + 1e-9);
        }
    }

    #[test]
    fn test_infeasible_instance() {
        let p: ProblemInstance = "3 1 3\n0 0 0\n2 1 0\n2 2 0".parse().expect("valid");
        let err = solve(&p, &distance_config(), &BinPacker::default()).unwrap_err();
        assert!(matches!(err, SolverError::Infeasible));
    }

    #[test]
    fn test_rejects_oversized_time_budget() {
        let p: ProblemInstance = "2 1 5\n0 0 0\n1 1 0".parse().expect("valid");
        let config = distance_config().with_vrp_time_budget(1e20);
        let err = solve(&p, &config, &BinPacker::default()).unwrap_err();
        assert!(matches!(err, SolverError::Config(_)));

        let oracle = BinPacker::default();
        let negative = distance_config().with_tsp_time_budget(-1.0);
        assert!(FleetContext::new(&p, &negative, &oracle).is_err());
        assert!(FleetSolver::new(&config).is_err());
    }

    #[test]
    fn test_rejects_invalid_config() {
        let p: ProblemInstance = "2 1 5\n0 0 0\n1 1 0".parse().expect("valid");
        let config = distance_config().with_walk_probability(1.5);
        let err = solve(&p, &config, &BinPacker::default()).unwrap_err();
        assert!(matches!(err, SolverError::Config(_)));
    }
}
