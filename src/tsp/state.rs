//! Single-vehicle route ordering as a search state.

use std::cell::OnceCell;

use rand::Rng;

use crate::error::Result;
use crate::models::ProblemInstance;
use crate::search::SearchState;

/// Visiting order for one vehicle's customers, depot to depot.
///
/// The elementary move exchanges the customers at two distinct positions.
/// Every ordering is valid: capacity depends on membership, not order.
///
/// # Examples
///
/// ```
/// use cvrp_local_search::models::ProblemInstance;
/// use cvrp_local_search::search::SearchState;
/// use cvrp_local_search::tsp::RouteState;
///
/// let problem: ProblemInstance = "4 1 10\n0 0 0\n1 1 0\n1 2 0\n1 3 0".parse().unwrap();
/// let state = RouteState::new(&problem, vec![1, 3, 2]);
/// assert!((state.value() - 6.0).abs() < 1e-10);
/// assert_eq!(state.neighbors().count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct RouteState<'p> {
    problem: &'p ProblemInstance,
    order: Vec<usize>,
    value: OnceCell<f64>,
}

impl<'p> RouteState<'p> {
    pub fn new(problem: &'p ProblemInstance, order: Vec<usize>) -> Self {
        Self {
            problem,
            order,
            value: OnceCell::new(),
        }
    }

    /// Customers in visiting order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<'p> SearchState for RouteState<'p> {
    type Neighbors = Swaps<'p>;

    fn value(&self) -> f64 {
        *self.value.get_or_init(|| {
            if self.order.is_empty() {
                0.0
            } else {
                self.problem.distances().tour_length(0, &self.order)
            }
        })
    }

    fn neighbors(&self) -> Swaps<'p> {
        Swaps {
            problem: self.problem,
            order: self.order.clone(),
            i: 0,
            j: 1,
        }
    }

    fn is_valid(&self) -> bool {
        true
    }

    fn random_jump<R: Rng>(&self, fraction: f64, rng: &mut R) -> Result<Self> {
        let mut order = self.order.clone();
        if order.len() >= 2 {
            let swaps = (fraction * order.len() as f64).ceil() as usize;
            for _ in 0..swaps {
                let a = rng.random_range(0..order.len());
                let b = rng.random_range(0..order.len());
                order.swap(a, b);
            }
        }
        Ok(Self::new(self.problem, order))
    }
}

/// Pairwise-swap neighbors of a route, positions `(i, j)` with `i < j`
/// in lexicographic order.
pub struct Swaps<'p> {
    problem: &'p ProblemInstance,
    order: Vec<usize>,
    i: usize,
    j: usize,
}

impl<'p> Iterator for Swaps<'p> {
    type Item = RouteState<'p>;

    fn next(&mut self) -> Option<RouteState<'p>> {
        if self.j >= self.order.len() {
            self.i += 1;
            self.j = self.i + 1;
            if self.j >= self.order.len() {
                return None;
            }
        }
        let mut order = self.order.clone();
        order.swap(self.i, self.j);
        self.j += 1;
        Some(RouteState::new(self.problem, order))
    }
}
