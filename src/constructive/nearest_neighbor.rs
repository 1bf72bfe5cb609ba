//! Nearest-neighbor tour construction.
//!
//! Starting from the depot, repeatedly visit the closest customer not yet
//! visited. Ties go to the customer listed first.
//!
//! # Complexity
//!
//! O(n²) where n = number of customers in the tour.

use crate::distance::DistanceMatrix;

/// Orders `customers` into a depot-to-depot tour by the nearest-neighbor rule.
///
/// # Examples
///
/// ```
/// use cvrp_local_search::models::Customer;
/// use cvrp_local_search::distance::DistanceMatrix;
/// use cvrp_local_search::constructive::nearest_neighbor_tour;
///
/// let customers = vec![
///     Customer::depot(0.0, 0.0),
///     Customer::new(1, 10.0, 0.0, 5),
///     Customer::new(2, 1.0, 0.0, 5),
///     Customer::new(3, 5.0, 0.0, 5),
/// ];
/// let dm = DistanceMatrix::from_customers(&customers);
/// assert_eq!(nearest_neighbor_tour(&dm, 0, &[1, 2, 3]), vec![2, 3, 1]);
/// ```
pub fn nearest_neighbor_tour(distances: &DistanceMatrix, depot: usize, customers: &[usize]) -> Vec<usize> {
    let mut to_visit = customers.to_vec();
    let mut tour = Vec::with_capacity(customers.len());
    let mut current = depot;

    while let Some(pos) = distances.nearest_neighbor(current, &to_visit) {
        // `remove` keeps the remaining candidates in their original order,
        // which the tie rule depends on.
        let next = to_visit.remove(pos);
        tour.push(next);
        current = next;
    }

    tour
}
