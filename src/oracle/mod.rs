//! Feasibility oracle: completes partial assignments under capacity.
//!
//! - [`PartialAssignment`] — customers pinned to vehicles plus free customers
//! - [`FeasibilityOracle`] — the repair interface the fleet search consumes
//! - [`BinPacker`] — reference oracle by bounded backtracking bin packing

mod packer;

pub use packer::BinPacker;

use crate::models::RouteSet;

/// Customers pinned to vehicles, plus customers any vehicle may take.
///
/// # Examples
///
/// ```
/// use cvrp_local_search::oracle::PartialAssignment;
///
/// let partial = PartialAssignment::unassigned(2, 3);
/// assert_eq!(partial.pinned(), &[Vec::<usize>::new(), Vec::new()]);
/// assert_eq!(partial.free(), &[1, 2, 3]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialAssignment {
    pinned: Vec<Vec<usize>>,
    free: Vec<usize>,
}

impl PartialAssignment {
    pub fn new(pinned: Vec<Vec<usize>>, free: Vec<usize>) -> Self {
        Self { pinned, free }
    }

    /// No pins: customers `1..=num_customers` are all free.
    pub fn unassigned(num_vehicles: usize, num_customers: usize) -> Self {
        Self {
            pinned: vec![Vec::new(); num_vehicles],
            free: (1..=num_customers).collect(),
        }
    }

    /// Pinned customers per vehicle, in route order.
    pub fn pinned(&self) -> &[Vec<usize>] {
        &self.pinned
    }

    pub fn free(&self) -> &[usize] {
        &self.free
    }
}

/// Repairs a partial assignment into a complete, capacity-feasible route set.
pub trait FeasibilityOracle {
    /// Returns a route set with one route per entry of `capacities` that
    /// keeps every pin and places every free customer, or `None` if no
    /// such completion exists.
    ///
    /// `demands` is indexed by customer ID, depot first.
    fn pack(&self, partial: &PartialAssignment, capacities: &[i32], demands: &[i32]) -> Option<RouteSet>;
}
