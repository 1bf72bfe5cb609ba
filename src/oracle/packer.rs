//! Backtracking bin packing oracle.
//!
//! # Algorithm
//!
//! Pinned customers fix each vehicle's starting load. Free customers are
//! placed in decreasing demand order, trying vehicles in index order and
//! backtracking on dead ends. Vehicles with equal remaining capacity are
//! interchangeable, so only the first of them is tried at each step.
//!
//! The search is complete up to `node_limit` placements; past that the
//! instance is reported infeasible.

use tracing::debug;

use super::{FeasibilityOracle, PartialAssignment};
use crate::models::RouteSet;

/// Reference [`FeasibilityOracle`] based on bounded backtracking.
///
/// # Examples
///
/// ```
/// use cvrp_local_search::oracle::{BinPacker, FeasibilityOracle, PartialAssignment};
///
/// let demands = [0, 3, 3, 2, 2];
/// let partial = PartialAssignment::unassigned(2, 4);
/// let routes = BinPacker::default().pack(&partial, &[5, 5], &demands).unwrap();
/// for route in routes.routes() {
///     assert_eq!(route.iter().map(|&c| demands[c]).sum::<i32>(), 5);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct BinPacker {
    node_limit: usize,
}

impl Default for BinPacker {
    fn default() -> Self {
        Self { node_limit: 200_000 }
    }
}

impl BinPacker {
    /// Sets the maximum number of placements tried before giving up.
    pub fn with_node_limit(mut self, node_limit: usize) -> Self {
        self.node_limit = node_limit;
        self
    }
}

struct Packing<'a> {
    items: Vec<usize>,
    demands: &'a [i32],
    remaining: Vec<i32>,
    placed: Vec<usize>,
    nodes: usize,
    node_limit: usize,
}

impl Packing<'_> {
    /// Places `items[idx..]`. Returns `false` on a dead end or when the
    /// node budget runs out.
    fn place(&mut self, idx: usize, free_left: i32) -> bool {
        if idx == self.items.len() {
            return true;
        }
        let capacity_left: i32 = self.remaining.iter().sum();
        if free_left > capacity_left {
            return false;
        }

        let customer = self.items[idx];
        let demand = self.demands[customer];
        let mut tried: Vec<i32> = Vec::new();

        for v in 0..self.remaining.len() {
            let room = self.remaining[v];
            if room < demand || tried.contains(&room) {
                continue;
            }
            tried.push(room);

            self.nodes += 1;
            if self.nodes > self.node_limit {
                return false;
            }

            self.remaining[v] -= demand;
            self.placed[idx] = v;
            if self.place(idx + 1, free_left - demand) {
                return true;
            }
            self.remaining[v] += demand;
        }
        false
    }
}

impl FeasibilityOracle for BinPacker {
    fn pack(&self, partial: &PartialAssignment, capacities: &[i32], demands: &[i32]) -> Option<RouteSet> {
        if partial.pinned().len() > capacities.len() {
            return None;
        }

        let mut routes: Vec<Vec<usize>> = vec![Vec::new(); capacities.len()];
        let mut remaining = capacities.to_vec();
        for (v, pins) in partial.pinned().iter().enumerate() {
            let load: i32 = pins.iter().map(|&c| demands[c]).sum();
            if load > remaining[v] {
                return None;
            }
            remaining[v] -= load;
            routes[v] = pins.clone();
        }

        let mut items = partial.free().to_vec();
        // stable: equal demands keep their given order
        items.sort_by_key(|&c| std::cmp::Reverse(demands[c]));
        let free_load: i32 = items.iter().map(|&c| demands[c]).sum();

        let mut packing = Packing {
            placed: vec![0; items.len()],
            items,
            demands,
            remaining,
            nodes: 0,
            node_limit: self.node_limit,
        };

        if !packing.place(0, free_load) {
            debug!(
                free = packing.items.len(),
                nodes = packing.nodes,
                "no feasible packing found"
            );
            return None;
        }

        for (idx, &customer) in packing.items.iter().enumerate() {
            routes[packing.placed[idx]].push(customer);
        }
        Some(RouteSet::new(routes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(route: &[usize], demands: &[i32]) -> i32 {
        route.iter().map(|&c| demands[c]).sum()
    }

    #[test]
    fn test_pack_from_scratch() {
        let demands = [0, 2, 2, 2];
        let partial = PartialAssignment::unassigned(2, 3);
        let rs = BinPacker::default()
            .pack(&partial, &[4, 4], &demands)
            .expect("feasible");
        assert_eq!(rs.num_routes(), 2);
        assert_eq!(rs.num_served(), 3);
        for route in rs.routes() {
            assert!(load(route, &demands) <= 4);
        }
    }

    #[test]
    fn test_pins_are_kept_in_order() {
        let demands = [0, 1, 1, 1, 1];
        let partial = PartialAssignment::new(vec![vec![3, 1], vec![]], vec![2, 4]);
        let rs = BinPacker::default()
            .pack(&partial, &[3, 3], &demands)
            .expect("feasible");
        assert_eq!(&rs.routes()[0][..2], &[3, 1]);
        assert_eq!(rs.num_served(), 4);
    }

    #[test]
    fn test_requires_backtracking() {
        // Packing both 4s together leaves 2 + 6 for four 3s; only 4+3+3
        // on each vehicle works.
        let demands = [0, 4, 4, 3, 3, 3, 3];
        let partial = PartialAssignment::unassigned(2, 6);
        let rs = BinPacker::default()
            .pack(&partial, &[10, 10], &demands)
            .expect("4+3+3 twice");
        for route in rs.routes() {
            assert_eq!(load(route, &demands), 10);
        }
    }

    #[test]
    fn test_infeasible_total_demand() {
        let demands = [0, 3, 3, 3];
        let partial = PartialAssignment::unassigned(2, 3);
        assert!(BinPacker::default().pack(&partial, &[4, 4], &demands).is_none());
    }

    #[test]
    fn test_infeasible_pin_overload() {
        let demands = [0, 3, 3];
        let partial = PartialAssignment::new(vec![vec![1, 2], vec![]], vec![]);
        assert!(BinPacker::default().pack(&partial, &[5, 5], &demands).is_none());
    }

    #[test]
    fn test_node_limit_gives_up() {
        let demands = [0, 4, 4, 3, 3, 3, 3];
        let partial = PartialAssignment::unassigned(2, 6);
        let packer = BinPacker::default().with_node_limit(1);
        assert!(packer.pack(&partial, &[10, 10], &demands).is_none());
    }

    #[test]
    fn test_too_many_pinned_routes() {
        let partial = PartialAssignment::new(vec![vec![], vec![], vec![]], vec![]);
        assert!(BinPacker::default().pack(&partial, &[1, 1], &[0]).is_none());
    }
}
