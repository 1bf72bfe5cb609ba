//! Problem instance: customers, demands, fleet size, and capacity.

use std::path::Path;
use std::str::FromStr;

use super::Customer;
use crate::distance::DistanceMatrix;
use crate::error::{Result, SolverError};

/// An immutable capacitated VRP instance with a single depot.
///
/// Location 0 is the depot; locations `1..n` are customers. The fleet is
/// homogeneous: `num_vehicles` vehicles of identical `capacity`.
///
/// # Examples
///
/// ```
/// use cvrp_local_search::models::ProblemInstance;
///
/// let text = "4 2 4\n0 0 0\n2 1 0\n2 2 0\n2 3 0\n";
/// let problem: ProblemInstance = text.parse().unwrap();
/// assert_eq!(problem.num_customers(), 3);
/// assert_eq!(problem.num_vehicles(), 2);
/// assert_eq!(problem.capacity(), 4);
/// assert_eq!(problem.max_route_size(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ProblemInstance {
    customers: Vec<Customer>,
    demands: Vec<i32>,
    distances: DistanceMatrix,
    num_vehicles: usize,
    capacity: i32,
    max_route_size: usize,
}

impl ProblemInstance {
    /// Creates an instance from its locations (index 0 = depot).
    pub fn new(customers: Vec<Customer>, num_vehicles: usize, capacity: i32) -> Self {
        let demands: Vec<i32> = customers.iter().map(|c| c.demand()).collect();
        let distances = DistanceMatrix::from_customers(&customers);
        let max_route_size = max_route_size(&demands, capacity);
        Self {
            customers,
            demands,
            distances,
            num_vehicles,
            capacity,
            max_route_size,
        }
    }

    /// Reads and parses an instance file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        text.parse()
    }

    /// All locations, depot first.
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Number of locations including the depot.
    pub fn num_locations(&self) -> usize {
        self.customers.len()
    }

    /// Number of customers (excluding depot).
    pub fn num_customers(&self) -> usize {
        self.customers.len().saturating_sub(1)
    }

    /// Number of vehicles in the fleet.
    pub fn num_vehicles(&self) -> usize {
        self.num_vehicles
    }

    /// Capacity shared by every vehicle.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Per-location demands, depot first.
    pub fn demands(&self) -> &[i32] {
        &self.demands
    }

    /// Demand of a single location.
    pub fn demand(&self, id: usize) -> i32 {
        self.demands[id]
    }

    /// Euclidean distance between two locations.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }

    /// Precomputed distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Total demand carried on a route.
    pub fn route_demand(&self, route: &[usize]) -> i32 {
        route.iter().map(|&c| self.demands[c]).sum()
    }

    /// Upper bound on customers per vehicle: the longest run of the
    /// smallest customer demands whose sum fits within capacity.
    pub fn max_route_size(&self) -> usize {
        self.max_route_size
    }
}

fn max_route_size(demands: &[i32], capacity: i32) -> usize {
    let mut sorted: Vec<i32> = demands.iter().skip(1).copied().collect();
    sorted.sort_unstable();
    let mut load = 0;
    let mut count = 0;
    for d in sorted {
        load += d;
        if load > capacity {
            break;
        }
        count += 1;
    }
    count
}

impl FromStr for ProblemInstance {
    type Err = SolverError;

    /// Parses `numCustomers numVehicles capacity` followed by one
    /// `demand x y` record per location, depot first.
    fn from_str(s: &str) -> Result<Self> {
        let mut tokens = s.split_whitespace();

        let num_locations: usize = next_token(&mut tokens, "number of customers")?;
        let num_vehicles: usize = next_token(&mut tokens, "number of vehicles")?;
        let capacity: i32 = next_token(&mut tokens, "vehicle capacity")?;

        if num_locations == 0 {
            return Err(SolverError::Parse("instance has no depot".into()));
        }
        if num_vehicles == 0 {
            return Err(SolverError::Parse("instance has no vehicles".into()));
        }

        let mut customers = Vec::new();
        for id in 0..num_locations {
            let demand: i32 = next_token(&mut tokens, "customer demand")?;
            let x: f64 = next_token(&mut tokens, "customer x coordinate")?;
            let y: f64 = next_token(&mut tokens, "customer y coordinate")?;
            if demand < 0 {
                return Err(SolverError::Parse(format!(
                    "customer {} has negative demand {}",
                    id, demand
                )));
            }
            customers.push(Customer::new(id, x, y, demand));
        }

        if customers[0].demand() != 0 {
            return Err(SolverError::Parse("depot demand must be zero".into()));
        }

        Ok(Self::new(customers, num_vehicles, capacity))
    }
}

fn next_token<'a, T: FromStr>(
    tokens: &mut impl Iterator<Item = &'a str>,
    what: &str,
) -> Result<T> {
    let token = tokens
        .next()
        .ok_or_else(|| SolverError::Parse(format!("unexpected end of input reading {}", what)))?;
    token
        .parse()
        .map_err(|_| SolverError::Parse(format!("invalid {}: {:?}", what, token)))
}
