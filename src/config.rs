//! Search configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SolverError};
use crate::search::SearchLimit;

/// Which budgets terminate a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchLimitMode {
    /// Stop once the neighborhood distance exceeds its budget.
    Distance,
    /// Stop once the wall-clock budget is spent.
    Time,
    /// Stop at whichever budget triggers first.
    Both,
}

/// Configuration parameters for the fleet and route searches.
///
/// Field names serialize in camelCase, so a JSON document such as
/// `{"vrpTimeBudget": 10.0, "searchLimitMode": "both"}` overrides the
/// corresponding defaults.
///
/// # Examples
///
/// ```
/// use cvrp_local_search::config::{SearchConfig, SearchLimitMode};
///
/// let config = SearchConfig::default()
///     .with_limit_mode(SearchLimitMode::Distance)
///     .with_vrp_distance_budget(2)
///     .with_seed(7);
/// assert_eq!(config.vrp_distance_budget, 2);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchConfig {
    /// Stop scanning a neighborhood at the first strict improvement.
    pub take_first_improvement: bool,
    /// Bias random-jump removals toward customers far from their route centroid.
    pub use_badness_heuristic: bool,
    /// Which budgets terminate both search levels.
    pub search_limit_mode: SearchLimitMode,
    /// Maximum neighborhood distance for the fleet search.
    pub vrp_distance_budget: usize,
    /// Wall-clock budget for the fleet search, in seconds.
    pub vrp_time_budget: f64,
    /// Maximum neighborhood distance for each route search.
    pub tsp_distance_budget: usize,
    /// Wall-clock budget for each route search, in seconds.
    pub tsp_time_budget: f64,
    /// Initial probability of a random walk at distance 1.
    pub random_walk_probability: f64,
    /// Multiplier applied to the walk probability after every walk.
    pub random_walk_decay_factor: f64,
    /// Upper bound on the magnitude of a random jump, as a fraction.
    pub random_jump_max_radius: f64,
    /// Also replace scanned candidates by random jumps at the walk probability.
    pub jump_candidates: bool,
    /// Seed for all random draws of a run.
    pub seed: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            take_first_improvement: true,
            use_badness_heuristic: false,
            search_limit_mode: SearchLimitMode::Both,
            vrp_distance_budget: 3,
            vrp_time_budget: 30.0,
            tsp_distance_budget: 3,
            tsp_time_budget: 1.0,
            random_walk_probability: 0.1,
            random_walk_decay_factor: 0.95,
            random_jump_max_radius: 0.6,
            jump_candidates: false,
            seed: 0,
        }
    }
}

impl SearchConfig {
    /// Parses a configuration from JSON; absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that probabilities, factors, and budgets are in range.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.random_walk_probability) {
            return Err(SolverError::Config(format!(
                "randomWalkProbability must be in [0, 1], got {}",
                self.random_walk_probability
            )));
        }
        if !(0.0..=1.0).contains(&self.random_walk_decay_factor) {
            return Err(SolverError::Config(format!(
                "randomWalkDecayFactor must be in [0, 1], got {}",
                self.random_walk_decay_factor
            )));
        }
        if !(0.0..=1.0).contains(&self.random_jump_max_radius) {
            return Err(SolverError::Config(format!(
                "randomJumpMaxRadius must be in [0, 1], got {}",
                self.random_jump_max_radius
            )));
        }
        budget("vrpTimeBudget", self.vrp_time_budget)?;
        budget("tspTimeBudget", self.tsp_time_budget)?;
        Ok(())
    }

    /// Termination policy for the fleet search.
    ///
    /// Fails with [`SolverError::Config`] if the time budget is not a
    /// representable non-negative duration.
    pub fn fleet_limit(&self) -> Result<SearchLimit> {
        let duration = budget("vrpTimeBudget", self.vrp_time_budget)?;
        Ok(self.limit(self.vrp_distance_budget, duration))
    }

    /// Termination policy for each route search.
    pub fn route_limit(&self) -> Result<SearchLimit> {
        let duration = budget("tspTimeBudget", self.tsp_time_budget)?;
        Ok(self.limit(self.tsp_distance_budget, duration))
    }

    fn limit(&self, distance: usize, duration: Duration) -> SearchLimit {
        match self.search_limit_mode {
            SearchLimitMode::Distance => SearchLimit::distance(distance),
            SearchLimitMode::Time => SearchLimit::time(duration),
            SearchLimitMode::Both => SearchLimit::both(distance, duration),
        }
    }

    /// Sets first-improvement acceptance.
    pub fn with_take_first(mut self, take_first: bool) -> Self {
        self.take_first_improvement = take_first;
        self
    }

    /// Enables or disables the badness heuristic.
    pub fn with_badness(mut self, enabled: bool) -> Self {
        self.use_badness_heuristic = enabled;
        self
    }

    /// Sets the termination mode.
    pub fn with_limit_mode(mut self, mode: SearchLimitMode) -> Self {
        self.search_limit_mode = mode;
        self
    }

    /// Sets the fleet search distance budget.
    pub fn with_vrp_distance_budget(mut self, d: usize) -> Self {
        self.vrp_distance_budget = d;
        self
    }

    /// Sets the fleet search time budget in seconds.
    pub fn with_vrp_time_budget(mut self, secs: f64) -> Self {
        self.vrp_time_budget = secs;
        self
    }

    /// Sets the route search distance budget.
    pub fn with_tsp_distance_budget(mut self, d: usize) -> Self {
        self.tsp_distance_budget = d;
        self
    }

    /// Sets the route search time budget in seconds.
    pub fn with_tsp_time_budget(mut self, secs: f64) -> Self {
        self.tsp_time_budget = secs;
        self
    }

    /// Sets the initial random walk probability.
    pub fn with_walk_probability(mut self, p: f64) -> Self {
        self.random_walk_probability = p;
        self
    }

    /// Sets the random walk decay factor.
    pub fn with_walk_decay(mut self, factor: f64) -> Self {
        self.random_walk_decay_factor = factor;
        self
    }

    /// Sets the maximum random jump radius.
    pub fn with_jump_max_radius(mut self, radius: f64) -> Self {
        self.random_jump_max_radius = radius;
        self
    }

    /// Enables random jumps on scanned candidates.
    pub fn with_jump_candidates(mut self, enabled: bool) -> Self {
        self.jump_candidates = enabled;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

fn budget(name: &str, secs: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(secs).map_err(|_| {
        SolverError::Config(format!(
            "{} must be a non-negative number of seconds, got {}",
            name, secs
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(SearchConfig::default().validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config =
            SearchConfig::from_json(r#"{"vrpTimeBudget": 5.0, "searchLimitMode": "time"}"#)
                .expect("valid json");
        assert_eq!(config.vrp_time_budget, 5.0);
        assert_eq!(config.search_limit_mode, SearchLimitMode::Time);
        assert_eq!(config.tsp_distance_budget, 3);
        assert!(config.take_first_improvement);
    }

    #[test]
    fn test_from_json_rejects_bad_probability() {
        let err = SearchConfig::from_json(r#"{"randomWalkProbability": 1.5}"#).unwrap_err();
        assert!(matches!(err, SolverError::Config(_)));
    }

    #[test]
    fn test_from_json_malformed() {
        let err = SearchConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, SolverError::Config(_)));
    }

    #[test]
    fn test_negative_budget_rejected() {
        let config = SearchConfig::default().with_tsp_time_budget(-1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversized_budget_rejected() {
        let config = SearchConfig::default().with_vrp_time_budget(1e20);
        assert!(matches!(config.validate(), Err(SolverError::Config(_))));
        assert!(config.fleet_limit().is_err());
        assert!(config.route_limit().is_ok());
    }

    #[test]
    fn test_non_finite_budget_rejected() {
        let config = SearchConfig::default().with_tsp_time_budget(f64::NAN);
        assert!(config.validate().is_err());
        assert!(config.route_limit().is_err());
    }

    #[test]
    fn test_limits_follow_mode() {
        let config = SearchConfig::default()
            .with_limit_mode(SearchLimitMode::Distance)
            .with_vrp_distance_budget(2);
        let limit = config.fleet_limit().expect("valid budget");
        assert_eq!(limit.max_distance(), Some(2));
        assert_eq!(limit.max_duration(), None);

        let config = config.with_limit_mode(SearchLimitMode::Time).with_tsp_time_budget(0.5);
        let limit = config.route_limit().expect("valid budget");
        assert_eq!(limit.max_distance(), None);
        assert_eq!(limit.max_duration(), Some(Duration::from_millis(500)));

        let limit = config
            .with_limit_mode(SearchLimitMode::Both)
            .route_limit()
            .expect("valid budget");
        assert_eq!(limit.max_distance(), Some(3));
        assert!(limit.max_duration().is_some());
    }
}
