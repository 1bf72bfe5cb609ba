//! Variable-neighborhood descent with randomized escape.
//!
//! # Algorithm
//!
//! Starting from the initial state with neighborhood distance `d = 1`:
//!
//! 1. At `d = 1`, with probability `p`, replace the current state by a
//!    random jump (accepted even if worse) and decay `p`.
//! 2. Otherwise scan the valid neighbors at distance `d`. Every candidate
//!    competes for the incumbent; the best strict improvement over the
//!    current state (or the first, in take-first mode) becomes current
//!    and `d` resets to 1. Without an improvement `d` grows by one.
//!
//! The search ends when `d` passes the distance budget, the time budget is
//! spent, or a distance yields no neighbors at all.

use rand::Rng;
use tracing::{debug, trace};

use super::{Neighborhood, SearchLimit, SearchState, Timer};
use crate::config::SearchConfig;

/// Generic local search engine, shared by the route and fleet levels.
///
/// # Examples
///
/// ```
/// use cvrp_local_search::config::SearchConfig;
/// use cvrp_local_search::search::LocalSearch;
///
/// let engine = LocalSearch::new(&SearchConfig::default()).with_take_first(false);
/// assert!(!engine.take_first());
/// ```
#[derive(Debug, Clone)]
pub struct LocalSearch {
    take_first: bool,
    walk_probability: f64,
    walk_decay: f64,
    max_jump_radius: f64,
    jump_candidates: bool,
}

impl Default for LocalSearch {
    fn default() -> Self {
        Self::new(&SearchConfig::default())
    }
}

/// Budgets and walk state shared by every scan of one search.
struct Run<'a> {
    limit: &'a SearchLimit,
    timer: Timer,
    walk_probability: f64,
}

/// Outcome of scanning one neighborhood.
enum Scan<S> {
    Improved(S),
    Exhausted,
    Empty,
    Expired,
}

impl LocalSearch {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            take_first: config.take_first_improvement,
            walk_probability: config.random_walk_probability,
            walk_decay: config.random_walk_decay_factor,
            max_jump_radius: config.random_jump_max_radius,
            jump_candidates: config.jump_candidates,
        }
    }

    pub fn with_take_first(mut self, take_first: bool) -> Self {
        self.take_first = take_first;
        self
    }

    pub fn with_walk_probability(mut self, p: f64) -> Self {
        self.walk_probability = p;
        self
    }

    pub fn with_jump_candidates(mut self, enabled: bool) -> Self {
        self.jump_candidates = enabled;
        self
    }

    pub fn take_first(&self) -> bool {
        self.take_first
    }

    /// Runs the search from `initial` and returns the best state seen.
    ///
    /// With a distance budget of 0 the initial state is returned as is.
    pub fn search<S: SearchState, R: Rng>(&self, initial: S, limit: &SearchLimit, rng: &mut R) -> S {
        let mut run = Run {
            limit,
            timer: Timer::start(),
            walk_probability: self.walk_probability,
        };
        let mut best = initial.clone();
        let mut current = initial;
        let mut distance = 1;

        while limit.allows_distance(distance) && !limit.is_expired(&run.timer) {
            if distance == 1 && rng.random::<f64>() < run.walk_probability {
                let radius = rng.random::<f64>() * self.max_jump_radius;
                run.walk_probability *= self.walk_decay;
                match current.random_jump(radius, rng) {
                    Ok(jumped) => {
                        trace!(radius, "random walk");
                        current = jumped;
                    }
                    Err(err) => debug!(radius, %err, "random walk not taken"),
                }
                continue;
            }

            match self.scan(&current, distance, &mut best, &run, rng) {
                Scan::Improved(next) => {
                    trace!(distance, value = next.value(), "moved to improving neighbor");
                    current = next;
                    distance = 1;
                }
                Scan::Exhausted => distance += 1,
                Scan::Empty | Scan::Expired => break,
            }
        }

        debug!(
            value = best.value(),
            elapsed = run.timer.elapsed_secs_as_float(),
            "local search finished"
        );
        best
    }

    fn scan<S: SearchState, R: Rng>(
        &self,
        current: &S,
        distance: usize,
        best: &mut S,
        run: &Run<'_>,
        rng: &mut R,
    ) -> Scan<S> {
        let baseline = current.value();
        let mut improvement: Option<S> = None;
        let mut produced = 0usize;

        for candidate in Neighborhood::new(current, distance) {
            produced += 1;
            if run.limit.is_expired(&run.timer) {
                return Scan::Expired;
            }
            if !candidate.is_valid() {
                continue;
            }

            let candidate = if self.jump_candidates && rng.random::<f64>() < run.walk_probability {
                let radius = rng.random::<f64>() * self.max_jump_radius;
                match candidate.random_jump(radius, rng) {
                    Ok(jumped) => jumped,
                    Err(_) => candidate,
                }
            } else {
                candidate
            };

            let target = improvement.as_ref().map_or(baseline, |s| s.value());
            let hint = target.max(best.value());
            if candidate.value_bounded(hint) >= hint {
                continue;
            }

            let value = candidate.value();
            if value < best.value() {
                *best = candidate.clone();
            }
            if value < target {
                improvement = Some(candidate);
                if self.take_first {
                    break;
                }
            }
        }

        match improvement {
            Some(next) => Scan::Improved(next),
            None if produced == 0 => Scan::Empty,
            None => Scan::Exhausted,
        }
    }
}
