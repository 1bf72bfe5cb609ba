//! Termination policy and wall-clock timer.

use std::time::{Duration, Instant};

/// Monotonic stopwatch started when a search begins.
#[derive(Clone, Debug)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn elapsed_secs_as_float(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }
}

/// When a search stops: after a neighborhood distance, after a duration,
/// or at whichever of the two triggers first.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use cvrp_local_search::search::SearchLimit;
///
/// let limit = SearchLimit::both(3, Duration::from_secs(1));
/// assert!(limit.allows_distance(3));
/// assert!(!limit.allows_distance(4));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchLimit {
    max_distance: Option<usize>,
    max_duration: Option<Duration>,
}

impl SearchLimit {
    /// Bounded by neighborhood distance only.
    pub fn distance(max_distance: usize) -> Self {
        Self {
            max_distance: Some(max_distance),
            max_duration: None,
        }
    }

    /// Bounded by wall-clock duration only.
    pub fn time(max_duration: Duration) -> Self {
        Self {
            max_distance: None,
            max_duration: Some(max_duration),
        }
    }

    /// Bounded by both; the first to trigger wins.
    pub fn both(max_distance: usize, max_duration: Duration) -> Self {
        Self {
            max_distance: Some(max_distance),
            max_duration: Some(max_duration),
        }
    }

    pub fn max_distance(&self) -> Option<usize> {
        self.max_distance
    }

    pub fn max_duration(&self) -> Option<Duration> {
        self.max_duration
    }

    /// `true` if a scan at `distance` is still within the distance budget.
    pub fn allows_distance(&self, distance: usize) -> bool {
        self.max_distance.is_none_or(|max| distance <= max)
    }

    /// `true` once the time budget has been spent.
    pub fn is_expired(&self, timer: &Timer) -> bool {
        self.max_duration
            .is_some_and(|max| timer.elapsed() > max)
    }
}
