//! Badness scores for biased perturbation.

use crate::models::ProblemInstance;

/// Per-customer badness, indexed by customer ID (the depot scores 0).
///
/// A customer's raw score is its distance to the centroid of the route it
/// rides on. Scores are scaled so they sum to the number of routed
/// customers, i.e. average 1. When every raw score is 0 (all routes are
/// single points) the result is all zeros.
pub fn badness(problem: &ProblemInstance, routes: &[Vec<usize>]) -> Vec<f64> {
    let customers = problem.customers();
    let mut scores = vec![0.0; problem.num_locations()];
    let mut routed = 0usize;

    for route in routes.iter().filter(|r| !r.is_empty()) {
        let len = route.len() as f64;
        let cx = route.iter().map(|&c| customers[c].x()).sum::<f64>() / len;
        let cy = route.iter().map(|&c| customers[c].y()).sum::<f64>() / len;
        for &c in route {
            scores[c] = customers[c].distance_to_point(cx, cy);
        }
        routed += route.len();
    }

    let total: f64 = scores.iter().sum();
    if total > 0.0 {
        let scale = routed as f64 / total;
        for score in &mut scores {
            *score *= scale;
        }
    }
    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Customer;

    fn problem() -> ProblemInstance {
        ProblemInstance::new(
            vec![
                Customer::depot(0.0, 0.0),
                Customer::new(1, 0.0, 0.0, 1),
                Customer::new(2, 2.0, 0.0, 1),
                Customer::new(3, 10.0, 10.0, 1),
                Customer::new(4, 1.0, 3.0, 1),
            ],
            2,
            10,
        )
    }

    #[test]
    fn test_scores_average_one() {
        let p = problem();
        let scores = badness(&p, &[vec![1, 2, 4], vec![3]]);
        assert_eq!(scores[0], 0.0);
        let sum: f64 = scores.iter().sum();
        assert!((sum - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_outlier_scores_highest() {
        let p = problem();
        // Centroid of 1, 2, 4 is (1, 1): distances sqrt(2), sqrt(2), 2.
        let scores = badness(&p, &[vec![1, 2, 4], vec![3]]);
        assert!(scores[4] > scores[1]);
        assert!((scores[1] - scores[2]).abs() < 1e-10);
        assert_eq!(scores[3], 0.0);
    }

    #[test]
    fn test_singleton_routes_score_zero() {
        let p = problem();
        let scores = badness(&p, &[vec![1], vec![3], vec![]]);
        assert!(scores.iter().all(|&s| s == 0.0));
    }
}
