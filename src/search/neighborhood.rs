//! Neighbors at a given composition distance.

use super::SearchState;

/// Lazy depth-first enumeration of the states reachable from a root by
/// applying the elementary move exactly `depth` times.
///
/// Keeps one live neighbor iterator per level, so abandoning the
/// enumeration never materializes the remaining candidates. Intermediate
/// states are not validity checked; callers filter the yielded ones.
pub struct Neighborhood<S: SearchState> {
    root: Option<S>,
    stack: Vec<S::Neighbors>,
    depth: usize,
}

impl<S: SearchState> Neighborhood<S> {
    pub fn new(state: &S, depth: usize) -> Self {
        if depth == 0 {
            return Self {
                root: Some(state.clone()),
                stack: Vec::new(),
                depth,
            };
        }
        Self {
            root: None,
            stack: vec![state.neighbors()],
            depth,
        }
    }
}

impl<S: SearchState> Iterator for Neighborhood<S> {
    type Item = S;

    fn next(&mut self) -> Option<S> {
        if let Some(root) = self.root.take() {
            return Some(root);
        }
        loop {
            let level = self.stack.len();
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(state) if level == self.depth => return Some(state),
                Some(state) => self.stack.push(state.neighbors()),
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use rand::Rng;

    /// Binary strings grown one bit per move, up to length 3.
    #[derive(Clone, Debug, PartialEq)]
    struct Bits(String);

    impl SearchState for Bits {
        type Neighbors = std::vec::IntoIter<Bits>;

        fn value(&self) -> f64 {
            self.0.len() as f64
        }

        fn neighbors(&self) -> Self::Neighbors {
            if self.0.len() >= 3 {
                return Vec::new().into_iter();
            }
            vec![Bits(format!("{}0", self.0)), Bits(format!("{}1", self.0))].into_iter()
        }

        fn is_valid(&self) -> bool {
            true
        }

        fn random_jump<R: Rng>(&self, _fraction: f64, _rng: &mut R) -> Result<Self> {
            Ok(self.clone())
        }
    }

    fn collect(depth: usize) -> Vec<String> {
        Neighborhood::new(&Bits(String::new()), depth)
            .map(|b| b.0)
            .collect()
    }

    #[test]
    fn test_depth_zero_yields_root() {
        assert_eq!(collect(0), vec![String::new()]);
    }

    #[test]
    fn test_depth_one() {
        assert_eq!(collect(1), vec!["0", "1"]);
    }

    #[test]
    fn test_depth_two_is_depth_first() {
        assert_eq!(collect(2), vec!["00", "01", "10", "11"]);
    }

    #[test]
    fn test_beyond_leaves_is_empty() {
        assert_eq!(collect(3).len(), 8);
        assert!(collect(4).is_empty());
    }

    #[test]
    fn test_abandon_midstream() {
        let mut it = Neighborhood::new(&Bits(String::new()), 3);
        assert_eq!(it.next().map(|b| b.0), Some("000".to_string()));
        drop(it);
    }
}
