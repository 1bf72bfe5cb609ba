//! Run-scoped memo of solved routes.

use std::rc::Rc;

use rustc_hash::FxHashMap;

use super::RouteState;

/// Best known ordering per unordered customer set.
///
/// Owned by one top-level solve. Entries are only ever added; solving the
/// same set again returns the stored state itself.
#[derive(Debug, Default)]
pub struct RouteCache<'p> {
    solved: FxHashMap<Vec<usize>, Rc<RouteState<'p>>>,
}

impl<'p> RouteCache<'p> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the state stored for this customer set, in any order.
    pub fn get(&self, customers: &[usize]) -> Option<Rc<RouteState<'p>>> {
        self.solved.get(&key(customers)).cloned()
    }

    /// Stores `state` for its customer set and returns the shared handle.
    pub fn insert(&mut self, state: RouteState<'p>) -> Rc<RouteState<'p>> {
        let state = Rc::new(state);
        self.solved.insert(key(state.order()), Rc::clone(&state));
        state
    }

    pub fn len(&self) -> usize {
        self.solved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solved.is_empty()
    }
}

fn key(customers: &[usize]) -> Vec<usize> {
    let mut key = customers.to_vec();
    key.sort_unstable();
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Customer, ProblemInstance};

    #[test]
    fn test_lookup_ignores_order() {
        let p = ProblemInstance::new(
            vec![
                Customer::depot(0.0, 0.0),
                Customer::new(1, 1.0, 0.0, 1),
                Customer::new(2, 2.0, 0.0, 1),
            ],
            1,
            10,
        );
        let mut cache = RouteCache::new();
        assert!(cache.get(&[1, 2]).is_none());

        let stored = cache.insert(RouteState::new(&p, vec![2, 1]));
        let found = cache.get(&[1, 2]).expect("cached");
        assert!(Rc::ptr_eq(&stored, &found));
        assert_eq!(found.order(), &[2, 1]);
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&[1]).is_none());
    }
}
