//! Keyed-state combinator: one reducer, many cache slices
//!
//! Lifts a reducer over a single slice `S` into a reducer over a map of
//! slices keyed by [`CacheKey`]. Routing reads the key off the action, so
//! a family's reducer never needs to know which slice it serves.

use std::collections::HashMap;

use crate::action::KeyedAction;
use crate::params::CacheKey;
use crate::store::Reducer;

/// A map of independent cache slices, one per cache key.
///
/// Keys appear when the first action addressed to them arrives and are
/// never removed. Absent key and present-but-empty slice are distinct
/// states, and callers can rely on the difference.
#[derive(Clone, Debug)]
pub struct ByIdState<S> {
    slices: HashMap<CacheKey, S>,
}

impl<S> Default for ByIdState<S> {
    fn default() -> Self {
        Self {
            slices: HashMap::new(),
        }
    }
}

impl<S> ByIdState<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slice for a key, if any action ever addressed it
    pub fn get(&self, key: &CacheKey) -> Option<&S> {
        self.slices.get(key)
    }

    /// Whether the key has a slice
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.slices.contains_key(key)
    }

    /// Number of keys seen so far
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Iterate over all keys with a slice
    pub fn keys(&self) -> impl Iterator<Item = &CacheKey> {
        self.slices.keys()
    }
}

/// Lifts a slice reducer into a reducer over [`ByIdState`].
///
/// The slice for the action's key is created from `S::default()` on first
/// contact, then the inner reducer runs exactly once against it. Actions
/// for other state never reach this combinator; the application-level
/// `match` routes only matching variants here.
pub struct ById<S, A: KeyedAction> {
    inner: Reducer<S, A>,
}

impl<S: Default, A: KeyedAction> ById<S, A> {
    /// Wrap a slice reducer
    pub fn new(inner: Reducer<S, A>) -> Self {
        Self { inner }
    }

    /// Route the action to its slice and run the inner reducer
    pub fn reduce(&self, state: &mut ByIdState<S>, action: A) -> bool {
        let slice = state
            .slices
            .entry(action.cache_key().clone())
            .or_default();
        (self.inner)(slice, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Action;

    #[derive(Clone, Debug)]
    struct Append {
        key: CacheKey,
        value: i32,
    }

    impl Action for Append {
        fn name(&self) -> &'static str {
            "Append"
        }
    }

    impl KeyedAction for Append {
        fn cache_key(&self) -> &CacheKey {
            &self.key
        }
    }

    fn append_reducer(slice: &mut Vec<i32>, action: Append) -> bool {
        slice.push(action.value);
        true
    }

    #[test]
    fn routes_to_slice_by_key() {
        let by_id = ById::new(append_reducer);
        let mut state = ByIdState::<Vec<i32>>::new();

        by_id.reduce(
            &mut state,
            Append {
                key: CacheKey::new("a"),
                value: 1,
            },
        );
        by_id.reduce(
            &mut state,
            Append {
                key: CacheKey::new("b"),
                value: 2,
            },
        );
        by_id.reduce(
            &mut state,
            Append {
                key: CacheKey::new("a"),
                value: 3,
            },
        );

        assert_eq!(state.get(&CacheKey::new("a")), Some(&vec![1, 3]));
        assert_eq!(state.get(&CacheKey::new("b")), Some(&vec![2]));
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn unseen_key_starts_from_default() {
        let by_id = ById::new(append_reducer);
        let mut state = ByIdState::<Vec<i32>>::new();

        assert!(!state.contains(&CacheKey::new("x")));
        by_id.reduce(
            &mut state,
            Append {
                key: CacheKey::new("x"),
                value: 9,
            },
        );
        assert_eq!(state.get(&CacheKey::new("x")), Some(&vec![9]));
    }

    #[test]
    fn keys_are_never_removed() {
        let by_id = ById::new(append_reducer);
        let mut state = ByIdState::<Vec<i32>>::new();

        by_id.reduce(
            &mut state,
            Append {
                key: CacheKey::new("a"),
                value: 1,
            },
        );
        // Nothing in the API removes a key once a slice exists.
        assert!(state.contains(&CacheKey::new("a")));
        assert_eq!(state.keys().count(), 1);
    }
}
