//! At-most-once claims on shared resources (repository roots) for one run.

use std::collections::HashSet;
use std::hash::Hash;
use std::sync::{Mutex, PoisonError};

/// Set of keys already claimed. The first caller to claim a key owns the work for it;
/// everyone else, concurrent or later, is told no. Claims are never released.
#[derive(Debug)]
pub struct ClaimSet<K> {
    claimed: Mutex<HashSet<K>>,
}

impl<K> Default for ClaimSet<K> {
    fn default() -> Self {
        Self {
            claimed: Mutex::new(HashSet::new()),
        }
    }
}

impl<K: Eq + Hash> ClaimSet<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` exactly once per distinct key. Test and insert share one lock acquisition.
    pub fn claim(&self, key: K) -> bool {
        self.claimed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key)
    }

    /// Number of distinct keys claimed so far.
    pub fn len(&self) -> usize {
        self.claimed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
