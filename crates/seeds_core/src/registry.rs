//! Process-wide lookup of live seed sets by name.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::seed_set::SeedSetHandle;

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;

/// Maps set names to live seed sets.
///
/// Cloning the registry yields another view of the same map. Entries are
/// never pruned; registering a name twice replaces the earlier set.
#[derive(Debug, Clone, Default)]
pub struct SeedRegistry {
    sets: Arc<RwLock<HashMap<String, SeedSetHandle>>>,
}

impl SeedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `set` under `name`, silently replacing any earlier entry.
    pub fn register(&self, name: impl Into<String>, set: SeedSetHandle) {
        let name = name.into();
        let mut sets = self.sets.write().unwrap_or_else(PoisonError::into_inner);
        if sets.insert(name.clone(), set).is_some() {
            warn!(set = %name, "Replacing registered seed set");
        } else {
            debug!(set = %name, "Registered seed set");
        }
    }

    /// The set registered under `name`, if any.
    pub fn get(&self, name: &str) -> Option<SeedSetHandle> {
        self.sets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .sets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.sets.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Generates a short unique name for a set registered without one.
pub fn generate_set_name() -> String {
    format!("seeds-{}", &Uuid::new_v4().simple().to_string()[..10])
}
