//! Realm lookup.
//!
//! Realm identifiers pass through resolution untouched; the store only
//! answers whether a realm exists, backing the not-found behavior of every
//! realm-scoped route. Immutable after construction, shared via Arc.

use std::collections::HashSet;

/// Realm present in every default deployment.
pub const DEFAULT_REALM: &str = "master";

#[derive(Debug, Clone)]
pub struct RealmStore {
    names: HashSet<String>,
}

impl RealmStore {
    /// Build the store from configured realm names; an empty list seeds the
    /// default realm.
    pub fn from_names(names: &[String]) -> Self {
        let mut set: HashSet<String> = names.iter().cloned().collect();
        if set.is_empty() {
            set.insert(DEFAULT_REALM.to_string());
        }
        Self { names: set }
    }

    pub fn contains(&self, realm: &str) -> bool {
        self.names.contains(realm)
    }
}
