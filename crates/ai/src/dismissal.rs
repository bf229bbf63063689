//! Session-scoped set of suggestions the user chose to hide.
//!
//! The set is a value: every change produces a new set and leaves the old one
//! untouched, so a computation holding a clone never sees a half-applied update.
//! Persisting it across sessions is up to the caller.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::suggestion::DismissalKey;

#[derive(Debug, Clone, Default)]
pub struct DismissedSuggestions {
    keys: Arc<HashSet<DismissalKey>>,
}

impl DismissedSuggestions {
    pub fn new() -> Self {
        Self::default()
    }

    /// New set with every prior entry plus `key`.
    pub fn dismiss(&self, key: DismissalKey) -> Self {
        if self.keys.contains(&key) {
            return self.clone();
        }
        let mut keys = (*self.keys).clone();
        keys.insert(key);
        Self { keys: Arc::new(keys) }
    }

    /// New set without `key`.
    pub fn undismiss(&self, key: &DismissalKey) -> Self {
        if !self.keys.contains(key) {
            return self.clone();
        }
        let mut keys = (*self.keys).clone();
        keys.remove(key);
        Self { keys: Arc::new(keys) }
    }

    pub fn contains(&self, key: &DismissalKey) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DismissalKey> {
        self.keys.iter()
    }
}

/// Free-function form of [`DismissedSuggestions::dismiss`].
pub fn dismiss(key: DismissalKey, current: &DismissedSuggestions) -> DismissedSuggestions {
    current.dismiss(key)
}

impl PartialEq for DismissedSuggestions {
    fn eq(&self, other: &Self) -> bool {
        self.keys == other.keys
    }
}

impl Eq for DismissedSuggestions {}

impl FromIterator<DismissalKey> for DismissedSuggestions {
    fn from_iter<I: IntoIterator<Item = DismissalKey>>(iter: I) -> Self {
        Self {
            keys: Arc::new(iter.into_iter().collect()),
        }
    }
}

impl Serialize for DismissedSuggestions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Sorted for stable output.
        let mut keys: Vec<&DismissalKey> = self.keys.iter().collect();
        keys.sort();
        keys.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DismissedSuggestions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let keys = Vec::<DismissalKey>::deserialize(deserializer)?;
        Ok(keys.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dismiss_leaves_previous_set_untouched() {
        let empty = DismissedSuggestions::new();
        let key = DismissalKey::new("p1", "w2", "w1");

        let one = dismiss(key.clone(), &empty);
        assert!(empty.is_empty());
        assert!(one.contains(&key));
        assert_eq!(one.len(), 1);
    }

    #[test]
    fn dismiss_is_idempotent() {
        let key = DismissalKey::new("p1", "w2", "w1");
        let once = DismissedSuggestions::new().dismiss(key.clone());
        let twice = once.dismiss(key);
        assert_eq!(once, twice);
        assert_eq!(twice.len(), 1);
    }

    #[test]
    fn undismiss_removes_only_that_key() {
        let a = DismissalKey::new("p1", "w2", "w1");
        let b = DismissalKey::new("p2", "w2", "w1");
        let set: DismissedSuggestions = [a.clone(), b.clone()].into_iter().collect();

        let after = set.undismiss(&a);
        assert!(!after.contains(&a));
        assert!(after.contains(&b));
        assert!(set.contains(&a));
    }

    #[test]
    fn serde_uses_a_sorted_key_list() {
        let set: DismissedSuggestions = [
            DismissalKey::new("p2", "w1", "w2"),
            DismissalKey::new("p1", "w1", "w2"),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json[0]["product_id"], "p1");
        assert_eq!(json[1]["product_id"], "p2");

        let back: DismissedSuggestions = serde_json::from_value(json).unwrap();
        assert_eq!(back, set);
    }
}
