//! Raw annotation entries attached to IR nodes.
//!
//! The scanner attaches a flat list of key/value entries to every declared
//! entity. Keys are not deduplicated at the source; projection into a map
//! is last-wins, mirroring how the entries were written down.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One `key = value` entry as scanned from the source annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationEntry {
    pub key: String,
    pub value: String,
}

/// Flat annotation list attached to an IR node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub entries: Vec<AnnotationEntry>,
}

impl Annotation {
    /// Empty annotation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an annotation from `(key, value)` pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(key, value)| AnnotationEntry {
                    key: key.into(),
                    value: value.into(),
                })
                .collect(),
        }
    }

    /// Value of the last entry with the given key, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }

    /// Projects the entries into a map; duplicate keys resolve last-wins.
    pub fn to_map(&self) -> IndexMap<String, String> {
        let mut map = IndexMap::new();
        for entry in &self.entries {
            map.insert(entry.key.clone(), entry.value.clone());
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_absent() {
        let anno = Annotation::new();
        assert_eq!(anno.get("kind"), None);
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let anno = Annotation::from_pairs([("id", "first"), ("id", "second")]);
        assert_eq!(anno.get("id"), Some("second"));
        assert_eq!(anno.to_map().get("id").map(String::as_str), Some("second"));
    }

    #[test]
    fn test_to_map_preserves_insertion_order() {
        let anno = Annotation::from_pairs([("min", "0"), ("max", "10"), ("step", "1")]);
        let keys: Vec<_> = anno.to_map().keys().cloned().collect();
        assert_eq!(keys, vec!["min", "max", "step"]);
    }
}
