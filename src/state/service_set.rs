use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;

/// Deduplicated service names in first-seen order
///
/// Names are trimmed before insertion; after that, deduplication is exact and
/// case sensitive ("LASIK" and "Lasik" are two entries). Empty names are
/// ignored. Serializes as a plain JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceSet {
    items: Vec<String>,
    seen: HashSet<String>,
}

impl ServiceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a name; returns true if it was not already present
    pub fn insert(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.seen.contains(name) {
            return false;
        }
        self.seen.insert(name.to_string());
        self.items.push(name.to_string());
        true
    }

    /// Adds every name of `other` not already present, keeping its order
    pub fn union(&mut self, other: &ServiceSet) -> usize {
        other.iter().filter(|name| self.insert(name)).count()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name.trim())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<String> {
        self.items
    }
}

impl<S: AsRef<str>> FromIterator<S> for ServiceSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = ServiceSet::new();
        for name in iter {
            set.insert(name.as_ref());
        }
        set
    }
}

impl<S: AsRef<str>> Extend<S> for ServiceSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for name in iter {
            self.insert(name.as_ref());
        }
    }
}

impl Serialize for ServiceSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ServiceSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<String>::deserialize(deserializer)?;
        Ok(items.into_iter().collect())
    }
}
