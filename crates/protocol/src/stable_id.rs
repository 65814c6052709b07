use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identity of a focusable item that survives re-renders and list changes.
///
/// Array positions shift when lists are replaced, so anything that must be
/// restored later (screen memory, the overlay trigger) refers to items by
/// `StableId`. Cloning is a refcount bump.
#[derive(Debug, Clone, Eq)]
pub struct StableId(Arc<str>);

impl StableId {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for StableId {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || *self.0 == *other.0
    }
}

impl PartialEq<str> for StableId {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for StableId {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl Ord for StableId {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for StableId {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::hash::Hash for StableId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        (*self.0).hash(state);
    }
}

impl std::ops::Deref for StableId {
    type Target = str;

    #[inline]
    fn deref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for StableId {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StableId {
    #[inline]
    fn from(s: &str) -> Self {
        StableId(Arc::from(s))
    }
}

impl From<String> for StableId {
    #[inline]
    fn from(s: String) -> Self {
        StableId(Arc::from(s))
    }
}

impl std::fmt::Display for StableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

// Hand-rolled to avoid serde's `rc` feature.
impl Serialize for StableId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for StableId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(StableId::from(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eq_str() {
        let id = StableId::from("ch-jazz");
        assert_eq!(id, "ch-jazz");
        assert_eq!(id.as_str(), "ch-jazz");
    }

    #[test]
    fn hashmap_lookup_by_str() {
        let mut map = std::collections::HashMap::new();
        map.insert(StableId::from("key"), 42);
        assert_eq!(map.get("key"), Some(&42));
    }

    #[test]
    fn deserializes_from_owned_value() {
        let value = serde_json::Value::String("cat-rock".into());
        let id: StableId = serde_json::from_value(value).unwrap_or_else(|_| StableId::from(""));
        assert_eq!(id, "cat-rock");
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&StableId::from("x")).expect("serialize id");
        assert_eq!(json, "\"x\"");
    }
}
