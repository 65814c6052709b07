//! Per-screen interaction memory for the running session.
//!
//! Records are created lazily on first write, merged field by field, and
//! never evicted. A field replaced with a nested object replaces it
//! wholesale.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tunelane_protocol::StableId;

/// Well-known field names.
pub mod fields {
    pub const ACTIVE_FILTER_ID: &str = "activeFilterId";
    pub const LAST_FOCUSED_GROUP_INDEX: &str = "lastFocusedGroupIndex";
    pub const LAST_FOCUSED_ITEM_INDICES: &str = "lastFocusedItemIndices";
    pub const SWIMLANE_POSITION: &str = "swimlanePosition";
}

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("encoding field `{field}`: {source}")]
    Encode {
        field: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("decoding field `{field}` of `{screen}`: {source}")]
    Decode {
        screen: String,
        field: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A remembered lane position, keyed by item identity rather than index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPosition {
    pub stable_id: StableId,
    #[serde(default)]
    pub offset_px: f64,
}

impl ItemPosition {
    pub fn new(stable_id: impl Into<StableId>, offset_px: f64) -> Self {
        Self {
            stable_id: stable_id.into(),
            offset_px,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScreenMemory {
    records: HashMap<String, Map<String, Value>>,
}

impl ScreenMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_field(&mut self, screen: &str, field: &str, value: Value) {
        self.records
            .entry(screen.to_owned())
            .or_default()
            .insert(field.to_owned(), value);
    }

    pub fn get_field(&self, screen: &str, field: &str) -> Option<&Value> {
        self.records.get(screen)?.get(field)
    }

    pub fn has_record(&self, screen: &str) -> bool {
        self.records.contains_key(screen)
    }

    /// Serialize `value` into `field`.
    pub fn set<T: Serialize>(
        &mut self,
        screen: &str,
        field: &str,
        value: &T,
    ) -> Result<(), MemoryError> {
        let value = serde_json::to_value(value).map_err(|source| MemoryError::Encode {
            field: field.to_owned(),
            source,
        })?;
        self.set_field(screen, field, value);
        Ok(())
    }

    /// Decode `field`, or `Ok(None)` when it was never written.
    pub fn try_get<T: DeserializeOwned>(
        &self,
        screen: &str,
        field: &str,
    ) -> Result<Option<T>, MemoryError> {
        let Some(value) = self.get_field(screen, field) else {
            return Ok(None);
        };
        T::deserialize(value)
            .map(Some)
            .map_err(|source| MemoryError::Decode {
                screen: screen.to_owned(),
                field: field.to_owned(),
                source,
            })
    }

    /// Like [`try_get`](Self::try_get), but a value of the wrong shape reads
    /// as absent.
    pub fn get<T: DeserializeOwned>(&self, screen: &str, field: &str) -> Option<T> {
        match self.try_get(screen, field) {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!(%err, "ignoring unreadable screen memory");
                None
            }
        }
    }

    /// Read a lane position. A bare id string, as older records stored it,
    /// reads as that id at offset zero. The stored value is left as is.
    pub fn item_position(&self, screen: &str, field: &str) -> Option<ItemPosition> {
        match self.get_field(screen, field)? {
            Value::String(id) => {
                tracing::trace!(screen, field, "coercing bare id to item position");
                Some(ItemPosition::new(id.as_str(), 0.0))
            }
            _ => self.get(screen, field),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_json::json;

    use super::*;

    #[test]
    fn fields_merge_without_touching_siblings() {
        let mut memory = ScreenMemory::new();
        memory.set_field("home", fields::LAST_FOCUSED_GROUP_INDEX, json!(2));
        memory.set_field("home", fields::ACTIVE_FILTER_ID, json!("rock"));
        memory.set_field("home", fields::LAST_FOCUSED_GROUP_INDEX, json!(1));
        assert_eq!(
            memory.get_field("home", fields::LAST_FOCUSED_GROUP_INDEX),
            Some(&json!(1))
        );
        assert_eq!(
            memory.get_field("home", fields::ACTIVE_FILTER_ID),
            Some(&json!("rock"))
        );
    }

    #[test]
    fn nested_objects_are_replaced_wholesale() {
        let mut memory = ScreenMemory::new();
        memory.set_field("home", "indices", json!({"1": 4, "2": 9}));
        memory.set_field("home", "indices", json!({"2": 3}));
        assert_eq!(memory.get_field("home", "indices"), Some(&json!({"2": 3})));
    }

    #[test]
    fn unknown_screen_or_field_is_absent() {
        let mut memory = ScreenMemory::new();
        assert!(!memory.has_record("search"));
        assert_eq!(memory.get_field("search", "x"), None);
        memory.set_field("search", "x", json!(true));
        assert!(memory.has_record("search"));
        assert_eq!(memory.get_field("search", "y"), None);
    }

    #[test]
    fn typed_accessors_round_trip() {
        let mut memory = ScreenMemory::new();
        let indices: BTreeMap<usize, usize> = [(1, 4), (2, 9)].into();
        memory
            .set("home", fields::LAST_FOCUSED_ITEM_INDICES, &indices)
            .expect("store indices");
        let back: Option<BTreeMap<usize, usize>> =
            memory.get("home", fields::LAST_FOCUSED_ITEM_INDICES);
        assert_eq!(back, Some(indices));
    }

    #[test]
    fn wrong_shape_is_a_decode_error() {
        let mut memory = ScreenMemory::new();
        memory.set_field("home", "n", json!("not a number"));
        assert!(matches!(
            memory.try_get::<usize>("home", "n"),
            Err(MemoryError::Decode { .. })
        ));
        assert_eq!(memory.get::<usize>("home", "n"), None);
    }

    #[test]
    fn legacy_bare_id_coerces_on_read_only() {
        let mut memory = ScreenMemory::new();
        memory.set_field("home", fields::SWIMLANE_POSITION, json!("ch-7"));
        for _ in 0..2 {
            assert_eq!(
                memory.item_position("home", fields::SWIMLANE_POSITION),
                Some(ItemPosition::new("ch-7", 0.0))
            );
        }
        assert_eq!(
            memory.get_field("home", fields::SWIMLANE_POSITION),
            Some(&json!("ch-7"))
        );
    }

    #[test]
    fn structured_position_reads_back() {
        let mut memory = ScreenMemory::new();
        let pos = ItemPosition::new("ch-2", 648.0);
        memory
            .set("home", fields::SWIMLANE_POSITION, &pos)
            .expect("store position");
        assert_eq!(
            memory.get_field("home", fields::SWIMLANE_POSITION),
            Some(&json!({"stableId": "ch-2", "offsetPx": 648.0}))
        );
        assert_eq!(
            memory.item_position("home", fields::SWIMLANE_POSITION),
            Some(pos)
        );
    }
}
