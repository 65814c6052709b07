use serde::{Deserialize, Serialize};

use crate::stable_id::StableId;

/// A tag attached to a card.
///
/// Source data carries tags either as bare strings or as `{id, label}`
/// objects. Both shapes deserialize into this enum, so consumers never look
/// at the raw form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tag {
    PlainLabel(String),
    LabeledTag { id: String, label: String },
}

impl Tag {
    pub fn label(&self) -> &str {
        match self {
            Tag::PlainLabel(label) | Tag::LabeledTag { label, .. } => label,
        }
    }

    /// Identifier for filtering; plain labels are their own id.
    pub fn id(&self) -> &str {
        match self {
            Tag::PlainLabel(label) => label,
            Tag::LabeledTag { id, .. } => id,
        }
    }
}

/// Anything that can sit in a swimlane or button row.
///
/// The focus engine only relies on `id`; the rest is display data passed
/// through to renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusableItem {
    pub id: StableId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

impl FocusableItem {
    pub fn new(id: impl Into<StableId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            subtitle: None,
            tags: Vec::new(),
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = tags;
        self
    }

    pub fn has_tag(&self, id: &str) -> bool {
        self.tags.iter().any(|t| t.id() == id)
    }
}
