//! Item sources for the screens.
//!
//! The focus engine only needs lists of items with stable ids. Fixture data
//! is validated once at ingestion: ids must be unique within each list.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tunelane_protocol::{FocusableItem, StableId, Tag};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate id `{id}` in {list}")]
    DuplicateId { list: String, id: StableId },
}

pub trait Catalog {
    /// Genre rows on the home screen. Each category id doubles as a filter id.
    fn categories(&self) -> Vec<FocusableItem>;

    fn channels(&self) -> Vec<FocusableItem>;

    fn filters(&self) -> Vec<FocusableItem>;

    /// Channels tagged with `filter`, or every channel for `None`.
    fn results(&self, filter: Option<&StableId>) -> Vec<FocusableItem>;

    fn channel(&self, id: &StableId) -> Option<FocusableItem>;

    fn tracks(&self, channel: &StableId) -> Vec<FocusableItem>;
}

/// Catalog backed by in-memory fixture lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticCatalog {
    #[serde(default)]
    categories: Vec<FocusableItem>,
    #[serde(default)]
    channels: Vec<FocusableItem>,
    #[serde(default)]
    filters: Vec<FocusableItem>,
    #[serde(default)]
    tracks: HashMap<StableId, Vec<FocusableItem>>,
}

impl StaticCatalog {
    pub fn from_json(source: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(source)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let source = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json(&source)?;
        tracing::info!(
            path = %path.display(),
            channels = catalog.channels.len(),
            filters = catalog.filters.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        check_unique("categories", &self.categories)?;
        check_unique("channels", &self.channels)?;
        check_unique("filters", &self.filters)?;
        for (channel, tracks) in &self.tracks {
            check_unique(&format!("tracks of {channel}"), tracks)?;
        }
        Ok(())
    }

    /// Built-in fixture: a dozen genres, enough channels to scroll and a
    /// filter row wide enough to grow a "More" entry.
    pub fn demo() -> Self {
        const GENRES: [(&str, &str); 14] = [
            ("ambient", "Ambient"),
            ("blues", "Blues"),
            ("classical", "Classical"),
            ("country", "Country"),
            ("electronic", "Electronic"),
            ("folk", "Folk"),
            ("hip-hop", "Hip-Hop"),
            ("jazz", "Jazz"),
            ("latin", "Latin"),
            ("metal", "Metal"),
            ("pop", "Pop"),
            ("reggae", "Reggae"),
            ("rock", "Rock"),
            ("soul", "Soul & Funk"),
        ];
        const CHANNELS: [&str; 18] = [
            "Morning Drift",
            "Late Night Lounge",
            "Highway Radio",
            "Deep Focus",
            "Vinyl Cafe",
            "Stadium Anthems",
            "Sunday Strings",
            "Bass Station",
            "Campfire Sessions",
            "Neon Nights",
            "Island Time",
            "Golden Oldies",
            "Fresh Finds",
            "Slow Burn",
            "Heavy Rotation",
            "Street Corner",
            "Festival Stage",
            "After Hours",
        ];

        let filters: Vec<FocusableItem> = GENRES
            .iter()
            .map(|(id, label)| FocusableItem::new(*id, *label))
            .collect();
        let categories = filters.iter().take(8).cloned().collect();

        let mut channels = Vec::with_capacity(CHANNELS.len());
        let mut tracks = HashMap::new();
        for (i, title) in CHANNELS.iter().enumerate() {
            let id = StableId::from(format!("ch-{}", i + 1));
            let (g1, l1) = GENRES[i % GENRES.len()];
            let (g2, l2) = GENRES[(i * 5 + 3) % GENRES.len()];
            let tags = vec![
                Tag::LabeledTag {
                    id: g1.into(),
                    label: l1.into(),
                },
                Tag::LabeledTag {
                    id: g2.into(),
                    label: l2.into(),
                },
            ];
            channels.push(
                FocusableItem::new(id.clone(), *title)
                    .with_subtitle(format!("{l1} · {l2}"))
                    .with_tags(tags),
            );
            let list = (1..=10 + i % 6)
                .map(|n| {
                    FocusableItem::new(format!("{id}-t{n}"), format!("Track {n}"))
                        .with_subtitle(*title)
                })
                .collect();
            tracks.insert(id, list);
        }

        Self {
            categories,
            channels,
            filters,
            tracks,
        }
    }
}

fn check_unique(list: &str, items: &[FocusableItem]) -> Result<(), CatalogError> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(&item.id) {
            return Err(CatalogError::DuplicateId {
                list: list.to_owned(),
                id: item.id.clone(),
            });
        }
    }
    Ok(())
}

impl Catalog for StaticCatalog {
    fn categories(&self) -> Vec<FocusableItem> {
        self.categories.clone()
    }

    fn channels(&self) -> Vec<FocusableItem> {
        self.channels.clone()
    }

    fn filters(&self) -> Vec<FocusableItem> {
        self.filters.clone()
    }

    fn results(&self, filter: Option<&StableId>) -> Vec<FocusableItem> {
        match filter {
            Some(filter) => self
                .channels
                .iter()
                .filter(|c| c.has_tag(filter))
                .cloned()
                .collect(),
            None => self.channels.clone(),
        }
    }

    fn channel(&self, id: &StableId) -> Option<FocusableItem> {
        self.channels.iter().find(|c| &c.id == id).cloned()
    }

    fn tracks(&self, channel: &StableId) -> Vec<FocusableItem> {
        self.tracks.get(channel).cloned().unwrap_or_default()
    }
}
