use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tunelane_protocol::Viewport;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid design tokens: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Layout and timing inputs normally read from the style-token source.
///
/// Every field falls back to its documented default when absent, so a
/// partial token file (or none at all) is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignTokens {
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Left/right padding of every lane viewport.
    pub side_padding: f64,
    pub card_width: f64,
    pub card_height: f64,
    /// Gap between cards in fixed-width lanes.
    pub fixed_gap: f64,
    /// Gap between chips in variable-width lanes.
    pub variable_gap: f64,
    /// A variable lane grows a "More" entry once its content is wider than
    /// `overflow_ratio` viewports.
    pub overflow_ratio: f64,
    pub scroll_duration_ms: u64,
    /// Delay between opening the player and moving focus into it.
    pub overlay_entry_ms: u64,
    pub overlay_exit_ms: u64,
}

impl Default for DesignTokens {
    fn default() -> Self {
        Self {
            canvas_width: 1920.0,
            canvas_height: 1080.0,
            side_padding: 100.0,
            card_width: 300.0,
            card_height: 300.0,
            fixed_gap: 24.0,
            variable_gap: 32.0,
            overflow_ratio: 2.5,
            scroll_duration_ms: 250,
            overlay_entry_ms: 300,
            overlay_exit_ms: 200,
        }
    }
}

impl DesignTokens {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Load tokens from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let tokens = Self::from_toml_str(&source)?;
        tracing::info!(path = %path.display(), "loaded design tokens");
        Ok(tokens)
    }

    /// Viewport of a full-width lane before the container is measured.
    pub fn lane_viewport(&self) -> Viewport {
        Viewport::unmeasured(self.side_padding)
    }

    pub fn scroll_duration(&self) -> Duration {
        Duration::from_millis(self.scroll_duration_ms)
    }

    pub fn overlay_entry(&self) -> Duration {
        Duration::from_millis(self.overlay_entry_ms)
    }

    pub fn overlay_exit(&self) -> Duration {
        Duration::from_millis(self.overlay_exit_ms)
    }
}
