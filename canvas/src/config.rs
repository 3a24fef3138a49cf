//! Editor configuration supplied by the host page as JSON.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::assets;
use crate::doc::IconKind;

pub const DEFAULT_BACKGROUND: &str = "#111111";

/// Error returned by [`EditorConfig::from_json`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid editor config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Host-provided editor settings. Every field is optional in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Site base URL; icon assets resolve beneath it.
    pub base_url: String,
    /// Draw the safe-zone guide on screen.
    pub show_safe_zone: bool,
    /// CSS colour filled behind the source image.
    pub background: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self { base_url: String::new(), show_safe_zone: true, background: DEFAULT_BACKGROUND.to_owned() }
    }
}

impl EditorConfig {
    /// Parse host JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed input.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(raw)?;
        config.base_url = config.base_url.trim_end_matches('/').to_owned();
        Ok(config)
    }

    /// Absolute URL of an icon's image asset.
    #[must_use]
    pub fn icon_url(&self, kind: IconKind) -> String {
        assets::icon_url(&self.base_url, kind)
    }
}
