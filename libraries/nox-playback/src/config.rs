//! Playback configuration
//!
//! Loaded from an optional TOML file and `NOX_`-prefixed environment
//! variables, e.g. `NOX_SHUFFLE=true` or `NOX_STREAM__BASE_URL=https://music.example`.

use crate::error::{PlaybackError, Result};
use nox_core::TrackId;
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Configuration for the queue controller and playback session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Initial shuffle flag (default: false)
    #[serde(default)]
    pub shuffle: bool,

    /// Initial repeat flag (default: false)
    #[serde(default)]
    pub repeat: bool,

    /// Initial volume (0-100, default: 80)
    #[serde(default = "default_volume")]
    pub volume: u8,

    /// Maximum play history size (default: 100)
    #[serde(default = "default_history_size")]
    pub history_size: usize,

    /// Seed for shuffle selection; entropy when unset
    #[serde(default)]
    pub seed: Option<u64>,

    /// Audio streaming endpoint
    #[serde(default)]
    pub stream: StreamSettings,
}

/// Where the audio element fetches track audio from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamSettings {
    /// Base URL of the library API
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            shuffle: false,
            repeat: false,
            volume: default_volume(),
            history_size: default_history_size(),
            seed: None,
            stream: StreamSettings::default(),
        }
    }
}

impl PlaybackConfig {
    /// Load configuration from an optional file and the environment
    ///
    /// A missing file is not an error; defaults and environment apply.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            if path.exists() {
                settings = settings.add_source(config::File::from(path));
            }
        }

        // Override with environment variables (prefixed with NOX_)
        settings = settings.add_source(
            config::Environment::with_prefix("NOX")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.volume > 100 {
            return Err(PlaybackError::Config(format!(
                "volume must be 0-100, got {}",
                self.volume
            )));
        }

        if self.history_size == 0 {
            return Err(PlaybackError::Config(
                "history_size must be at least 1".to_string(),
            ));
        }

        let base = Url::parse(&self.stream.base_url)?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(PlaybackError::Config(format!(
                "stream base URL must be http(s), got {}",
                base.scheme()
            )));
        }

        Ok(())
    }

    /// Audio URL for a track: `{base_url}/tracks/{id}/audio`
    pub fn stream_url(&self, track_id: &TrackId) -> Result<String> {
        let mut url = Url::parse(&self.stream.base_url)?;
        url.path_segments_mut()
            .map_err(|()| {
                PlaybackError::Config(format!(
                    "stream base URL cannot have a path: {}",
                    self.stream.base_url
                ))
            })?
            .pop_if_empty()
            .extend(&["tracks", track_id.as_str(), "audio"]);
        Ok(url.into())
    }
}

// Default values
fn default_volume() -> u8 {
    80
}

fn default_history_size() -> usize {
    100
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}
