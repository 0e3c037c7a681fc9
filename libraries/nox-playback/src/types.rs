//! Core types for playback management

use nox_core::Track;
use serde::{Deserialize, Serialize};

/// Playback status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackStatus {
    /// Nothing playing; the current track (if any) starts from the beginning
    #[default]
    Stopped,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,
}

impl PlaybackStatus {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Playing => "playing",
            Self::Paused => "paused",
        }
    }
}

impl std::fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Snapshot of the controller's playback state
///
/// `current_index` is the queue position of `current_track` when one is
/// loaded. With no current track it is the position playback resumes from,
/// and it is `None` only for an empty queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Track associated with the audio session
    pub current_track: Option<Track>,

    /// Position in the queue
    pub current_index: Option<usize>,

    /// Playing, paused or stopped
    pub status: PlaybackStatus,

    /// Shuffle flag
    pub shuffle: bool,

    /// Repeat flag (repeat current track)
    pub repeat: bool,
}

impl PlaybackState {
    /// Whether audio should be running
    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }
}
