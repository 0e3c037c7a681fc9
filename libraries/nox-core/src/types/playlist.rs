//! Playlist type

use super::ids::{PlaylistId, TrackId};
use super::track::Track;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User playlist
///
/// Holds full tracks so a playlist can replace the playback queue directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    /// Playlist ID (uuid v4)
    pub id: PlaylistId,
    /// Display name
    pub name: String,
    /// Tracks in playlist order; duplicates allowed
    pub tracks: Vec<Track>,
    /// When the playlist was created
    pub created_at: DateTime<Utc>,
    /// Last time tracks were added or removed
    pub updated_at: DateTime<Utc>,
}

impl Playlist {
    /// Create an empty playlist with a generated id
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: PlaylistId::generate(),
            name: name.into(),
            tracks: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a track
    pub fn push(&mut self, track: Track) {
        self.tracks.push(track);
        self.updated_at = Utc::now();
    }

    /// Remove every entry with the given id
    ///
    /// Returns the number of entries removed.
    pub fn remove(&mut self, track_id: &TrackId) -> usize {
        let before = self.tracks.len();
        self.tracks.retain(|t| &t.id != track_id);
        let removed = before - self.tracks.len();
        if removed > 0 {
            self.updated_at = Utc::now();
        }
        removed
    }
}
