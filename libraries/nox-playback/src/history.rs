//! Play history tracking
//!
//! Maintains a bounded, de-duplicated list of recently played tracks

use nox_core::{Track, TrackId};
use std::collections::VecDeque;

/// Play history with bounded size
///
/// Most recent track first. Playing a track again moves it to the front
/// instead of adding a second entry. When full, the oldest entry is dropped.
#[derive(Debug, Clone)]
pub struct History {
    /// History buffer (most recent = front)
    tracks: VecDeque<Track>,

    /// Maximum history size
    max_size: usize,
}

impl History {
    /// Create new history with specified maximum size
    pub fn new(max_size: usize) -> Self {
        Self {
            tracks: VecDeque::with_capacity(max_size.min(256)),
            max_size,
        }
    }

    /// Record a played track
    pub fn record(&mut self, track: Track) {
        self.tracks.retain(|t| t.id != track.id);
        self.tracks.push_front(track);
        self.tracks.truncate(self.max_size);
    }

    /// Most recently played track
    pub fn latest(&self) -> Option<&Track> {
        self.tracks.front()
    }

    /// All history tracks (most recent first)
    pub fn tracks(&self) -> Vec<&Track> {
        self.tracks.iter().collect()
    }

    /// Check whether a track is in the history
    pub fn contains(&self, id: &TrackId) -> bool {
        self.tracks.iter().any(|t| &t.id == id)
    }

    /// Get number of tracks in history
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if history is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    /// Get maximum history size
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Set maximum history size
    ///
    /// If new size is smaller than current, oldest entries are discarded
    pub fn set_max_size(&mut self, max_size: usize) {
        self.max_size = max_size;
        self.tracks.truncate(max_size);
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(100)
    }
}
