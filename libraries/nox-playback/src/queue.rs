//! Playback queue storage
//!
//! An ordered list of tracks. Insertion order is playback order; shuffle is
//! applied by the controller when choosing the next position, never by
//! reordering the list itself.

use nox_core::{Track, TrackId};

/// Ordered list of tracks pending playback
///
/// The same track may appear more than once. Lookups by id resolve to the
/// first occurrence; removal by id drops every occurrence.
#[derive(Debug, Clone, Default)]
pub struct Queue {
    tracks: Vec<Track>,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self { tracks: Vec::new() }
    }

    /// Replace every entry
    pub fn replace(&mut self, tracks: Vec<Track>) {
        self.tracks = tracks;
    }

    /// Append several tracks, keeping their order
    pub fn extend(&mut self, tracks: impl IntoIterator<Item = Track>) {
        self.tracks.extend(tracks);
    }

    /// Remove every entry with this id
    ///
    /// Returns the removed tracks with their positions before removal, in
    /// queue order.
    pub fn remove_all(&mut self, track_id: &TrackId) -> Vec<(usize, Track)> {
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.tracks.len());

        for (position, track) in std::mem::take(&mut self.tracks).into_iter().enumerate() {
            if &track.id == track_id {
                removed.push((position, track));
            } else {
                kept.push(track);
            }
        }

        self.tracks = kept;
        removed
    }

    /// Position of the first entry with this id
    pub fn position(&self, track_id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| &t.id == track_id)
    }

    /// Track at `index`
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// All entries in playback order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Clear entire queue
    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    /// Total number of tracks in queue
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Sum of track durations
    pub fn total_duration(&self) -> std::time::Duration {
        self.tracks.iter().map(|t| t.duration).sum()
    }
}
