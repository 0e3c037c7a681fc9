//! In-memory library store
//!
//! Mirrors the catalogue the client has fetched so far: known tracks, their
//! play statistics and the user's playlists. Nothing here knows about the
//! playback queue.

use crate::error::{CoreError, Result};
use crate::types::{Playlist, PlaylistId, Track, TrackId};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Track catalogue and playlists
#[derive(Debug, Clone, Default)]
pub struct Library {
    /// Tracks in insertion order
    tracks: Vec<Track>,

    /// Playlists in creation order
    playlists: Vec<Playlist>,
}

impl Library {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Tracks =====

    /// Add a track unless one with the same id is already known
    ///
    /// Returns true if the track was added.
    pub fn add_track(&mut self, track: Track) -> bool {
        if self.contains(&track.id) {
            return false;
        }
        self.tracks.push(track);
        true
    }

    /// Add every track whose id is not yet known
    ///
    /// Duplicates inside `tracks` itself are collapsed to their first
    /// occurrence. Returns the number of tracks added.
    pub fn add_tracks(&mut self, tracks: impl IntoIterator<Item = Track>) -> usize {
        let mut known: HashSet<TrackId> = self.tracks.iter().map(|t| t.id.clone()).collect();
        let before = self.tracks.len();

        for track in tracks {
            if known.insert(track.id.clone()) {
                self.tracks.push(track);
            }
        }

        self.tracks.len() - before
    }

    /// Delete a track from the library
    ///
    /// This is library deletion only; playback queues keep their own copy.
    pub fn remove_track(&mut self, id: &TrackId) -> Option<Track> {
        let position = self.tracks.iter().position(|t| &t.id == id)?;
        Some(self.tracks.remove(position))
    }

    /// Look up a track by id
    pub fn track(&self, id: &TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| &t.id == id)
    }

    /// Check whether a track id is known
    pub fn contains(&self, id: &TrackId) -> bool {
        self.tracks.iter().any(|t| &t.id == id)
    }

    /// All tracks in insertion order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if the library has no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Increment the play count and last-played time of a track
    pub fn record_play(&mut self, id: &TrackId, at: DateTime<Utc>) -> Result<()> {
        let track = self
            .tracks
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| CoreError::TrackNotFound(id.clone()))?;
        track.record_play(at);
        Ok(())
    }

    /// Most played tracks, highest count first
    ///
    /// Tracks never played are left out. Ties keep library order.
    pub fn most_played(&self, limit: usize) -> Vec<&Track> {
        let mut played: Vec<&Track> = self
            .tracks
            .iter()
            .filter(|t| t.play_count.unwrap_or(0) > 0)
            .collect();
        played.sort_by(|a, b| b.play_count.cmp(&a.play_count));
        played.truncate(limit);
        played
    }

    // ===== Playlists =====

    /// Create an empty playlist and return its id
    pub fn create_playlist(&mut self, name: impl Into<String>) -> PlaylistId {
        let playlist = Playlist::new(name);
        let id = playlist.id.clone();
        self.playlists.push(playlist);
        id
    }

    /// Append a track to a playlist
    pub fn add_to_playlist(&mut self, playlist_id: &PlaylistId, track: Track) -> Result<()> {
        self.playlist_mut(playlist_id)?.push(track);
        Ok(())
    }

    /// Remove a track from a playlist
    ///
    /// Removing a track the playlist does not contain is not an error.
    pub fn remove_from_playlist(
        &mut self,
        playlist_id: &PlaylistId,
        track_id: &TrackId,
    ) -> Result<()> {
        self.playlist_mut(playlist_id)?.remove(track_id);
        Ok(())
    }

    /// Delete a playlist
    pub fn delete_playlist(&mut self, playlist_id: &PlaylistId) -> Result<Playlist> {
        let position = self
            .playlists
            .iter()
            .position(|p| &p.id == playlist_id)
            .ok_or_else(|| CoreError::PlaylistNotFound(playlist_id.clone()))?;
        Ok(self.playlists.remove(position))
    }

    /// Look up a playlist
    pub fn playlist(&self, playlist_id: &PlaylistId) -> Option<&Playlist> {
        self.playlists.iter().find(|p| &p.id == playlist_id)
    }

    /// All playlists in creation order
    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    fn playlist_mut(&mut self, playlist_id: &PlaylistId) -> Result<&mut Playlist> {
        self.playlists
            .iter_mut()
            .find(|p| &p.id == playlist_id)
            .ok_or_else(|| CoreError::PlaylistNotFound(playlist_id.clone()))
    }
}
