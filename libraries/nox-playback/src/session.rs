//! Playback session - controller plus audio output
//!
//! Forwards every queue operation to the controller, then brings the audio
//! output in line with the new state:
//! - a new track generation swaps the source and records history
//! - `Playing` starts the output, anything else pauses it
//! - a refused start is logged, reported to the controller and leaves the
//!   session paused

use crate::{
    config::PlaybackConfig,
    controller::QueueController,
    events::{PlaybackEvent, SubscriptionId},
    history::History,
    output::AudioOutput,
    types::{PlaybackState, PlaybackStatus},
    volume::Volume,
};
use nox_core::{Track, TrackId};
use rand::{rngs::StdRng, Rng};
use std::time::Duration;
use tracing::{debug, warn};

/// Queue controller bound to an audio output
#[derive(Debug)]
pub struct PlaybackSession<O, R = StdRng> {
    controller: QueueController<R>,
    output: O,
    config: PlaybackConfig,
    history: History,
    volume: Volume,

    /// Track generation the output source was last loaded for
    synced_generation: u64,

    /// Whether the output was told to play and has not been paused since
    output_playing: bool,
}

impl<O: AudioOutput> PlaybackSession<O, StdRng> {
    /// Create a session with a controller built from `config`
    pub fn new(config: PlaybackConfig, output: O) -> Self {
        let controller = QueueController::new(&config);
        Self::with_controller(config, controller, output)
    }
}

impl<O: AudioOutput, R: Rng> PlaybackSession<O, R> {
    /// Create a session around an existing controller
    pub fn with_controller(config: PlaybackConfig, controller: QueueController<R>, mut output: O) -> Self {
        let volume = Volume::new(config.volume);
        output.set_volume(volume.gain());

        // Generation 0 means nothing was ever loaded; anything newer is
        // loaded by the first sync
        let mut session = Self {
            synced_generation: 0,
            controller,
            output,
            history: History::new(config.history_size),
            volume,
            config,
            output_playing: false,
        };
        session.sync_output();
        session
    }

    // ===== Queue Management =====

    /// Replace the queue (e.g. the user picked a playlist)
    pub fn set_queue(&mut self, tracks: Vec<Track>) {
        self.controller.set_queue(tracks);
        self.sync_output();
    }

    /// Append a track
    pub fn enqueue(&mut self, track: Track) {
        self.controller.enqueue(track);
        self.sync_output();
    }

    /// Append several tracks
    pub fn enqueue_all(&mut self, tracks: Vec<Track>) {
        self.controller.enqueue_all(tracks);
        self.sync_output();
    }

    /// Remove a track from the queue
    pub fn remove(&mut self, track_id: &TrackId) -> Option<Track> {
        let removed = self.controller.remove(track_id);
        self.sync_output();
        removed
    }

    /// Empty the queue
    pub fn clear(&mut self) {
        self.controller.clear();
        self.sync_output();
    }

    // ===== Navigation =====

    /// Skip to the next track
    pub fn advance(&mut self) {
        self.controller.advance();
        self.sync_output();
    }

    /// Go back to the previous track
    pub fn retreat(&mut self) {
        self.controller.retreat();
        self.sync_output();
    }

    /// Make the entry at `index` current
    pub fn jump_to(&mut self, index: usize) {
        self.controller.jump_to(index);
        self.sync_output();
    }

    /// Play a queued track by id
    pub fn select(&mut self, track_id: &TrackId) -> bool {
        let found = self.controller.select(track_id);
        self.sync_output();
        found
    }

    /// Output reported the end of the current track
    pub fn track_ended(&mut self) {
        self.output_playing = false;
        self.controller.track_ended();
        self.sync_output();
    }

    // ===== Playback Control =====

    /// Start or resume playback
    pub fn play(&mut self) {
        self.controller.play();
        self.sync_output();
    }

    /// Pause playback
    pub fn pause(&mut self) {
        self.controller.pause();
        self.sync_output();
    }

    /// Stop playback and rewind the current track
    pub fn stop(&mut self) {
        self.controller.stop();
        self.sync_output();
        if let Err(err) = self.output.rewind() {
            debug!(error = %err, "Rewind after stop failed");
        }
    }

    /// Toggle shuffle
    pub fn toggle_shuffle(&mut self) {
        self.controller.toggle_shuffle();
    }

    /// Toggle repeat
    pub fn toggle_repeat(&mut self) {
        self.controller.toggle_repeat();
    }

    /// The output failed asynchronously (e.g. a rejected start promise)
    pub fn report_playback_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!(message = %message, "Audio output reported a playback error");
        self.output_playing = false;
        self.controller.playback_failed(message);
        self.sync_output();
    }

    /// Seek within the current track
    ///
    /// The position is clamped to the track duration. Returns false when no
    /// track is loaded or the output refused.
    pub fn seek(&mut self, position: Duration) -> bool {
        let Some(track) = self.controller.current_track() else {
            return false;
        };
        let position = position.min(track.duration);

        match self.output.seek(position) {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, ?position, "Seek failed");
                false
            }
        }
    }

    // ===== Volume Control =====

    /// Set volume (0-100)
    pub fn set_volume(&mut self, level: u8) {
        self.volume.set_level(level);
        self.output.set_volume(self.volume.gain());
    }

    /// Mute audio
    pub fn mute(&mut self) {
        self.volume.mute();
        self.output.set_volume(self.volume.gain());
    }

    /// Unmute audio
    pub fn unmute(&mut self) {
        self.volume.unmute();
        self.output.set_volume(self.volume.gain());
    }

    /// Toggle mute
    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.output.set_volume(self.volume.gain());
    }

    // ===== Events =====

    /// Register a subscriber for playback events
    pub fn subscribe<F>(&mut self, subscriber: F) -> SubscriptionId
    where
        F: FnMut(&PlaybackEvent) + 'static,
    {
        self.controller.subscribe(subscriber)
    }

    /// Remove a subscriber
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.controller.unsubscribe(id)
    }

    // ===== State Queries =====

    /// Snapshot of the playback state
    pub fn state(&self) -> PlaybackState {
        self.controller.state()
    }

    /// Playback status
    pub fn status(&self) -> PlaybackStatus {
        self.controller.status()
    }

    /// The underlying controller
    pub fn controller(&self) -> &QueueController<R> {
        &self.controller
    }

    /// Play history, most recent first
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Volume state
    pub fn volume(&self) -> &Volume {
        &self.volume
    }

    /// Active configuration
    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// The audio output
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Mutable access to the audio output
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    // ===== Output Synchronisation =====

    fn sync_output(&mut self) {
        let generation = self.controller.track_generation();
        if generation != self.synced_generation {
            self.synced_generation = generation;
            if !self.load_current() {
                return;
            }
        }

        if self.controller.is_playing() {
            if !self.output_playing {
                self.start_output();
            }
        } else if self.output_playing {
            self.output.pause();
            self.output_playing = false;
        }
    }

    /// Swap the output source to the current track
    ///
    /// Returns false if the swap failed and playback was paused.
    fn load_current(&mut self) -> bool {
        let Some(track) = self.controller.current_track().cloned() else {
            return true;
        };

        self.output_playing = false;
        self.history.record(track.clone());

        let loaded = self
            .config
            .stream_url(&track.id)
            .and_then(|url| {
                debug!(track_id = %track.id, url = %url, "Loading audio source");
                self.output.load(&url)
            });

        match loaded {
            Ok(()) => true,
            Err(err) => {
                warn!(track_id = %track.id, error = %err, "Failed to load audio source");
                self.controller.playback_failed(err.to_string());
                false
            }
        }
    }

    fn start_output(&mut self) {
        match self.output.play() {
            Ok(()) => self.output_playing = true,
            Err(err) => {
                let track_id = self.controller.current_track().map(|t| t.id.to_string());
                warn!(track_id = ?track_id, error = %err, "Playback start failed");
                self.controller.playback_failed(err.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::NullOutput;

    fn create_test_track(id: &str) -> Track {
        Track::new(id, format!("Track {id}"), "Test Artist", "Test Album", Duration::from_secs(120))
    }

    #[test]
    fn history_records_each_load() {
        let mut session = PlaybackSession::new(PlaybackConfig::default(), NullOutput);
        session.set_queue(vec![create_test_track("a"), create_test_track("b")]);
        session.play();
        session.advance();

        let ids: Vec<&str> = session.history().tracks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn seek_without_track_is_refused() {
        let mut session = PlaybackSession::new(PlaybackConfig::default(), NullOutput);
        assert!(!session.seek(Duration::from_secs(10)));
    }

    #[test]
    fn initial_volume_comes_from_config() {
        let config = PlaybackConfig {
            volume: 40,
            ..Default::default()
        };
        let session = PlaybackSession::new(config, NullOutput);
        assert_eq!(session.volume().level(), 40);
    }
}
