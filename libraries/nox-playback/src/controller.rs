//! Playback queue controller
//!
//! Owns the queue, the current position, the playback status and the
//! shuffle/repeat flags, and answers "what plays next".
//!
//! Every operation is total: out-of-range indices, unknown ids and empty
//! queues degrade to a no-op or a stopped state instead of failing.
//!
//! # Position model
//!
//! `index` is the queue position of the loaded track. When no track is
//! loaded (nothing selected yet, or the current track was removed) it is the
//! cursor that `play`, `advance` and `retreat` resume from. It is `None` only
//! for an empty queue, and always `< queue.len()` otherwise.

use crate::{
    config::PlaybackConfig,
    events::{PlaybackEvent, SubscriptionId, Subscribers},
    queue::Queue,
    types::{PlaybackState, PlaybackStatus},
};
use nox_core::{Track, TrackId};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;

/// Playback queue state machine
///
/// Generic over the random source used for shuffle so tests can inject a
/// seeded generator.
#[derive(Debug)]
pub struct QueueController<R = StdRng> {
    queue: Queue,

    /// Position of the loaded track, or the resume cursor
    index: Option<usize>,

    /// Whether the entry at `index` is loaded as the current track
    loaded: bool,

    status: PlaybackStatus,
    shuffle: bool,
    repeat: bool,

    /// Bumped on every track load, including replays
    generation: u64,

    rng: R,
    subscribers: Subscribers,
}

impl QueueController<StdRng> {
    /// Create a controller from configuration
    ///
    /// Shuffle selection is seeded from `config.seed` when set.
    pub fn new(config: &PlaybackConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl Default for QueueController<StdRng> {
    fn default() -> Self {
        Self::new(&PlaybackConfig::default())
    }
}

impl<R: Rng> QueueController<R> {
    /// Create a controller with an explicit random source
    pub fn with_rng(config: &PlaybackConfig, rng: R) -> Self {
        Self {
            queue: Queue::new(),
            index: None,
            loaded: false,
            status: PlaybackStatus::Stopped,
            shuffle: config.shuffle,
            repeat: config.repeat,
            generation: 0,
            rng,
            subscribers: Subscribers::default(),
        }
    }

    // ===== Queue Management =====

    /// Replace the queue
    ///
    /// The first entry becomes current. An empty replacement clears the
    /// current track and stops playback. Otherwise the status is kept, so a
    /// playing session moves straight on to the new first track.
    pub fn set_queue(&mut self, tracks: Vec<Track>) {
        let previous = self.current_track().map(|t| t.id.clone());

        self.queue.replace(tracks);
        self.loaded = false;
        self.emit(PlaybackEvent::QueueChanged {
            length: self.queue.len(),
        });

        if self.queue.is_empty() {
            self.index = None;
            if let Some(previous_track_id) = previous {
                self.emit(PlaybackEvent::TrackCleared { previous_track_id });
            }
            self.set_status(PlaybackStatus::Stopped);
        } else {
            self.load_with_previous(0, previous, false);
        }
    }

    /// Append a track to the end of the queue
    ///
    /// Nothing is loaded; on an empty queue the cursor moves to the new entry.
    pub fn enqueue(&mut self, track: Track) {
        self.enqueue_all(vec![track]);
    }

    /// Append several tracks to the end of the queue
    pub fn enqueue_all(&mut self, tracks: Vec<Track>) {
        if tracks.is_empty() {
            return;
        }

        self.queue.extend(tracks);
        if self.index.is_none() {
            self.index = Some(0);
        }
        self.emit(PlaybackEvent::QueueChanged {
            length: self.queue.len(),
        });
    }

    /// Remove every queue entry with this id
    ///
    /// If one of them was the current track it is unloaded and playback
    /// stops; the cursor stays on the vacated slot. The current index shifts
    /// down by the number of removed entries before it. Unknown ids are
    /// ignored.
    ///
    /// Returns the first removed entry. Only the queue is affected, never the
    /// library.
    pub fn remove(&mut self, track_id: &TrackId) -> Option<Track> {
        let removed = self.queue.remove_all(track_id);
        let (_, first) = removed.first()?;
        let first = first.clone();

        let was_current = self.loaded
            && self
                .index
                .is_some_and(|index| removed.iter().any(|(position, _)| *position == index));
        if was_current {
            self.loaded = false;
        }

        let len = self.queue.len();
        self.index = match self.index {
            _ if len == 0 => None,
            Some(index) => {
                let shift = removed.iter().filter(|(position, _)| *position < index).count();
                Some((index - shift).min(len - 1))
            }
            None => None,
        };

        debug!(track_id = %track_id, count = removed.len(), was_current, "Removed track from queue");

        self.emit(PlaybackEvent::QueueChanged { length: len });
        if was_current {
            self.emit(PlaybackEvent::TrackCleared {
                previous_track_id: track_id.clone(),
            });
        }
        if was_current || len == 0 {
            self.set_status(PlaybackStatus::Stopped);
        }

        Some(first)
    }

    /// Empty the queue and stop
    pub fn clear(&mut self) {
        let previous = self.current_track().map(|t| t.id.clone());

        self.queue.clear();
        self.index = None;
        self.loaded = false;

        self.emit(PlaybackEvent::QueueChanged { length: 0 });
        if let Some(previous_track_id) = previous {
            self.emit(PlaybackEvent::TrackCleared { previous_track_id });
        }
        self.set_status(PlaybackStatus::Stopped);
    }

    // ===== Navigation =====

    /// Move to the next track
    ///
    /// - repeat on: replay the current track
    /// - shuffle on: jump to a random entry other than the current one
    /// - otherwise: the following entry, or stop at the end of the queue
    ///
    /// With nothing loaded, the track at the cursor is loaded.
    pub fn advance(&mut self) {
        let Some(index) = self.index else {
            return;
        };

        if !self.loaded || self.repeat {
            self.load(index);
        } else if self.shuffle {
            let next = self.random_index_excluding(index);
            self.load(next);
        } else if index + 1 < self.queue.len() {
            self.load(index + 1);
        } else {
            debug!(index, "End of queue reached");
            self.set_status(PlaybackStatus::Stopped);
        }
    }

    /// Move to the previous track
    ///
    /// Shuffle picks a fresh random entry (there is no shuffle history).
    /// Repeat does not apply. At the first entry this is a no-op.
    pub fn retreat(&mut self) {
        let Some(index) = self.index else {
            return;
        };

        if !self.loaded {
            self.load(index);
        } else if self.shuffle {
            let previous = self.random_index_excluding(index);
            self.load(previous);
        } else if index > 0 {
            self.load(index - 1);
        }
    }

    /// Make the entry at `index` current
    ///
    /// Out-of-range indices are ignored.
    pub fn jump_to(&mut self, index: usize) {
        if index < self.queue.len() {
            self.load(index);
        }
    }

    /// Make the first entry with this id current and start playing
    ///
    /// Returns false if the id is not queued.
    pub fn select(&mut self, track_id: &TrackId) -> bool {
        match self.queue.position(track_id) {
            Some(index) => {
                self.load(index);
                self.set_status(PlaybackStatus::Playing);
                true
            }
            None => false,
        }
    }

    /// Media element reported the end of the current track
    pub fn track_ended(&mut self) {
        self.advance();
    }

    // ===== Playback Control =====

    /// Start or resume playback
    ///
    /// Loads the track at the cursor if nothing is loaded. No-op on an empty
    /// queue.
    pub fn play(&mut self) {
        let Some(index) = self.index else {
            return;
        };

        if !self.loaded {
            self.load(index);
        }
        self.set_status(PlaybackStatus::Playing);
    }

    /// Pause playback
    pub fn pause(&mut self) {
        if self.status == PlaybackStatus::Playing {
            self.set_status(PlaybackStatus::Paused);
        }
    }

    /// Stop playback, keeping the current track
    pub fn stop(&mut self) {
        self.set_status(PlaybackStatus::Stopped);
    }

    /// Audio output refused to start the current track
    ///
    /// Playing becomes paused and a `PlaybackFailed` event is emitted.
    pub fn playback_failed(&mut self, message: impl Into<String>) {
        let track_id = self.current_track().map(|t| t.id.clone());
        self.pause();
        self.emit(PlaybackEvent::PlaybackFailed {
            track_id,
            message: message.into(),
        });
    }

    /// Flip the shuffle flag
    pub fn toggle_shuffle(&mut self) {
        self.shuffle = !self.shuffle;
        self.emit_mode_changed();
    }

    /// Flip the repeat flag
    pub fn toggle_repeat(&mut self) {
        self.repeat = !self.repeat;
        self.emit_mode_changed();
    }

    // ===== Events =====

    /// Register a subscriber for playback events
    ///
    /// Subscribers run synchronously, in subscription order, after each
    /// state change completes.
    pub fn subscribe<F>(&mut self, subscriber: F) -> SubscriptionId
    where
        F: FnMut(&PlaybackEvent) + 'static,
    {
        self.subscribers.subscribe(Box::new(subscriber))
    }

    /// Remove a subscriber
    ///
    /// Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    // ===== State Queries =====

    /// Snapshot of the playback state
    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            current_track: self.current_track().cloned(),
            current_index: self.index,
            status: self.status,
            shuffle: self.shuffle,
            repeat: self.repeat,
        }
    }

    /// Currently loaded track
    pub fn current_track(&self) -> Option<&Track> {
        if self.loaded {
            self.index.and_then(|index| self.queue.get(index))
        } else {
            None
        }
    }

    /// Current queue position (the resume cursor when nothing is loaded)
    pub fn current_index(&self) -> Option<usize> {
        self.index
    }

    /// Playback status
    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    /// Whether audio should be running
    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }

    /// Shuffle flag
    pub fn is_shuffle(&self) -> bool {
        self.shuffle
    }

    /// Repeat flag
    pub fn is_repeat(&self) -> bool {
        self.repeat
    }

    /// Queue entries in playback order
    pub fn tracks(&self) -> &[Track] {
        self.queue.tracks()
    }

    /// Queue length
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Combined length of every queued entry
    pub fn total_duration(&self) -> std::time::Duration {
        self.queue.total_duration()
    }

    /// Whether `advance` would load a track
    pub fn has_next(&self) -> bool {
        match self.index {
            None => false,
            Some(index) => {
                !self.loaded || self.repeat || self.shuffle || index + 1 < self.queue.len()
            }
        }
    }

    /// Whether `retreat` would load a track
    pub fn has_previous(&self) -> bool {
        match self.index {
            None => false,
            Some(index) => !self.loaded || self.shuffle || index > 0,
        }
    }

    /// Track that `advance` would load
    ///
    /// `None` at the end of the queue, and under shuffle where the choice is
    /// random.
    pub fn peek_next(&self) -> Option<&Track> {
        let index = self.index?;

        if !self.loaded || self.repeat {
            self.queue.get(index)
        } else if self.shuffle {
            None
        } else {
            self.queue.get(index + 1)
        }
    }

    /// Counter bumped on every track load, including replays
    ///
    /// The audio element must swap its source whenever this changes.
    pub fn track_generation(&self) -> u64 {
        self.generation
    }

    /// Number of registered subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    // ===== Internals =====

    fn load(&mut self, index: usize) {
        let previous = self.current_track().map(|t| t.id.clone());
        let replay = self.loaded && self.index == Some(index);
        self.load_with_previous(index, previous, replay);
    }

    fn load_with_previous(&mut self, index: usize, previous: Option<TrackId>, replay: bool) {
        let Some(track) = self.queue.get(index).cloned() else {
            return;
        };
        let track_id = track.id.clone();

        self.index = Some(index);
        self.loaded = true;
        self.generation += 1;

        debug!(track_id = %track_id, index, replay, "Loaded track");

        self.emit(PlaybackEvent::TrackChanged {
            track_id,
            track,
            previous_track_id: previous,
            index,
            replay,
        });
    }

    /// Uniform pick among queue positions other than `current`
    ///
    /// A single-entry queue has no alternative and yields `current`.
    fn random_index_excluding(&mut self, current: usize) -> usize {
        let len = self.queue.len();
        if len <= 1 {
            return current;
        }

        let pick = self.rng.gen_range(0..len - 1);
        if pick >= current {
            pick + 1
        } else {
            pick
        }
    }

    fn set_status(&mut self, status: PlaybackStatus) {
        if self.status != status {
            self.status = status;
            self.emit(PlaybackEvent::StateChanged { status });
        }
    }

    fn emit_mode_changed(&mut self) {
        self.emit(PlaybackEvent::ModeChanged {
            shuffle: self.shuffle,
            repeat: self.repeat,
        });
    }

    fn emit(&mut self, event: PlaybackEvent) {
        self.subscribers.emit(&event);
    }
}
