//! Playback Events
//!
//! Event-based notification for the audio element and now-playing displays.
//! Events are emitted after the controller state is fully updated:
//! - Track changes (including replays under repeat)
//! - State changes (play/pause/stop)
//! - Queue replaced or edited
//! - Shuffle/repeat toggles
//! - Playback start failures

use crate::types::PlaybackStatus;
use nox_core::{Track, TrackId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Events emitted by the queue controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// A track was loaded as current
    ///
    /// Consumers must swap the audio source and restart playback even when
    /// `track_id` equals `previous_track_id` (`replay` is then true).
    TrackChanged {
        /// ID of the new (current) track
        track_id: TrackId,
        /// The new track, for now-playing displays
        track: Track,
        /// ID of the previous track (if any)
        previous_track_id: Option<TrackId>,
        /// Queue position of the new track
        index: usize,
        /// Same entry loaded again (repeat or single-entry shuffle)
        replay: bool,
    },

    /// The current track was unloaded (removed, queue cleared or replaced
    /// with nothing)
    TrackCleared {
        /// ID of the track that was current
        previous_track_id: TrackId,
    },

    /// Playback status changed
    StateChanged {
        /// The new status
        status: PlaybackStatus,
    },

    /// Queue replaced, extended or shortened
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// Shuffle or repeat toggled
    ModeChanged {
        /// Shuffle flag after the change
        shuffle: bool,
        /// Repeat flag after the change
        repeat: bool,
    },

    /// Audio output refused to start; playback is paused
    PlaybackFailed {
        /// Track that failed to start
        track_id: Option<TrackId>,
        /// Error message
        message: String,
    },
}

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Rebuild an id handed out across an FFI boundary
    pub fn from_u64(id: u64) -> Self {
        Self(id)
    }

    /// Raw value, for handing to JS
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

type Subscriber = Box<dyn FnMut(&PlaybackEvent)>;

/// Ordered list of event subscribers
#[derive(Default)]
pub(crate) struct Subscribers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Subscriber)>,
}

impl Subscribers {
    pub(crate) fn subscribe(&mut self, subscriber: Subscriber) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, subscriber));
        id
    }

    /// Returns false if the id was not subscribed
    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Deliver an event to every subscriber in subscription order
    pub(crate) fn emit(&mut self, event: &PlaybackEvent) {
        for (_, subscriber) in &mut self.entries {
            subscriber(event);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.entries.len())
            .finish()
    }
}
