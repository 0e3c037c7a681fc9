//! noxtunes - Playback Management
//!
//! Platform-agnostic playback queue and session management for noxtunes.
//!
//! This crate provides:
//! - Queue controller (advance, retreat, jump-to, remove, shuffle, repeat)
//! - Event subscribers for track, state, queue and mode changes
//! - Playback session that drives an audio output from controller state
//! - Play history (bounded, most recent first)
//! - Volume control (logarithmic, 0-100%, mute/unmute)
//! - Configuration from file and environment
//! - Browser bindings over `HTMLAudioElement` (`wasm` feature)
//!
//! # Architecture
//!
//! The controller is a plain value passed by reference; there is no global
//! store. Consumers learn about changes through subscribers. The audio
//! element sits behind the [`AudioOutput`] trait so the same session logic
//! runs in the browser and in tests.
//!
//! # Example: Queue Navigation
//!
//! ```rust
//! use nox_core::Track;
//! use nox_playback::{PlaybackConfig, QueueController};
//! use std::time::Duration;
//!
//! let config = PlaybackConfig { seed: Some(1), ..Default::default() };
//! let mut controller = QueueController::new(&config);
//!
//! controller.set_queue(vec![
//!     Track::new("a", "First", "Artist", "Album", Duration::from_secs(180)),
//!     Track::new("b", "Second", "Artist", "Album", Duration::from_secs(200)),
//! ]);
//!
//! controller.advance();
//! assert_eq!(controller.current_index(), Some(1));
//! assert_eq!(controller.current_track().unwrap().title, "Second");
//!
//! // End of queue: playback stops, position unchanged
//! controller.advance();
//! assert!(!controller.is_playing());
//! assert_eq!(controller.current_index(), Some(1));
//! ```
//!
//! # Example: Driving an Audio Output
//!
//! ```rust
//! use nox_playback::{AudioOutput, PlaybackConfig, PlaybackSession, Result};
//! use std::time::Duration;
//!
//! // Implement AudioOutput for your platform
//! struct MyAudioElement;
//!
//! impl AudioOutput for MyAudioElement {
//!     fn load(&mut self, url: &str) -> Result<()> {
//!         // Swap the element's source
//!         Ok(())
//!     }
//!
//!     fn play(&mut self) -> Result<()> {
//!         Ok(())
//!     }
//!
//!     fn pause(&mut self) {}
//!
//!     fn seek(&mut self, position: Duration) -> Result<()> {
//!         Ok(())
//!     }
//!
//!     fn set_volume(&mut self, gain: f32) {}
//! }
//!
//! let mut session = PlaybackSession::new(PlaybackConfig::default(), MyAudioElement);
//! session.subscribe(|event| println!("{event:?}"));
//! session.play(); // no-op: the queue is empty
//! ```

mod config;
mod controller;
mod error;
mod events;
mod history;
mod output;
mod queue;
mod session;
pub mod types;
mod volume;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use config::{PlaybackConfig, StreamSettings};
pub use controller::QueueController;
pub use error::{PlaybackError, Result};
pub use events::{PlaybackEvent, SubscriptionId};
pub use history::History;
pub use output::{AudioOutput, NullOutput, PendingStarts};
pub use queue::Queue;
pub use session::PlaybackSession;
pub use types::{PlaybackState, PlaybackStatus};
pub use volume::Volume;
