//! noxtunes Core
//!
//! Platform-agnostic domain types and the in-memory library store shared by
//! the playback crate and its browser bindings.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Playlist` and their identifiers
//! - **Library**: the catalogue of known tracks, play counts and playlists
//! - **Error Handling**: `CoreError` and `Result`
//!
//! The library is deliberately unaware of any playback queue. Deleting a
//! track from the library and dequeuing it are separate operations.
//!
//! # Example
//!
//! ```rust
//! use nox_core::{Library, Track};
//! use std::time::Duration;
//!
//! let mut library = Library::new();
//! library.add_track(Track::new("1", "Intro", "Artist", "Album", Duration::from_secs(95)));
//!
//! let playlist = library.create_playlist("Favourites");
//! let intro = library.track(&"1".into()).cloned().unwrap();
//! library.add_to_playlist(&playlist, intro).unwrap();
//!
//! assert_eq!(library.playlist(&playlist).unwrap().tracks.len(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod library;
pub mod types;

pub use error::{CoreError, Result};
pub use library::Library;
pub use types::{Playlist, PlaylistId, Track, TrackId};
