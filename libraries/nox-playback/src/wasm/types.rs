//! WASM-compatible type definitions

use nox_core::Track;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use wasm_bindgen::prelude::*;

/// JS-facing track
///
/// Uses JS-friendly types (`f64` seconds instead of `Duration`, camelCase
/// field names) and matches the shape the web client already builds from
/// API responses.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
#[wasm_bindgen(getter_with_clone)]
pub struct WasmTrack {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    #[serde(rename = "duration")]
    pub duration_secs: f64,
    #[serde(default, rename = "albumArt")]
    pub artwork: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
}

#[wasm_bindgen]
impl WasmTrack {
    /// Create a new track
    #[wasm_bindgen(constructor)]
    pub fn new(id: String, title: String, artist: String, album: String, duration_secs: f64) -> Self {
        Self {
            id,
            title,
            artist,
            album,
            duration_secs,
            artwork: None,
            genre: None,
            year: None,
        }
    }
}

impl From<&Track> for WasmTrack {
    fn from(track: &Track) -> Self {
        Self {
            id: track.id.to_string(),
            title: track.title.clone(),
            artist: track.artist.clone(),
            album: track.album.clone(),
            duration_secs: track.duration.as_secs_f64(),
            artwork: track.artwork.clone(),
            genre: track.genre.clone(),
            year: track.year,
        }
    }
}

impl From<WasmTrack> for Track {
    fn from(track: WasmTrack) -> Self {
        // Negative, NaN or overflowing durations from JS collapse to zero
        let duration = Duration::try_from_secs_f64(track.duration_secs).unwrap_or(Duration::ZERO);

        let mut converted = Track::new(track.id, track.title, track.artist, track.album, duration);
        converted.artwork = track.artwork;
        converted.genre = track.genre;
        converted.year = track.year;
        converted
    }
}
