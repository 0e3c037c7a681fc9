//! WASM-compatible PlaybackSession wrapper

use super::output::HtmlAudioOutput;
use super::types::WasmTrack;
use crate::{PlaybackConfig, PlaybackError, PlaybackSession, PlaybackStatus, SubscriptionId};
use js_sys::Function;
use nox_core::{Track, TrackId};
use std::time::Duration;
use wasm_bindgen::prelude::*;
use web_sys::HtmlAudioElement;

/// Browser player
///
/// Owns the queue controller and an `HTMLAudioElement`. Wire the element's
/// `ended` event to [`WasmPlayer::track_ended`] and register an event
/// callback with [`WasmPlayer::on_event`].
#[wasm_bindgen]
pub struct WasmPlayer {
    inner: PlaybackSession<HtmlAudioOutput>,
}

#[wasm_bindgen]
impl WasmPlayer {
    /// Create a player streaming from `base_url`
    ///
    /// `seed` fixes the shuffle order (useful for demos and tests).
    #[wasm_bindgen(constructor)]
    pub fn new(base_url: Option<String>, seed: Option<u32>) -> Result<WasmPlayer, JsValue> {
        console_error_panic_hook::set_once();

        let mut config = PlaybackConfig {
            seed: seed.map(u64::from),
            ..Default::default()
        };
        if let Some(base_url) = base_url {
            config.stream.base_url = base_url;
        }
        config.validate().map_err(to_js_error)?;

        let output = HtmlAudioOutput::new()?;
        Ok(Self {
            inner: PlaybackSession::new(config, output),
        })
    }

    // ===== Queue Management =====

    /// Replace the queue with an array of tracks
    #[wasm_bindgen(js_name = setQueue)]
    pub fn set_queue(&mut self, tracks: JsValue) -> Result<(), JsValue> {
        self.collect_rejection();
        let tracks: Vec<WasmTrack> = serde_wasm_bindgen::from_value(tracks)?;
        self.inner.set_queue(tracks.into_iter().map(Track::from).collect());
        Ok(())
    }

    /// Append a track to the queue
    pub fn enqueue(&mut self, track: WasmTrack) {
        self.collect_rejection();
        self.inner.enqueue(track.into());
    }

    /// Remove every queue entry with this id
    pub fn remove(&mut self, track_id: String) -> bool {
        self.collect_rejection();
        self.inner.remove(&TrackId::new(track_id)).is_some()
    }

    /// Empty the queue
    #[wasm_bindgen(js_name = clearQueue)]
    pub fn clear_queue(&mut self) {
        self.collect_rejection();
        self.inner.clear();
    }

    /// Play a queued track by id
    pub fn select(&mut self, track_id: String) -> bool {
        self.collect_rejection();
        self.inner.select(&TrackId::new(track_id))
    }

    /// Make the entry at `index` current
    #[wasm_bindgen(js_name = jumpTo)]
    pub fn jump_to(&mut self, index: usize) {
        self.collect_rejection();
        self.inner.jump_to(index);
    }

    // ===== Playback Control =====

    /// Skip to next track
    pub fn next(&mut self) {
        self.collect_rejection();
        self.inner.advance();
    }

    /// Go to previous track
    pub fn previous(&mut self) {
        self.collect_rejection();
        self.inner.retreat();
    }

    /// Start or resume playback
    pub fn play(&mut self) {
        self.collect_rejection();
        self.inner.play();
    }

    /// Pause playback
    pub fn pause(&mut self) {
        self.collect_rejection();
        self.inner.pause();
    }

    /// Stop playback
    pub fn stop(&mut self) {
        self.collect_rejection();
        self.inner.stop();
    }

    /// Handler for the audio element's `ended` event
    #[wasm_bindgen(js_name = trackEnded)]
    pub fn track_ended(&mut self) {
        self.collect_rejection();
        self.inner.track_ended();
    }

    /// Handler for the audio element's `error` event
    #[wasm_bindgen(js_name = reportPlaybackError)]
    pub fn report_playback_error(&mut self, message: String) {
        self.inner.report_playback_error(message);
    }

    /// Pick up a rejected `play()` promise
    ///
    /// Called automatically before every other operation; call it from a
    /// timer or `pause` listener to surface rejections sooner.
    #[wasm_bindgen(js_name = checkPlayback)]
    pub fn check_playback(&mut self) {
        self.collect_rejection();
    }

    #[wasm_bindgen(js_name = toggleShuffle)]
    pub fn toggle_shuffle(&mut self) {
        self.inner.toggle_shuffle();
    }

    #[wasm_bindgen(js_name = toggleRepeat)]
    pub fn toggle_repeat(&mut self) {
        self.inner.toggle_repeat();
    }

    // ===== Volume and Seeking =====

    /// Set volume (0-100)
    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&mut self, level: u8) {
        self.inner.set_volume(level);
    }

    /// Get current volume (0-100)
    #[wasm_bindgen(js_name = getVolume)]
    pub fn get_volume(&self) -> u8 {
        self.inner.volume().level()
    }

    #[wasm_bindgen(js_name = toggleMute)]
    pub fn toggle_mute(&mut self) {
        self.inner.toggle_mute();
    }

    #[wasm_bindgen(js_name = isMuted)]
    pub fn is_muted(&self) -> bool {
        self.inner.volume().is_muted()
    }

    /// Seek to position in seconds
    #[wasm_bindgen(js_name = seekTo)]
    pub fn seek_to(&mut self, position_secs: f64) -> bool {
        let position = Duration::try_from_secs_f64(position_secs).unwrap_or(Duration::ZERO);
        self.inner.seek(position)
    }

    // ===== Events =====

    /// Register a callback receiving every playback event
    ///
    /// Events are plain objects tagged by variant name, e.g.
    /// `{ TrackChanged: { track_id, track, previous_track_id, index, replay } }`.
    /// Callbacks run on a microtask after the triggering call has returned,
    /// so they may query the player (`currentTrack()`, `getQueue()`).
    /// Returns an id for [`WasmPlayer::off_event`].
    #[wasm_bindgen(js_name = onEvent)]
    pub fn on_event(&mut self, callback: Function) -> u64 {
        let id = self.inner.subscribe(move |event| {
            let value = match serde_wasm_bindgen::to_value(event) {
                Ok(value) => value,
                Err(err) => {
                    web_sys::console::error_2(&"Failed to serialize playback event:".into(), &err.into());
                    return;
                }
            };
            queue_microtask(&callback.bind1(&JsValue::NULL, &value));
        });
        id.as_u64()
    }

    /// Remove an event callback
    #[wasm_bindgen(js_name = offEvent)]
    pub fn off_event(&mut self, id: u64) -> bool {
        self.inner.unsubscribe(SubscriptionId::from_u64(id))
    }

    // ===== State Queries =====

    #[wasm_bindgen(js_name = currentTrack)]
    pub fn current_track(&self) -> Option<WasmTrack> {
        self.inner.controller().current_track().map(WasmTrack::from)
    }

    #[wasm_bindgen(js_name = currentIndex)]
    pub fn current_index(&self) -> Option<usize> {
        self.inner.controller().current_index()
    }

    /// "stopped", "playing" or "paused"
    pub fn status(&self) -> String {
        self.inner.status().as_str().to_string()
    }

    #[wasm_bindgen(js_name = isPlaying)]
    pub fn is_playing(&self) -> bool {
        self.inner.status() == PlaybackStatus::Playing
    }

    #[wasm_bindgen(js_name = isShuffle)]
    pub fn is_shuffle(&self) -> bool {
        self.inner.controller().is_shuffle()
    }

    #[wasm_bindgen(js_name = isRepeat)]
    pub fn is_repeat(&self) -> bool {
        self.inner.controller().is_repeat()
    }

    #[wasm_bindgen(js_name = queueLength)]
    pub fn queue_length(&self) -> usize {
        self.inner.controller().len()
    }

    /// Combined length of the queue in seconds
    #[wasm_bindgen(js_name = queueDuration)]
    pub fn queue_duration(&self) -> f64 {
        self.inner.controller().total_duration().as_secs_f64()
    }

    /// Queue contents as an array of tracks
    #[wasm_bindgen(js_name = getQueue)]
    pub fn get_queue(&self) -> Result<JsValue, JsValue> {
        let tracks: Vec<WasmTrack> = self.inner.controller().tracks().iter().map(WasmTrack::from).collect();
        Ok(serde_wasm_bindgen::to_value(&tracks)?)
    }

    /// Recently played tracks, most recent first
    #[wasm_bindgen(js_name = getHistory)]
    pub fn get_history(&self) -> Result<JsValue, JsValue> {
        let tracks: Vec<WasmTrack> = self.inner.history().tracks().into_iter().map(WasmTrack::from).collect();
        Ok(serde_wasm_bindgen::to_value(&tracks)?)
    }

    /// The audio element, for attaching listeners or inserting into the page
    pub fn element(&self) -> HtmlAudioElement {
        self.inner.output().element().clone()
    }
}

impl WasmPlayer {
    fn collect_rejection(&mut self) {
        if let Some(message) = self.inner.output().take_rejection() {
            self.inner.report_playback_error(message);
        }
    }
}

#[wasm_bindgen]
extern "C" {
    /// Runs `callback` once the current JS call stack has unwound
    #[wasm_bindgen(js_name = queueMicrotask)]
    fn queue_microtask(callback: &Function);
}

fn to_js_error(err: PlaybackError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
