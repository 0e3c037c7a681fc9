//! `HTMLAudioElement` audio output

use crate::error::{PlaybackError, Result};
use crate::output::{AudioOutput, PendingStarts};
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{DomException, HtmlAudioElement};

/// Audio output backed by the browser's native media element
///
/// `play()` returns a promise that the browser may reject later (autoplay
/// policy, unsupported source). Rejections for the current source are logged
/// to the console and kept; the owner collects them with
/// [`HtmlAudioOutput::take_rejection`] and reports them to the session.
/// Rejections from a replaced source, and `AbortError`s, are dropped.
pub struct HtmlAudioOutput {
    element: HtmlAudioElement,
    pending: PendingStarts,
}

impl HtmlAudioOutput {
    /// Create a detached audio element
    pub fn new() -> std::result::Result<Self, JsValue> {
        Ok(Self::from_element(HtmlAudioElement::new()?))
    }

    /// Wrap an element already in the page
    pub fn from_element(element: HtmlAudioElement) -> Self {
        Self {
            element,
            pending: PendingStarts::new(),
        }
    }

    /// The underlying element, for attaching `ended`/`timeupdate` listeners
    pub fn element(&self) -> &HtmlAudioElement {
        &self.element
    }

    /// Take the most recent asynchronous start failure, if any
    pub fn take_rejection(&self) -> Option<String> {
        self.pending.take()
    }
}

impl AudioOutput for HtmlAudioOutput {
    fn load(&mut self, url: &str) -> Result<()> {
        self.pending.source_changed();
        self.element.set_src(url);
        self.element.load();
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        let promise = self.element.play().map_err(js_error)?;

        let pending = self.pending.clone();
        let epoch = pending.epoch();
        let on_rejected = Closure::once(move |reason: JsValue| {
            let (kind, message) = describe_rejection(&reason);
            if pending.reject(epoch, &kind, message) {
                web_sys::console::warn_2(&"Playback start rejected:".into(), &reason);
            }
        });
        let _ = promise.catch(&on_rejected);
        // The closure must outlive this call; it runs at most once
        on_rejected.forget();

        Ok(())
    }

    fn pause(&mut self) {
        if let Err(err) = self.element.pause() {
            web_sys::console::warn_2(&"Pause failed:".into(), &err);
        }
    }

    fn seek(&mut self, position: Duration) -> Result<()> {
        self.element.set_current_time(position.as_secs_f64());
        Ok(())
    }

    fn set_volume(&mut self, gain: f32) {
        self.element.set_volume(f64::from(gain.clamp(0.0, 1.0)));
    }
}

/// Error name and message of a rejection reason
fn describe_rejection(reason: &JsValue) -> (String, String) {
    match reason.dyn_ref::<DomException>() {
        Some(exception) => (exception.name(), format!("{}: {}", exception.name(), exception.message())),
        None => (
            String::new(),
            reason
                .as_string()
                .unwrap_or_else(|| "playback start rejected".to_string()),
        ),
    }
}

fn js_error(value: JsValue) -> PlaybackError {
    PlaybackError::audio(
        value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}")),
    )
}
