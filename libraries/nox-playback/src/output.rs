//! Platform-agnostic audio output trait
//!
//! Abstracts the media element that actually produces sound (the browser's
//! `HTMLAudioElement`, a native player, or a test double).

use crate::error::Result;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Audio output driven by a `PlaybackSession`
///
/// No `Send` bound: browser outputs wrap JS objects that live on one thread.
pub trait AudioOutput {
    /// Swap the source to `url`
    ///
    /// The output must stop whatever it was playing and be ready to start
    /// the new source from the beginning.
    fn load(&mut self, url: &str) -> Result<()>;

    /// Start or resume playback of the loaded source
    ///
    /// # Returns
    /// * `Ok(())` - Playback started (or was accepted for starting)
    /// * `Err(_)` - Refused, e.g. blocked by an autoplay policy
    fn play(&mut self) -> Result<()>;

    /// Pause playback, keeping the position
    fn pause(&mut self);

    /// Seek to position in the loaded source
    fn seek(&mut self, position: Duration) -> Result<()>;

    /// Set linear output gain (0.0-1.0)
    fn set_volume(&mut self, gain: f32);

    /// Restart the loaded source from the beginning
    ///
    /// Equivalent to `seek(Duration::ZERO)`
    fn rewind(&mut self) -> Result<()> {
        self.seek(Duration::ZERO)
    }
}

/// Start failures reported after `play()` already returned
///
/// Browser media elements resolve `play()` through a promise. A rejection
/// that belongs to a source the output has since replaced must not be
/// reported against the new track, so every rejection is tagged with the
/// load epoch it was issued under. Clones share state, so the rejection
/// handler can hold one while the output keeps another.
#[derive(Debug, Clone, Default)]
pub struct PendingStarts {
    inner: Rc<RefCell<PendingState>>,
}

#[derive(Debug, Default)]
struct PendingState {
    epoch: u64,
    rejection: Option<String>,
}

/// Rejection raised when a pending start is interrupted by a new source
const ABORT_ERROR: &str = "AbortError";

impl PendingStarts {
    /// No source loaded yet, nothing rejected
    pub fn new() -> Self {
        Self::default()
    }

    /// A new source was loaded; earlier starts are void
    pub fn source_changed(&self) {
        let mut state = self.inner.borrow_mut();
        state.epoch += 1;
        state.rejection = None;
    }

    /// Epoch to tag a start issued now
    pub fn epoch(&self) -> u64 {
        self.inner.borrow().epoch
    }

    /// Record a rejected start
    ///
    /// Ignored when `epoch` is stale or the rejection is an `AbortError`
    /// (the start was interrupted by `load`/`pause`, not refused). Returns
    /// whether it was recorded.
    pub fn reject(&self, epoch: u64, kind: &str, message: impl Into<String>) -> bool {
        let mut state = self.inner.borrow_mut();
        if epoch != state.epoch || kind == ABORT_ERROR {
            return false;
        }
        state.rejection = Some(message.into());
        true
    }

    /// Take the recorded rejection, if any
    pub fn take(&self) -> Option<String> {
        self.inner.borrow_mut().rejection.take()
    }
}

/// Output that accepts every command and produces no sound
///
/// For headless use where only queue state and events matter.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullOutput;

impl AudioOutput for NullOutput {
    fn load(&mut self, _url: &str) -> Result<()> {
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        Ok(())
    }

    fn pause(&mut self) {}

    fn seek(&mut self, _position: Duration) -> Result<()> {
        Ok(())
    }

    fn set_volume(&mut self, _gain: f32) {}
}
