//! Volume control with logarithmic scaling
//!
//! The user-facing level is 0-100%, mapped to -60 dB..0 dB. The resulting
//! linear gain (0.0-1.0) is what the media element's `volume` property takes.

/// Volume controller with logarithmic scaling
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    /// Volume level (0-100)
    level: u8,

    /// Mute state (preserves volume level)
    muted: bool,
}

impl Volume {
    /// Create new volume controller, clamping `level` to 100
    pub fn new(level: u8) -> Self {
        Self {
            level: level.min(100),
            muted: false,
        }
    }

    /// Set volume level (0-100)
    pub fn set_level(&mut self, level: u8) {
        self.level = level.min(100);
    }

    /// Get current volume level (0-100)
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Mute audio (preserves volume level)
    pub fn mute(&mut self) {
        self.muted = true;
    }

    /// Unmute audio (restores previous volume)
    pub fn unmute(&mut self) {
        self.muted = false;
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Whether nothing is audible (muted or level 0)
    pub fn is_silent(&self) -> bool {
        self.muted || self.level == 0
    }

    /// Linear gain for the audio output
    ///
    /// Formula: gain = 10^((level% - 100) * 0.6 / 20)
    /// - 0%   → silence
    /// - 50%  → -30 dB → 0.0316
    /// - 80%  → -12 dB → 0.251 (default)
    /// - 100% →   0 dB → 1.0
    pub fn gain(&self) -> f32 {
        if self.is_silent() {
            return 0.0;
        }

        let db = (f32::from(self.level) - 100.0) * 0.6;
        10.0_f32.powf(db / 20.0)
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(80)
    }
}
