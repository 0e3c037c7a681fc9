//! WASM bindings for nox-playback
//!
//! Drives a browser `HTMLAudioElement` from the queue controller so the
//! playback core can run inside the web client.

pub mod output;
pub mod player;
pub mod types;

pub use output::HtmlAudioOutput;
pub use player::WasmPlayer;
pub use types::WasmTrack;
