//! Application module: the browser-side model shared by the runtime and UI.
//!
//! `App` holds the current listing, cursor and display-only artifacts
//! (waveform, properties popup, status notice). Transport state lives in
//! `player::PlaybackController`, not here.

mod model;

pub use model::*;
