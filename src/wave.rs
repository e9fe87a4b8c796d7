//! PCM sample handling: container reading, byte-stream decoding and
//! waveform extraction for display.
//!
//! `decode` turns a raw PCM byte buffer into an [`AudioBuffer`] (frames ×
//! channels of integer amplitudes); `extract` is the thin adapter that feeds
//! the first channel of a decodable file to the waveform renderer.

mod buffer;
mod container;
mod decode;
mod extract;

pub use buffer::AudioBuffer;
pub use container::{ContainerError, WavSpec, read_wav};
pub use decode::{DecodeError, decode};
pub use extract::{Waveform, extract};

#[cfg(test)]
mod tests;
