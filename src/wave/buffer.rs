use std::time::Duration;

/// Decoded PCM audio: an ordered sequence of frames, each frame holding one
/// integer amplitude per channel.
///
/// Values are stored exactly as decoded: 8-bit samples are unsigned
/// (0..=255), wider samples are signed. The buffer is immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioBuffer {
    frame_rate: u32,
    sample_width: u16,
    channels: u16,
    samples: Vec<Vec<i32>>,
}

impl AudioBuffer {
    pub(super) fn new(
        frame_rate: u32,
        sample_width: u16,
        channels: u16,
        samples: Vec<Vec<i32>>,
    ) -> Self {
        Self {
            frame_rate,
            sample_width,
            channels,
            samples,
        }
    }

    /// Sampling rate in Hz.
    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    /// Bytes per single-channel amplitude value (1-4).
    pub fn sample_width(&self) -> u16 {
        self.sample_width
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn frame_count(&self) -> usize {
        self.samples.len()
    }

    pub fn frames(&self) -> &[Vec<i32>] {
        &self.samples
    }

    /// Duration implied by frame count and rate.
    pub fn duration(&self) -> Duration {
        if self.frame_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.samples.len() as f64 / self.frame_rate as f64)
    }

    /// The first channel's amplitude per frame, in frame order. This is what
    /// the waveform renderer consumes; other channels are not mixed in.
    pub fn into_first_channel(self) -> Vec<i32> {
        self.samples
            .into_iter()
            .filter_map(|frame| frame.first().copied())
            .collect()
    }
}
