use byteorder::{ByteOrder, LittleEndian};
use thiserror::Error;

use super::buffer::AudioBuffer;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error(
        "data length {len} is not a multiple of sample width {sample_width} x {channels} channel(s)"
    )]
    MalformedAudioData {
        len: usize,
        sample_width: u16,
        channels: u16,
    },
    #[error("sample width of {0} byte(s) is not supported")]
    UnsupportedSampleWidth(u16),
}

/// Decode a raw PCM byte stream into a frames × channels amplitude matrix.
///
/// 1-byte samples are unsigned; 2- and 4-byte samples are signed
/// little-endian. 3-byte samples are widened to 4 bytes by replicating the
/// sign bit of the most-significant stored byte into the added byte, then
/// read as a signed 32-bit little-endian integer.
///
/// Pure function: the same input always yields the same buffer. A length
/// that is not an exact multiple of the frame size is an error, never a
/// truncation; empty input decodes to a zero-frame buffer.
pub fn decode(
    raw: &[u8],
    channels: u16,
    sample_width: u16,
    frame_rate: u32,
) -> Result<AudioBuffer, DecodeError> {
    if sample_width == 0 || sample_width > 4 {
        return Err(DecodeError::UnsupportedSampleWidth(sample_width));
    }

    let width = sample_width as usize;
    let frame_size = width * channels as usize;
    if frame_size == 0 || !raw.len().is_multiple_of(frame_size) {
        return Err(DecodeError::MalformedAudioData {
            len: raw.len(),
            sample_width,
            channels,
        });
    }

    let mut samples: Vec<Vec<i32>> = Vec::with_capacity(raw.len() / frame_size);
    for frame in raw.chunks_exact(frame_size) {
        let mut amplitudes = Vec::with_capacity(channels as usize);
        for cell in frame.chunks_exact(width) {
            amplitudes.push(read_amplitude(cell));
        }
        samples.push(amplitudes);
    }

    Ok(AudioBuffer::new(frame_rate, sample_width, channels, samples))
}

fn read_amplitude(cell: &[u8]) -> i32 {
    match cell.len() {
        1 => cell[0] as i32,
        2 => LittleEndian::read_i16(cell) as i32,
        3 => {
            // 24-bit integers have no native width: widen to 4 bytes by
            // filling the high byte from the stored sign bit.
            let high = if cell[2] & 0x80 != 0 { 0xFF } else { 0x00 };
            LittleEndian::read_i32(&[cell[0], cell[1], cell[2], high])
        }
        4 => LittleEndian::read_i32(cell),
        _ => unreachable!("sample width validated to 1-4 bytes"),
    }
}
