use super::*;
use std::io::Write;

fn write_wav_i16(path: &std::path::Path, channels: u16, samples: &[i16]) {
    let spec = hound::WavSpec {
        channels,
        sample_rate: 44_100,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for s in samples {
        writer.write_sample(*s).unwrap();
    }
    writer.finalize().unwrap();
}

#[test]
fn decode_frame_count_is_exact_for_native_widths() {
    // 12 bytes: 6 frames mono/16-bit, 3 frames stereo/16-bit, 3 frames mono/32-bit.
    let raw = [0u8; 12];
    assert_eq!(decode(&raw, 1, 2, 8_000).unwrap().frame_count(), 6);
    assert_eq!(decode(&raw, 2, 2, 8_000).unwrap().frame_count(), 3);
    assert_eq!(decode(&raw, 1, 4, 8_000).unwrap().frame_count(), 3);
    assert_eq!(decode(&raw, 2, 1, 8_000).unwrap().frame_count(), 6);
}

#[test]
fn decoded_buffer_reports_its_shape() {
    let buf = decode(&[0u8; 16], 2, 2, 8_000).unwrap();
    assert_eq!(buf.frame_rate(), 8_000);
    assert_eq!(buf.sample_width(), 2);
    assert_eq!(buf.channels(), 2);
    assert_eq!(buf.frame_count(), 4);
    assert_eq!(buf.duration(), std::time::Duration::from_micros(500));
}

#[test]
fn decode_one_byte_samples_are_unsigned() {
    let buf = decode(&[0x00, 0x80, 0xFF], 1, 1, 8_000).unwrap();
    let amps: Vec<i32> = buf.frames().iter().map(|f| f[0]).collect();
    assert_eq!(amps, vec![0, 128, 255]);
}

#[test]
fn decode_two_byte_samples_are_signed_little_endian() {
    let buf = decode(&[0xFF, 0xFF, 0x00, 0x80, 0xFF, 0x7F], 1, 2, 8_000).unwrap();
    let amps: Vec<i32> = buf.frames().iter().map(|f| f[0]).collect();
    assert_eq!(amps, vec![-1, i16::MIN as i32, i16::MAX as i32]);
}

#[test]
fn decode_three_byte_samples_sign_extend() {
    // MSB set in the top stored byte must yield a negative value...
    let buf = decode(&[0x00, 0x00, 0x80], 1, 3, 8_000).unwrap();
    assert_eq!(buf.frames()[0][0], -8_388_608);
    // ...while a clear sign bit stays positive.
    let buf = decode(&[0x00, 0x00, 0x7F], 1, 3, 8_000).unwrap();
    assert_eq!(buf.frames()[0][0], 8_323_072);
}

#[test]
fn decode_four_byte_samples_are_signed_little_endian() {
    let buf = decode(&[0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x80], 1, 4, 8_000).unwrap();
    let amps: Vec<i32> = buf.frames().iter().map(|f| f[0]).collect();
    assert_eq!(amps, vec![-1, i32::MIN]);
}

#[test]
fn decode_rejects_trailing_remainder() {
    let err = decode(&[0u8; 5], 1, 2, 8_000).unwrap_err();
    assert_eq!(
        err,
        DecodeError::MalformedAudioData {
            len: 5,
            sample_width: 2,
            channels: 1,
        }
    );
}

#[test]
fn decode_rejects_unsupported_widths() {
    assert_eq!(
        decode(&[0u8; 4], 1, 0, 8_000).unwrap_err(),
        DecodeError::UnsupportedSampleWidth(0)
    );
    assert_eq!(
        decode(&[0u8; 5], 1, 5, 8_000).unwrap_err(),
        DecodeError::UnsupportedSampleWidth(5)
    );
}

#[test]
fn decode_empty_input_yields_zero_frames() {
    let buf = decode(&[], 2, 2, 44_100).unwrap();
    assert_eq!(buf.frame_count(), 0);
    assert_eq!(buf.channels(), 2);
}

#[test]
fn decode_splits_frames_across_channels() {
    // Two stereo 16-bit frames: (1, -1), (2, -2).
    let raw = [0x01, 0x00, 0xFF, 0xFF, 0x02, 0x00, 0xFE, 0xFF];
    let buf = decode(&raw, 2, 2, 44_100).unwrap();
    assert_eq!(buf.frames(), &[vec![1, -1], vec![2, -2]]);
}

#[test]
fn read_wav_roundtrips_hound_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tone.wav");
    write_wav_i16(&path, 2, &[100, -100, 200, -200]);

    let (spec, raw) = read_wav(&path).unwrap();
    assert_eq!(spec.frame_rate, 44_100);
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.sample_width, 2);

    let buf = decode(&raw, spec.channels, spec.sample_width, spec.frame_rate).unwrap();
    assert_eq!(buf.frames(), &[vec![100, -100], vec![200, -200]]);
}

#[test]
fn read_wav_rejects_non_riff_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("noise.wav");
    std::fs::File::create(&path)
        .unwrap()
        .write_all(b"definitely not a wave file")
        .unwrap();

    assert!(matches!(read_wav(&path), Err(ContainerError::NotWave)));
}

#[test]
fn read_wav_rejects_compressed_format_tags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("alaw.wav");
    // Minimal RIFF/WAVE with fmt tag 6 (A-law).
    let mut bytes: Vec<u8> = Vec::new();
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&36u32.to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&6u16.to_le_bytes()); // format tag
    bytes.extend_from_slice(&1u16.to_le_bytes()); // channels
    bytes.extend_from_slice(&8_000u32.to_le_bytes()); // rate
    bytes.extend_from_slice(&8_000u32.to_le_bytes()); // byte rate
    bytes.extend_from_slice(&1u16.to_le_bytes()); // block align
    bytes.extend_from_slice(&8u16.to_le_bytes()); // bits
    std::fs::write(&path, &bytes).unwrap();

    assert!(matches!(read_wav(&path), Err(ContainerError::NotPcm(6))));
}

#[test]
fn read_wav_requires_fmt_and_data_chunks() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.wav");
    let mut bytes: Vec<u8> = Vec::new();
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&4u32.to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    std::fs::write(&path, &bytes).unwrap();

    assert!(matches!(
        read_wav(&path),
        Err(ContainerError::MissingChunk("fmt "))
    ));
}

#[test]
fn extract_refuses_non_wave_extensions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, b"hello").unwrap();

    assert!(!extract(&path).is_renderable());
}

#[test]
fn extract_degrades_on_corrupt_wave() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corrupt.wav");
    std::fs::write(&path, b"RIFFxxxxJUNK").unwrap();

    match extract(&path) {
        Waveform::NotRenderable(reason) => assert!(!reason.is_empty()),
        Waveform::Renderable(_) => panic!("corrupt file must not render"),
    }
}

#[test]
fn extract_returns_first_channel_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stereo.wav");
    write_wav_i16(&path, 2, &[7, -9, 11, -13]);

    match extract(&path) {
        Waveform::Renderable(samples) => assert_eq!(samples, vec![7, 11]),
        Waveform::NotRenderable(reason) => panic!("expected waveform, got: {reason}"),
    }
}

#[test]
fn extract_missing_file_degrades() {
    assert!(!extract(std::path::Path::new("/nonexistent/void.wav")).is_renderable());
}
