use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};
use thiserror::Error;

/// WAVE_FORMAT_PCM; anything else means a compressed container we do not read.
const FORMAT_TAG_PCM: u16 = 1;

/// Stream parameters read from the `fmt ` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    pub frame_rate: u32,
    pub channels: u16,
    /// Bytes per single-channel sample, rounded up from the stored bit depth.
    pub sample_width: u16,
}

#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("failed to read file: {0}")]
    Io(#[from] io::Error),
    #[error("not a RIFF/WAVE file")]
    NotWave,
    #[error("compressed WAVE (format tag {0:#06x}) is not supported")]
    NotPcm(u16),
    #[error("missing '{0}' chunk")]
    MissingChunk(&'static str),
}

/// Read an uncompressed WAVE file: walk the RIFF chunk list and return the
/// stream parameters plus the raw `data` chunk bytes, undecoded.
pub fn read_wav(path: &Path) -> Result<(WavSpec, Vec<u8>), ContainerError> {
    let mut reader = BufReader::new(File::open(path)?);

    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    if &magic != b"RIFF" {
        return Err(ContainerError::NotWave);
    }
    let _riff_size = reader.read_u32::<LittleEndian>()?;
    reader.read_exact(&mut magic)?;
    if &magic != b"WAVE" {
        return Err(ContainerError::NotWave);
    }

    let mut spec: Option<WavSpec> = None;
    let mut data: Option<Vec<u8>> = None;

    loop {
        let mut chunk_id = [0u8; 4];
        match reader.read_exact(&mut chunk_id) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(err) => return Err(err.into()),
        }
        let chunk_size = reader.read_u32::<LittleEndian>()? as u64;

        match &chunk_id {
            b"fmt " => {
                let format_tag = reader.read_u16::<LittleEndian>()?;
                if format_tag != FORMAT_TAG_PCM {
                    return Err(ContainerError::NotPcm(format_tag));
                }
                let channels = reader.read_u16::<LittleEndian>()?;
                let frame_rate = reader.read_u32::<LittleEndian>()?;
                let _byte_rate = reader.read_u32::<LittleEndian>()?;
                let _block_align = reader.read_u16::<LittleEndian>()?;
                let bits_per_sample = reader.read_u16::<LittleEndian>()?;
                spec = Some(WavSpec {
                    frame_rate,
                    channels,
                    sample_width: bits_per_sample.div_ceil(8),
                });
                skip(&mut reader, chunk_size.saturating_sub(16))?;
            }
            b"data" => {
                let mut raw = vec![0u8; chunk_size as usize];
                reader.read_exact(&mut raw)?;
                data = Some(raw);
            }
            _ => skip(&mut reader, chunk_size)?,
        }

        // RIFF chunks are word-aligned; odd sizes carry one pad byte.
        if chunk_size % 2 == 1 {
            skip(&mut reader, 1)?;
        }
    }

    let spec = spec.ok_or(ContainerError::MissingChunk("fmt "))?;
    let data = data.ok_or(ContainerError::MissingChunk("data"))?;
    Ok((spec, data))
}

fn skip(reader: &mut BufReader<File>, bytes: u64) -> io::Result<()> {
    io::copy(&mut reader.by_ref().take(bytes), &mut io::sink())?;
    Ok(())
}
