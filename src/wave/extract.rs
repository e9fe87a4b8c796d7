use std::path::Path;

use tracing::warn;

use super::container::read_wav;
use super::decode::decode;

/// Result of asking for a drawable waveform. A file that cannot be drawn is
/// a display degradation, not a failure, so the "no" case is an ordinary
/// value carrying the reason rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Waveform {
    /// First-channel amplitude per frame, in frame order.
    Renderable(Vec<i32>),
    NotRenderable(String),
}

impl Waveform {
    pub fn is_renderable(&self) -> bool {
        matches!(self, Waveform::Renderable(_))
    }
}

/// Extract the amplitude sequence of `path`'s first channel for display.
///
/// Only the uncompressed WAVE container is attempted; any other extension,
/// an unreadable file or malformed sample data all degrade to
/// [`Waveform::NotRenderable`].
pub fn extract(path: &Path) -> Waveform {
    let is_wav = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("wav"))
        .unwrap_or(false);
    if !is_wav {
        return Waveform::NotRenderable("only uncompressed WAVE files are drawable".into());
    }

    let (spec, raw) = match read_wav(path) {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!(path = %path.display(), %err, "waveform container rejected");
            return Waveform::NotRenderable(err.to_string());
        }
    };

    match decode(&raw, spec.channels, spec.sample_width, spec.frame_rate) {
        Ok(buffer) => Waveform::Renderable(buffer.into_first_channel()),
        Err(err) => {
            warn!(path = %path.display(), %err, "waveform decode failed");
            Waveform::NotRenderable(err.to_string())
        }
    }
}
