//! The media pipeline seam and its rodio-backed production implementation.
//!
//! rodio performs the actual output on its own mixer thread; this side only
//! issues commands and keeps a position clock, so nothing here blocks the
//! event loop.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use lofty::file::AudioFile;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};
use tracing::debug;

use super::types::{PipelineEvent, PipelineState, PlayerError};

/// Transport commands and clock queries against the media engine. Time is
/// exchanged in nanoseconds; the controller converts to seconds at the
/// boundary.
pub trait Pipeline {
    fn open_uri(&mut self, path: &Path) -> Result<(), PlayerError>;
    fn set_state(&mut self, state: PipelineState) -> Result<(), PlayerError>;
    /// Absolute flush-seek: buffered-ahead media is discarded before output
    /// resumes from the new position.
    fn seek(&mut self, position_ns: u64) -> Result<(), PlayerError>;
    /// `None` while the pipeline cannot report a position yet.
    fn query_position(&self) -> Option<u64>;
    fn query_duration(&self) -> Option<u64>;
    fn take_event(&mut self) -> Option<PipelineEvent>;
}

/// rodio-backed pipeline. Seeking rebuilds the sink with `skip_duration`,
/// which both flushes queued output and lands on the requested position;
/// the position clock is the accumulated play time since the last rebuild.
pub struct RodioPipeline {
    stream: OutputStream,
    sink: Option<Sink>,
    current: Option<PathBuf>,
    playing: bool,
    started_at: Option<Instant>,
    accumulated: Duration,
    duration: Option<Duration>,
    eos_reported: bool,
}

impl RodioPipeline {
    pub fn new() -> Result<Self, PlayerError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|err| PlayerError::PipelineUnavailable(format!("no audio output: {err}")))?;
        // rodio logs to stderr when OutputStream is dropped; that would land
        // in the middle of the alternate screen.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            sink: None,
            current: None,
            playing: false,
            started_at: None,
            accumulated: Duration::ZERO,
            duration: None,
            eos_reported: false,
        })
    }

    fn build_sink(&self, path: &Path, start_at: Duration) -> Result<Sink, PlayerError> {
        let file = File::open(path).map_err(|err| {
            PlayerError::PipelineUnavailable(format!("failed to open {}: {err}", path.display()))
        })?;
        let source = Decoder::new(BufReader::new(file))
            .map_err(|err| {
                PlayerError::PipelineUnavailable(format!(
                    "failed to decode {}: {err}",
                    path.display()
                ))
            })?
            // `skip_duration` is the seeking primitive; Duration::ZERO is fine.
            .skip_duration(start_at);

        let sink = Sink::connect_new(self.stream.mixer());
        sink.append(source);
        sink.pause();
        Ok(sink)
    }

    fn stop_sink(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.playing = false;
        self.started_at = None;
        self.accumulated = Duration::ZERO;
    }

    fn rebuild_at(&mut self, position: Duration) -> Result<(), PlayerError> {
        let Some(path) = self.current.clone() else {
            return Ok(());
        };
        let was_playing = self.playing;
        if let Some(old) = self.sink.take() {
            old.stop();
        }

        let sink = self.build_sink(&path, position)?;
        if was_playing {
            sink.play();
            self.started_at = Some(Instant::now());
        } else {
            self.started_at = None;
        }
        self.sink = Some(sink);
        self.playing = was_playing;
        self.accumulated = position;
        self.eos_reported = false;
        Ok(())
    }
}

impl Pipeline for RodioPipeline {
    fn open_uri(&mut self, path: &Path) -> Result<(), PlayerError> {
        self.stop_sink();

        // Duration comes from the tag reader; not every stream carries one.
        self.duration = lofty::read_from_path(path)
            .ok()
            .map(|tagged| tagged.properties().duration());

        let sink = self.build_sink(path, Duration::ZERO)?;
        self.sink = Some(sink);
        self.current = Some(path.to_path_buf());
        self.eos_reported = false;
        debug!(path = %path.display(), "pipeline loaded");
        Ok(())
    }

    fn set_state(&mut self, state: PipelineState) -> Result<(), PlayerError> {
        match state {
            PipelineState::Ready => {
                // Back to a loaded, position-zero, silent pipeline. A source
                // that can no longer be rebuilt leaves the pipeline empty
                // rather than failing the state change.
                if self.rebuild_at(Duration::ZERO).is_ok() {
                    if let Some(sink) = &self.sink {
                        sink.pause();
                    }
                } else {
                    self.stop_sink();
                }
                self.playing = false;
                self.started_at = None;
                self.accumulated = Duration::ZERO;
            }
            PipelineState::Playing => {
                if let Some(sink) = &self.sink {
                    sink.play();
                    if !self.playing {
                        self.playing = true;
                        self.started_at = Some(Instant::now());
                    }
                }
            }
            PipelineState::Paused => {
                if let Some(sink) = &self.sink {
                    sink.pause();
                    if self.playing {
                        if let Some(started) = self.started_at.take() {
                            self.accumulated += started.elapsed();
                        }
                        self.playing = false;
                    }
                }
            }
            PipelineState::Null => {
                self.stop_sink();
                self.current = None;
                self.duration = None;
            }
        }
        Ok(())
    }

    fn seek(&mut self, position_ns: u64) -> Result<(), PlayerError> {
        if self.current.is_none() {
            return Ok(());
        }
        self.rebuild_at(Duration::from_nanos(position_ns))
    }

    fn query_position(&self) -> Option<u64> {
        self.sink.as_ref()?;
        let mut elapsed = self.accumulated;
        if let Some(started) = self.started_at {
            elapsed += started.elapsed();
        }
        if let Some(total) = self.duration {
            elapsed = elapsed.min(total);
        }
        Some(elapsed.as_nanos() as u64)
    }

    fn query_duration(&self) -> Option<u64> {
        self.duration.map(|d| d.as_nanos() as u64)
    }

    fn take_event(&mut self) -> Option<PipelineEvent> {
        let sink = self.sink.as_ref()?;
        if self.playing && sink.empty() && !self.eos_reported {
            self.eos_reported = true;
            return Some(PipelineEvent::EndOfStream);
        }
        None
    }
}
