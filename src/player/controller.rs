use std::path::{Path, PathBuf};

use tracing::{debug, error, warn};

use crate::library::{Entry, EntryKind};

use super::pipeline::Pipeline;
use super::types::{
    NS_PER_SEC, PipelineEvent, PipelineState, PlayerError, Poll, PollHandle, Session, Toggle,
    TransportState,
};

/// Owns the one live [`Session`] and drives the pipeline through
/// play/pause/seek/next transitions. All user transport input and all
/// pipeline signals funnel through here; the UI only reads the session.
pub struct PlaybackController<P: Pipeline> {
    pipeline: P,
    session: Session,
    poll_generation: u64,
    poll_armed: bool,
    ending: bool,
}

impl<P: Pipeline> PlaybackController<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            session: Session::default(),
            poll_generation: 0,
            poll_armed: false,
            ending: false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The current polling token, present only while polling is armed.
    /// Invalidated by pause, end-of-stream and teardown.
    pub fn poll_handle(&self) -> Option<PollHandle> {
        self.poll_armed.then_some(PollHandle(self.poll_generation))
    }

    fn arm_poll(&mut self) {
        self.poll_generation += 1;
        self.poll_armed = true;
    }

    fn cancel_poll(&mut self) {
        self.poll_armed = false;
    }

    /// Issue a pipeline state change, logging rather than propagating a
    /// refusal; transport keystrokes must never take the session down.
    fn command(&mut self, state: PipelineState) {
        if let Err(err) = self.pipeline.set_state(state) {
            warn!(?state, %err, "pipeline refused state change");
        }
    }

    /// Tear down whatever is loaded, load `path` and start playing it.
    ///
    /// On failure the session is left Idle with no current path and the
    /// error is returned for a status notice; browsing stays usable.
    pub fn open(&mut self, path: &Path) -> Result<(), PlayerError> {
        self.cancel_poll();

        if let Err(err) = self.try_open(path) {
            warn!(path = %path.display(), %err, "open failed");
            let _ = self.pipeline.set_state(PipelineState::Null);
            self.session = Session::default();
            return Err(err);
        }

        self.session = Session {
            current_path: Some(path.to_path_buf()),
            state: TransportState::Playing,
            position_secs: 0.0,
            duration_secs: self
                .pipeline
                .query_duration()
                .map(ns_to_secs)
                .unwrap_or(0.0),
        };
        self.arm_poll();
        debug!(path = %path.display(), "playing");
        Ok(())
    }

    fn try_open(&mut self, path: &Path) -> Result<(), PlayerError> {
        self.pipeline.set_state(PipelineState::Ready)?;
        self.pipeline.open_uri(path)?;
        self.pipeline.set_state(PipelineState::Playing)
    }

    pub fn toggle_play_pause(&mut self) -> Toggle {
        match self.session.state {
            TransportState::Playing => {
                self.command(PipelineState::Paused);
                self.session.state = TransportState::Paused;
                self.cancel_poll();
                Toggle::Paused
            }
            TransportState::Paused => {
                self.command(PipelineState::Playing);
                self.session.state = TransportState::Playing;
                self.arm_poll();
                Toggle::Playing
            }
            TransportState::Idle => {
                // A path surviving from the last session means the pipeline
                // is still loaded at position zero; restart it.
                if self.session.current_path.is_some() {
                    self.command(PipelineState::Playing);
                    self.session.state = TransportState::Playing;
                    self.arm_poll();
                    Toggle::Playing
                } else {
                    Toggle::NothingSelected
                }
            }
        }
    }

    /// Open the first AudioFile after the current one in listing order,
    /// skipping directories and other files. No current row or nothing
    /// after it: a no-op with the state unchanged.
    pub fn next(&mut self, listing: &[Entry]) -> Result<Option<PathBuf>, PlayerError> {
        let Some(current) = self.session.current_path.clone() else {
            return Ok(None);
        };
        let Some(at) = listing.iter().position(|e| e.path == current) else {
            return Ok(None);
        };
        let Some(next) = listing[at + 1..]
            .iter()
            .find(|e| e.kind == EntryKind::AudioFile)
        else {
            return Ok(None);
        };

        let path = next.path.clone();
        self.open(&path)?;
        Ok(Some(path))
    }

    /// Absolute seek, clamped to `[0, duration]`. Playing stays playing and
    /// paused stays paused; the next poll reads the settled position back
    /// from the pipeline, which remains the source of truth.
    pub fn seek(&mut self, target_secs: f64) {
        if self.session.current_path.is_none() {
            return;
        }
        let upper = if self.session.duration_secs > 0.0 {
            self.session.duration_secs
        } else {
            // Duration not reported yet: only the lower bound applies.
            f64::INFINITY
        };
        let clamped = target_secs.clamp(0.0, upper);

        if let Err(err) = self.pipeline.seek(secs_to_ns(clamped)) {
            warn!(target_secs, %err, "seek refused");
            return;
        }
        // Display feedback until the next poll overwrites it.
        self.session.position_secs = clamped;
    }

    /// Pipeline end signal: back to a ready, zero-position pipeline and an
    /// Idle session. The only system-initiated transition.
    pub fn on_end_of_stream(&mut self) {
        if self.ending {
            return;
        }
        self.ending = true;

        self.cancel_poll();
        self.command(PipelineState::Ready);
        if let Err(err) = self.pipeline.seek(0) {
            warn!(%err, "reset seek refused");
        }
        self.session.state = TransportState::Idle;
        self.session.position_secs = 0.0;
        debug!("end of stream, session idle");

        self.ending = false;
    }

    /// One position poll tick. Pipeline signals are drained first; then, if
    /// `handle` is still the live token and the session is Playing, position
    /// and duration are read back. A pipeline that cannot report a position
    /// yet skips the tick without error.
    pub fn poll(&mut self, handle: PollHandle) -> Poll {
        while let Some(event) = self.pipeline.take_event() {
            match event {
                PipelineEvent::EndOfStream => self.on_end_of_stream(),
                PipelineEvent::Error(message) => {
                    error!(%message, "pipeline error");
                    self.cancel_poll();
                    self.command(PipelineState::Ready);
                    self.session.state = TransportState::Idle;
                    self.session.position_secs = 0.0;
                }
            }
        }

        if !self.poll_armed
            || handle != PollHandle(self.poll_generation)
            || self.session.state != TransportState::Playing
        {
            return Poll::Cancelled;
        }

        let Some(position_ns) = self.pipeline.query_position() else {
            return Poll::Continue;
        };
        self.session.position_secs = ns_to_secs(position_ns);
        if let Some(duration_ns) = self.pipeline.query_duration() {
            self.session.duration_secs = ns_to_secs(duration_ns);
        }
        Poll::Continue
    }
}

fn ns_to_secs(ns: u64) -> f64 {
    ns as f64 / NS_PER_SEC
}

fn secs_to_ns(secs: f64) -> u64 {
    (secs * NS_PER_SEC) as u64
}
