//! Transport-level small types shared by the controller, the pipeline seam
//! and the runtime.

use std::path::PathBuf;

use thiserror::Error;

pub(super) const NS_PER_SEC: f64 = 1_000_000_000.0;

/// The transport state of the one live session.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum TransportState {
    #[default]
    Idle,
    Playing,
    Paused,
}

/// Mutable playback state owned exclusively by the controller. Replaced
/// wholesale when a new file is opened.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub current_path: Option<PathBuf>,
    pub state: TransportState,
    pub position_secs: f64,
    pub duration_secs: f64,
}

/// Pipeline lifecycle states the controller can request.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PipelineState {
    /// Loaded, positioned at zero, not producing output.
    Ready,
    Playing,
    Paused,
    /// Fully torn down.
    Null,
}

/// Signals the pipeline reports back, drained during polling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    EndOfStream,
    Error(String),
}

/// Cancellation token for position polling. The controller hands one out
/// when it arms polling; a pause, end-of-stream or teardown invalidates all
/// outstanding handles, so a stale holder learns to stop on its next poll.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PollHandle(pub(super) u64);

/// Outcome of one position poll tick.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Poll {
    Continue,
    Cancelled,
}

/// Outcome of a play/pause toggle request.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Toggle {
    Playing,
    Paused,
    NothingSelected,
}

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("cannot start playback: {0}")]
    PipelineUnavailable(String),
}
