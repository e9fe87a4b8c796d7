//! Playback transport: the controller state machine, its session, and the
//! media pipeline seam.
//!
//! The controller never touches audio output itself; it drives a
//! [`Pipeline`] implementation (rodio in production, a scripted fake in
//! tests) and reads position/duration/event signals back from it.

mod controller;
mod pipeline;
mod types;

pub use controller::PlaybackController;
pub use pipeline::{Pipeline, RodioPipeline};
pub use types::{
    PipelineEvent, PipelineState, PlayerError, Poll, PollHandle, Session, Toggle, TransportState,
};
