//! Recording session coordination
//!
//! This module provides the `Recorder` abstraction that manages:
//! - Microphone capture and speech recognition lifecycles
//! - Live transcript accumulation (final + interim text)
//! - Reconciliation of the two independent stop signals into a single
//!   completion event carrying the audio artifact and the transcript
//! - Session state queries and structured event notifications

mod config;
mod event;
mod recorder;
mod state;

pub use config::RecorderConfig;
pub use event::{Completion, CompletionTrigger, RecorderEvent};
pub use recorder::{Recorder, RecorderError};
pub use state::{format_elapsed, RecorderState, Session, SessionSnapshot};
