//! Capture and recognition source abstractions
//!
//! The recording coordinator never talks to a platform microphone or speech
//! engine directly. It opens both through these traits, so real backends and
//! scripted test sources are interchangeable:
//! - `CaptureSource`: ordered binary audio chunks plus a stop signal
//! - `RecognitionSource`: incremental interim/final transcript fragments
//! - `SourceFactory`: per-session construction of both

pub mod capture;
pub mod channel;
pub mod factory;
pub mod recognition;

pub use capture::{CaptureEvent, CaptureSource};
pub use channel::{ChannelCapture, ChannelRecognition};
pub use factory::{QueuedSources, SourceFactory};
pub use recognition::{RecognitionEvent, RecognitionSource, TranscriptFragment};
