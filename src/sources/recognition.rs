use anyhow::Result;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// A single unit of recognized speech.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptFragment {
    /// Transcribed text
    pub text: String,

    /// Whether the engine has committed this text (final) or may still
    /// revise it (interim)
    pub is_final: bool,
}

/// Event emitted by a speech recognition engine.
#[derive(Debug, Clone)]
pub enum RecognitionEvent {
    /// One recognition batch. Fragments are concatenated in arrival order.
    Results(Vec<TranscriptFragment>),
    /// The engine closed its stream, either after a stop request or
    /// spontaneously (silence timeout).
    Ended,
    /// Engine-reported error. Non-fatal while a session is active.
    Error(String),
}

/// Speech recognition backend trait
///
/// Engines end their stream on their own schedule, independently of audio
/// capture. `start` may be called again after an `Ended` event to open a
/// fresh stream from the same engine.
#[async_trait::async_trait]
pub trait RecognitionSource: Send {
    /// Start (or restart) recognition.
    ///
    /// Returns a channel receiver that will receive recognition events.
    async fn start(&mut self) -> Result<mpsc::Receiver<RecognitionEvent>>;

    /// Request the engine to stop. Must be idempotent.
    async fn stop(&mut self) -> Result<()>;

    /// Get backend name for logging
    fn name(&self) -> &str;
}
