use serde::{Deserialize, Serialize};

/// Which stop-reconciliation path produced the completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionTrigger {
    /// A final transcript fragment arrived while stopping
    FinalFragment,
    /// The recognition engine errored while stopping, with audio in hand
    RecognitionError,
    /// The capture device stopped and no recognition engine was attached
    CaptureStopped,
    /// The grace window elapsed without a late recognition result
    GraceTimeout,
}

/// The single reconciled output of a finished recording session.
#[derive(Debug, Clone)]
pub struct Completion {
    /// Concatenated audio chunks in delivery order, or `None` when the
    /// device produced nothing
    pub audio: Option<Vec<u8>>,

    /// Transcript at the moment of completion (may be empty)
    pub transcript: String,

    pub trigger: CompletionTrigger,
}

/// Structured notifications from the coordinator to its subscriber.
///
/// Fired exactly once per session: `Started` when `start()` is invoked
/// (before device acquisition), `Completed` when the stopped session has
/// reconciled. `Tick` and `Transcript` repeat while recording.
#[derive(Debug, Clone)]
pub enum RecorderEvent {
    Started,
    Tick { elapsed_seconds: u64 },
    Transcript { live: String },
    RecognitionError { message: String },
    Completed(Completion),
}
