use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of the recording coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecorderState {
    /// No active session; all fields at defaults
    Idle,
    /// Capture (and recognition, when present) running
    Recording,
    /// Stop requested; waiting for the sources to reconcile into one
    /// completion event
    Stopping,
}

/// Mutable fields of one recording attempt.
///
/// Reset on `start()` and on discard; retained after completion so the last
/// session's transcript and counters remain queryable.
#[derive(Debug, Clone)]
pub struct Session {
    pub state: RecorderState,
    pub started_at: Option<DateTime<Utc>>,
    pub elapsed_seconds: u64,

    /// Final-only text, accumulated across recognition restarts.
    /// Append-only within a session.
    pub final_transcript: String,

    /// Most recent interim text; replaced by each recognition batch
    pub interim_transcript: String,

    /// Number of audio chunks collected so far
    pub chunk_count: usize,

    /// Total audio bytes collected so far
    pub audio_bytes: usize,

    /// True between the stop request and the completion event
    pub pending_completion: bool,

    /// How many times the recognition stream was transparently restarted
    pub recognition_restarts: u32,

    /// Last recognition error, if any (non-fatal)
    pub last_error: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: RecorderState::Idle,
            started_at: None,
            elapsed_seconds: 0,
            final_transcript: String::new(),
            interim_transcript: String::new(),
            chunk_count: 0,
            audio_bytes: 0,
            pending_completion: false,
            recognition_restarts: 0,
            last_error: None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Text shown while recording: committed finals plus the current interim.
    pub fn live_transcript(&self) -> String {
        format!("{}{}", self.final_transcript, self.interim_transcript)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            is_recording: self.state == RecorderState::Recording,
            started_at: self.started_at,
            elapsed_seconds: self.elapsed_seconds,
            live_transcript: self.live_transcript(),
            chunk_count: self.chunk_count,
            audio_bytes: self.audio_bytes,
            pending_completion: self.pending_completion,
            recognition_restarts: self.recognition_restarts,
            last_error: self.last_error.clone(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time view of a session, safe to serialize for status queries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub state: RecorderState,
    pub is_recording: bool,
    pub started_at: Option<DateTime<Utc>>,
    pub elapsed_seconds: u64,
    pub live_transcript: String,
    pub chunk_count: usize,
    pub audio_bytes: usize,
    pub pending_completion: bool,
    pub recognition_restarts: u32,
    pub last_error: Option<String>,
}

/// Format an elapsed-seconds counter as `mm:ss` for display.
pub fn format_elapsed(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
