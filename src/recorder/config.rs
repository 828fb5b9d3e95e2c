use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for a recording coordinator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecorderConfig {
    /// Unique session identifier (e.g., "memo-2026-08-26-standup")
    pub session_id: String,

    /// How long to wait after the capture device stops for a late final
    /// transcript before forcing completion with the last-known text
    pub grace_window: Duration,

    /// Elapsed-time counter resolution
    pub tick_interval: Duration,

    /// Capacity of the event channel handed to the subscriber
    pub event_buffer: usize,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            session_id: format!("memo-{}", uuid::Uuid::new_v4()),
            grace_window: Duration::from_secs(1),
            tick_interval: Duration::from_secs(1),
            event_buffer: 64,
        }
    }
}
