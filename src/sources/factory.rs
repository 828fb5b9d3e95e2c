use super::capture::CaptureSource;
use super::recognition::RecognitionSource;
use anyhow::{Context, Result};
use std::collections::VecDeque;
use tokio::sync::Mutex;

/// Per-session source construction.
///
/// The coordinator opens both sources through this trait at the start of each
/// session. `open_capture` failing means no usable microphone (missing device
/// or denied permission); `open_recognition` returning `None` means the
/// platform has no speech engine and the session runs audio-only.
#[async_trait::async_trait]
pub trait SourceFactory: Send + Sync {
    /// Open the microphone capture device for one session.
    async fn open_capture(&self) -> Result<Box<dyn CaptureSource>>;

    /// Open the speech recognition engine, or `None` when the platform
    /// provides none.
    async fn open_recognition(&self) -> Option<Box<dyn RecognitionSource>>;
}

/// Factory backed by pre-built sources, handed out one per session.
///
/// When the capture queue runs dry, `open_capture` fails the same way a
/// missing device would.
#[derive(Default)]
pub struct QueuedSources {
    captures: Mutex<VecDeque<Box<dyn CaptureSource>>>,
    recognitions: Mutex<VecDeque<Box<dyn RecognitionSource>>>,
}

impl QueuedSources {
    pub fn new(
        captures: Vec<Box<dyn CaptureSource>>,
        recognitions: Vec<Box<dyn RecognitionSource>>,
    ) -> Self {
        Self {
            captures: Mutex::new(captures.into()),
            recognitions: Mutex::new(recognitions.into()),
        }
    }
}

#[async_trait::async_trait]
impl SourceFactory for QueuedSources {
    async fn open_capture(&self) -> Result<Box<dyn CaptureSource>> {
        self.captures
            .lock()
            .await
            .pop_front()
            .context("no capture device available")
    }

    async fn open_recognition(&self) -> Option<Box<dyn RecognitionSource>> {
        self.recognitions.lock().await.pop_front()
    }
}
