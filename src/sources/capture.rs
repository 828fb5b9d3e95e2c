use anyhow::Result;
use tokio::sync::mpsc;

/// Event emitted by a capture device.
#[derive(Debug, Clone)]
pub enum CaptureEvent {
    /// A block of recorded audio (raw PCM16LE bytes). Blocks arrive in
    /// recording order and must be concatenated in that order for playback.
    Chunk(Vec<u8>),
    /// The device has flushed its last block after a stop request. No further
    /// chunks follow.
    Stopped,
}

/// Microphone capture backend trait
///
/// Implementations wrap a platform recording facility (cpal device, browser
/// media stream bridge, or a scripted channel for tests). `start` acquires the
/// device and may fail when permission is denied or no device exists; the
/// coordinator treats that as capture being unavailable.
#[async_trait::async_trait]
pub trait CaptureSource: Send {
    /// Acquire the device and start capturing.
    ///
    /// Returns a channel receiver that will receive capture events.
    async fn start(&mut self) -> Result<mpsc::Receiver<CaptureEvent>>;

    /// Request the device to stop and release it. Must be idempotent: the
    /// coordinator calls this on every session exit path.
    async fn stop(&mut self) -> Result<()>;

    /// Get backend name for logging
    fn name(&self) -> &str;
}
