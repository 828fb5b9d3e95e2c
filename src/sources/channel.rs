use super::capture::{CaptureEvent, CaptureSource};
use super::recognition::{RecognitionEvent, RecognitionSource};
use anyhow::{Context, Result};
use std::collections::VecDeque;
use tokio::sync::mpsc;

/// Capture source fed from an external channel.
///
/// The producer side (a platform bridge, or a test script) pushes
/// `CaptureEvent`s through the returned sender; the coordinator consumes them
/// as if they came from a real device. The producer is responsible for
/// sending `CaptureEvent::Stopped` once it has flushed its last chunk.
pub struct ChannelCapture {
    rx: Option<mpsc::Receiver<CaptureEvent>>,
}

impl ChannelCapture {
    pub fn new(buffer: usize) -> (Self, mpsc::Sender<CaptureEvent>) {
        let (tx, rx) = mpsc::channel(buffer);
        (Self { rx: Some(rx) }, tx)
    }
}

#[async_trait::async_trait]
impl CaptureSource for ChannelCapture {
    async fn start(&mut self) -> Result<mpsc::Receiver<CaptureEvent>> {
        self.rx
            .take()
            .context("channel capture source already started")
    }

    async fn stop(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "channel-capture"
    }
}

/// Recognition source fed from external channels, one per engine generation.
///
/// Each call to `start` hands out the next scripted stream, which lets tests
/// drive the coordinator's transparent-restart path: generation N ends, the
/// coordinator restarts, and generation N+1 takes over. Once the generations
/// are exhausted, `start` fails and the coordinator degrades to audio-only.
pub struct ChannelRecognition {
    streams: VecDeque<mpsc::Receiver<RecognitionEvent>>,
}

impl ChannelRecognition {
    pub fn new(generations: usize, buffer: usize) -> (Self, Vec<mpsc::Sender<RecognitionEvent>>) {
        let mut streams = VecDeque::with_capacity(generations);
        let mut senders = Vec::with_capacity(generations);
        for _ in 0..generations {
            let (tx, rx) = mpsc::channel(buffer);
            streams.push_back(rx);
            senders.push(tx);
        }
        (Self { streams }, senders)
    }
}

#[async_trait::async_trait]
impl RecognitionSource for ChannelRecognition {
    async fn start(&mut self) -> Result<mpsc::Receiver<RecognitionEvent>> {
        self.streams
            .pop_front()
            .context("channel recognition source has no streams left")
    }

    async fn stop(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "channel-recognition"
    }
}
