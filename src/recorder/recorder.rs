use super::config::RecorderConfig;
use super::event::{Completion, CompletionTrigger, RecorderEvent};
use super::state::{RecorderState, Session, SessionSnapshot};
use crate::sources::{
    CaptureEvent, CaptureSource, RecognitionEvent, RecognitionSource, SourceFactory,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum RecorderError {
    /// Microphone permission denied or no capture device present.
    /// The coordinator stays idle; the caller surfaces a message.
    #[error("microphone capture unavailable: {0}")]
    CaptureUnavailable(anyhow::Error),
}

enum Control {
    Stop,
    Reset,
}

/// Coordinates one recording session at a time.
///
/// Owns the capture and recognition lifecycles, accumulates the transcript,
/// and reconciles the two independent stop signals into a single
/// `RecorderEvent::Completed`. Created once and reused across sessions; each
/// `start()` opens fresh sources through the factory.
pub struct Recorder {
    config: RecorderConfig,
    sources: Box<dyn SourceFactory>,
    session: Arc<Mutex<Session>>,
    events_tx: mpsc::Sender<RecorderEvent>,
    control_tx: Mutex<Option<mpsc::Sender<Control>>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl Recorder {
    /// Create a coordinator and the event stream its subscriber consumes.
    pub fn new(
        config: RecorderConfig,
        sources: Box<dyn SourceFactory>,
    ) -> (Self, mpsc::Receiver<RecorderEvent>) {
        let (events_tx, events_rx) = mpsc::channel(config.event_buffer);
        let recorder = Self {
            config,
            sources,
            session: Arc::new(Mutex::new(Session::new())),
            events_tx,
            control_tx: Mutex::new(None),
            task: Mutex::new(None),
        };
        (recorder, events_rx)
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.session.lock().await.snapshot()
    }

    /// Start a new session. A no-op when a session is already active.
    pub async fn start(&self) -> Result<(), RecorderError> {
        {
            // Claim the session under the same lock as the idle check, so a
            // concurrent start cannot pass the guard while sources are still
            // being opened.
            let mut session = self.session.lock().await;
            if session.state != RecorderState::Idle {
                warn!("recording already in progress, ignoring start");
                return Ok(());
            }
            session.reset();
            session.state = RecorderState::Recording;
            session.started_at = Some(chrono::Utc::now());
        }

        // Notify before device acquisition so the caller can flip its UI
        // immediately.
        self.emit(RecorderEvent::Started);

        let mut capture = match self.sources.open_capture().await {
            Ok(capture) => capture,
            Err(e) => return self.fail_start(e).await,
        };
        let capture_rx = match capture.start().await {
            Ok(rx) => rx,
            Err(e) => return self.fail_start(e).await,
        };
        info!("capture started via {}", capture.name());

        let mut recognition = self.sources.open_recognition().await;
        let recognition_rx = match recognition.as_mut() {
            Some(engine) => match engine.start().await {
                Ok(rx) => Some(rx),
                Err(e) => {
                    warn!("speech recognition unavailable, capturing audio only: {e:#}");
                    recognition = None;
                    None
                }
            },
            None => {
                info!("no speech recognition engine, capturing audio only");
                None
            }
        };

        let (control_tx, control_rx) = mpsc::channel(8);
        let session_loop = SessionLoop {
            config: self.config.clone(),
            session: Arc::clone(&self.session),
            events_tx: self.events_tx.clone(),
        };
        let handle = tokio::spawn(session_loop.run(
            capture,
            recognition,
            capture_rx,
            recognition_rx,
            control_rx,
        ));

        *self.control_tx.lock().await = Some(control_tx);
        *self.task.lock().await = Some(handle);

        info!("recording started: {}", self.config.session_id);
        Ok(())
    }

    /// Request the session to stop. The completion event arrives
    /// asynchronously once the sources have reconciled. A no-op when not
    /// recording.
    pub async fn stop(&self) {
        {
            let session = self.session.lock().await;
            if session.state != RecorderState::Recording {
                warn!("no active recording to stop");
                return;
            }
        }
        let control = self.control_tx.lock().await.clone();
        match control {
            Some(tx) => {
                if tx.send(Control::Stop).await.is_err() {
                    warn!("recording task already finished");
                }
            }
            None => warn!("no recording task to stop"),
        }
    }

    /// Discard the session. Safe in any state, including mid-stop: tears
    /// down the session task (releasing the device and cancelling any armed
    /// grace timer) and returns all fields to idle defaults.
    pub async fn reset(&self) {
        if let Some(tx) = self.control_tx.lock().await.take() {
            let _ = tx.send(Control::Reset).await;
        }
        if let Some(task) = self.task.lock().await.take() {
            if let Err(e) = task.await {
                error!("recording task panicked: {e}");
            }
        }
        self.session.lock().await.reset();
        info!("session discarded: {}", self.config.session_id);
    }

    async fn fail_start(&self, cause: anyhow::Error) -> Result<(), RecorderError> {
        error!("failed to start capture: {cause:#}");
        let mut session = self.session.lock().await;
        session.last_error = Some(format!("{cause:#}"));
        session.state = RecorderState::Idle;
        Err(RecorderError::CaptureUnavailable(cause))
    }

    fn emit(&self, event: RecorderEvent) {
        if self.events_tx.try_send(event).is_err() {
            warn!("recorder event dropped: subscriber not keeping up");
        }
    }
}

struct SessionLoop {
    config: RecorderConfig,
    session: Arc<Mutex<Session>>,
    events_tx: mpsc::Sender<RecorderEvent>,
}

impl SessionLoop {
    async fn run(
        self,
        mut capture: Box<dyn CaptureSource>,
        mut recognition: Option<Box<dyn RecognitionSource>>,
        mut capture_rx: mpsc::Receiver<CaptureEvent>,
        mut recognition_rx: Option<mpsc::Receiver<RecognitionEvent>>,
        mut control_rx: mpsc::Receiver<Control>,
    ) {
        let mut audio_chunks: Vec<Vec<u8>> = Vec::new();
        let mut capture_open = true;

        let mut ticker = interval_at(
            Instant::now() + self.config.tick_interval,
            self.config.tick_interval,
        );
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        // Re-armed with the configured grace window when the capture device
        // stops while a completion is pending.
        let grace = sleep(Duration::from_secs(60 * 60 * 24));
        tokio::pin!(grace);
        let mut grace_armed = false;

        loop {
            tokio::select! {
                cmd = control_rx.recv() => match cmd {
                    Some(Control::Stop) => {
                        {
                            let mut session = self.session.lock().await;
                            session.pending_completion = true;
                            session.state = RecorderState::Stopping;
                        }
                        if let Err(e) = capture.stop().await {
                            warn!("capture stop request failed: {e:#}");
                        }
                        if let Some(engine) = recognition.as_mut() {
                            if let Err(e) = engine.stop().await {
                                warn!("recognition stop request failed: {e:#}");
                            }
                        }
                        info!("stop requested, waiting for sources to finish");
                        // The capture channel may have closed before the stop
                        // request; don't wait for a stop event that cannot come.
                        if !capture_open {
                            if recognition.is_some() {
                                grace.as_mut().reset(Instant::now() + self.config.grace_window);
                                grace_armed = true;
                            } else if self
                                .complete(CompletionTrigger::CaptureStopped, &mut audio_chunks)
                                .await
                            {
                                break;
                            }
                        }
                    }
                    Some(Control::Reset) | None => break,
                },

                event = capture_rx.recv(), if capture_open => match event {
                    Some(CaptureEvent::Chunk(bytes)) => {
                        let mut session = self.session.lock().await;
                        session.chunk_count += 1;
                        session.audio_bytes += bytes.len();
                        drop(session);
                        audio_chunks.push(bytes);
                    }
                    // A closed channel means the device went away without a
                    // stop event; reconcile it the same way.
                    stopped => {
                        if stopped.is_none() {
                            capture_open = false;
                        }
                        let pending = self.session.lock().await.pending_completion;
                        if pending {
                            if recognition.is_some() {
                                if !grace_armed {
                                    grace.as_mut().reset(Instant::now() + self.config.grace_window);
                                    grace_armed = true;
                                }
                            } else if self
                                .complete(CompletionTrigger::CaptureStopped, &mut audio_chunks)
                                .await
                            {
                                break;
                            }
                        }
                    }
                },

                event = recv_recognition(&mut recognition_rx) => match event {
                    Some(RecognitionEvent::Results(fragments)) => {
                        let mut final_text = String::new();
                        let mut interim_text = String::new();
                        let mut saw_final = false;
                        for fragment in fragments {
                            if fragment.is_final {
                                final_text.push_str(&fragment.text);
                                saw_final = true;
                            } else {
                                interim_text.push_str(&fragment.text);
                            }
                        }

                        let (live, pending) = {
                            let mut session = self.session.lock().await;
                            session.final_transcript.push_str(&final_text);
                            session.interim_transcript = interim_text;
                            (session.live_transcript(), session.pending_completion)
                        };
                        self.emit(RecorderEvent::Transcript { live });

                        if pending
                            && saw_final
                            && self
                                .complete(CompletionTrigger::FinalFragment, &mut audio_chunks)
                                .await
                        {
                            break;
                        }
                    }
                    Some(RecognitionEvent::Error(message)) => {
                        warn!("speech recognition error: {message}");
                        let pending = {
                            let mut session = self.session.lock().await;
                            session.last_error = Some(message.clone());
                            session.pending_completion
                        };
                        self.emit(RecorderEvent::RecognitionError { message });

                        if pending
                            && !audio_chunks.is_empty()
                            && self
                                .complete(CompletionTrigger::RecognitionError, &mut audio_chunks)
                                .await
                        {
                            break;
                        }
                    }
                    Some(RecognitionEvent::Ended) | None => {
                        let (state, pending) = {
                            let session = self.session.lock().await;
                            (session.state, session.pending_completion)
                        };
                        if state == RecorderState::Recording && !pending {
                            // Silence timeout mid-session: restart so capture
                            // continues uninterrupted. Invisible to the caller.
                            match recognition.as_mut() {
                                Some(engine) => match engine.start().await {
                                    Ok(rx) => {
                                        recognition_rx = Some(rx);
                                        let mut session = self.session.lock().await;
                                        session.recognition_restarts += 1;
                                        info!(
                                            "recognition stream ended early, restarted ({} so far)",
                                            session.recognition_restarts
                                        );
                                    }
                                    Err(e) => {
                                        warn!("recognition restart failed, continuing audio only: {e:#}");
                                        recognition = None;
                                        recognition_rx = None;
                                    }
                                },
                                None => recognition_rx = None,
                            }
                        } else {
                            recognition_rx = None;
                        }
                    }
                },

                _ = ticker.tick() => {
                    let mut session = self.session.lock().await;
                    if session.state == RecorderState::Recording {
                        session.elapsed_seconds += 1;
                        let elapsed_seconds = session.elapsed_seconds;
                        drop(session);
                        self.emit(RecorderEvent::Tick { elapsed_seconds });
                    }
                }

                _ = &mut grace, if grace_armed => {
                    grace_armed = false;
                    if self
                        .complete(CompletionTrigger::GraceTimeout, &mut audio_chunks)
                        .await
                    {
                        break;
                    }
                }
            }
        }

        self.shutdown(capture, recognition).await;
    }

    /// Emit the completion event, once. Returns false when another path
    /// already fired (or no stop is pending), in which case nothing happens.
    async fn complete(&self, trigger: CompletionTrigger, audio_chunks: &mut Vec<Vec<u8>>) -> bool {
        let transcript = {
            let mut session = self.session.lock().await;
            if !session.pending_completion {
                return false;
            }
            session.pending_completion = false;
            session.state = RecorderState::Idle;
            session.live_transcript()
        };

        let audio = if audio_chunks.is_empty() {
            None
        } else {
            let mut artifact = Vec::new();
            for chunk in audio_chunks.drain(..) {
                artifact.extend_from_slice(&chunk);
            }
            Some(artifact)
        };

        info!(
            "recording complete ({:?}): {} bytes audio, {} chars transcript",
            trigger,
            audio.as_ref().map_or(0, Vec::len),
            transcript.chars().count()
        );
        // Unlike the lossy progress events, the completion must reach the
        // subscriber even when the buffer is full. The loop exits right
        // after, so blocking here cannot stall the session.
        let completed = RecorderEvent::Completed(Completion {
            audio,
            transcript,
            trigger,
        });
        if self.events_tx.send(completed).await.is_err() {
            warn!("completion event dropped: subscriber gone");
        }
        true
    }

    /// Release the device on every exit path so no recording indicator
    /// leaks past the session.
    async fn shutdown(
        &self,
        mut capture: Box<dyn CaptureSource>,
        mut recognition: Option<Box<dyn RecognitionSource>>,
    ) {
        if let Err(e) = capture.stop().await {
            warn!("capture release failed: {e:#}");
        }
        if let Some(engine) = recognition.as_mut() {
            if let Err(e) = engine.stop().await {
                warn!("recognition release failed: {e:#}");
            }
        }
    }

    fn emit(&self, event: RecorderEvent) {
        if self.events_tx.try_send(event).is_err() {
            warn!("recorder event dropped: subscriber not keeping up");
        }
    }
}

async fn recv_recognition(
    rx: &mut Option<mpsc::Receiver<RecognitionEvent>>,
) -> Option<RecognitionEvent> {
    match rx.as_mut() {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
