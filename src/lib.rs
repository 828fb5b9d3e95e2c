pub mod audio;
pub mod config;
pub mod http;
pub mod recorder;
pub mod sources;
pub mod summarize;

pub use audio::{wav_bytes, write_wav_file};
pub use config::{Config, SummarizerConfig};
pub use http::{create_router, AppState};
pub use recorder::{
    format_elapsed, Completion, CompletionTrigger, Recorder, RecorderConfig, RecorderError,
    RecorderEvent, RecorderState, SessionSnapshot,
};
pub use sources::{
    CaptureEvent, CaptureSource, ChannelCapture, ChannelRecognition, QueuedSources,
    RecognitionEvent, RecognitionSource, SourceFactory, TranscriptFragment,
};
pub use summarize::{pad_to_minimum, SummarizeClient, SummarizeError, MIN_UPSTREAM_CHARS};
