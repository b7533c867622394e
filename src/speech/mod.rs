//! Seams to the speech engines: transcription, synthesis, and sentence
//! generation. The scoring core never touches these; it only ever sees the
//! resolved strings.

pub mod whisper;

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

use crate::audio::AudioClip;
use crate::texts::Locale;

/// Sample rate the transcriber expects its input at.
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

/// Convenient alias for results returned by speech engines.
pub type Result<T> = std::result::Result<T, SpeechError>;

/// Lightweight error type for speech-engine failures.
#[derive(Debug, Clone)]
pub struct SpeechError {
    message: Arc<str>,
}

impl SpeechError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Arc::from(message.into()),
        }
    }
}

impl Display for SpeechError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for SpeechError {}

/// Converts a recorded clip into text.
pub trait Transcriber {
    fn transcribe(&self, clip: &AudioClip) -> Result<String>;
}

/// Renders a sentence as encoded audio bytes (guide audio).
pub trait Synthesizer {
    fn synthesize(&self, text: &str) -> Result<Vec<u8>>;
}

/// Produces a fresh practice sentence for a topic.
pub trait SentenceGenerator {
    fn generate(&self, topic: &str, locale: Locale) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::SpeechError;

    #[test]
    fn error_carries_its_message() {
        let err = SpeechError::new("model not found");
        assert_eq!(err.to_string(), "model not found");
    }
}
