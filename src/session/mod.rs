//! Practice-session orchestration: current sentence, cached guide audio, and
//! the transcribe → score → align pipeline for one attempt.

use anyhow::Result;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::audio::{resample, AudioClip};
use crate::scoring::{self, AlignmentMode, AlignmentSpan, ScoreResult};
use crate::sentences::SentenceBank;
use crate::speech::{self, SentenceGenerator, SpeechError, Synthesizer, Transcriber};
use crate::texts::Locale;

/// Everything produced by one practice attempt.
#[derive(Debug, Clone, Serialize)]
pub struct AttemptReport {
    pub standard: String,
    pub transcript: String,
    pub score: ScoreResult,
    pub spans: Vec<AlignmentSpan>,
}

/// Score a resolved transcript against the standard sentence.
pub fn evaluate(standard: &str, transcript: String, mode: AlignmentMode) -> AttemptReport {
    let score = scoring::score(&transcript, standard);
    let spans = scoring::alignment_spans(standard, &transcript, mode);
    AttemptReport {
        standard: standard.to_string(),
        transcript,
        score,
        spans,
    }
}

/// One learner-facing practice session. Engines are explicit handles: a
/// transcriber is required, guide-audio synthesis and sentence generation are
/// optional. Guide audio is cached per sentence and dropped when the
/// sentence changes.
pub struct PracticeSession {
    transcriber: Box<dyn Transcriber>,
    synthesizer: Option<Box<dyn Synthesizer>>,
    generator: Option<Box<dyn SentenceGenerator>>,
    alignment_mode: AlignmentMode,
    sentence: String,
    guide_audio: Option<Vec<u8>>,
}

impl PracticeSession {
    pub fn new(sentence: impl Into<String>, transcriber: Box<dyn Transcriber>) -> Self {
        Self {
            transcriber,
            synthesizer: None,
            generator: None,
            alignment_mode: AlignmentMode::default(),
            sentence: sentence.into(),
            guide_audio: None,
        }
    }

    pub fn with_synthesizer(mut self, synthesizer: Box<dyn Synthesizer>) -> Self {
        self.synthesizer = Some(synthesizer);
        self
    }

    pub fn with_generator(mut self, generator: Box<dyn SentenceGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_alignment_mode(mut self, mode: AlignmentMode) -> Self {
        self.alignment_mode = mode;
        self
    }

    pub fn sentence(&self) -> &str {
        &self.sentence
    }

    pub fn alignment_mode(&self) -> AlignmentMode {
        self.alignment_mode
    }

    /// Replace the current sentence, invalidating cached guide audio.
    pub fn set_sentence(&mut self, sentence: impl Into<String>) {
        self.sentence = sentence.into();
        self.guide_audio = None;
        info!(sentence = %self.sentence, "practice sentence changed");
    }

    /// Rotate to a random sentence from the bank, avoiding the current one.
    pub fn next_random<R: Rng>(&mut self, bank: &SentenceBank, rng: &mut R) -> &str {
        let next = bank.random_excluding(Some(&self.sentence), rng).to_string();
        self.set_sentence(next);
        &self.sentence
    }

    /// Ask the configured generator for a sentence about `topic` and make it
    /// the current sentence.
    pub fn generate_sentence(&mut self, topic: &str, locale: Locale) -> speech::Result<&str> {
        let generator = self
            .generator
            .as_ref()
            .ok_or_else(|| SpeechError::new("no sentence generator configured"))?;
        let sentence = generator.generate(topic, locale)?;
        self.set_sentence(sentence);
        Ok(&self.sentence)
    }

    /// Guide audio for the current sentence. `None` when no synthesizer is
    /// configured; synthesized once and cached otherwise.
    pub fn guide_audio(&mut self) -> speech::Result<Option<&[u8]>> {
        if self.guide_audio.is_none() {
            match &self.synthesizer {
                Some(synthesizer) => {
                    info!(sentence = %self.sentence, "synthesizing guide audio");
                    self.guide_audio = Some(synthesizer.synthesize(&self.sentence)?);
                }
                None => return Ok(None),
            }
        }
        Ok(self.guide_audio.as_deref())
    }

    /// Run one attempt: resample the recording to the transcriber's rate,
    /// transcribe it, and score the transcript against the current sentence.
    pub fn attempt(&self, recording: &AudioClip) -> Result<AttemptReport> {
        let resampled = resample::resample_clip(recording, speech::TARGET_SAMPLE_RATE)?;
        debug!(
            seconds = resampled.duration_secs(),
            "transcribing learner recording"
        );
        let transcript = self.transcriber.transcribe(&resampled)?;
        info!(transcript = %transcript, "attempt transcribed");
        Ok(evaluate(&self.sentence, transcript, self.alignment_mode))
    }
}
