use std::path::PathBuf;

use anyhow::{ensure, Result};
use clap::{Args, Parser, Subcommand};

use crate::scoring::AlignmentMode;
use crate::texts::Locale;

#[derive(Parser, Debug)]
#[command(
    name = "pronko",
    version,
    about = "Pronunciation practice: record, transcribe, and score against a target sentence"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Score a transcript or a recording against a target sentence.
    Score(ScoreArgs),
    /// Run an interactive practice loop on the terminal.
    Practice(PracticeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
    /// Whisper model file (overrides the PRONKO_WHISPER_MODEL environment
    /// variable).
    #[arg(long = "whisper-model", value_name = "PATH")]
    pub whisper_model: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    /// Target sentence to score against.
    #[arg(long, value_name = "TEXT")]
    pub standard: String,

    /// Transcript text to score directly (no transcription).
    #[arg(long, value_name = "TEXT", conflicts_with = "recording")]
    pub predicted: Option<String>,

    /// Audio recording to transcribe and score.
    #[arg(long, value_name = "PATH")]
    pub recording: Option<PathBuf>,

    /// Diff the normalized texts instead of the raw ones.
    #[arg(long)]
    pub normalized_diff: bool,

    /// Emit the report as JSON.
    #[arg(long)]
    pub json: bool,

    /// Disable colored diff output.
    #[arg(long)]
    pub no_color: bool,

    /// Label language for the rendered report.
    #[arg(long, value_enum, default_value_t = Locale::Ko)]
    pub locale: Locale,

    #[command(flatten)]
    pub model: ModelArgs,
}

impl ScoreArgs {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.predicted.is_some() || self.recording.is_some(),
            "provide a transcript via --predicted or a file via --recording"
        );
        if let Some(path) = &self.recording {
            ensure!(path.is_file(), "recording file does not exist: {:?}", path);
        }
        Ok(())
    }

    pub fn alignment_mode(&self) -> AlignmentMode {
        alignment_mode(self.normalized_diff)
    }
}

#[derive(Args, Debug, Clone)]
pub struct PracticeArgs {
    /// JSON file with practice sentences (array of strings); built-in bank
    /// when omitted.
    #[arg(long, value_name = "PATH")]
    pub sentences: Option<PathBuf>,

    /// Recording length per attempt, in seconds.
    #[arg(long, default_value_t = 5.0, value_name = "SECONDS")]
    pub record_seconds: f64,

    /// Pre-synthesized guide audio file to play before each attempt.
    #[arg(long, value_name = "PATH")]
    pub guide_audio: Option<PathBuf>,

    /// Write each attempt's recording to this WAV path.
    #[arg(long, value_name = "PATH")]
    pub save_recording: Option<PathBuf>,

    /// Input device name; default input device when omitted.
    #[arg(long)]
    pub device: Option<String>,

    /// Diff the normalized texts instead of the raw ones.
    #[arg(long)]
    pub normalized_diff: bool,

    /// Disable colored diff output.
    #[arg(long)]
    pub no_color: bool,

    /// Label language for prompts and the rendered report.
    #[arg(long, value_enum, default_value_t = Locale::Ko)]
    pub locale: Locale,

    #[command(flatten)]
    pub model: ModelArgs,
}

impl PracticeArgs {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.record_seconds.is_finite() && self.record_seconds > 0.0,
            "record length must be positive, got: {}",
            self.record_seconds
        );
        if let Some(path) = &self.sentences {
            ensure!(path.is_file(), "sentence bank does not exist: {:?}", path);
        }
        if let Some(path) = &self.guide_audio {
            ensure!(
                path.is_file(),
                "guide audio file does not exist: {:?}",
                path
            );
        }
        Ok(())
    }

    pub fn alignment_mode(&self) -> AlignmentMode {
        alignment_mode(self.normalized_diff)
    }
}

fn alignment_mode(normalized: bool) -> AlignmentMode {
    if normalized {
        AlignmentMode::Normalized
    } else {
        AlignmentMode::Raw
    }
}
