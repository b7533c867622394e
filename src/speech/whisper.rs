//! Local speech-to-text via whisper.cpp bindings.

use std::path::Path;

use tracing::{debug, info};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use super::{Result, SpeechError, Transcriber, TARGET_SAMPLE_RATE};
use crate::audio::AudioClip;

/// Transcriber backed by a local whisper.cpp model.
///
/// Input clips must be mono at [`TARGET_SAMPLE_RATE`]; resampling is the
/// caller's job. A multilingual model (e.g. `ggml-base.bin`) is required for
/// Korean input.
pub struct WhisperTranscriber {
    ctx: WhisperContext,
}

impl WhisperTranscriber {
    pub fn load(model_path: &Path) -> Result<Self> {
        info!(model = %model_path.display(), "loading whisper model");
        let ctx = WhisperContext::new_with_params(
            &model_path.to_string_lossy(),
            WhisperContextParameters::default(),
        )
        .map_err(|err| {
            SpeechError::new(format!(
                "failed to load whisper model at {:?}: {err}. Download one with: \
                 wget https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-base.bin -P ./models/",
                model_path
            ))
        })?;
        Ok(Self { ctx })
    }
}

impl Transcriber for WhisperTranscriber {
    fn transcribe(&self, clip: &AudioClip) -> Result<String> {
        if clip.sample_rate != TARGET_SAMPLE_RATE {
            return Err(SpeechError::new(format!(
                "transcriber expects {} Hz input, got {} Hz",
                TARGET_SAMPLE_RATE, clip.sample_rate
            )));
        }
        if clip.samples.is_empty() {
            return Ok(String::new());
        }

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        // whisper.cpp assumes English unless told otherwise; the input here is
        // usually Korean, so let the model detect the language.
        params.set_language(Some("auto"));
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);
        params.set_translate(false);

        let mut state = self
            .ctx
            .create_state()
            .map_err(|err| SpeechError::new(format!("failed to create whisper state: {err}")))?;
        state
            .full(params, &clip.samples)
            .map_err(|err| SpeechError::new(format!("whisper inference failed: {err}")))?;

        let mut transcript = String::new();
        for segment in state.as_iter() {
            let text = segment
                .to_str()
                .map_err(|err| SpeechError::new(format!("failed to read segment text: {err}")))?;
            transcript.push_str(text);
        }
        let transcript = transcript.trim().to_string();
        debug!(chars = transcript.chars().count(), "transcription complete");
        Ok(transcript)
    }
}

#[cfg(test)]
mod tests {
    use super::WhisperTranscriber;
    use crate::audio::AudioClip;
    use crate::speech::Transcriber;
    use std::path::Path;

    #[test]
    fn load_fails_cleanly_without_model() {
        let result = WhisperTranscriber::load(Path::new("/nonexistent/ggml-base.bin"));
        assert!(result.is_err());
    }

    #[test]
    #[ignore] // Requires a downloaded whisper model at ./models/ggml-base.bin
    fn transcribes_silence_to_empty_or_noise() {
        let transcriber =
            WhisperTranscriber::load(Path::new("./models/ggml-base.bin")).unwrap();
        let clip = AudioClip::from_samples(vec![0.0; 16_000], 16_000);
        let _ = transcriber.transcribe(&clip);
    }
}
