use std::path::Path;

use anyhow::{Context, Result};

use crate::audio::AudioClip;

/// Write a mono clip as a 16-bit PCM WAV file.
pub fn write_wav<P: AsRef<Path>>(clip: &AudioClip, path: P) -> Result<()> {
    let path = path.as_ref();
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: clip.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)
        .with_context(|| format!("failed to create WAV file {:?}", path))?;
    for &sample in &clip.samples {
        let scaled = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        writer
            .write_sample(scaled)
            .context("failed to write audio sample")?;
    }
    writer.finalize().context("failed to finalize WAV file")?;
    Ok(())
}
