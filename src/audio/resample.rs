use anyhow::{ensure, Result};

use crate::audio::AudioClip;

/// Resample a clip to `target_rate` with linear interpolation. Returns a
/// clone when the clip is already at the target rate.
pub fn resample_clip(clip: &AudioClip, target_rate: u32) -> Result<AudioClip> {
    ensure!(clip.sample_rate > 0, "source sample rate must be positive");
    ensure!(target_rate > 0, "target sample rate must be positive");
    if clip.samples.is_empty() || clip.sample_rate == target_rate {
        return Ok(AudioClip {
            samples: clip.samples.clone(),
            sample_rate: target_rate,
        });
    }
    Ok(AudioClip {
        samples: interpolate(&clip.samples, clip.sample_rate, target_rate),
        sample_rate: target_rate,
    })
}

fn interpolate(samples: &[f32], source_rate: u32, target_rate: u32) -> Vec<f32> {
    let ratio = target_rate as f32 / source_rate as f32;
    let output_len = ((samples.len() as f32) * ratio).ceil().max(1.0) as usize;
    let last = samples.len() - 1;
    let mut output = Vec::with_capacity(output_len);
    for i in 0..output_len {
        let position = i as f32 / ratio;
        let left = position.floor() as usize;
        let right = (left + 1).min(last);
        let t = position - left as f32;
        output.push(samples[left] * (1.0 - t) + samples[right] * t);
    }
    output
}
