use std::f32::consts::PI;

use pronko::audio::{decoder, encoder, resample, AudioClip};

const SAMPLE_RATE: u32 = 16_000;

fn sine_wave(frequency: f32, duration_secs: f32) -> Vec<f32> {
    let total = (SAMPLE_RATE as f32 * duration_secs) as usize;
    (0..total)
        .map(|index| {
            let t = index as f32 / SAMPLE_RATE as f32;
            (2.0 * PI * frequency * t).sin() * 0.5
        })
        .collect()
}

#[test]
fn wav_roundtrip_preserves_shape_and_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clip.wav");

    let clip = AudioClip::from_samples(sine_wave(440.0, 0.25), SAMPLE_RATE);
    encoder::write_wav(&clip, &path).unwrap();

    let decoded = decoder::decode_audio(&path).unwrap();
    assert_eq!(decoded.sample_rate, SAMPLE_RATE);
    assert_eq!(decoded.samples.len(), clip.samples.len());

    // 16-bit quantization bounds the roundtrip error.
    let max_delta = clip
        .samples
        .iter()
        .zip(&decoded.samples)
        .map(|(a, b)| (a - b).abs())
        .fold(0.0f32, f32::max);
    assert!(max_delta < 1e-3, "roundtrip error too large: {max_delta}");
}

#[test]
fn out_of_range_samples_are_clamped_on_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hot.wav");

    let clip = AudioClip::from_samples(vec![2.0, -2.0, 0.0], SAMPLE_RATE);
    encoder::write_wav(&clip, &path).unwrap();

    let decoded = decoder::decode_audio(&path).unwrap();
    assert!(decoded.samples.iter().all(|s| s.abs() <= 1.0));
}

#[test]
fn decode_fails_for_missing_file() {
    assert!(decoder::decode_audio("/nonexistent/clip.wav").is_err());
}

#[test]
fn resampled_recording_matches_transcriber_rate() {
    let clip = AudioClip::from_samples(sine_wave(440.0, 0.25), SAMPLE_RATE);
    let upsampled = resample::resample_clip(&clip, 48_000).unwrap();
    assert_eq!(upsampled.sample_rate, 48_000);

    let back = resample::resample_clip(&upsampled, SAMPLE_RATE).unwrap();
    assert_eq!(back.sample_rate, SAMPLE_RATE);
    // Duration is preserved within one sample of rounding.
    assert!((back.samples.len() as i64 - clip.samples.len() as i64).abs() <= 2);
}
