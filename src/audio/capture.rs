use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{BufferSize, Device, FromSample, Sample, SampleFormat, SizedSample, Stream, StreamConfig};
use tracing::info;

use crate::audio::{resample, AudioClip};

/// Fixed-duration recording settings.
#[derive(Clone, Debug)]
pub struct RecordConfig {
    pub device_name: Option<String>,
    /// Rate of the returned clip; the device rate is resampled to this.
    pub sample_rate: u32,
    pub duration: Duration,
}

impl RecordConfig {
    pub fn new(sample_rate: u32, duration: Duration) -> Self {
        Self {
            device_name: None,
            sample_rate,
            duration,
        }
    }

    pub fn with_device(mut self, device_name: Option<String>) -> Self {
        self.device_name = device_name;
        self
    }
}

/// Record from the input device for the configured duration, mixed to mono
/// and resampled to the configured rate.
pub fn record_clip(config: &RecordConfig) -> Result<AudioClip> {
    let device = open_input(config.device_name.as_deref())?;
    let device_name = device.name().unwrap_or_else(|_| "<unnamed>".into());
    let supported = device
        .default_input_config()
        .context("failed to query default input config")?;
    let device_rate = supported.sample_rate().0;
    let channels = supported.channels() as usize;
    let stream_config = StreamConfig {
        channels: supported.channels(),
        sample_rate: supported.sample_rate(),
        buffer_size: BufferSize::Default,
    };

    info!(
        device = %device_name,
        seconds = config.duration.as_secs_f64(),
        rate = device_rate,
        "recording"
    );

    let wanted = frame_target(config.duration, device_rate);
    // Callback chunks are ~1024 frames on most backends; leave headroom so a
    // slow reader never stalls the audio thread.
    let (sender, receiver) = mpsc::sync_channel::<Vec<f32>>((wanted / 1024).max(4) + 4);
    let done = Arc::new(AtomicBool::new(false));

    let stream = match supported.sample_format() {
        SampleFormat::F32 => input_stream::<f32>(&device, &stream_config, channels, sender, &done),
        SampleFormat::I16 => input_stream::<i16>(&device, &stream_config, channels, sender, &done),
        SampleFormat::U16 => input_stream::<u16>(&device, &stream_config, channels, sender, &done),
        SampleFormat::I8 => input_stream::<i8>(&device, &stream_config, channels, sender, &done),
        SampleFormat::U8 => input_stream::<u8>(&device, &stream_config, channels, sender, &done),
        SampleFormat::I32 => input_stream::<i32>(&device, &stream_config, channels, sender, &done),
        SampleFormat::U32 => input_stream::<u32>(&device, &stream_config, channels, sender, &done),
        SampleFormat::F64 => input_stream::<f64>(&device, &stream_config, channels, sender, &done),
        other => Err(anyhow!("unsupported input sample format {:?}", other)),
    }?;
    stream.play().context("failed to start capture stream")?;

    let samples = drain(&receiver, wanted, config.duration);
    done.store(true, Ordering::SeqCst);
    stream.pause().ok();
    drop(stream);

    let captured = AudioClip {
        samples,
        sample_rate: device_rate,
    };
    resample::resample_clip(&captured, config.sample_rate)
}

fn open_input(name: Option<&str>) -> Result<Device> {
    let host = cpal::default_host();
    match name {
        Some(wanted) => host
            .input_devices()
            .context("listing input devices failed")?
            .find(|device| device.name().map(|n| n == wanted).unwrap_or(false))
            .ok_or_else(|| anyhow!("input device '{}' not found", wanted)),
        None => host
            .default_input_device()
            .context("no default input device available"),
    }
}

fn input_stream<T>(
    device: &Device,
    config: &StreamConfig,
    channels: usize,
    sender: SyncSender<Vec<f32>>,
    done: &Arc<AtomicBool>,
) -> Result<Stream>
where
    T: SizedSample,
    f32: FromSample<T>,
{
    let done = done.clone();
    let stream = device
        .build_input_stream(
            config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                if done.load(Ordering::Relaxed) {
                    return;
                }
                let _ = sender.try_send(downmix(data, channels));
            },
            |err| eprintln!("audio input stream error: {err}"),
            None,
        )
        .context("failed to build input stream")?;
    Ok(stream)
}

/// Average each interleaved frame down to one f32 sample.
fn downmix<T>(data: &[T], channels: usize) -> Vec<f32>
where
    T: Sample,
    f32: FromSample<T>,
{
    if channels == 0 {
        return Vec::new();
    }
    data.chunks(channels)
        .map(|frame| {
            frame.iter().map(|&s| f32::from_sample(s)).sum::<f32>() / frame.len() as f32
        })
        .collect()
}

/// Pull mixed chunks off the callback channel until the target frame count is
/// reached. Bails out early if the device stops delivering for well past the
/// requested duration.
fn drain(receiver: &Receiver<Vec<f32>>, wanted: usize, duration: Duration) -> Vec<f32> {
    let deadline = Instant::now() + duration * 2 + Duration::from_secs(2);
    let mut samples = Vec::with_capacity(wanted);
    while samples.len() < wanted && Instant::now() < deadline {
        match receiver.recv_timeout(Duration::from_millis(50)) {
            Ok(chunk) => {
                let room = wanted - samples.len();
                samples.extend(chunk.into_iter().take(room));
            }
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    samples
}

fn frame_target(duration: Duration, sample_rate: u32) -> usize {
    (duration.as_secs_f64() * sample_rate as f64).ceil() as usize
}

#[cfg(test)]
mod tests {
    use super::{downmix, frame_target};
    use std::time::Duration;

    #[test]
    fn downmix_averages_each_frame() {
        let mixed = downmix(&[0.8f32, 0.2, -0.4, 0.4], 2);
        assert_eq!(mixed.len(), 2);
        assert!((mixed[0] - 0.5).abs() < 1e-6);
        assert!(mixed[1].abs() < 1e-6);
    }

    #[test]
    fn downmix_converts_integer_samples() {
        let mixed = downmix(&[i16::MAX, i16::MAX], 2);
        assert!((mixed[0] - 1.0).abs() < 1e-3);
    }

    #[test]
    fn downmix_of_empty_input_is_empty() {
        assert!(downmix::<f32>(&[], 2).is_empty());
        assert!(downmix(&[0.1f32], 0).is_empty());
    }

    #[test]
    fn frame_target_rounds_up() {
        assert_eq!(frame_target(Duration::from_secs(2), 16_000), 32_000);
        assert_eq!(frame_target(Duration::from_millis(500), 16_000), 8_000);
        assert_eq!(frame_target(Duration::from_micros(1), 16_000), 1);
    }
}
