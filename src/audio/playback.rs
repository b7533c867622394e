use std::io::{BufReader, Cursor};
use std::path::Path;

use anyhow::{Context, Result};
use rodio::buffer::SamplesBuffer;
use rodio::source::Source;
use rodio::{Decoder, OutputStream, Sink};

use crate::audio::AudioClip;

/// Play an audio file through the default output device, blocking until done.
pub fn play_file(path: &Path) -> Result<()> {
    let file = std::fs::File::open(path).with_context(|| format!("failed to open {:?}", path))?;
    let decoder = Decoder::new(BufReader::new(file)).context("unsupported audio format")?;
    block_until_done(decoder.convert_samples::<f32>())
}

/// Play encoded audio bytes (e.g. guide audio from a synthesizer).
pub fn play_encoded(bytes: Vec<u8>) -> Result<()> {
    let decoder = Decoder::new(Cursor::new(bytes)).context("unsupported audio format")?;
    block_until_done(decoder.convert_samples::<f32>())
}

/// Play a mono clip, blocking until done. The sink handles channel and rate
/// conversion for the output device.
pub fn play_clip(clip: &AudioClip) -> Result<()> {
    block_until_done(SamplesBuffer::new(1, clip.sample_rate, clip.samples.clone()))
}

fn block_until_done<S>(source: S) -> Result<()>
where
    S: Source<Item = f32> + Send + 'static,
{
    let (_stream, handle) = OutputStream::try_default().context("failed to open output stream")?;
    let sink = Sink::try_new(&handle).context("failed to create sink")?;
    sink.append(source);
    sink.sleep_until_end();
    Ok(())
}
