use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use symphonia::core::audio::{AudioBuffer, AudioBufferRef, Signal};
use symphonia::core::codecs::{Decoder, DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::conv::IntoSample;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::sample::Sample;
use tracing::debug;

use crate::audio::AudioClip;

struct OpenedTrack {
    reader: Box<dyn FormatReader>,
    decoder: Box<dyn Decoder>,
    track_id: u32,
    sample_rate: u32,
}

/// Decode an audio file (any supported container/codec) to a mono clip.
pub fn decode_audio<P: AsRef<Path>>(path: P) -> Result<AudioClip> {
    let path = path.as_ref();
    let mut track = open_track(path)?;

    let mut samples = Vec::new();
    loop {
        let packet = match track.reader.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(err))
                if err.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(err) => return Err(err).context("failed to read packet"),
        };
        if packet.track_id() != track.track_id {
            continue;
        }
        let decoded = track
            .decoder
            .decode(&packet)
            .context("failed to decode audio packet")?;
        append_mono(&decoded, &mut samples);
    }

    debug!(
        samples = samples.len(),
        sample_rate = track.sample_rate,
        path = %path.display(),
        "decoded audio file"
    );
    Ok(AudioClip {
        samples,
        sample_rate: track.sample_rate,
    })
}

/// Probe the container and set up a decoder for its first audio track.
fn open_track(path: &Path) -> Result<OpenedTrack> {
    let file =
        File::open(path).with_context(|| format!("failed to open audio file {:?}", path))?;
    let source = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(extension) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(extension);
    }

    let reader = symphonia::default::get_probe()
        .format(
            &hint,
            source,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .context("failed to probe audio format")?
        .format;

    let (track_id, params) = reader
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .map(|t| (t.id, t.codec_params.clone()))
        .context("no audio tracks found in file")?;
    let sample_rate = params
        .sample_rate
        .context("sample rate not specified in audio file")?;
    let decoder = symphonia::default::get_codecs()
        .make(&params, &DecoderOptions::default())
        .context("failed to create decoder")?;

    Ok(OpenedTrack {
        reader,
        decoder,
        track_id,
        sample_rate,
    })
}

/// Mix a decoded buffer down to mono f32 and append it to `out`.
fn append_mono(decoded: &AudioBufferRef, out: &mut Vec<f32>) {
    match decoded {
        AudioBufferRef::U8(buf) => mix_buffer(buf.as_ref(), out),
        AudioBufferRef::U16(buf) => mix_buffer(buf.as_ref(), out),
        AudioBufferRef::U24(buf) => mix_buffer(buf.as_ref(), out),
        AudioBufferRef::U32(buf) => mix_buffer(buf.as_ref(), out),
        AudioBufferRef::S8(buf) => mix_buffer(buf.as_ref(), out),
        AudioBufferRef::S16(buf) => mix_buffer(buf.as_ref(), out),
        AudioBufferRef::S24(buf) => mix_buffer(buf.as_ref(), out),
        AudioBufferRef::S32(buf) => mix_buffer(buf.as_ref(), out),
        AudioBufferRef::F32(buf) => mix_buffer(buf.as_ref(), out),
        AudioBufferRef::F64(buf) => mix_buffer(buf.as_ref(), out),
    }
}

fn mix_buffer<S>(buf: &AudioBuffer<S>, out: &mut Vec<f32>)
where
    S: Sample + IntoSample<f32>,
{
    let channels = buf.spec().channels.count();
    if channels == 0 {
        return;
    }
    let frames = buf.frames();
    out.reserve(frames);
    for frame in 0..frames {
        let mut sum = 0.0f32;
        for ch in 0..channels {
            sum += buf.chan(ch)[frame].into_sample();
        }
        out.push(sum / channels as f32);
    }
}
