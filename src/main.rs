use std::io::{self, BufRead};
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pronko::audio::capture::RecordConfig;
use pronko::audio::{capture, decoder, encoder, playback, resample, AudioClip};
use pronko::cli::{Cli, Command, ModelArgs, PracticeArgs, ScoreArgs};
use pronko::config::AppConfig;
use pronko::render::{self, RenderOptions};
use pronko::sentences::SentenceBank;
use pronko::session::{evaluate, PracticeSession};
use pronko::speech::whisper::WhisperTranscriber;
use pronko::speech::TARGET_SAMPLE_RATE;
use pronko::texts::{ui_text, UiText};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Score(args) => handle_score(&args),
        Command::Practice(args) => handle_practice(&args),
    }
}

fn handle_score(args: &ScoreArgs) -> Result<()> {
    args.validate().context("invalid score arguments")?;
    let texts = ui_text(args.locale);

    let transcript = match (&args.predicted, &args.recording) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => transcribe_file(path, &args.model, texts)?,
        (None, None) => bail!("no prediction source provided"), // unreachable after validate
    };

    let report = evaluate(&args.standard, transcript, args.alignment_mode());
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let mut stdout = io::stdout().lock();
        render::render_report(
            &mut stdout,
            &report,
            texts,
            RenderOptions {
                color: !args.no_color,
            },
        )?;
    }
    Ok(())
}

fn transcribe_file(path: &Path, model: &ModelArgs, texts: &UiText) -> Result<String> {
    let config = AppConfig::resolve(model.whisper_model.clone());
    let transcriber = WhisperTranscriber::load(&config.whisper_model)?;
    let clip = decoder::decode_audio(path)?;
    let clip = resample::resample_clip(&clip, TARGET_SAMPLE_RATE)?;
    println!("{}", texts.transcribing);
    Ok(transcriber.transcribe(&clip)?)
}

fn handle_practice(args: &PracticeArgs) -> Result<()> {
    args.validate().context("invalid practice arguments")?;
    let texts = ui_text(args.locale);

    let bank = match &args.sentences {
        Some(path) => SentenceBank::from_file(path)?,
        None => SentenceBank::builtin(),
    };
    let config = AppConfig::resolve(args.model.whisper_model.clone());
    let transcriber = WhisperTranscriber::load(&config.whisper_model)?;

    let mut rng = rand::thread_rng();
    let first = bank.random(&mut rng).to_string();
    let mut session = PracticeSession::new(first, Box::new(transcriber))
        .with_alignment_mode(args.alignment_mode());

    let record_config = RecordConfig::new(
        TARGET_SAMPLE_RATE,
        Duration::from_secs_f64(args.record_seconds),
    )
    .with_device(args.device.clone());
    let render_options = RenderOptions {
        color: !args.no_color,
    };

    println!("{}", texts.title);
    println!("{}", texts.header);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut last_recording: Option<AudioClip> = None;
    loop {
        println!();
        println!("{}: {}", texts.compare_standard, session.sentence());
        play_guide_audio(args, &mut session, texts)?;

        println!("{}", texts.controls);
        let Some(line) = lines.next() else {
            break;
        };
        match line?.trim() {
            "q" => break,
            "n" => {
                println!("{}", texts.new_sentence);
                session.next_random(&bank, &mut rng);
                continue;
            }
            "r" => {
                if let Some(clip) = &last_recording {
                    println!("{}", texts.my_audio);
                    playback::play_clip(clip)?;
                }
                continue;
            }
            _ => {}
        }

        println!("{}", texts.recording);
        let clip = capture::record_clip(&record_config)?;
        if let Some(path) = &args.save_recording {
            encoder::write_wav(&clip, path)?;
        }

        println!("{}", texts.transcribing);
        match session.attempt(&clip) {
            Ok(report) => {
                let mut stdout = io::stdout().lock();
                render::render_report(&mut stdout, &report, texts, render_options)?;
            }
            Err(err) => eprintln!("{:#}", err),
        }
        last_recording = Some(clip);
    }
    Ok(())
}

fn play_guide_audio(
    args: &PracticeArgs,
    session: &mut PracticeSession,
    texts: &UiText,
) -> Result<()> {
    if let Some(path) = &args.guide_audio {
        playback::play_file(path)?;
        return Ok(());
    }
    if let Some(bytes) = session.guide_audio()? {
        println!("{}", texts.synthesizing);
        playback::play_encoded(bytes.to_vec())?;
    }
    Ok(())
}
