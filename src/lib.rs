//! Pronunciation-practice toolkit.
//!
//! The scoring core ([`scoring`]) is pure string math: normalization,
//! character error rate, and opcode alignment. Around it sit the sentence
//! bank, the speech-engine seams (transcription, synthesis, generation), the
//! audio plumbing, and the terminal session that ties them together.

pub mod audio;
pub mod cli;
pub mod config;
pub mod render;
pub mod scoring;
pub mod sentences;
pub mod session;
pub mod speech;
pub mod texts;
