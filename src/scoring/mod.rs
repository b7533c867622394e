//! Target-vs-transcript scoring: text normalization, character error rate,
//! and opcode-level alignment for diff rendering.
//!
//! Everything in this module is a pure function over strings. Scoring runs on
//! normalized text; alignment can run on either raw or normalized text
//! depending on [`AlignmentMode`].

pub mod cer;
pub mod diff;
pub mod normalize;

pub use cer::{score, ScoreResult};
pub use diff::{alignment_spans, opcodes, AlignmentMode, AlignmentSpan, DiffTag, Opcode, SpanTag};
pub use normalize::normalize;
