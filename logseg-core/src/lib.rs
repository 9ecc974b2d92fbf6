//! # logseg-core — Sentence Segmentation for Noisy Drone Flight Logs
//!
//! Drone flight logs carry free-text app messages that cram several
//! notifications into one cell, drop terminal punctuation, and wrap words in
//! stray quotes. This crate segments those messages into clean sentence
//! spans with a token-classification model in the middle and deterministic
//! text algorithms on both sides of it.
//!
//! ## Architecture
//!
//! The data flows through a linear pipeline:
//!
//! 1. **Pretokenization** ([`tokenizer`]): each raw message becomes a stable
//!    sequence of tokens, with punctuation normalized and separated.
//! 2. **Tagging** ([`model`]): an exchangeable model labels every token with
//!    a boundary tag (`B-`/`I-`/`E-`/`S-`/`O`), one batched call per run.
//!    [`rule_based`] provides the built-in punctuation-driven backend.
//! 3. **Reconstruction** ([`tagger`]): a single-pass automaton decodes each
//!    message's label sequence back into sentence strings.
//!
//! Both deterministic stages are pure and stateless, so [`pipeline`] runs
//! them in parallel across messages; only the model call is batched.
//!
//! ## Example
//!
//! ```rust
//! use logseg_core::{RuleTagger, SegmentationPipeline};
//!
//! let pipeline = SegmentationPipeline::new(RuleTagger::new());
//! let messages = vec!["Compass error. Calibrate before takeoff".to_string()];
//!
//! let rows = pipeline.segment_batch(&messages).unwrap();
//! assert_eq!(rows[0], ["Compass error", "Calibrate before takeoff"]);
//! ```

pub mod model;
pub mod pipeline;
pub mod rule_based;
pub mod tagger;
pub mod tokenizer;

pub use model::{SentenceTagger, TaggerError};
pub use pipeline::{PipelineError, SegmentationPipeline};
pub use rule_based::RuleTagger;
pub use tagger::{
    reconstruct_sentences, reconstruct_tagged, AlignmentError, Category, TaggedToken,
};
pub use tokenizer::tokenize;
