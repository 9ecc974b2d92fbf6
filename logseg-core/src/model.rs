//! # Model Boundary
//!
//! The token-classification model that labels each token is an external
//! collaborator: training, loading, and hardware acceleration all live
//! outside this crate. [`SentenceTagger`] is the seam such a model plugs
//! into; [`crate::rule_based::RuleTagger`] is the built-in implementation.

use thiserror::Error;

/// A batched token-classification model.
///
/// Implementations receive every message of a batch in one call so they can
/// amortize per-batch setup cost. The returned outer vector must hold one
/// label row per message, and each row one raw label per token, position
/// aligned with the tokens it was given.
pub trait SentenceTagger {
    /// Labels every token of every tokenized message in the batch.
    fn tag_batch(&self, tokenized: &[Vec<String>]) -> Result<Vec<Vec<String>>, TaggerError>;
}

/// Failures raised at the model boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaggerError {
    /// The underlying model implementation failed.
    #[error("tagging backend failure: {0}")]
    Backend(String),
    /// The model returned a different number of label rows than messages.
    #[error("model returned {actual} label rows for {expected} messages")]
    BatchMismatch {
        /// Messages handed to the model.
        expected: usize,
        /// Label rows it returned.
        actual: usize,
    },
}
