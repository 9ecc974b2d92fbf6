//! # Segmentation Pipeline
//!
//! Orchestrates the three stages: pretokenization, one batched model call,
//! and per-message sentence reconstruction. Messages carry no shared state,
//! so the two deterministic stages run in parallel at message granularity;
//! the model call is the single batch-level serialization point.

use rayon::prelude::*;
use thiserror::Error;

use crate::model::{SentenceTagger, TaggerError};
use crate::tagger::{reconstruct_sentences, AlignmentError};
use crate::tokenizer::tokenize;

/// Failures surfaced while segmenting a batch of messages.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Tagger(#[from] TaggerError),
    #[error(transparent)]
    Alignment(#[from] AlignmentError),
}

/// Batch segmentation driver around an exchangeable tagging model.
///
/// The pipeline owns its model and works through `&self` only, so one
/// instance can serve any number of batches, from any number of threads.
pub struct SegmentationPipeline<T> {
    tagger: T,
}

impl<T: SentenceTagger> SegmentationPipeline<T> {
    pub fn new(tagger: T) -> Self {
        Self { tagger }
    }

    /// Segments every message of a batch into sentence strings.
    ///
    /// Output rows are position-aligned with `messages`; a message with no
    /// recognizable sentence content yields an empty row.
    pub fn segment_batch(&self, messages: &[String]) -> Result<Vec<Vec<String>>, PipelineError> {
        tracing::debug!(messages = messages.len(), "segmenting batch");

        let tokenized: Vec<Vec<String>> = messages.par_iter().map(|m| tokenize(m)).collect();

        let labels = self.tagger.tag_batch(&tokenized)?;
        if labels.len() != tokenized.len() {
            return Err(TaggerError::BatchMismatch {
                expected: tokenized.len(),
                actual: labels.len(),
            }
            .into());
        }

        tokenized
            .par_iter()
            .zip(labels.par_iter())
            .map(|(tokens, row)| reconstruct_sentences(tokens, row).map_err(PipelineError::from))
            .collect()
    }

    /// Segments a single message; convenience wrapper over [`Self::segment_batch`].
    pub fn segment_message(&self, message: &str) -> Result<Vec<String>, PipelineError> {
        let batch = [message.to_string()];
        let mut rows = self.segment_batch(&batch)?;
        Ok(rows.pop().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule_based::RuleTagger;

    fn pipeline() -> SegmentationPipeline<RuleTagger> {
        SegmentationPipeline::new(RuleTagger::new())
    }

    #[test]
    fn test_segment_batch_basic() {
        let messages = vec![
            "Low battery. Return to home point.".to_string(),
            "   ".to_string(),
        ];
        let rows = pipeline().segment_batch(&messages).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], ["Low battery", "Return to home point"]);
        assert!(rows[1].is_empty());
    }

    #[test]
    fn test_rows_align_with_messages() {
        let messages: Vec<String> = (0..20).map(|i| format!("Message number {i}.")).collect();
        let rows = pipeline().segment_batch(&messages).unwrap();
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), 1);
            assert_eq!(row[0], format!("Message number {i}"));
        }
    }

    #[test]
    fn test_segment_message() {
        let sentences = pipeline().segment_message("Compass error! Calibrate now").unwrap();
        assert_eq!(sentences, ["Compass error", "Calibrate now"]);
    }

    #[test]
    fn test_misaligned_model_row_is_reported() {
        struct ShortRow;
        impl SentenceTagger for ShortRow {
            fn tag_batch(
                &self,
                tokenized: &[Vec<String>],
            ) -> Result<Vec<Vec<String>>, TaggerError> {
                Ok(tokenized
                    .iter()
                    .map(|t| vec!["O".to_string(); t.len().saturating_sub(1)])
                    .collect())
            }
        }

        let messages = vec!["Return home now.".to_string()];
        let err = SegmentationPipeline::new(ShortRow)
            .segment_batch(&messages)
            .unwrap_err();
        assert!(matches!(err, PipelineError::Alignment(_)), "{err}");
    }

    #[test]
    fn test_batch_shape_mismatch_is_reported() {
        struct NoRows;
        impl SentenceTagger for NoRows {
            fn tag_batch(&self, _: &[Vec<String>]) -> Result<Vec<Vec<String>>, TaggerError> {
                Ok(Vec::new())
            }
        }

        let messages = vec!["Landing.".to_string()];
        let err = SegmentationPipeline::new(NoRows)
            .segment_batch(&messages)
            .unwrap_err();
        assert!(
            matches!(
                err,
                PipelineError::Tagger(TaggerError::BatchMismatch { expected: 1, actual: 0 })
            ),
            "{err}"
        );
    }

    #[test]
    fn test_backend_failure_propagates() {
        struct Broken;
        impl SentenceTagger for Broken {
            fn tag_batch(&self, _: &[Vec<String>]) -> Result<Vec<Vec<String>>, TaggerError> {
                Err(TaggerError::Backend("model process died".to_string()))
            }
        }

        let messages = vec!["Landing.".to_string()];
        let err = SegmentationPipeline::new(Broken)
            .segment_batch(&messages)
            .unwrap_err();
        assert!(matches!(err, PipelineError::Tagger(TaggerError::Backend(_))), "{err}");
    }
}
