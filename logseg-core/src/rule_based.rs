//! # Rule-Based Boundary Tagger
//!
//! A deterministic stand-in for a trained token-classification model. It
//! labels tokens from punctuation structure alone, which is enough to run
//! the full pipeline end to end and serves as the default backend when no
//! trained model is wired in.
//!
//! The rules are intentionally simple: a trained model learns boundaries
//! that punctuation does not mark (run-on fragments, mid-message topic
//! switches), and nothing here tries to recover those.

use crate::model::{SentenceTagger, TaggerError};

/// Punctuation tokens that close the current sentence run.
const CLOSERS: &[&str] = &[".", "!", "?", ";", "..."];

/// Labels sentence boundaries using punctuation structure only.
///
/// Every token without alphanumeric content is labeled `O`. Each run of
/// content tokens between closing punctuation becomes one span: `S-SENT`
/// for a run of one, otherwise `B-SENT`, `I-SENT`..., `E-SENT`.
#[derive(Debug, Clone, Default)]
pub struct RuleTagger;

impl RuleTagger {
    pub fn new() -> Self {
        RuleTagger
    }

    fn tag_message(&self, tokens: &[String]) -> Vec<String> {
        let mut labels = vec!["O".to_string(); tokens.len()];
        let mut run: Vec<usize> = Vec::new();

        for (i, token) in tokens.iter().enumerate() {
            if is_punctuation(token) {
                if CLOSERS.contains(&token.as_str()) {
                    label_run(&mut labels, &run);
                    run.clear();
                }
                continue;
            }
            run.push(i);
        }
        label_run(&mut labels, &run);

        labels
    }
}

impl SentenceTagger for RuleTagger {
    fn tag_batch(&self, tokenized: &[Vec<String>]) -> Result<Vec<Vec<String>>, TaggerError> {
        Ok(tokenized.iter().map(|tokens| self.tag_message(tokens)).collect())
    }
}

/// True for tokens with no alphanumeric content (`.`, `,`, `...`).
fn is_punctuation(token: &str) -> bool {
    !token.chars().any(char::is_alphanumeric)
}

/// Writes span labels for one run of content-token indices.
fn label_run(labels: &mut [String], run: &[usize]) {
    match run {
        [] => {}
        [only] => labels[*only] = "S-SENT".to_string(),
        [first, middle @ .., last] => {
            labels[*first] = "B-SENT".to_string();
            for &i in middle {
                labels[i] = "I-SENT".to_string();
            }
            labels[*last] = "E-SENT".to_string();
        }
    }
}
