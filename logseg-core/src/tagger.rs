//! # Boundary Tags and Sentence Reconstruction
//!
//! Defines the boundary-tagging vocabulary the token-classification model
//! emits and the automaton that decodes a labeled token sequence back into
//! sentence spans.
//!
//! ## Tag scheme
//!
//! | Label   | Category     | Meaning                                    |
//! |---------|--------------|--------------------------------------------|
//! | `B-<x>` | Begin        | first token of a sentence span             |
//! | `I-<x>` | Inside       | continuation token of the current span     |
//! | `E-<x>` | End          | last token of the current span             |
//! | `S-<x>` | Single       | a complete one-token span                  |
//! | `O`     | Outside      | outside any span (noise, punctuation)      |
//!
//! The `<x>` suffix carries the model's semantic class and is ignored here;
//! only the structural category drives reconstruction. Labels matching none
//! of the five forms decode to [`Category::Unrecognized`], which is not an
//! error: such a token is dropped and any pending span is closed.
//!
//! ## Example
//!
//! ```rust
//! use logseg_core::tagger::reconstruct_sentences;
//!
//! let tokens: Vec<String> =
//!     ["Altitude", "warning", "low", "battery", "detected"]
//!         .map(String::from)
//!         .to_vec();
//! let labels: Vec<String> =
//!     ["O", "B-SENT", "I-SENT", "E-SENT", "O"].map(String::from).to_vec();
//!
//! let sentences = reconstruct_sentences(&tokens, &labels).unwrap();
//! assert_eq!(sentences, ["warning low battery"]);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structural category of a boundary tag, decoded once per token.
///
/// The model emits free-form label strings; decoding them at ingestion means
/// the reconstruction automaton dispatches on a closed enum instead of
/// re-parsing string prefixes at every step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// First token of a multi-token span (`B-` prefix).
    Begin,
    /// Continuation of the current span (`I-` prefix).
    Inside,
    /// Last token of the current span (`E-` prefix).
    End,
    /// A complete single-token span (`S-` prefix).
    Single,
    /// Outside any span (the exact label `O`).
    Outside,
    /// Any label outside the scheme.
    Unrecognized,
}

impl Category {
    /// Decodes a raw model label into its structural category.
    ///
    /// `Outside` requires the exact label `O`; the four span categories
    /// require their two-character prefix. A bare `B` or an `O-...` label
    /// therefore falls through to [`Category::Unrecognized`].
    pub fn from_label(label: &str) -> Self {
        if label == "O" {
            Category::Outside
        } else if label.starts_with("B-") {
            Category::Begin
        } else if label.starts_with("S-") {
            Category::Single
        } else if label.starts_with("I-") {
            Category::Inside
        } else if label.starts_with("E-") {
            Category::End
        } else {
            Category::Unrecognized
        }
    }

    /// Short name for logs and serialized output.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Begin => "begin",
            Category::Inside => "inside",
            Category::End => "end",
            Category::Single => "single",
            Category::Outside => "outside",
            Category::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A token paired with the decoded category of its model label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedToken {
    /// The token text, exactly as produced by the tokenizer.
    pub text: String,
    /// Structural category decoded from the model's label.
    pub category: Category,
}

impl TaggedToken {
    /// Pairs a token with its raw model label, decoding the label once.
    pub fn new(text: impl Into<String>, label: &str) -> Self {
        Self {
            text: text.into(),
            category: Category::from_label(label),
        }
    }
}

/// The label sequence does not line up one-to-one with the token sequence.
///
/// The model must return exactly one label per token, in token order; any
/// other shape would make positional decoding meaningless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("misaligned prediction: {tokens} tokens but {tags} labels")]
pub struct AlignmentError {
    /// Number of tokens produced for the message.
    pub tokens: usize,
    /// Number of labels supplied by the model.
    pub tags: usize,
}

/// Decodes one message's tokens and model labels into sentence strings.
///
/// `labels` must hold exactly one raw label per token; a length mismatch is
/// reported as [`AlignmentError`] before any decoding happens.
pub fn reconstruct_sentences(
    tokens: &[String],
    labels: &[String],
) -> Result<Vec<String>, AlignmentError> {
    if tokens.len() != labels.len() {
        return Err(AlignmentError {
            tokens: tokens.len(),
            tags: labels.len(),
        });
    }

    let tagged: Vec<TaggedToken> = tokens
        .iter()
        .zip(labels)
        .map(|(text, label)| TaggedToken::new(text.clone(), label))
        .collect();
    Ok(reconstruct_tagged(&tagged))
}

/// Decodes an already-aligned tagged token sequence. Total, cannot fail.
pub fn reconstruct_tagged(tagged: &[TaggedToken]) -> Vec<String> {
    let mut automaton = Reconstructor::new();
    for (i, token) in tagged.iter().enumerate() {
        let next = tagged.get(i + 1).map(|t| t.category);
        automaton.step(&token.text, token.category, next);
    }
    automaton.finish()
}

/// Reconstruction state: between spans, or accumulating one.
enum State {
    Idle,
    Building(Vec<String>),
}

/// Single-pass automaton over decoded categories.
///
/// Transition rules, in priority order per token:
/// 1. a literal `;` token or an `Outside` label: the token vanishes and the
///    pending span is left untouched;
/// 2. `Begin`/`Single`: any pending span is flushed, a new span opens with
///    this token; `Single` flushes the one-token span immediately;
/// 3. `Inside`/`End`: the token extends the pending span (opening one when
///    idle); `End` closes the span only when the next token's label is
///    `Outside`, and an `End` on the final token closes it as if an
///    `Outside` token followed;
/// 4. `Unrecognized`: the pending span is flushed and the token dropped.
///
/// A span still open after the last token is flushed. Sentences come out in
/// flush order, each rendered as its tokens joined by a single space.
struct Reconstructor {
    state: State,
    sentences: Vec<String>,
}

impl Reconstructor {
    fn new() -> Self {
        Self {
            state: State::Idle,
            sentences: Vec::new(),
        }
    }

    fn step(&mut self, token: &str, category: Category, next: Option<Category>) {
        // A literal semicolon is dropped no matter how the model labeled it.
        if token == ";" {
            return;
        }

        match category {
            Category::Outside => {}
            Category::Begin => self.open(token),
            Category::Single => {
                self.open(token);
                self.close();
            }
            Category::Inside => self.extend(token),
            Category::End => {
                self.extend(token);
                if next.unwrap_or(Category::Outside) == Category::Outside {
                    self.close();
                }
            }
            Category::Unrecognized => {
                tracing::debug!(token, "unrecognized label closes the pending span");
                self.close();
            }
        }
    }

    /// Opens a new span with `token`, flushing any span already in progress.
    fn open(&mut self, token: &str) {
        self.close();
        self.state = State::Building(vec![token.to_string()]);
    }

    /// Appends `token` to the pending span.
    ///
    /// An `Inside` or `End` arriving while idle opens a span implicitly; the
    /// model does not guarantee a leading `Begin`.
    fn extend(&mut self, token: &str) {
        match &mut self.state {
            State::Building(span) => span.push(token.to_string()),
            State::Idle => {
                tracing::debug!(token, "span continuation without a begin label");
                self.state = State::Building(vec![token.to_string()]);
            }
        }
    }

    /// Flushes the pending span as a finished sentence, if non-empty.
    fn close(&mut self) {
        if let State::Building(span) = std::mem::replace(&mut self.state, State::Idle) {
            if !span.is_empty() {
                self.sentences.push(span.join(" "));
            }
        }
    }

    fn finish(mut self) -> Vec<String> {
        self.close();
        self.sentences
    }
}
