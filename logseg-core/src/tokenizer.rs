//! # Pretokenizer for Flight-Log Messages
//!
//! Turns one raw app message from a flight log into the flat token sequence
//! the token-classification model expects. The messages are noisy: terminal
//! punctuation comes and goes, words arrive wrapped in stray quotation marks,
//! and several sentences can be crammed into a single cell. The rules here
//! normalize all of that deterministically, before any model is involved.
//!
//! ## Normalization steps
//!
//! 1. Trim surrounding whitespace; whitespace-only input tokenizes to nothing.
//! 2. Guarantee a terminal punctuation mark (a period is appended when the
//!    message ends bare), so every message closes on a boundary the model
//!    was trained to see.
//! 3. Strip quotation marks wrapping the whole message or individual words,
//!    leaving contractions and possessives (`drone's`, `motors'`) intact.
//! 4. Split on whitespace, isolate `...` as a token of its own, and separate
//!    the remaining punctuation, keeping periods that sit inside decimal
//!    readings such as `12.5`.
//!
//! Tokenization is total: every input string maps to a token sequence, no
//! token is ever empty, and the same input always yields the same output.
//!
//! ## Example
//!
//! ```rust
//! use logseg_core::tokenizer::tokenize;
//!
//! let tokens = tokenize("Altitude limit reached. Ascending restricted");
//! assert_eq!(
//!     tokens,
//!     ["Altitude", "limit", "reached", ".", "Ascending", "restricted", "."]
//! );
//! ```

/// Punctuation accepted as a message-final boundary.
const TERMINAL_PUNCTUATION: &[char] = &['.', '!', '?', ';', ':'];

/// Punctuation stripped next to a word-wrapping quotation mark.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?'];

/// Tokenizes one raw log message.
///
/// Empty and whitespace-only messages yield an empty sequence; every other
/// message yields at least one token and always ends on a punctuation token.
pub fn tokenize(text: &str) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let mut message = trimmed.to_string();
    if !message.ends_with(TERMINAL_PUNCTUATION) {
        message.push('.');
    }

    let message = message.trim_matches(|c| c == '"' || c == '\'');
    let message = strip_word_quotes(message);

    let mut tokens = Vec::new();
    for raw in message.split_whitespace() {
        if raw.contains("...") {
            let mut first = true;
            for fragment in raw.split("...") {
                if !first {
                    tokens.push("...".to_string());
                }
                first = false;
                if !fragment.is_empty() {
                    separate_punctuation(fragment, &mut tokens);
                }
            }
        } else {
            separate_punctuation(raw, &mut tokens);
        }
    }

    tokens.retain(|t| !t.is_empty());
    tokens
}

/// Removes quotation marks that wrap words, preserving apostrophes that
/// belong to the word itself.
///
/// Three positions qualify for removal, each judged on the character's
/// neighbours in the incoming string:
/// - an opening quote at the start or after whitespace, directly followed by
///   a word character;
/// - a double quote after a word character, followed by whitespace, trailing
///   punctuation, or the end of the string;
/// - a single quote in that same trailing position, but only when preceded by
///   whitespace or punctuation. A single quote after a word character is
///   never touched, which is what keeps possessives alive.
fn strip_word_quotes(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());

    for (i, &ch) in chars.iter().enumerate() {
        if ch != '"' && ch != '\'' {
            out.push(ch);
            continue;
        }

        let prev = if i > 0 { Some(chars[i - 1]) } else { None };
        let next = chars.get(i + 1).copied();

        let opening = prev.map(char::is_whitespace).unwrap_or(true)
            && next.map(is_word_char).unwrap_or(false);

        let trailing_position = match next {
            None => true,
            Some(c) => c.is_whitespace() || TRAILING_PUNCTUATION.contains(&c),
        };
        let closing = trailing_position
            && match ch {
                '"' => prev.map(is_word_char).unwrap_or(false),
                _ => prev
                    .map(|c| c.is_whitespace() || TRAILING_PUNCTUATION.contains(&c))
                    .unwrap_or(false),
            };

        if !opening && !closing {
            out.push(ch);
        }
    }

    out
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Splits `. , ; : ! ?` out of a single whitespace-free fragment.
///
/// A period stays inside the pending token only when both neighbours are
/// digits, so decimal readings survive as one token. Apostrophes always stay
/// attached to their word.
fn separate_punctuation(fragment: &str, tokens: &mut Vec<String>) {
    let chars: Vec<char> = fragment.chars().collect();
    let mut pending = String::new();

    for (i, &ch) in chars.iter().enumerate() {
        match ch {
            '.' => {
                let decimal = i > 0
                    && i + 1 < chars.len()
                    && chars[i - 1].is_numeric()
                    && chars[i + 1].is_numeric();
                if decimal {
                    pending.push(ch);
                } else {
                    flush_pending(&mut pending, tokens);
                    tokens.push(ch.to_string());
                }
            }
            ',' | ';' | ':' | '!' | '?' => {
                flush_pending(&mut pending, tokens);
                tokens.push(ch.to_string());
            }
            _ => pending.push(ch),
        }
    }

    flush_pending(&mut pending, tokens);
}

/// Moves the accumulated fragment into the token list (if non-empty).
fn flush_pending(pending: &mut String, tokens: &mut Vec<String>) {
    if !pending.is_empty() {
        tokens.push(std::mem::take(pending));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_whitespace_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
        assert!(tokenize("\t\n").is_empty());
    }

    #[test]
    fn test_appends_final_period() {
        assert_eq!(tokenize("Drone battery low"), ["Drone", "battery", "low", "."]);
    }

    #[test]
    fn test_keeps_existing_terminal_punctuation() {
        assert_eq!(tokenize("Landing now!"), ["Landing", "now", "!"]);
        assert_eq!(tokenize("Home point updated;"), ["Home", "point", "updated", ";"]);
    }

    #[test]
    fn test_decimal_number_preserved() {
        assert_eq!(
            tokenize("Altitude 12.5 meters"),
            ["Altitude", "12.5", "meters", "."]
        );
    }

    #[test]
    fn test_version_string_kept_whole() {
        assert_eq!(tokenize("Firmware v1.2 active"), ["Firmware", "v1.2", "active", "."]);
    }

    #[test]
    fn test_trailing_period_after_number_split() {
        assert_eq!(tokenize("Climbed to 12."), ["Climbed", "to", "12", "."]);
    }

    #[test]
    fn test_ellipsis_is_a_single_token() {
        assert_eq!(tokenize("Wait..."), ["Wait", "..."]);
    }

    #[test]
    fn test_ellipsis_between_fragments() {
        assert_eq!(tokenize("armed...ready"), ["armed", "...", "ready", "."]);
    }

    #[test]
    fn test_possessive_apostrophe_untouched() {
        assert_eq!(tokenize("Drone's battery low"), ["Drone's", "battery", "low", "."]);
        assert_eq!(
            tokenize("Motors' temperature rising"),
            ["Motors'", "temperature", "rising", "."]
        );
    }

    #[test]
    fn test_wrapping_quotes_stripped() {
        assert_eq!(tokenize("\"GPS signal lost\""), ["GPS", "signal", "lost", "."]);
        assert_eq!(tokenize("\"Return home\" requested"), ["Return", "home", "requested", "."]);
    }

    #[test]
    fn test_word_quotes_stripped() {
        assert_eq!(tokenize("Set \"home\" point"), ["Set", "home", "point", "."]);
    }

    #[test]
    fn test_trailing_single_quote_after_word_survives() {
        // a single quote after a word character could be a possessive, so the
        // closing quote of 'sport' is left in place
        assert_eq!(tokenize("Enable 'sport' mode"), ["Enable", "sport'", "mode", "."]);
    }

    #[test]
    fn test_punctuation_separated() {
        assert_eq!(
            tokenize("Warning: low battery, return home"),
            ["Warning", ":", "low", "battery", ",", "return", "home", "."]
        );
    }

    #[test]
    fn test_no_empty_tokens() {
        let samples = [
            "",
            "   ",
            "...",
            "\"...\"",
            "a...b...c",
            "Warning:: double",
            "12.5.",
            "'quoted'",
        ];
        for sample in samples {
            assert!(
                tokenize(sample).iter().all(|t| !t.is_empty()),
                "empty token for {sample:?}"
            );
        }
    }

    #[test]
    fn test_deterministic() {
        let message = "Compass error. Calibrate... now!";
        assert_eq!(tokenize(message), tokenize(message));
    }
}
