//! # Text Normalization and Tokenization
//!
//! File: cli/src/nlp/normalize.rs
//!
//! The same two functions prepare both training phrases and live input. If the
//! two paths ever diverged, runtime text would vectorize against a vocabulary
//! built from differently-shaped tokens, so everything funnels through here.
//!
use unicode_segmentation::UnicodeSegmentation;

/// Lowercases and trims surrounding whitespace. Idempotent.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Splits normalized text into word tokens (Unicode word boundaries;
/// punctuation and whitespace are dropped).
pub fn tokenize(normalized: &str) -> Vec<String> {
    normalized.unicode_words().map(|w| w.to_string()).collect()
}
