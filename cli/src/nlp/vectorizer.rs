//! # TF-IDF Vectorizer
//!
//! File: cli/src/nlp/vectorizer.rs
//!
//! Turns normalized text into sparse, L2-normalised TF-IDF feature vectors over
//! a vocabulary learned from the training corpus. Tokens outside the vocabulary
//! are ignored, so text made entirely of unknown words yields an empty vector.
//!
//! Weighting: raw term counts times the smoothed inverse document frequency
//! `ln((1 + n) / (1 + df)) + 1`, then each row scaled to unit length.
//!
use crate::nlp::normalize::tokenize;
use std::collections::BTreeMap;

/// Sparse feature vector: `(feature index, weight)` pairs sorted by index.
pub type SparseVector = Vec<(usize, f64)>;

/// Vocabulary indices, assigned in sorted token order so fitting is
/// deterministic.
#[derive(Debug, Clone, Default)]
pub(crate) struct Vocabulary {
    index: BTreeMap<String, usize>,
}

impl Vocabulary {
    pub fn fit<'a, I>(documents: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut tokens: Vec<String> = documents.into_iter().flat_map(tokenize).collect();
        tokens.sort();
        tokens.dedup();
        let index = tokens
            .into_iter()
            .enumerate()
            .map(|(i, t)| (t, i))
            .collect();
        Self { index }
    }

    pub fn get(&self, token: &str) -> Option<usize> {
        self.index.get(token).copied()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Term counts for the in-vocabulary tokens of `text`, sorted by index.
    pub fn counts(&self, text: &str) -> BTreeMap<usize, f64> {
        let mut counts = BTreeMap::new();
        for token in tokenize(text) {
            if let Some(i) = self.get(&token) {
                *counts.entry(i).or_insert(0.0) += 1.0;
            }
        }
        counts
    }
}

#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: Vocabulary,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn fit(documents: &[&str]) -> Self {
        let vocabulary = Vocabulary::fit(documents.iter().copied());
        let mut df = vec![0usize; vocabulary.len()];
        for doc in documents {
            for index in vocabulary.counts(doc).keys() {
                df[*index] += 1;
            }
        }
        let n = documents.len() as f64;
        let idf = df
            .into_iter()
            .map(|d| ((1.0 + n) / (1.0 + d as f64)).ln() + 1.0)
            .collect();
        Self { vocabulary, idf }
    }

    pub fn dimensions(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn transform(&self, text: &str) -> SparseVector {
        let mut row: SparseVector = self
            .vocabulary
            .counts(text)
            .into_iter()
            .map(|(i, tf)| (i, tf * self.idf[i]))
            .collect();
        let norm = row.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, v) in &mut row {
                *v /= norm;
            }
        }
        row
    }
}
