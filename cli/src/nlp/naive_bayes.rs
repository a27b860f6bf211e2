//! # Multinomial Naive Bayes
//!
//! File: cli/src/nlp/naive_bayes.rs
//!
//! Alternative intent model selected with `classifier.kind = "naive-bayes"`.
//! Bag-of-words counts, Laplace smoothing (alpha = 1), log-space scoring. The
//! reported confidence is the softmax of the log-posteriors.
//!
use crate::bot::corpus::IntentCorpus;
use crate::bot::intent::Intent;
use crate::core::error::Result;
use crate::nlp::classifier::{
    check_training_input, label_indices, select, softmax, IntentClassifier, Prediction,
    TrainingOptions,
};
use crate::nlp::vectorizer::Vocabulary;
use tracing::debug;

const ALPHA: f64 = 1.0;

#[derive(Debug, Clone)]
pub struct NaiveBayes {
    vocabulary: Vocabulary,
    classes: Vec<Intent>,
    /// `ln P(class)`.
    log_prior: Vec<f64>,
    /// `ln P(token | class)`, row-major `[class][token]`.
    log_likelihood: Vec<f64>,
    min_confidence: f64,
}

impl IntentClassifier for NaiveBayes {
    fn train(corpus: &IntentCorpus, options: &TrainingOptions) -> Result<Self> {
        check_training_input(corpus, options)?;

        let vocabulary = Vocabulary::fit(corpus.examples().iter().map(|e| e.text.as_str()));
        let classes: Vec<Intent> = corpus.intents().into_iter().collect();
        let v = vocabulary.len();
        let k = classes.len();

        let mut doc_counts = vec![0.0; k];
        let mut token_counts = vec![0.0; k * v];
        let mut token_totals = vec![0.0; k];
        let labels = label_indices(&classes, corpus);
        for (example, &c) in corpus.examples().iter().zip(&labels) {
            doc_counts[c] += 1.0;
            for (t, count) in vocabulary.counts(&example.text) {
                token_counts[c * v + t] += count;
                token_totals[c] += count;
            }
        }

        let total_docs = corpus.len() as f64;
        let log_prior = doc_counts
            .iter()
            .map(|d| ((d + ALPHA) / (total_docs + k as f64 * ALPHA)).ln())
            .collect();
        let mut log_likelihood = vec![0.0; k * v];
        for c in 0..k {
            let denom = token_totals[c] + ALPHA * v as f64;
            for t in 0..v {
                log_likelihood[c * v + t] = ((token_counts[c * v + t] + ALPHA) / denom).ln();
            }
        }
        debug!("Naive Bayes model fitted: {} classes, {} tokens", k, v);

        Ok(Self {
            vocabulary,
            classes,
            log_prior,
            log_likelihood,
            min_confidence: options.min_confidence,
        })
    }

    fn predict(&self, text: &str) -> Prediction {
        let counts = self.vocabulary.counts(text);
        if counts.is_empty() {
            return Prediction::unknown();
        }
        let v = self.vocabulary.len();
        let scores: Vec<f64> = (0..self.classes.len())
            .map(|c| {
                self.log_prior[c]
                    + counts
                        .iter()
                        .map(|(t, n)| n * self.log_likelihood[c * v + t])
                        .sum::<f64>()
            })
            .collect();
        select(&self.classes, &softmax(&scores), self.min_confidence)
    }
}
