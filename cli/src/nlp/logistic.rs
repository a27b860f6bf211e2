//! # Multinomial Logistic Regression over TF-IDF features
//!
//! File: cli/src/nlp/logistic.rs
//!
//! ## Overview
//!
//! The default intent model. Training phrases are vectorized with
//! [`TfidfVectorizer`] and a softmax model is fitted with full-batch gradient
//! descent and L2 regularisation on the weights (the bias is not regularised).
//!
//! Weights start at zero and the update order is fixed, so training the same
//! corpus with the same options always produces the same model.
//!
//! ## Prediction
//!
//! 1. Vectorize the normalized input with the training vocabulary.
//! 2. An empty vector (no known words) returns `unknown` straight away; the
//!    bias alone would otherwise pick whichever class has the most examples.
//! 3. Otherwise return the arg-max of the softmax, subject to
//!    `min_confidence`.
//!
use crate::bot::corpus::IntentCorpus;
use crate::bot::intent::Intent;
use crate::core::error::{Result, SmartChatError};
use crate::nlp::classifier::{
    check_training_input, label_indices, select, softmax, IntentClassifier, Prediction,
    TrainingOptions,
};
use crate::nlp::vectorizer::{SparseVector, TfidfVectorizer};
use anyhow::anyhow;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct LogisticRegression {
    vectorizer: TfidfVectorizer,
    classes: Vec<Intent>,
    /// Row-major `[class][feature]`.
    weights: Vec<f64>,
    bias: Vec<f64>,
    min_confidence: f64,
}

impl LogisticRegression {
    fn scores(&self, row: &SparseVector) -> Vec<f64> {
        let dims = self.vectorizer.dimensions();
        self.classes
            .iter()
            .enumerate()
            .map(|(c, _)| {
                let w = &self.weights[c * dims..(c + 1) * dims];
                self.bias[c] + row.iter().map(|(j, v)| w[*j] * v).sum::<f64>()
            })
            .collect()
    }

    /// Fails when gradient descent has pushed any parameter to infinity or NaN.
    fn ensure_finite(&self) -> Result<()> {
        let finite = |values: &[f64]| values.iter().all(|v| v.is_finite());
        if finite(&self.weights) && finite(&self.bias) {
            return Ok(());
        }
        Err(anyhow!(SmartChatError::Config(
            "classifier training diverged, lower classifier.learning_rate".into()
        )))
    }

    /// Mean cross-entropy over the training rows, for debug logging.
    fn loss(&self, rows: &[SparseVector], labels: &[usize]) -> f64 {
        let total: f64 = rows
            .iter()
            .zip(labels)
            .map(|(row, &y)| -softmax(&self.scores(row))[y].max(f64::MIN_POSITIVE).ln())
            .sum();
        total / rows.len() as f64
    }
}

impl IntentClassifier for LogisticRegression {
    fn train(corpus: &IntentCorpus, options: &TrainingOptions) -> Result<Self> {
        check_training_input(corpus, options)?;

        let examples = corpus.examples();
        let documents: Vec<&str> = examples.iter().map(|e| e.text.as_str()).collect();
        let vectorizer = TfidfVectorizer::fit(&documents);
        let classes: Vec<Intent> = corpus.intents().into_iter().collect();
        let rows: Vec<SparseVector> = documents.iter().map(|d| vectorizer.transform(d)).collect();
        let labels = label_indices(&classes, corpus);

        let dims = vectorizer.dimensions();
        let k = classes.len();
        let n = rows.len() as f64;
        let mut model = Self {
            vectorizer,
            classes,
            weights: vec![0.0; k * dims],
            bias: vec![0.0; k],
            min_confidence: options.min_confidence,
        };

        let mut grad_w = vec![0.0; k * dims];
        let mut grad_b = vec![0.0; k];
        for epoch in 0..options.epochs {
            grad_w.iter_mut().for_each(|g| *g = 0.0);
            grad_b.iter_mut().for_each(|g| *g = 0.0);

            for (row, &y) in rows.iter().zip(&labels) {
                let p = softmax(&model.scores(row));
                for (c, pc) in p.into_iter().enumerate() {
                    let err = pc - if c == y { 1.0 } else { 0.0 };
                    grad_b[c] += err;
                    for (j, v) in row {
                        grad_w[c * dims + j] += err * v;
                    }
                }
            }

            for (w, g) in model.weights.iter_mut().zip(&grad_w) {
                *w -= options.learning_rate * (g / n + options.l2 * *w);
            }
            for (b, g) in model.bias.iter_mut().zip(&grad_b) {
                *b -= options.learning_rate * g / n;
            }

            if epoch % 500 == 0 {
                debug!("epoch {}: loss {:.4}", epoch, model.loss(&rows, &labels));
            }
        }
        model.ensure_finite()?;
        debug!(
            "Logistic model fitted: {} classes, {} features, final loss {:.4}",
            k,
            dims,
            model.loss(&rows, &labels)
        );
        Ok(model)
    }

    fn predict(&self, text: &str) -> Prediction {
        let row = self.vectorizer.transform(text);
        if row.is_empty() {
            return Prediction::unknown();
        }
        let probabilities = softmax(&self.scores(&row));
        select(&self.classes, &probabilities, self.min_confidence)
    }
}
