//! # Intent Classifier Interface
//!
//! File: cli/src/nlp/classifier.rs
//!
//! ## Overview
//!
//! The seam between the dispatch loop and the statistical method behind it.
//! An [`IntentClassifier`] exposes exactly two operations:
//!
//! - `train`: fit a model over an [`IntentCorpus`], once, at startup
//! - `predict`: map normalized text to a [`Prediction`], purely
//!
//! Two implementations ship with SmartChat and are chosen by
//! `classifier.kind` in the configuration:
//!
//! - [`LogisticRegression`](crate::nlp::logistic::LogisticRegression): TF-IDF
//!   features with a softmax (multinomial logistic) model. The default.
//! - [`NaiveBayes`](crate::nlp::naive_bayes::NaiveBayes): bag-of-words counts
//!   with Laplace smoothing.
//!
//! ## Fallback rule
//!
//! Both implementations return `Intent::Unknown` with confidence `0.0` when the
//! input contains no vocabulary word at all. Optionally, a top-class
//! probability below `min_confidence` also yields `Unknown`.
//!
use crate::bot::corpus::IntentCorpus;
use crate::bot::intent::Intent;
use crate::core::error::{Result, SmartChatError};
use crate::nlp::logistic::LogisticRegression;
use crate::nlp::naive_bayes::NaiveBayes;
use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// The outcome of classifying one utterance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub intent: Intent,
    /// Probability of `intent` under the model, in `[0, 1]`.
    pub confidence: f64,
}

impl Prediction {
    /// The designed outcome for input with no recognised vocabulary.
    pub fn unknown() -> Self {
        Self {
            intent: Intent::Unknown,
            confidence: 0.0,
        }
    }
}

/// Statistical method used for intent classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassifierKind {
    #[default]
    Logistic,
    NaiveBayes,
}

impl fmt::Display for ClassifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifierKind::Logistic => f.write_str("logistic"),
            ClassifierKind::NaiveBayes => f.write_str("naive-bayes"),
        }
    }
}

/// Hyper-parameters shared by the classifiers. Methods ignore the ones they
/// have no use for (Naive Bayes only reads `min_confidence`).
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingOptions {
    pub epochs: usize,
    pub learning_rate: f64,
    pub l2: f64,
    pub min_confidence: f64,
}

impl Default for TrainingOptions {
    fn default() -> Self {
        Self {
            epochs: 2000,
            learning_rate: 1.0,
            l2: 0.001,
            min_confidence: 0.0,
        }
    }
}

impl TrainingOptions {
    pub fn validate(&self) -> Result<()> {
        if self.epochs == 0 {
            return Err(anyhow!(SmartChatError::Config(
                "classifier.epochs must be greater than zero".into()
            )));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(anyhow!(SmartChatError::Config(format!(
                "classifier.learning_rate must be positive, got {}",
                self.learning_rate
            ))));
        }
        if !(self.l2.is_finite() && self.l2 >= 0.0) {
            return Err(anyhow!(SmartChatError::Config(format!(
                "classifier.l2 must be non-negative, got {}",
                self.l2
            ))));
        }
        // Weight decay multiplies each weight by `1 - learning_rate * l2` per epoch.
        if self.learning_rate * self.l2 >= 2.0 {
            return Err(anyhow!(SmartChatError::Config(format!(
                "classifier.learning_rate * classifier.l2 must be below 2, got {}",
                self.learning_rate * self.l2
            ))));
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(anyhow!(SmartChatError::Config(format!(
                "classifier.min_confidence must be within [0, 1], got {}",
                self.min_confidence
            ))));
        }
        Ok(())
    }
}

/// A fitted, read-only intent model.
pub trait IntentClassifier {
    /// Fits a model over every example in `corpus`. Fails with a configuration
    /// error when the corpus violates its invariants or `options` are invalid.
    fn train(corpus: &IntentCorpus, options: &TrainingOptions) -> Result<Self>
    where
        Self: Sized;

    /// Classifies already-normalized text.
    fn predict(&self, text: &str) -> Prediction;
}

/// Trains the classifier selected by `kind`.
pub fn train_classifier(
    kind: ClassifierKind,
    corpus: &IntentCorpus,
    options: &TrainingOptions,
) -> Result<Box<dyn IntentClassifier>> {
    info!(
        "Training {} classifier on {} example(s)",
        kind,
        corpus.len()
    );
    let model: Box<dyn IntentClassifier> = match kind {
        ClassifierKind::Logistic => Box::new(LogisticRegression::train(corpus, options)?),
        ClassifierKind::NaiveBayes => Box::new(NaiveBayes::train(corpus, options)?),
    };
    Ok(model)
}

/// Shared pre-flight check for every `train` implementation.
pub(crate) fn check_training_input(
    corpus: &IntentCorpus,
    options: &TrainingOptions,
) -> Result<()> {
    corpus.validate()?;
    options.validate()
}

/// Position in `classes` (sorted) of every example's intent, in corpus order.
pub(crate) fn label_indices(classes: &[Intent], corpus: &IntentCorpus) -> Vec<usize> {
    corpus
        .examples()
        .iter()
        .map(|e| classes.binary_search(&e.intent).unwrap_or_default())
        .collect()
}

/// Picks the arg-max class and applies the confidence floor.
pub(crate) fn select(
    classes: &[Intent],
    probabilities: &[f64],
    min_confidence: f64,
) -> Prediction {
    let best = probabilities
        .iter()
        .copied()
        .enumerate()
        .fold(None::<(usize, f64)>, |best, (i, p)| match best {
            Some((_, bp)) if bp >= p => best,
            _ => Some((i, p)),
        });
    match best {
        Some((i, p)) if p >= min_confidence => Prediction {
            intent: classes[i],
            confidence: p,
        },
        _ => Prediction::unknown(),
    }
}

/// Numerically stable softmax.
pub(crate) fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}
