//! # Intent Corpus
//!
//! File: cli/src/bot/corpus.rs
//!
//! ## Overview
//!
//! The labelled example phrases the classifier is fitted on. The corpus is
//! built once at startup, either from the built-in phrase set below or from the
//! built-in set with an intents file layered on top (see `bot::intents_file`),
//! and is never modified once training starts.
//!
//! Every phrase is normalized on the way in with `nlp::normalize`, the same
//! function applied to user input at runtime.
//!
//! ## Invariants
//!
//! Checked by [`IntentCorpus::validate`], which the classifiers call before
//! fitting:
//! - the corpus is not empty
//! - every supported intent (all but `unknown`) has at least one example
//! - every example contains at least one word token
//!
use crate::bot::intent::Intent;
use crate::core::error::{Result, SmartChatError};
use crate::nlp::normalize::{normalize, tokenize};
use anyhow::anyhow;
use std::collections::BTreeSet;
use tracing::debug;

/// Built-in phrases. Every phrase carries at least one token that no other
/// intent uses, which keeps the training set separable.
///
/// Shared tokens ("you", "me", "how", "a", "tips") are balanced so that the
/// Naive Bayes model also fits every phrase.
const BUILTIN_EXAMPLES: &[(&str, Intent)] = &[
    ("hello", Intent::Greeting),
    ("hi", Intent::Greeting),
    ("hey", Intent::Greeting),
    ("good morning", Intent::Greeting),
    ("good evening", Intent::Greeting),
    ("hello there", Intent::Greeting),
    ("greetings", Intent::Greeting),
    ("bye", Intent::Farewell),
    ("goodbye", Intent::Farewell),
    ("see you", Intent::Farewell),
    ("bye bye", Intent::Farewell),
    ("see you later", Intent::Farewell),
    ("take care", Intent::Farewell),
    ("health advice", Intent::Health),
    ("give me health advice", Intent::Health),
    ("health tips", Intent::Health),
    ("how can i stay healthy", Intent::Health),
    ("tell me a fact", Intent::Fact),
    ("fun fact", Intent::Fact),
    ("tell me something interesting", Intent::Fact),
    ("did you know", Intent::Fact),
    ("how to study", Intent::Study),
    ("learning resources", Intent::Study),
    ("study tips", Intent::Study),
    ("help me study", Intent::Study),
    ("how can i learn faster", Intent::Study),
    ("thanks", Intent::Thanks),
    ("thank you", Intent::Thanks),
    ("ok thanks", Intent::Thanks),
    ("thanks a lot", Intent::Thanks),
    ("much appreciated", Intent::Thanks),
    ("thank you very much", Intent::Thanks),
];

/// One labelled phrase. `text` is always stored normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingExample {
    pub text: String,
    pub intent: Intent,
}

impl TrainingExample {
    pub fn new(text: &str, intent: Intent) -> Self {
        Self {
            text: normalize(text),
            intent,
        }
    }
}

/// The full set of training examples.
#[derive(Debug, Clone, Default)]
pub struct IntentCorpus {
    examples: Vec<TrainingExample>,
}

impl IntentCorpus {
    pub fn new(examples: Vec<TrainingExample>) -> Self {
        Self { examples }
    }

    pub fn from_pairs(pairs: &[(&str, Intent)]) -> Self {
        Self::new(
            pairs
                .iter()
                .map(|(text, intent)| TrainingExample::new(text, *intent))
                .collect(),
        )
    }

    /// The default phrase set shipped with the binary.
    pub fn builtin() -> Self {
        Self::from_pairs(BUILTIN_EXAMPLES)
    }

    pub fn examples(&self) -> &[TrainingExample] {
        &self.examples
    }

    pub fn examples_for(&self, intent: Intent) -> impl Iterator<Item = &TrainingExample> {
        self.examples.iter().filter(move |e| e.intent == intent)
    }

    /// Intents that have at least one example, in sorted order.
    pub fn intents(&self) -> BTreeSet<Intent> {
        self.examples.iter().map(|e| e.intent).collect()
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// Replaces every example of `intent` with `phrases`.
    pub fn replace_intent(&mut self, intent: Intent, phrases: &[String]) {
        self.examples.retain(|e| e.intent != intent);
        let added = phrases.iter().map(|p| TrainingExample::new(p, intent));
        self.examples.extend(added);
        debug!(
            "Corpus now has {} example(s) for '{}'",
            phrases.len(),
            intent
        );
    }

    pub fn validate(&self) -> Result<()> {
        if self.examples.is_empty() {
            return Err(SmartChatError::EmptyCorpus.into());
        }
        let covered = self.intents();
        if let Some(intent) = Intent::supported().find(|i| !covered.contains(i)) {
            return Err(SmartChatError::MissingExamples { intent }.into());
        }
        if let Some(example) = self.examples.iter().find(|e| tokenize(&e.text).is_empty()) {
            return Err(anyhow!(SmartChatError::Config(format!(
                "training example {:?} for intent '{}' contains no words",
                example.text, example.intent
            ))));
        }
        Ok(())
    }
}
