//! # SmartChat Bot Engine
//!
//! File: cli/src/bot/mod.rs
//!
//! ## Overview
//!
//! This module assembles the chatbot from its parts and exposes it to the
//! command handlers:
//!
//! - `intent`: the fixed set of intent labels
//! - `corpus`: labelled training phrases
//! - `responses`: candidate replies per intent
//! - `intents_file`: optional JSON/TOML overrides for phrases and replies
//! - `dispatch`: the interactive read-classify-respond loop
//!
//! ## Architecture
//!
//! [`Chatbot::build`] runs once at startup:
//! 1. Load the built-in corpus and responses, then apply the intents file
//! 2. Train the configured classifier
//! 3. Compile the response table
//!
//! Any failure here is a configuration error and the caller exits before a
//! single turn is served. The finished `Chatbot` is immutable; the dispatch
//! loop borrows it.
//!
//! ## Examples
//!
//! ```rust,ignore
//! let config = config::load_config(&overrides)?;
//! let bot = Chatbot::build(&config)?;
//! let mut rng = StdRng::seed_from_u64(7);
//! let reply = bot.reply("good morning", &mut rng)?;
//! assert_eq!(reply.prediction.intent, Intent::Greeting);
//! ```
//!
pub mod corpus;
pub mod dispatch;
pub mod intent;
pub mod intents_file;
pub mod responses;

use crate::core::config::Config;
use crate::core::error::Result;
use crate::nlp::classifier::{train_classifier, IntentClassifier, Prediction};
use crate::nlp::normalize::normalize;
use anyhow::Context;
use corpus::IntentCorpus;
use intents_file::IntentsFile;
use rand::Rng;
use responses::{builtin_candidates, ResponseCandidates, ResponseTable};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

/// Training phrases and response candidates, before anything is compiled.
#[derive(Debug, Clone)]
pub struct IntentData {
    pub corpus: IntentCorpus,
    pub responses: ResponseCandidates,
}

impl IntentData {
    /// Built-in data with the configured intents file (if any) applied.
    pub fn load(config: &Config) -> Result<Self> {
        let mut data = Self {
            corpus: IntentCorpus::builtin(),
            responses: builtin_candidates(),
        };
        if let Some(path) = &config.bot.intents_file {
            let file = IntentsFile::load(Path::new(path))?;
            file.apply(&mut data.corpus, &mut data.responses)
                .with_context(|| format!("Failed to apply intents file '{}'", path))?;
        }
        Ok(data)
    }
}

/// The reply to one utterance.
#[derive(Debug, Clone, Serialize)]
pub struct Reply {
    #[serde(flatten)]
    pub prediction: Prediction,
    pub text: String,
}

/// A trained, ready-to-serve chatbot.
pub struct Chatbot {
    name: String,
    classifier: Box<dyn IntentClassifier>,
    responses: ResponseTable,
}

impl Chatbot {
    pub fn build(config: &Config) -> Result<Self> {
        let data = IntentData::load(config)?;
        let options = config.classifier.training_options();
        let classifier = train_classifier(config.classifier.kind, &data.corpus, &options)
            .context("Failed to train intent classifier")?;
        let responses = ResponseTable::build(data.responses, &config.bot.name)
            .context("Failed to build response table")?;
        info!("Chatbot '{}' is ready", config.bot.name);
        Ok(Self::from_parts(&config.bot.name, classifier, responses))
    }

    pub fn from_parts(
        name: &str,
        classifier: Box<dyn IntentClassifier>,
        responses: ResponseTable,
    ) -> Self {
        Self {
            name: name.to_string(),
            classifier,
            responses,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn responses(&self) -> &ResponseTable {
        &self.responses
    }

    /// Normalizes `raw` and classifies it.
    pub fn classify(&self, raw: &str) -> Prediction {
        self.classify_normalized(&normalize(raw))
    }

    pub fn classify_normalized(&self, normalized: &str) -> Prediction {
        let prediction = self.classifier.predict(normalized);
        debug!(
            "Classified {:?} as '{}' ({:.3})",
            normalized, prediction.intent, prediction.confidence
        );
        prediction
    }

    /// Classifies `raw` and picks a response for the resulting intent.
    pub fn reply<R: Rng>(&self, raw: &str, rng: &mut R) -> Result<Reply> {
        let prediction = self.classify(raw);
        let text = self.responses.respond(prediction.intent, rng)?;
        Ok(Reply { prediction, text })
    }
}

impl std::fmt::Debug for Chatbot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chatbot")
            .field("name", &self.name)
            .field("responses", &self.responses)
            .finish_non_exhaustive()
    }
}
