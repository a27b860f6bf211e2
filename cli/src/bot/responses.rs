//! # Response Table
//!
//! File: cli/src/bot/responses.rs
//!
//! ## Overview
//!
//! Maps every intent to one or more candidate replies. When an intent has
//! several candidates, [`ResponseTable::respond`] picks one uniformly at random
//! so repeated identical input does not always get the same wording.
//!
//! Each candidate is a Tera template rendered against a fixed context
//! (`bot_name`), see `core::templating`. All candidates are compiled and
//! trial-rendered by [`ResponseTable::build`]; a table that builds successfully
//! can only fail to respond if Tera itself fails at runtime.
//!
//! ## Invariants
//!
//! - every intent, `unknown` included, has at least one candidate
//! - every candidate renders to a non-blank string
//!
use crate::bot::intent::Intent;
use crate::core::error::{Result, SmartChatError};
use crate::core::templating::TemplateSet;
use anyhow::anyhow;
use rand::Rng;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, trace};

/// Candidate responses keyed by intent, before compilation.
pub type ResponseCandidates = BTreeMap<Intent, Vec<String>>;

const BUILTIN_RESPONSES: &[(Intent, &[&str])] = &[
    (
        Intent::Greeting,
        &[
            "Hey!",
            "Hello! I'm {{ bot_name }}. How can I help you today?",
            "Hi there! What can I do for you?",
        ],
    ),
    (
        Intent::Farewell,
        &["Catch you later!", "Goodbye! Take care.", "See you soon!"],
    ),
    (
        Intent::Health,
        &["Maintain a balanced diet and exercise regularly."],
    ),
    (
        Intent::Fact,
        &[
            "Honey never spoils. Archaeologists have found edible honey in ancient Egyptian tombs.",
            "Octopuses have three hearts.",
            "A day on Venus is longer than a year on Venus.",
            "Bananas are berries, but strawberries are not.",
        ],
    ),
    (
        Intent::Study,
        &[
            "Break your study time into focused 25-minute sessions with short breaks in between.",
            "Try explaining the topic out loud as if you were teaching it.",
            "Free courses on Khan Academy, Coursera and edX are great learning resources.",
        ],
    ),
    (
        Intent::Thanks,
        &["You're welcome!", "Happy to help!", "Anytime!"],
    ),
    (
        Intent::Unknown,
        &[
            "I'm not sure I understand. Could you rephrase?",
            "Sorry, I didn't catch that. Could you explain further?",
            "I'm still learning. Please provide more details.",
        ],
    ),
];

/// The built-in candidate lists.
pub fn builtin_candidates() -> ResponseCandidates {
    BUILTIN_RESPONSES
        .iter()
        .map(|(intent, texts)| (*intent, texts.iter().map(|t| t.to_string()).collect()))
        .collect()
}

#[derive(Debug)]
pub struct ResponseTable {
    candidates: ResponseCandidates,
    templates: TemplateSet,
}

impl ResponseTable {
    pub fn builtin(bot_name: &str) -> Result<Self> {
        Self::build(builtin_candidates(), bot_name)
    }

    /// Validates and compiles `candidates`.
    pub fn build(candidates: ResponseCandidates, bot_name: &str) -> Result<Self> {
        for intent in Intent::ALL {
            if candidates.get(&intent).is_none_or(Vec::is_empty) {
                return Err(SmartChatError::MissingResponses { intent }.into());
            }
        }
        Self::compile(candidates, bot_name)
    }

    /// Compiles `candidates` without requiring every intent to be present.
    #[cfg(test)]
    pub(crate) fn incomplete(candidates: ResponseCandidates, bot_name: &str) -> Result<Self> {
        Self::compile(candidates, bot_name)
    }

    fn compile(candidates: ResponseCandidates, bot_name: &str) -> Result<Self> {
        let mut context = HashMap::new();
        context.insert("bot_name".to_string(), bot_name.to_string());
        let mut templates = TemplateSet::new(&context)?;

        for (&intent, texts) in &candidates {
            for (i, text) in texts.iter().enumerate() {
                let name = template_name(intent, i);
                templates.add(&name, text)?;
                if templates.render(&name)?.trim().is_empty() {
                    return Err(anyhow!(SmartChatError::Config(format!(
                        "response #{} for intent '{}' is blank",
                        i + 1,
                        intent
                    ))));
                }
            }
            debug!("Compiled {} response(s) for '{}'", texts.len(), intent);
        }

        Ok(Self {
            candidates,
            templates,
        })
    }

    /// Raw (unrendered) candidates for `intent`.
    pub fn candidates(&self, intent: Intent) -> &[String] {
        self.candidates
            .get(&intent)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every candidate for `intent`, rendered.
    pub fn rendered(&self, intent: Intent) -> Result<Vec<String>> {
        (0..self.candidates(intent).len())
            .map(|i| self.templates.render(&template_name(intent, i)))
            .collect()
    }

    /// Picks a candidate for `intent` uniformly at random and renders it.
    pub fn respond<R: Rng>(&self, intent: Intent, rng: &mut R) -> Result<String> {
        let count = self.candidates(intent).len();
        if count == 0 {
            return Err(SmartChatError::MissingResponses { intent }.into());
        }
        let index = if count == 1 {
            0
        } else {
            rng.random_range(0..count)
        };
        trace!("Selected response #{} of {} for '{}'", index, count, intent);
        self.templates.render(&template_name(intent, index))
    }
}

fn template_name(intent: Intent, index: usize) -> String {
    format!("{}/{}", intent, index)
}
