//! # Intents File Loader
//!
//! File: cli/src/bot/intents_file.rs
//!
//! ## Overview
//!
//! Loads custom training phrases and responses from a file and layers them over
//! the built-in data. Two encodings of the same shape are accepted, chosen by
//! extension:
//!
//! ```json
//! { "intents": [
//!     { "tag": "greeting", "patterns": ["howdy"], "responses": ["Howdy, partner!"] },
//!     { "tag": "fallback", "responses": ["Come again?"] }
//! ] }
//! ```
//!
//! ```toml
//! [[intents]]
//! tag = "greeting"
//! patterns = ["howdy"]
//! responses = ["Howdy, partner!"]
//! ```
//!
//! A non-empty `patterns` list replaces the built-in phrases of that intent, a
//! non-empty `responses` list replaces its responses. Omitted or empty lists
//! keep the built-ins. Extra keys in entries are ignored so existing
//! `intents.json` files with additional fields still load.
//!
use crate::bot::corpus::IntentCorpus;
use crate::bot::intent::Intent;
use crate::bot::responses::ResponseCandidates;
use crate::core::error::{Result, SmartChatError};
use anyhow::anyhow;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

#[derive(Deserialize, Debug, Default)]
pub struct IntentsFile {
    #[serde(default)]
    pub intents: Vec<IntentEntry>,
}

#[derive(Deserialize, Debug)]
pub struct IntentEntry {
    pub tag: String,
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(default)]
    pub responses: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl IntentsFile {
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading intents from: {}", path.display());
        let format = match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => Format::Json,
            Some("toml") => Format::Toml,
            _ => {
                return Err(invalid(path, "expected a .json or .toml extension".into()));
            }
        };
        let file = match Self::parse(path, format) {
            Ok(file) => file,
            Err(reason) => return Err(invalid(path, reason)),
        };
        if file.intents.is_empty() {
            return Err(invalid(path, "no intents defined".into()));
        }
        debug!("Parsed {} intent entr(ies)", file.intents.len());
        Ok(file)
    }

    fn parse(path: &Path, format: Format) -> std::result::Result<Self, String> {
        let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
        match format {
            Format::Json => serde_json::from_str(&content).map_err(|e| e.to_string()),
            Format::Toml => toml::from_str(&content).map_err(|e| e.to_string()),
        }
    }

    /// Applies the entries to `corpus` and `responses`. Fails on unknown or
    /// repeated tags.
    pub fn apply(
        &self,
        corpus: &mut IntentCorpus,
        responses: &mut ResponseCandidates,
    ) -> Result<()> {
        let mut seen = BTreeSet::new();
        for entry in &self.intents {
            let intent: Intent = entry.tag.parse()?;
            if !seen.insert(intent) {
                return Err(anyhow!(SmartChatError::Config(format!(
                    "intent '{}' is defined more than once in the intents file",
                    intent
                ))));
            }
            if !entry.patterns.is_empty() {
                corpus.replace_intent(intent, &entry.patterns);
            }
            if !entry.responses.is_empty() {
                responses.insert(intent, entry.responses.clone());
            }
            debug!(
                "Applied '{}': {} pattern(s), {} response(s)",
                intent,
                entry.patterns.len(),
                entry.responses.len()
            );
        }
        Ok(())
    }
}

fn invalid(path: &Path, reason: String) -> anyhow::Error {
    SmartChatError::IntentsFile {
        path: path.display().to_string(),
        reason,
    }
    .into()
}
