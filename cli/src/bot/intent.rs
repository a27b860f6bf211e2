//! # Intent Labels
//!
//! File: cli/src/bot/intent.rs
//!
//! The fixed set of intent categories SmartChat can recognise. Intents are
//! compiled in; configuration can change the phrases and responses attached to
//! an intent but never add or remove one.
//!
use crate::core::error::SmartChatError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The semantic category assigned to a user utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Greeting,
    Farewell,
    Health,
    Fact,
    Study,
    Thanks,
    /// Catch-all for input the classifier does not recognise.
    Unknown,
}

impl Intent {
    /// Every intent, in display order.
    pub const ALL: [Intent; 7] = [
        Intent::Greeting,
        Intent::Farewell,
        Intent::Health,
        Intent::Fact,
        Intent::Study,
        Intent::Thanks,
        Intent::Unknown,
    ];

    /// Intents that must be backed by training examples (all but `Unknown`).
    pub fn supported() -> impl Iterator<Item = Intent> {
        Self::ALL.into_iter().filter(|i| *i != Intent::Unknown)
    }

    /// The canonical lowercase tag, as used in intents files and CLI output.
    pub fn tag(self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::Farewell => "farewell",
            Intent::Health => "health",
            Intent::Fact => "fact",
            Intent::Study => "study",
            Intent::Thanks => "thanks",
            Intent::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Intent {
    type Err = SmartChatError;

    /// Case-insensitive. `fallback` is accepted as an alias of `unknown`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_lowercase();
        if tag == "fallback" {
            return Ok(Intent::Unknown);
        }
        Intent::ALL
            .into_iter()
            .find(|i| i.tag() == tag)
            .ok_or(SmartChatError::UnknownIntentTag { tag: s.to_string() })
    }
}
