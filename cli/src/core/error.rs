//! # SmartChat Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout SmartChat. Every variant
//! describes a *configuration* problem: malformed static data, an unreadable
//! intents file, a template that does not render. These are detected while the
//! chatbot is being built and are fatal; the process never starts serving turns.
//!
//! Runtime conditions are deliberately absent from this enum. Unrecognised input
//! is not an error (it classifies as the `unknown` intent), and failures inside a
//! single turn are handled at the turn boundary by the dispatch loop.
//!
//! ## Architecture
//!
//! - `SmartChatError`: a `thiserror` enum with one variant per startup failure
//! - `Result<T>`: an alias for `anyhow::Result<T>` so callers can attach context
//!
//! ## Examples
//!
//! ```rust,ignore
//! // Return a specific error type
//! if corpus.is_empty() {
//!     return Err(SmartChatError::EmptyCorpus.into());
//! }
//!
//! // Pattern matching on error types
//! match chatbot_result {
//!     Err(e) if e.downcast_ref::<SmartChatError>().map_or(false, |se| {
//!         matches!(se, SmartChatError::IntentsFile { .. })
//!     }) => {
//!         eprintln!("Fix your intents file: {}", e);
//!     }
//!     other => { /* ... */ }
//! }
//! ```
//!
use crate::bot::intent::Intent;
use thiserror::Error;

/// Custom error type for the SmartChat application.
#[derive(Error, Debug)]
pub enum SmartChatError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration error: the intent corpus is empty")]
    EmptyCorpus,

    #[error("Configuration error: intent '{intent}' has no training examples")]
    MissingExamples { intent: Intent },

    #[error("Configuration error: intent '{intent}' has no candidate responses")]
    MissingResponses { intent: Intent },

    #[error("Configuration error: unknown intent tag '{tag}'")]
    UnknownIntentTag { tag: String },

    #[error("Configuration error: invalid intents file '{path}': {reason}")]
    IntentsFile { path: String, reason: String },

    #[error("Template rendering error: {source}")]
    Template {
        #[from]
        source: tera::Error,
    },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
