//! # SmartChat Library
//!
//! File: cli/src/lib.rs
//!
//! The chatbot engine behind the `smartchat` binary. Exposed as a library so the
//! integration tests in `cli/tests/` can drive it directly.
//!
//! - `core`: configuration, errors, templating
//! - `nlp`: normalization, vectorization, classifiers
//! - `bot`: intents, corpus, responses, the dispatch loop
//!
pub mod bot;
pub mod core;
pub mod nlp;

pub use bot::intent::Intent;
pub use bot::Chatbot;
pub use nlp::classifier::{IntentClassifier, Prediction};
