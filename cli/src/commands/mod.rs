//! # SmartChat Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the subcommands of the SmartChat CLI. Each command
//! defines its own arguments structure and a handler that receives those
//! arguments together with the global configuration overrides.
//!
//! ## Command Groups
//!
//! - `chat`: the interactive session (also run when no subcommand is given)
//! - `classify`: one-shot classification of a phrase
//! - `intents`: lists the intents with their phrases and responses
//!

/// Interactive chat session over stdin/stdout.
pub mod chat;
/// One-shot classification, plain or JSON output.
pub mod classify;
/// Inspection of the loaded intents.
pub mod intents;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

/// Response-selection RNG: deterministic when a seed is configured.
pub(crate) fn build_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => {
            debug!("Seeding response selection with {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    }
}
