//! # SmartChat CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration test files. Each test runs the compiled
//! `smartchat` binary inside a fresh temporary directory that doubles as `HOME`
//! and the XDG config root, so configuration files on the developer's machine
//! never leak into a test.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;

/// Temporary sandbox: working directory, `HOME` and config root in one.
pub fn sandbox() -> TempDir {
    tempfile::tempdir().expect("Failed to create sandbox directory")
}

/// # Get SmartChat Command (`smartchat_cmd`)
///
/// An `assert_cmd::Command` for the `smartchat` binary, isolated in `sandbox`.
///
/// ## Panics
/// Panics if the `smartchat` binary cannot be found via `Command::cargo_bin`.
pub fn smartchat_cmd(sandbox: &Path) -> Command {
    let mut cmd =
        Command::cargo_bin("smartchat").expect("Failed to find smartchat binary for testing");
    cmd.current_dir(sandbox)
        .env("HOME", sandbox)
        .env("XDG_CONFIG_HOME", sandbox.join(".config"))
        .env_remove("SMARTCHAT_CONFIG")
        .env_remove("SMARTCHAT_INTENTS")
        .env_remove("RUST_LOG");
    cmd
}

/// Reply lines printed by the bot (prefix stripped), banner excluded.
pub fn bot_replies(stdout: &[u8], name: &str) -> Vec<String> {
    let text = String::from_utf8_lossy(stdout);
    let prefix = format!("{}: ", name);
    text.split("You: ")
        .flat_map(|chunk| chunk.lines())
        .filter_map(|line| line.strip_prefix(prefix.as_str()))
        .skip(1)
        .map(|line| line.to_string())
        .collect()
}
