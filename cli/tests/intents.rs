//! # SmartChat CLI Intents Integration Tests
//!
//! File: cli/tests/intents.rs
//!
//! ## Overview
//!
//! Tests for `smartchat intents` and for loading custom intents files through
//! `--intents` and `SMARTCHAT_INTENTS`.
//!

mod common;
use common::*;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_intents_lists_every_intent() {
    let dir = sandbox();
    let mut assert = smartchat_cmd(dir.path()).arg("intents").assert().success();
    for tag in ["greeting", "farewell", "health", "fact", "study", "thanks", "unknown"] {
        assert = assert.stdout(predicate::str::contains(tag));
    }
}

#[test]
fn test_intents_with_examples() {
    let dir = sandbox();
    smartchat_cmd(dir.path())
        .args(["i", "--examples"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("    > good morning")
                .and(predicate::str::contains("    < Maintain a balanced diet")),
        );
}

/// # Custom Intents File (`test_intents_file_overrides_builtins`)
///
/// Patterns and responses from a JSON intents file replace the built-in ones
/// for the tags it names.
#[test]
fn test_intents_file_overrides_builtins() {
    let dir = sandbox();
    let path = dir.path().join("intents.json");
    fs::write(
        &path,
        r#"{"intents": [
            {"tag": "greeting", "patterns": ["howdy", "ahoy"], "responses": ["Howdy, partner!"]},
            {"tag": "fallback", "responses": ["Come again?"]}
        ]}"#,
    )
    .unwrap();

    smartchat_cmd(dir.path())
        .arg("--intents")
        .arg(&path)
        .args(["intents", "--examples"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("    > howdy")
                .and(predicate::str::contains("    < Howdy, partner!"))
                .and(predicate::str::contains("    < Come again?"))
                .and(predicate::str::contains("    > good morning").not()),
        );

    smartchat_cmd(dir.path())
        .env("SMARTCHAT_INTENTS", &path)
        .write_stdin("Ahoy\nzzzz\nexit\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Chatbot: Howdy, partner!")
                .and(predicate::str::contains("Chatbot: Come again?")),
        );
}

#[test]
fn test_intents_toml_file() {
    let dir = sandbox();
    let path = dir.path().join("intents.toml");
    fs::write(
        &path,
        "[[intents]]\ntag = \"thanks\"\nresponses = [\"No problem, says {{ bot_name }}.\"]\n",
    )
    .unwrap();
    smartchat_cmd(dir.path())
        .arg("--intents")
        .arg(&path)
        .args(["classify", "--respond", "thank you"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No problem, says Chatbot."));
}

/// Responses are compiled when the bot is built, so a broken template fails
/// `classify` even though `intents` can still list it.
#[test]
fn test_intents_file_with_broken_template() {
    let dir = sandbox();
    let path = dir.path().join("intents.json");
    fs::write(
        &path,
        r#"{"intents": [{"tag": "fact", "responses": ["{{ oops"]}]}"#,
    )
    .unwrap();
    smartchat_cmd(dir.path())
        .arg("--intents")
        .arg(&path)
        .args(["intents", "--examples"])
        .assert()
        .success()
        .stdout(predicate::str::contains("{{ oops"));

    smartchat_cmd(dir.path())
        .arg("--intents")
        .arg(&path)
        .args(["classify", "tell me a fact"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:").and(predicate::str::contains("template")));
}
