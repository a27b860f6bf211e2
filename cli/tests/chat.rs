//! # SmartChat CLI Chat Integration Tests
//!
//! File: cli/tests/chat.rs
//!
//! ## Overview
//!
//! Drives the interactive session end to end by piping a scripted conversation
//! into the `smartchat` binary and checking the transcript:
//!
//! - the banner and prompt format
//! - replies for recognized intents and the fallback for gibberish
//! - termination by exit keyword and by end of input
//! - `--name`, `--seed` and project configuration handling
//!

mod common;
use common::*;
use predicates::prelude::*;
use std::fs;

const GREETINGS: [&str; 3] = [
    "Hey!",
    "Hello! I'm Chatbot. How can I help you today?",
    "Hi there! What can I do for you?",
];
const FAREWELLS: [&str; 3] = ["Catch you later!", "Goodbye! Take care.", "See you soon!"];
const FALLBACKS: [&str; 3] = [
    "I'm not sure I understand. Could you rephrase?",
    "Sorry, I didn't catch that. Could you explain further?",
    "I'm still learning. Please provide more details.",
];

/// # Test Greeting Then Exit (`test_chat_greeting_then_exit`)
///
/// A greeting gets a greeting reply, and `exit` ends the session with a
/// farewell and a zero exit code.
#[test]
fn test_chat_greeting_then_exit() {
    let dir = sandbox();
    let assert = smartchat_cmd(dir.path())
        .write_stdin("good morning\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Chatbot: Hi! I'm Chatbot. Type 'exit' to end the conversation.\nYou: ",
        ));

    let replies = bot_replies(&assert.get_output().stdout, "Chatbot");
    assert_eq!(replies.len(), 2, "unexpected transcript: {:?}", replies);
    assert!(GREETINGS.contains(&replies[0].as_str()));
    assert!(FAREWELLS.contains(&replies[1].as_str()));
}

/// The `chat` subcommand behaves like the bare binary.
#[test]
fn test_chat_subcommand_health_advice() {
    let dir = sandbox();
    smartchat_cmd(dir.path())
        .arg("chat")
        .write_stdin("give me health advice\nbye bye\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Chatbot: Maintain a balanced diet and exercise regularly.",
        ));
}

/// Gibberish gets a fallback reply and the session keeps going.
#[test]
fn test_chat_gibberish_continues() {
    let dir = sandbox();
    let assert = smartchat_cmd(dir.path())
        .write_stdin("qwzx plorf\nhealth tips\nquit\n")
        .assert()
        .success();

    let replies = bot_replies(&assert.get_output().stdout, "Chatbot");
    assert_eq!(replies.len(), 3);
    assert!(FALLBACKS.contains(&replies[0].as_str()));
    assert_eq!(
        replies[1],
        "Maintain a balanced diet and exercise regularly."
    );
    assert!(FAREWELLS.contains(&replies[2].as_str()));
}

/// Exit keywords match after trimming and lowercasing, nothing after them is read.
#[test]
fn test_chat_exit_keyword_is_normalized() {
    let dir = sandbox();
    let assert = smartchat_cmd(dir.path())
        .write_stdin("   GoodBye  \nhello\n")
        .assert()
        .success();
    let replies = bot_replies(&assert.get_output().stdout, "Chatbot");
    assert_eq!(replies.len(), 1);
    assert!(FAREWELLS.contains(&replies[0].as_str()));
}

/// End of input without an exit keyword is a clean shutdown.
#[test]
fn test_chat_end_of_input() {
    let dir = sandbox();
    smartchat_cmd(dir.path())
        .write_stdin("thanks a lot\n")
        .assert()
        .success()
        .stdout(predicate::str::ends_with("You: \n"));
}

#[test]
fn test_chat_empty_input() {
    let dir = sandbox();
    let assert = smartchat_cmd(dir.path()).write_stdin("").assert().success();
    let replies = bot_replies(&assert.get_output().stdout, "Chatbot");
    assert!(replies.is_empty());
}

/// `--name` changes the reply prefix, the banner and the templated greeting.
#[test]
fn test_chat_custom_name() {
    let dir = sandbox();
    smartchat_cmd(dir.path())
        .args(["chat", "--name", "Rusty"])
        .write_stdin("health advice\nexit\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Rusty: Hi! I'm Rusty.")
                .and(predicate::str::contains("Rusty: Maintain a balanced diet"))
                .and(predicate::str::contains("Chatbot:").not()),
        );
}

/// The same seed replays the same transcript.
#[test]
fn test_chat_seed_is_reproducible() {
    let dir = sandbox();
    let script = "hello\nhello\nhello\ntell me a fact\nthanks\nbye\n";
    let run = || {
        smartchat_cmd(dir.path())
            .args(["--seed", "1234"])
            .write_stdin(script)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone()
    };
    assert_eq!(run(), run());
}

/// A project `.smartchat.toml` in the working directory is picked up.
#[test]
fn test_chat_project_config() {
    let dir = sandbox();
    fs::write(
        dir.path().join(".smartchat.toml"),
        "[bot]\nname = \"Ada\"\nexit_keywords = [\"stop\"]\n",
    )
    .unwrap();

    let assert = smartchat_cmd(dir.path())
        .write_stdin("exit\nstop\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ada: Hi! I'm Ada. Type 'stop' to end the conversation."));

    // "exit" is no longer an exit keyword, so it is an ordinary turn.
    let replies = bot_replies(&assert.get_output().stdout, "Ada");
    assert_eq!(replies.len(), 2);
}

/// Invalid UTF-8 produces a notice instead of ending the session.
#[test]
fn test_chat_invalid_utf8_line() {
    let dir = sandbox();
    let mut script = b"\xff\xfe\n".to_vec();
    script.extend_from_slice(b"health advice\nexit\n");
    smartchat_cmd(dir.path())
        .write_stdin(script)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Sorry, I couldn't read that. Please try again.")
                .and(predicate::str::contains("Maintain a balanced diet")),
        );
}
