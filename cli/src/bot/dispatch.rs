//! # Dispatch Loop
//!
//! File: cli/src/bot/dispatch.rs
//!
//! ## Overview
//!
//! The interactive session: print a banner, then repeatedly prompt, read one
//! line, classify it and print a reply until the user types an exit keyword or
//! the input stream ends.
//!
//! ## State machine
//!
//! ```text
//! AwaitingInput ──line──▶ Classifying ──intent──▶ Responding ──▶ AwaitingInput
//!       │                      │
//!       └─ end of input ──▶ Terminated ◀── exit keyword (after a farewell line)
//! ```
//!
//! A single bad turn never ends the session:
//! - a response that fails to render is replaced by a generic apology
//! - a line that is not valid UTF-8 gets a notice and the next line is read
//!
//! The session ends early, without error, only when reading the input fails
//! or the output can no longer be written.
//!
use crate::bot::intent::Intent;
use crate::bot::Chatbot;
use crate::nlp::normalize::normalize;
use rand::Rng;
use std::io::{self, BufRead, Write};
use tracing::{debug, error, info, warn};

/// Printed when a turn fails after classification.
pub const GENERIC_FALLBACK: &str = "Oops! Something went wrong.";
/// Printed when a line cannot be decoded.
pub const READ_NOTICE: &str = "Sorry, I couldn't read that. Please try again.";
pub const PROMPT: &str = "You: ";

/// One line of input, alive for a single iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationTurn {
    pub raw: String,
    pub normalized: String,
}

impl ConversationTurn {
    pub fn new(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            normalized: normalize(raw),
        }
    }
}

/// Why the session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    ExitKeyword,
    EndOfInput,
    InputLost,
    OutputLost,
}

#[derive(Debug, Clone, PartialEq)]
enum LoopState {
    AwaitingInput,
    Classifying(ConversationTurn),
    Responding(Intent),
    Terminated(Termination),
}

/// Result of reading one line.
#[derive(Debug)]
enum ReadOutcome {
    Line(ConversationTurn),
    /// The line was consumed but is not valid UTF-8.
    Undecodable,
    EndOfInput,
}

/// What a finished session reports back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    /// Turns that reached classification (the exit turn included).
    pub turns: usize,
    pub termination: Termination,
}

pub struct Session<'a, R> {
    bot: &'a Chatbot,
    exit_keywords: Vec<String>,
    rng: R,
}

impl<'a, R: Rng> Session<'a, R> {
    pub fn new(bot: &'a Chatbot, exit_keywords: &[String], rng: R) -> Self {
        Self {
            bot,
            exit_keywords: exit_keywords.iter().map(|k| normalize(k)).collect(),
            rng,
        }
    }

    pub fn is_exit(&self, normalized: &str) -> bool {
        self.exit_keywords.iter().any(|k| k == normalized)
    }

    /// Runs the session to completion. I/O problems end the session but are
    /// never returned as errors.
    pub fn run<I: BufRead, O: Write>(&mut self, mut input: I, mut output: O) -> SessionSummary {
        let mut turns = 0;
        let mut state = LoopState::AwaitingInput;

        let hint = self.exit_keywords.first().map_or("exit", String::as_str);
        let banner = format!(
            "Hi! I'm {}. Type '{}' to end the conversation.",
            self.bot.name(),
            hint
        );
        if self.say(&mut output, &banner).is_err() {
            return self.finish(turns, Termination::OutputLost);
        }

        loop {
            state = match state {
                LoopState::AwaitingInput => {
                    if prompt(&mut output).is_err() {
                        LoopState::Terminated(Termination::OutputLost)
                    } else {
                        self.await_input(&mut input, &mut output)
                    }
                }
                LoopState::Classifying(turn) => {
                    turns += 1;
                    debug!("Turn {}: {:?}", turns, turn.raw);
                    if self.is_exit(&turn.normalized) {
                        info!("Exit keyword {:?} received", turn.normalized);
                        let farewell = self.respond(Intent::Farewell);
                        match self.say(&mut output, &farewell) {
                            Ok(()) => LoopState::Terminated(Termination::ExitKeyword),
                            Err(_) => LoopState::Terminated(Termination::OutputLost),
                        }
                    } else {
                        let prediction = self.bot.classify_normalized(&turn.normalized);
                        LoopState::Responding(prediction.intent)
                    }
                }
                LoopState::Responding(intent) => {
                    let text = self.respond(intent);
                    match self.say(&mut output, &text) {
                        Ok(()) => LoopState::AwaitingInput,
                        Err(_) => LoopState::Terminated(Termination::OutputLost),
                    }
                }
                LoopState::Terminated(termination) => return self.finish(turns, termination),
            };
        }
    }

    fn await_input<I: BufRead, O: Write>(&self, input: &mut I, output: &mut O) -> LoopState {
        match read_turn(input) {
            Ok(ReadOutcome::Line(turn)) => LoopState::Classifying(turn),
            Ok(ReadOutcome::Undecodable) => match self.say(output, READ_NOTICE) {
                Ok(()) => LoopState::AwaitingInput,
                Err(_) => LoopState::Terminated(Termination::OutputLost),
            },
            Ok(ReadOutcome::EndOfInput) => {
                // Leave the terminal on a fresh line after the dangling prompt.
                if let Err(e) = writeln!(output) {
                    error!("Failed to write to output: {}", e);
                }
                LoopState::Terminated(Termination::EndOfInput)
            }
            Err(e) => {
                error!("Failed to read from input: {}", e);
                LoopState::Terminated(Termination::InputLost)
            }
        }
    }

    fn respond(&mut self, intent: Intent) -> String {
        match self.bot.responses().respond(intent, &mut self.rng) {
            Ok(text) => text,
            Err(e) => {
                warn!("Failed to produce a response for '{}': {:?}", intent, e);
                GENERIC_FALLBACK.to_string()
            }
        }
    }

    fn say<O: Write>(&self, output: &mut O, text: &str) -> io::Result<()> {
        writeln!(output, "{}: {}", self.bot.name(), text)
            .and_then(|_| output.flush())
            .inspect_err(|e| error!("Failed to write to output: {}", e))
    }

    fn finish(&self, turns: usize, termination: Termination) -> SessionSummary {
        debug!("Session ended after {} turn(s): {:?}", turns, termination);
        SessionSummary { turns, termination }
    }
}

fn prompt<O: Write>(output: &mut O) -> io::Result<()> {
    write!(output, "{}", PROMPT)?;
    output.flush()
}

/// Reads up to and including the next newline. Interrupted reads are retried
/// by `read_until`.
fn read_turn<I: BufRead>(input: &mut I) -> io::Result<ReadOutcome> {
    let mut bytes = Vec::new();
    if input.read_until(b'\n', &mut bytes)? == 0 {
        return Ok(ReadOutcome::EndOfInput);
    }
    match String::from_utf8(bytes) {
        Ok(line) => {
            let raw = line.trim_end_matches(['\n', '\r']);
            Ok(ReadOutcome::Line(ConversationTurn::new(raw)))
        }
        Err(e) => {
            warn!("Discarding undecodable line: {}", e);
            Ok(ReadOutcome::Undecodable)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::corpus::IntentCorpus;
    use crate::bot::responses::{builtin_candidates, ResponseTable};
    use crate::core::config::Config;
    use crate::nlp::classifier::{train_classifier, ClassifierKind, TrainingOptions};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;
    use std::io::{BufReader, Cursor, ErrorKind, Read};

    fn bot() -> Chatbot {
        Chatbot::build(&Config::default()).unwrap()
    }

    fn run(bot: &Chatbot, input: &[u8]) -> (SessionSummary, Vec<String>) {
        let keywords = Config::default().bot.exit_keywords;
        let mut session = Session::new(bot, &keywords, StdRng::seed_from_u64(11));
        let mut out = Vec::new();
        let summary = session.run(Cursor::new(input.to_vec()), &mut out);
        let text = String::from_utf8(out).unwrap();
        let lines = text
            .split(PROMPT)
            .flat_map(|chunk| chunk.lines())
            .filter(|l| !l.is_empty())
            .map(|l| l.to_string())
            .collect();
        (summary, lines)
    }

    fn replies(lines: &[String]) -> Vec<String> {
        lines
            .iter()
            .skip(1) // banner
            .map(|l| l.strip_prefix("Chatbot: ").unwrap().to_string())
            .collect()
    }

    fn is_candidate(bot: &Chatbot, intent: Intent, reply: &str) -> bool {
        let rendered = bot.responses().rendered(intent).unwrap();
        rendered.iter().any(|r| r == reply)
    }

    #[test]
    fn test_banner_and_prompt() {
        let bot = bot();
        let keywords = ["exit".to_string()];
        let mut session = Session::new(&bot, &keywords, StdRng::seed_from_u64(1));
        let mut out = Vec::new();
        session.run(Cursor::new(Vec::new()), &mut out);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with(
            "Chatbot: Hi! I'm Chatbot. Type 'exit' to end the conversation.\nYou: "
        ));
    }

    #[test]
    fn test_greeting_then_end_of_input() {
        let bot = bot();
        let (summary, lines) = run(&bot, b"good morning\n");
        assert_eq!(summary.termination, Termination::EndOfInput);
        assert_eq!(summary.turns, 1);
        let replies = replies(&lines);
        assert_eq!(replies.len(), 1);
        assert!(is_candidate(&bot, Intent::Greeting, &replies[0]));
    }

    #[test]
    fn test_health_advice() {
        let (_, lines) = run(&bot(), b"give me health advice\n");
        assert_eq!(
            replies(&lines),
            vec!["Maintain a balanced diet and exercise regularly."]
        );
    }

    #[test]
    fn test_bye_bye_terminates_with_farewell() {
        let bot = bot();
        let (summary, lines) = run(&bot, b"bye bye\nhello\n");
        assert_eq!(summary.termination, Termination::ExitKeyword);
        assert_eq!(summary.turns, 1);
        let replies = replies(&lines);
        assert_eq!(replies.len(), 1, "nothing after the exit turn is read");
        assert!(is_candidate(&bot, Intent::Farewell, &replies[0]));
    }

    #[test]
    fn test_exit_is_case_insensitive() {
        let (summary, _) = run(&bot(), b"  EXIT \n");
        assert_eq!(summary.termination, Termination::ExitKeyword);
    }

    #[test]
    fn test_gibberish_falls_back_and_continues() {
        let bot = bot();
        let (summary, lines) = run(&bot, b"asdkjfh qwpoe\nthanks\nexit\n");
        assert_eq!(summary.termination, Termination::ExitKeyword);
        assert_eq!(summary.turns, 3);
        let replies = replies(&lines);
        assert!(is_candidate(&bot, Intent::Unknown, &replies[0]));
        assert!(is_candidate(&bot, Intent::Thanks, &replies[1]));
    }

    #[test]
    fn test_blank_line_is_a_turn() {
        let bot = bot();
        let (summary, lines) = run(&bot, b"\n   \n");
        assert_eq!(summary.turns, 2);
        for reply in replies(&lines) {
            assert!(is_candidate(&bot, Intent::Unknown, &reply));
        }
    }

    #[test]
    fn test_crlf_input() {
        let (summary, _) = run(&bot(), b"quit\r\n");
        assert_eq!(summary.termination, Termination::ExitKeyword);
    }

    #[test]
    fn test_invalid_utf8_is_not_fatal() {
        let bot = bot();
        let (summary, lines) = run(&bot, b"\xff\xfe\nhello\n");
        assert_eq!(summary.termination, Termination::EndOfInput);
        let replies = replies(&lines);
        assert_eq!(replies[0], READ_NOTICE);
        assert!(is_candidate(&bot, Intent::Greeting, &replies[1]));
    }

    /// Undecodable lines never add up to a lost input stream.
    #[test]
    fn test_many_invalid_utf8_lines_in_a_row() {
        let bot = bot();
        let (summary, lines) = run(&bot, b"\xff\n\xfe\n\xfd\n\xc3\nhello\nexit\n");
        assert_eq!(summary.termination, Termination::ExitKeyword);
        assert_eq!(summary.turns, 2);
        let replies = replies(&lines);
        assert_eq!(replies.len(), 6);
        assert!(replies[..4].iter().all(|r| r == READ_NOTICE));
        assert!(is_candidate(&bot, Intent::Greeting, &replies[4]));
        assert!(is_candidate(&bot, Intent::Farewell, &replies[5]));
    }

    struct BrokenReader;

    impl Read for BrokenReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(ErrorKind::BrokenPipe, "gone"))
        }
    }

    #[test]
    fn test_lost_input_terminates_gracefully() {
        let bot = bot();
        let keywords = ["exit".to_string()];
        let mut session = Session::new(&bot, &keywords, StdRng::seed_from_u64(1));
        let summary = session.run(BufReader::new(BrokenReader), Vec::new());
        assert_eq!(summary.termination, Termination::InputLost);
        assert_eq!(summary.turns, 0);
    }

    /// Accepts `budget` bytes, then fails every write.
    struct ShortWriter {
        budget: usize,
    }

    impl Write for ShortWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if buf.len() > self.budget {
                return Err(io::Error::new(ErrorKind::BrokenPipe, "closed"));
            }
            self.budget -= buf.len();
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn transcript_len(bot: &Chatbot, input: &[u8]) -> usize {
        let keywords = ["exit".to_string()];
        let mut session = Session::new(bot, &keywords, StdRng::seed_from_u64(1));
        let mut out = Vec::new();
        session.run(Cursor::new(input.to_vec()), &mut out);
        out.len()
    }

    #[test]
    fn test_lost_output_terminates_gracefully() {
        let bot = bot();
        let keywords = ["exit".to_string()];
        let mut session = Session::new(&bot, &keywords, StdRng::seed_from_u64(1));
        let writer = ShortWriter { budget: 10 };
        let summary = session.run(Cursor::new(b"hello\n".to_vec()), writer);
        assert_eq!(summary.termination, Termination::OutputLost);
        assert_eq!(summary.turns, 0);
    }

    /// Only the newline printed at end of input fails. The session still ends
    /// as end of input.
    #[test]
    fn test_failed_newline_at_end_of_input() {
        let bot = bot();
        let budget = transcript_len(&bot, b"") - 1;
        let keywords = ["exit".to_string()];
        let mut session = Session::new(&bot, &keywords, StdRng::seed_from_u64(1));
        let summary = session.run(Cursor::new(Vec::new()), ShortWriter { budget });
        assert_eq!(summary.termination, Termination::EndOfInput);
        assert_eq!(summary.turns, 0);
    }

    /// A failed response is replaced by the generic apology and the session goes on.
    #[test]
    fn test_failed_response_prints_generic_fallback() {
        let mut candidates = builtin_candidates();
        candidates.remove(&Intent::Greeting);
        let responses = ResponseTable::incomplete(candidates, "Chatbot").unwrap();
        let classifier = train_classifier(
            ClassifierKind::Logistic,
            &IntentCorpus::builtin(),
            &TrainingOptions::default(),
        )
        .unwrap();
        let bot = Chatbot::from_parts("Chatbot", classifier, responses);

        let (summary, lines) = run(&bot, b"hello\nhealth advice\nexit\n");
        assert_eq!(summary.termination, Termination::ExitKeyword);
        let replies = replies(&lines);
        assert_eq!(replies[0], GENERIC_FALLBACK);
        assert_eq!(
            replies[1],
            "Maintain a balanced diet and exercise regularly."
        );
        assert!(is_candidate(&bot, Intent::Farewell, &replies[2]));
    }

    #[test]
    fn test_repeated_input_varies() {
        let bot = bot();
        let input = "hello\n".repeat(60);
        let (_, lines) = run(&bot, input.as_bytes());
        let distinct: HashSet<String> = replies(&lines).into_iter().collect();
        assert!(distinct.len() > 1);
    }
}
