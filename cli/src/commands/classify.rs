//! # SmartChat Classify Command
//!
//! File: cli/src/commands/classify.rs
//!
//! Classifies a single phrase and exits. Handy for checking how an intents file
//! behaves without starting a session.
//!
//! ```bash
//! smartchat classify good morning
//! # greeting (confidence 0.912)
//!
//! smartchat classify --json --respond "give me health advice"
//! ```
//!
use crate::commands::build_rng;
use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use smartchat::bot::Chatbot;
use smartchat::core::config::{self, ConfigOverrides};
use smartchat::core::error::Result;
use smartchat::nlp::normalize::normalize;
use smartchat::Intent;
use tracing::info;

#[derive(Parser, Debug)]
pub struct ClassifyArgs {
    /// The phrase to classify. Multiple words are joined with spaces.
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,

    /// Print the result as a JSON object.
    #[arg(long)]
    pub json: bool,

    /// Also pick a response for the predicted intent.
    #[arg(long, short)]
    pub respond: bool,
}

#[derive(Serialize, Debug)]
struct ClassifyOutput<'a> {
    input: &'a str,
    normalized: String,
    intent: Intent,
    confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    response: Option<String>,
}

pub fn handle_classify(args: ClassifyArgs, overrides: ConfigOverrides) -> Result<()> {
    info!("Handling classify command with args: {:?}", args);
    let config = config::load_config(&overrides)?;
    let bot = Chatbot::build(&config)?;

    let input = args.text.join(" ");
    let prediction = bot.classify(&input);
    let response = if args.respond {
        let mut rng = build_rng(config.bot.seed);
        Some(bot.responses().respond(prediction.intent, &mut rng)?)
    } else {
        None
    };

    if args.json {
        let output = ClassifyOutput {
            input: &input,
            normalized: normalize(&input),
            intent: prediction.intent,
            confidence: prediction.confidence,
            response,
        };
        let json = serde_json::to_string_pretty(&output)
            .context("Failed to serialize classification result")?;
        println!("{}", json);
    } else {
        println!(
            "{} (confidence {:.3})",
            prediction.intent, prediction.confidence
        );
        if let Some(text) = response {
            println!("{}: {}", bot.name(), text);
        }
    }
    Ok(())
}
