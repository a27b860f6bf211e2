//! # SmartChat Chat Command
//!
//! File: cli/src/commands/chat.rs
//!
//! ## Overview
//!
//! Runs the interactive session on the terminal. This is also what `smartchat`
//! does when started without a subcommand.
//!
//! Startup flow:
//! 1. Load configuration (files plus CLI overrides)
//! 2. Build the chatbot (corpus, classifier training, response table)
//! 3. Seed the response RNG (`--seed` / `bot.seed`, else from the OS)
//! 4. Run the dispatch loop on locked stdin/stdout
//!
//! Everything in steps 1-2 that fails is fatal and reported by `main`. Once the
//! loop is running, nothing the user types can make the command fail.
//!
//! ```bash
//! smartchat
//! smartchat chat --name Rusty --seed 7
//! ```
//!
use crate::commands::build_rng;
use clap::Parser;
use smartchat::bot::dispatch::Session;
use smartchat::bot::Chatbot;
use smartchat::core::config::{self, ConfigOverrides};
use smartchat::core::error::Result;
use std::io;
use tracing::info;

#[derive(Parser, Debug, Default)]
pub struct ChatArgs {
    /// Name the bot introduces itself with (overrides `bot.name`).
    #[arg(long)]
    pub name: Option<String>,
}

pub fn handle_chat(args: ChatArgs, mut overrides: ConfigOverrides) -> Result<()> {
    info!("Handling chat command with args: {:?}", args);
    if args.name.is_some() {
        overrides.bot_name = args.name;
    }
    let config = config::load_config(&overrides)?;
    let bot = Chatbot::build(&config)?;
    let rng = build_rng(config.bot.seed);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(&bot, &config.bot.exit_keywords, rng);
    let summary = session.run(stdin.lock(), stdout.lock());
    info!(
        "Chat session finished after {} turn(s) ({:?})",
        summary.turns, summary.termination
    );
    Ok(())
}
