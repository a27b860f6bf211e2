//! # SmartChat Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the SmartChat CLI application.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the appropriate command handler
//!
//! ## Architecture
//!
//! - Each subcommand (`chat`, `classify`, `intents`) is a variant of `Commands`
//! - Running without a subcommand starts a chat session
//! - Global flags are folded into `ConfigOverrides` and passed to the handler
//! - All startup errors propagate to this level for consistent reporting
//!
//! Logs go to stderr so that stdout carries only the conversation.
//!
//! ## Examples
//!
//! ```bash
//! # Start chatting
//! smartchat
//!
//! # Use a custom intents file and show info-level logs
//! smartchat -v --intents ./intents.json
//!
//! # Classify one phrase
//! smartchat classify tell me a fact
//! ```
//!
use clap::{Parser, Subcommand};
use smartchat::core::config::ConfigOverrides;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "smartchat",
    about = "💬 SmartChat: a small intent-classifying terminal chatbot",
    long_about = "Chat with a rule-based assistant that recognises greetings, farewells,\n\
                  health and study advice requests, fun-fact requests and thanks.\n\
                  Runs an interactive session when no subcommand is given.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file to use instead of the discovered ones.
    #[arg(long, env = "SMARTCHAT_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// JSON or TOML intents file layered over the built-in intents.
    #[arg(long, env = "SMARTCHAT_INTENTS", global = true)]
    intents: Option<PathBuf>,

    /// Seed for response selection, for reproducible sessions.
    #[arg(long, global = true)]
    seed: Option<u64>,
}

/// Enum defining all available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start an interactive chat session (the default).
    Chat(commands::chat::ChatArgs),
    /// Classify a single phrase and print the intent.
    #[command(alias = "c")]
    Classify(commands::classify::ClassifyArgs),
    /// List the loaded intents.
    #[command(alias = "i")]
    Intents(commands::intents::IntentsArgs),
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let overrides = ConfigOverrides {
        config_file: cli.config,
        bot_name: None,
        intents_file: cli.intents,
        seed: cli.seed,
    };

    let command_result = match cli.command {
        None => commands::chat::handle_chat(Default::default(), overrides),
        Some(Commands::Chat(args)) => commands::chat::handle_chat(args, overrides),
        Some(Commands::Classify(args)) => commands::classify::handle_classify(args, overrides),
        Some(Commands::Intents(args)) => commands::intents::handle_intents(args, overrides),
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
