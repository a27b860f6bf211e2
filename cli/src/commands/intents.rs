//! # SmartChat Intents Command
//!
//! File: cli/src/commands/intents.rs
//!
//! Lists every intent with the number of training phrases and candidate
//! responses currently loaded (built-ins plus any intents file). No model is
//! trained, so this also works on an intents file that fails validation.
//!
use clap::Parser;
use smartchat::bot::IntentData;
use smartchat::core::config::{self, ConfigOverrides};
use smartchat::core::error::Result;
use smartchat::Intent;
use tracing::info;

#[derive(Parser, Debug)]
pub struct IntentsArgs {
    /// Print the training phrases and responses of each intent.
    #[arg(long, short)]
    pub examples: bool,
}

pub fn handle_intents(args: IntentsArgs, overrides: ConfigOverrides) -> Result<()> {
    info!("Handling intents command with args: {:?}", args);
    let config = config::load_config(&overrides)?;
    let data = IntentData::load(&config)?;

    for intent in Intent::ALL {
        let phrases: Vec<&str> = data
            .corpus
            .examples_for(intent)
            .map(|e| e.text.as_str())
            .collect();
        let responses = data
            .responses
            .get(&intent)
            .map(Vec::as_slice)
            .unwrap_or_default();
        println!(
            "{:<10} {:>3} example(s) {:>3} response(s)",
            intent,
            phrases.len(),
            responses.len()
        );
        if args.examples {
            for phrase in &phrases {
                println!("    > {}", phrase);
            }
            for response in responses {
                println!("    < {}", response);
            }
        }
    }
    Ok(())
}
