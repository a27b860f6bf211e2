//! # SmartChat Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module implements configuration loading, merging, validation and access
//! for SmartChat. It combines defaults, user settings, project settings and
//! command-line overrides into one immutable [`Config`] that the chatbot is
//! built from.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Command-line flags (`--intents`, `--seed`, `chat --name`)
//! 2. An explicit file given with `--config` / `SMARTCHAT_CONFIG`; when present,
//!    the two discovered files below are not read
//! 3. Project-specific `.smartchat.toml` in the current directory or an
//!    ancestor (the search stops at a directory containing `.git`)
//! 4. User-specific `config.toml` in the platform config directory
//!    (e.g. `~/.config/smartchat/config.toml`)
//! 5. Default values defined in the code
//!
//! After merging, `~` in `bot.intents_file` is expanded and the result is
//! validated. Every validation failure is a `SmartChatError::Config`.
//!
//! ## Examples
//!
//! ```toml
//! [bot]
//! name = "Rusty"
//! exit_keywords = ["exit", "quit"]
//! intents_file = "~/chat/intents.json"
//!
//! [classifier]
//! kind = "naive-bayes"
//! min_confidence = 0.3
//! ```
//!
//! ```rust,ignore
//! let cfg = config::load_config(&ConfigOverrides::default())?;
//! let options = cfg.classifier.training_options();
//! ```
//!
use crate::core::error::{Result, SmartChatError};
use crate::nlp::classifier::{ClassifierKind, TrainingOptions};
use crate::nlp::normalize::normalize;
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
}

/// Settings for the conversation itself.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    /// Name shown as the reply prefix and available to templates as `bot_name`.
    #[serde(default = "default_bot_name")]
    pub name: String,
    /// Inputs that end the session, compared after normalization.
    #[serde(default = "default_exit_keywords")]
    pub exit_keywords: Vec<String>,
    /// Optional JSON or TOML intents file (can use ~). Will be expanded.
    #[serde(default)]
    pub intents_file: Option<String>,
    /// Fixed seed for response selection; OS-seeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Classifier selection and training hyper-parameters.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ClassifierConfig {
    #[serde(default)]
    pub kind: ClassifierKind,
    #[serde(default = "default_epochs")]
    pub epochs: usize,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    #[serde(default = "default_l2")]
    pub l2: f64,
    /// Top-class probability below which input is treated as unknown.
    #[serde(default)]
    pub min_confidence: f64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_bot_name(),
            exit_keywords: default_exit_keywords(),
            intents_file: None,
            seed: None,
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            kind: ClassifierKind::default(),
            epochs: default_epochs(),
            learning_rate: default_learning_rate(),
            l2: default_l2(),
            min_confidence: 0.0,
        }
    }
}

impl ClassifierConfig {
    pub fn training_options(&self) -> TrainingOptions {
        TrainingOptions {
            epochs: self.epochs,
            learning_rate: self.learning_rate,
            l2: self.l2,
            min_confidence: self.min_confidence,
        }
    }
}

fn default_bot_name() -> String {
    "Chatbot".to_string()
}
fn default_exit_keywords() -> Vec<String> {
    ["exit", "quit", "bye", "bye bye", "goodbye"]
        .iter()
        .map(|k| k.to_string())
        .collect()
}
fn default_epochs() -> usize {
    TrainingOptions::default().epochs
}
fn default_learning_rate() -> f64 {
    TrainingOptions::default().learning_rate
}
fn default_l2() -> f64 {
    TrainingOptions::default().l2
}

/// Values supplied on the command line. `None` leaves the file value alone.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub config_file: Option<PathBuf>,
    pub bot_name: Option<String>,
    pub intents_file: Option<PathBuf>,
    pub seed: Option<u64>,
}

const PROJECT_CONFIG_FILENAME: &str = ".smartchat.toml";

pub fn load_config(overrides: &ConfigOverrides) -> Result<Config> {
    let mut config = match &overrides.config_file {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            load_config_from_path(path)?
        }
        None => {
            let user_config = load_user_config()?;
            let project_config = load_project_config()?;
            merge_configs(user_config.unwrap_or_default(), project_config)
        }
    };
    apply_overrides(&mut config, overrides);
    expand_config_paths(&mut config);
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "SmartChat", "smartchat") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.smartchat.toml) found.");
        Ok(None)
    }
}

fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content).map_err(|e| {
        anyhow!(SmartChatError::Config(format!(
            "Failed to parse TOML from file {}: {}",
            path.display(),
            e
        )))
    })
}

/// The project value when it differs from the default, otherwise the user value.
fn prefer<T: PartialEq>(project: T, user: T, default: &T) -> T {
    if project != *default {
        project
    } else {
        user
    }
}

/// Field-wise merge: a project value wins when it differs from the default.
fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project = match project {
        Some(p) => p,
        None => return user,
    };
    let defaults = Config::default();
    let (pb, ub, db) = (project.bot, user.bot, defaults.bot);
    let (pc, uc, dc) = (project.classifier, user.classifier, defaults.classifier);

    Config {
        bot: BotConfig {
            name: prefer(pb.name, ub.name, &db.name),
            exit_keywords: prefer(pb.exit_keywords, ub.exit_keywords, &db.exit_keywords),
            intents_file: pb.intents_file.or(ub.intents_file),
            seed: pb.seed.or(ub.seed),
        },
        classifier: ClassifierConfig {
            kind: prefer(pc.kind, uc.kind, &dc.kind),
            epochs: prefer(pc.epochs, uc.epochs, &dc.epochs),
            learning_rate: prefer(pc.learning_rate, uc.learning_rate, &dc.learning_rate),
            l2: prefer(pc.l2, uc.l2, &dc.l2),
            min_confidence: prefer(pc.min_confidence, uc.min_confidence, &dc.min_confidence),
        },
    }
}

fn apply_overrides(config: &mut Config, overrides: &ConfigOverrides) {
    if let Some(name) = &overrides.bot_name {
        config.bot.name = name.clone();
    }
    if let Some(path) = &overrides.intents_file {
        config.bot.intents_file = Some(path.to_string_lossy().into_owned());
    }
    if let Some(seed) = overrides.seed {
        config.bot.seed = Some(seed);
    }
}

fn expand_config_paths(config: &mut Config) {
    if let Some(path) = &config.bot.intents_file {
        let expanded = shellexpand::tilde(path).into_owned();
        debug!("Expanded intents file path: {}", expanded);
        config.bot.intents_file = Some(expanded);
    }
}

fn validate_config(config: &Config) -> Result<()> {
    info!("Validating final configuration...");
    if config.bot.name.trim().is_empty() {
        return Err(anyhow!(SmartChatError::Config("bot.name must not be empty".into())));
    }
    if config.bot.exit_keywords.is_empty() {
        return Err(anyhow!(SmartChatError::Config(
            "bot.exit_keywords must list at least one keyword".into()
        )));
    }
    if let Some(blank) = config
        .bot
        .exit_keywords
        .iter()
        .find(|k| normalize(k).is_empty())
    {
        return Err(anyhow!(SmartChatError::Config(format!(
            "bot.exit_keywords contains a blank entry: {:?}",
            blank
        ))));
    }
    if let Some(path) = &config.bot.intents_file {
        let path = Path::new(path);
        if !path.is_file() {
            return Err(anyhow!(SmartChatError::Config(format!(
                "intents file '{}' does not exist or is not a file",
                path.display()
            ))));
        }
    }
    config.classifier.training_options().validate()?;
    info!("Configuration validation successful.");
    Ok(())
}
