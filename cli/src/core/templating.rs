//! # SmartChat Template System
//!
//! File: cli/src/core/templating.rs
//!
//! ## Overview
//!
//! Renders response templates with the Tera engine. Any response candidate may
//! reference variables from a fixed context (currently `bot_name`); plain text
//! is a valid template that renders to itself.
//!
//! ## Architecture
//!
//! A [`TemplateSet`] owns one `Tera` instance and one context:
//! 1. Each template is parsed when it is added, so syntax errors surface at
//!    startup rather than mid-conversation
//! 2. `add` also performs a trial render against the context, catching
//!    references to undefined variables
//! 3. `render` looks a template up by name and renders it
//!
//! Template names that do not end in `.html`/`.xml` are not auto-escaped, so
//! apostrophes and ampersands in responses are printed as written.
//!
//! ## Examples
//!
//! ```rust,ignore
//! let mut context = HashMap::new();
//! context.insert("bot_name".to_string(), "Rusty".to_string());
//!
//! let mut templates = TemplateSet::new(&context)?;
//! templates.add("greeting/0", "Hi, I'm {{ bot_name }}!")?;
//! assert_eq!(templates.render("greeting/0")?, "Hi, I'm Rusty!");
//! ```
//!
use crate::core::error::{Result, SmartChatError};
use anyhow::{anyhow, Context};
use std::collections::HashMap;
use tera::Tera;
use tracing::debug;

pub struct TemplateSet {
    tera: Tera,
    context: tera::Context,
}

impl std::fmt::Debug for TemplateSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateSet")
            .field("templates", &self.tera.get_template_names().count())
            .finish()
    }
}

impl TemplateSet {
    pub fn new(context_map: &HashMap<String, String>) -> Result<Self> {
        let context = tera::Context::from_serialize(context_map).map_err(|e| {
            anyhow!(SmartChatError::Template { source: e })
                .context("Failed to create Tera context from map")
        })?;
        Ok(Self {
            tera: Tera::default(),
            context,
        })
    }

    /// Parses `source` under `name` and renders it once to validate it.
    pub fn add(&mut self, name: &str, source: &str) -> Result<()> {
        self.tera
            .add_raw_template(name, source)
            .map_err(|e| anyhow!(SmartChatError::Template { source: e }))
            .with_context(|| format!("Failed to parse response template '{}'", name))?;
        self.render(name)
            .with_context(|| format!("Response template '{}' does not render", name))?;
        debug!("Registered template '{}'", name);
        Ok(())
    }

    pub fn render(&self, name: &str) -> Result<String> {
        self.tera
            .render(name, &self.context)
            .map_err(|e| anyhow!(SmartChatError::Template { source: e }))
            .with_context(|| format!("Tera rendering failed for template '{}'", name))
    }
}
