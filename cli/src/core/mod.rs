//! # SmartChat Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the core infrastructure components that the bot engine
//! and the command handlers build on.
//!
//! ## Architecture
//!
//! - `config`: Configuration loading, merging, and validation
//! - `error`: Error types and error handling utilities
//! - `templating`: Tera-backed rendering of response templates
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{SmartChatError, Result}; // For error handling
//! use crate::core::templating::TemplateSet; // For response templates
//! ```
//!
pub mod config;
pub mod error;
pub mod templating;
