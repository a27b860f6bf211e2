//! # SmartChat Text Classification
//!
//! File: cli/src/nlp/mod.rs
//!
//! ## Overview
//!
//! Everything between raw text and an intent label:
//! - `normalize`: the normalization and tokenization shared by training and input
//! - `vectorizer`: vocabulary and TF-IDF feature vectors
//! - `classifier`: the `IntentClassifier` trait, `Prediction` and the factory
//! - `logistic`: multinomial logistic regression (default)
//! - `naive_bayes`: multinomial Naive Bayes
//!
pub mod classifier;
pub mod logistic;
pub mod naive_bayes;
pub mod normalize;
pub mod vectorizer;
