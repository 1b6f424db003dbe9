//! AI collaborator for the LexiAssist backend.
//!
//! Wraps the Gemini `generateContent` API behind the [`CompletionClient`]
//! trait so request handlers can be exercised against stubs, and provides:
//!
//! - Prompt construction for case summaries and similar-case research
//! - A two-stage pipeline for the similar-case response: fence stripping
//!   followed by a shape-validating JSON parse

mod client;
mod error;
pub mod parse;
pub mod prompt;

pub use client::{CompletionClient, GeminiClient};
pub use error::AiError;
pub use parse::SimilarCase;
