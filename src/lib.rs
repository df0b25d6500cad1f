//! Directory Assistant - natural-language questions over a business directory
//!
//! A Rust library that answers questions about companies, industries,
//! sub-industries and contacts by asking a language model for a read-only SQL
//! query grounded in the real schema and data, checking it, running it, and
//! summarizing the rows.
//!
//! # Features
//!
//! - Schema-grounded system instruction with live industry samples
//! - `SQL{...}` extraction from model replies
//! - Keyword-denylist safety gate before execution
//! - Read-only execution against SQLite with ordered JSON rows
//! - Chat summaries and an HTTP endpoint

/// Configuration management
pub mod config;
/// Live data grounding for the prompt
pub mod context;
/// Database operations and connection pooling
pub mod db;
/// Error types
pub mod error;
/// Query execution
pub mod executor;
/// Query extraction from model output
pub mod extract;
/// Result summaries
pub mod formatter;
/// Query safety gate
pub mod gate;
/// Language model client
pub mod llm;
/// Logging setup and utilities
pub mod logging;
/// Metrics collection
pub mod metrics;
/// Data models and structures
pub mod models;
/// System instruction construction
pub mod prompt;
/// Database schema definitions
pub mod schema;
/// HTTP endpoint
pub mod server;
/// Translation orchestration
pub mod translator;

// Re-export key components for easier access
pub use db::{Database, DirectoryStore};
pub use error::{AssistantError, Result};
pub use llm::{LanguageModel, OllamaClient};
pub use translator::{Translation, Translator};
