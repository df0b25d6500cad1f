//! Error types for the directory-assistant library.
//!
//! This module provides custom error types using `thiserror` for the failures
//! that escape the translation pipeline. Gate rejections and query execution
//! failures are reported as values, not through this type.

use thiserror::Error;

use crate::llm::LlmError;

/// Errors that can occur in the directory-assistant application.
#[derive(Error, Debug)]
pub enum AssistantError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Connection pool errors
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// The user sent an empty or whitespace-only message
    #[error("No message provided")]
    EmptyMessage,

    /// The language model could not be reached or refused the request
    #[error("Language model error: {0}")]
    LanguageModel(#[from] LlmError),

    /// A configuration value failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AssistantError {
    /// Whether the caller can fix this by changing the request.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::EmptyMessage)
    }
}

/// Convenience type alias for Result with `AssistantError`
pub type Result<T> = std::result::Result<T, AssistantError>;
