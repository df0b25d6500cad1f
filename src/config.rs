//! Layered application configuration
//!
//! Built-in defaults, then optional `config/default`, `config/local` and
//! `config` files, then `DIRECTORY_ASSISTANT_*` environment variables.

use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::AssistantError;

/// Application configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory store
    pub database: DatabaseConfig,
    /// Language model service
    pub llm: LlmConfig,
    /// HTTP endpoint
    pub server: ServerConfig,
    /// Translation behaviour
    pub assistant: AssistantConfig,
    /// Log output
    pub logging: LoggingConfig,
}

/// SQLite store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path of the SQLite file; must be a real file, not `:memory:`
    pub path: String,
    /// Pool size, for each of the read-write and read-only pools
    pub max_connections: u32,
    /// How long to wait for a pooled connection
    pub connection_timeout_secs: u64,
}

/// Ollama-compatible model service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL, overridden by `OLLAMA_HOST`
    pub host: String,
    /// Model identifier
    pub model: String,
    /// Request timeout
    pub timeout_secs: u64,
}

/// HTTP endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind_address: String,
}

/// Translation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// How many live industry names ground the prompt
    pub industry_sample_size: usize,
    /// Row cap the model is told to put on every query
    pub max_rows: usize,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is unset
    pub level: String,
    /// Optional daily-rolling JSON log file
    pub file_path: Option<String>,
    /// Console format, `"json"` or `"text"`
    pub format: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "data/directory.db".to_string(),
            max_connections: 10,
            connection_timeout_secs: 30,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            host: "http://localhost:11434".to_string(),
            model: "llama3.2".to_string(),
            timeout_secs: 120,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8000".to_string(),
        }
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            industry_sample_size: 20,
            max_rows: 100,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_path: None,
            format: "text".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence
    pub fn load() -> Result<Self> {
        let defaults = Config::try_from(&Self::default())
            .map_err(|e| anyhow::anyhow!("Failed to build default configuration: {}", e))?;

        let config = Config::builder()
            // Start with default values
            .add_source(defaults)
            // Add config file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(File::with_name("config").required(false))
            // Add environment variables with prefix, e.g. DIRECTORY_ASSISTANT_LLM__MODEL
            .add_source(
                Environment::with_prefix("DIRECTORY_ASSISTANT")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

        let mut app_config: Self = config
            .try_deserialize()
            .map_err(|e| anyhow::anyhow!("Failed to deserialize configuration: {}", e))?;

        app_config.llm.host = app_config.get_llm_host();

        // Validate configuration
        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> crate::error::Result<()> {
        let invalid = |message: String| -> crate::error::Result<()> {
            Err(AssistantError::InvalidConfig(message))
        };

        // Validate database config
        let path = self.database.path.trim();
        if path.is_empty() {
            return invalid("database path cannot be empty".to_string());
        }
        // Each pooled connection would get its own private in-memory database
        if path == ":memory:" || path.starts_with("file::memory:") || path.contains("mode=memory") {
            return invalid(format!("database path must be a file, got {path}"));
        }
        if self.database.max_connections == 0 {
            return invalid("max_connections must be greater than 0".to_string());
        }
        if self.database.connection_timeout_secs == 0 {
            return invalid("connection_timeout_secs must be greater than 0".to_string());
        }

        // Validate language model config
        if !(self.llm.host.starts_with("http://") || self.llm.host.starts_with("https://")) {
            return invalid(format!(
                "Invalid llm host: {}. Must start with http:// or https://",
                self.llm.host
            ));
        }
        if self.llm.model.trim().is_empty() {
            return invalid("llm model cannot be empty".to_string());
        }
        if self.llm.timeout_secs == 0 {
            return invalid("llm timeout_secs must be greater than 0".to_string());
        }

        // Validate assistant config
        if self.assistant.industry_sample_size == 0 {
            return invalid("industry_sample_size must be greater than 0".to_string());
        }
        if self.assistant.max_rows == 0 {
            return invalid("max_rows must be greater than 0".to_string());
        }

        // Validate logging config
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return invalid(format!(
                "Invalid log level: {}. Must be one of: {:?}",
                self.logging.level, valid_levels
            ));
        }

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return invalid(format!(
                "Invalid log format: {}. Must be one of: {:?}",
                self.logging.format, valid_formats
            ));
        }

        Ok(())
    }

    /// Get the language model host from `OLLAMA_HOST` or config
    pub fn get_llm_host(&self) -> String {
        std::env::var("OLLAMA_HOST")
            .ok()
            .filter(|host| !host.trim().is_empty())
            .unwrap_or_else(|| self.llm.host.clone())
    }

    /// Get log level from environment or config
    pub fn get_log_level(&self) -> String {
        std::env::var("RUST_LOG").unwrap_or_else(|_| self.logging.level.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.database.path, "data/directory.db");
        assert_eq!(config.llm.model, "llama3.2");
        assert_eq!(config.assistant.max_rows, 100);
    }

    #[test]
    fn test_config_validation() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config() {
        let mut config = AppConfig::default();
        config.database.max_connections = 0;
        assert!(matches!(
            config.validate(),
            Err(AssistantError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_in_memory_database_rejected() {
        for path in [":memory:", "file::memory:?cache=shared", "file:directory?mode=memory"] {
            let mut config = AppConfig::default();
            config.database.path = path.to_string();
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("must be a file"), "{path}");
        }
    }
}
