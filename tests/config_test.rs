//! Unit tests for config.rs module

use directory_assistant::config::{AppConfig, AssistantConfig, DatabaseConfig, LoggingConfig};
use directory_assistant::AssistantError;

#[test]
fn test_default_database_config() {
    let config = AppConfig::default();

    assert_eq!(config.database.path, "data/directory.db");
    assert_eq!(config.database.max_connections, 10);
    assert_eq!(config.database.connection_timeout_secs, 30);
}

#[test]
fn test_default_llm_config() {
    let config = AppConfig::default();

    assert_eq!(config.llm.host, "http://localhost:11434");
    assert_eq!(config.llm.model, "llama3.2");
    assert_eq!(config.llm.timeout_secs, 120);
}

#[test]
fn test_default_assistant_and_server_config() {
    let config = AppConfig::default();

    assert_eq!(config.assistant.industry_sample_size, 20);
    assert_eq!(config.assistant.max_rows, 100);
    assert_eq!(config.server.bind_address, "127.0.0.1:8000");
}

#[test]
fn test_default_logging_config() {
    let config = AppConfig::default();

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file_path, None);
    assert_eq!(config.logging.format, "text");
}

#[test]
fn test_config_validation_success() {
    let config = AppConfig::default();
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_validation_empty_database_path() {
    let mut config = AppConfig::default();
    config.database.path = "  ".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_in_memory_database() {
    let mut config = AppConfig::default();
    config.database.path = ":memory:".to_string();
    assert!(matches!(
        config.validate(),
        Err(AssistantError::InvalidConfig(_))
    ));
}

#[test]
fn test_config_validation_zero_max_connections() {
    let mut config = AppConfig::default();
    config.database.max_connections = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_zero_connection_timeout() {
    let mut config = AppConfig::default();
    config.database.connection_timeout_secs = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_llm_host_scheme() {
    let mut config = AppConfig::default();
    config.llm.host = "localhost:11434".to_string();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("localhost:11434"));

    config.llm.host = "https://ollama.internal".to_string();
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_validation_empty_model() {
    let mut config = AppConfig::default();
    config.llm.model = String::new();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_zero_llm_timeout() {
    let mut config = AppConfig::default();
    config.llm.timeout_secs = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_zero_assistant_limits() {
    let mut config = AppConfig::default();
    config.assistant.industry_sample_size = 0;
    assert!(config.validate().is_err());

    let mut config = AppConfig::default();
    config.assistant.max_rows = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_invalid_log_level() {
    let mut config = AppConfig::default();
    config.logging.level = "invalid".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_valid_log_levels() {
    for level in ["trace", "debug", "info", "warn", "error"] {
        let mut config = AppConfig::default();
        config.logging.level = level.to_string();
        assert!(config.validate().is_ok(), "Failed for level: {}", level);
    }
}

#[test]
fn test_config_validation_log_formats() {
    for format in ["text", "json"] {
        let mut config = AppConfig::default();
        config.logging.format = format.to_string();
        assert!(config.validate().is_ok(), "Failed for format: {}", format);
    }

    let mut config = AppConfig::default();
    config.logging.format = "xml".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_get_llm_host_from_env() {
    std::env::set_var("OLLAMA_HOST", "http://gpu-box:11434");
    let config = AppConfig::default();
    assert_eq!(config.get_llm_host(), "http://gpu-box:11434");

    std::env::set_var("OLLAMA_HOST", "  ");
    assert_eq!(config.get_llm_host(), "http://localhost:11434");
    std::env::remove_var("OLLAMA_HOST");
}

#[test]
fn test_get_log_level_from_env() {
    std::env::set_var("RUST_LOG", "debug");
    let config = AppConfig::default();
    assert_eq!(config.get_log_level(), "debug");
    std::env::remove_var("RUST_LOG");
}

#[test]
fn test_config_validation_boundary_values() {
    let mut config = AppConfig::default();
    config.database = DatabaseConfig {
        path: "x.db".to_string(),
        max_connections: 1,
        connection_timeout_secs: 1,
    };
    config.assistant = AssistantConfig {
        industry_sample_size: 1,
        max_rows: 1,
    };
    config.logging = LoggingConfig {
        level: "error".to_string(),
        file_path: Some("/tmp/assistant.log".to_string()),
        format: "json".to_string(),
    };

    assert!(config.validate().is_ok());
}
