use anyhow::Result;
use std::path::Path;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter, Layer, Registry};

type ConsoleLayer = Box<dyn Layer<Layered<EnvFilter, Registry>> + Send + Sync>;

/// Initialize structured logging system
///
/// Console output goes to stderr as text, or JSON when `format` is `"json"`.
/// When `log_file` is given, a daily-rolling JSON file layer is added and the
/// returned guard must be held for as long as logs should be flushed.
pub fn init_logging(
    log_level: Option<&str>,
    log_file: Option<&Path>,
    format: &str,
) -> Result<Option<WorkerGuard>> {
    // Set up environment filter
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| {
            let level = log_level.unwrap_or("info");
            EnvFilter::try_new(level)
        })
        .map_err(|e| anyhow::anyhow!("Failed to create log filter: {}", e))?;

    // Add console layer
    let console_layer: ConsoleLayer = if format == "json" {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .json()
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(true)
            .with_thread_ids(true)
            .boxed()
    };

    let registry = Registry::default().with(env_filter).with(console_layer);

    // Add file layer if log file is specified
    let guard = if let Some(log_path) = log_file {
        let directory = log_path.parent().unwrap_or_else(|| Path::new("."));
        let file_name = log_path
            .file_name()
            .map_or_else(|| "directory-assistant.log".into(), |name| name.to_string_lossy());
        let file_appender = rolling::daily(directory, &*file_name);
        let (non_blocking_appender, guard) = non_blocking(file_appender);

        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking_appender)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(true)
            .json();

        registry
            .with(file_layer)
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to install subscriber: {}", e))?;
        Some(guard)
    } else {
        registry
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to install subscriber: {}", e))?;
        None
    };

    info!("Logging system initialized");
    Ok(guard)
}

/// Performance timing utilities
pub struct OperationTimer {
    operation: &'static str,
    start: std::time::Instant,
}

impl OperationTimer {
    /// Start timing `operation`.
    #[must_use]
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            start: std::time::Instant::now(),
        }
    }

    /// Stop the timer, log the duration and return it.
    pub fn finish(self) -> std::time::Duration {
        let elapsed = self.start.elapsed();
        tracing::info!(
            operation = self.operation,
            duration_ms = elapsed.as_millis(),
            "Operation completed"
        );
        elapsed
    }
}

impl Drop for OperationTimer {
    fn drop(&mut self) {
        if !std::thread::panicking() {
            tracing::debug!(
                operation = self.operation,
                duration_ms = self.start.elapsed().as_millis(),
                "Operation finished"
            );
        }
    }
}
