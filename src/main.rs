use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::info;

use directory_assistant::config::AppConfig;
use directory_assistant::logging::init_logging;
use directory_assistant::server::create_router;
use directory_assistant::{Database, OllamaClient, Translator};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the chat endpoint over HTTP
    Serve {
        /// Address to bind, overrides the configured one
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Translate a single message and print the result as JSON
    Ask {
        /// The question, in natural language
        message: String,
    },
    /// Create the directory tables in the configured database
    InitDb,
    /// Print the system instruction the model would receive
    Prompt,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize logging
    let _log_guard = init_logging(
        Some(&config.get_log_level()),
        config.logging.file_path.as_deref().map(Path::new),
        &config.logging.format,
    )?;

    info!("Starting directory-assistant");

    match cli.command {
        Commands::Serve { bind } => serve(&config, bind).await?,
        Commands::Ask { message } => ask(&config, &message).await?,
        Commands::InitDb => {
            let database =
                Database::open(&config.database).context("Failed to initialize database")?;
            info!(
                path = %config.database.path,
                schema_version = database.schema_version()?,
                "Database ready"
            );
        }
        Commands::Prompt => {
            let translator = build_translator(&config)?;
            write_stdout(&translator.system_prompt().await)?;
        }
    }

    Ok(())
}

/// Wire the store and model client into a translator
fn build_translator(config: &AppConfig) -> Result<Translator> {
    let database = Database::open(&config.database).context("Failed to open database")?;
    let client = OllamaClient::from_config(&config.llm).context("Failed to create model client")?;
    info!(host = %config.llm.host, model = %config.llm.model, "Language model client configured");

    Ok(Translator::new(
        Arc::new(client),
        Arc::new(database),
        config.assistant.clone(),
    ))
}

async fn serve(config: &AppConfig, bind: Option<String>) -> Result<()> {
    let translator = Arc::new(build_translator(config)?);
    let address = bind.unwrap_or_else(|| config.server.bind_address.clone());

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!(%address, "Chat endpoint listening");

    axum::serve(listener, create_router(translator))
        .await
        .context("Server error")?;
    Ok(())
}

async fn ask(config: &AppConfig, message: &str) -> Result<()> {
    let translator = build_translator(config)?;
    let translation = translator.translate(message).await?;
    write_stdout(&serde_json::to_string_pretty(&translation)?)
}

fn write_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{text}")?;
    Ok(())
}
