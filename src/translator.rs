//! Natural-language to SQL translation.
//!
//! [`Translator::translate`] turns one user message into either a
//! conversational reply or the rows of a generated read query. Each call is
//! independent; nothing is remembered between messages.

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, warn};

use crate::config::AssistantConfig;
use crate::context::{database_context, render_context};
use crate::db::DirectoryStore;
use crate::error::{AssistantError, Result};
use crate::executor::QueryExecutor;
use crate::extract::extract_query;
use crate::formatter::format_results;
use crate::gate::{self, Verdict};
use crate::llm::{ChatRequest, LanguageModel};
use crate::logging::OperationTimer;
use crate::metrics;
use crate::models::Row;
use crate::prompt::build_system_prompt;

/// Result of translating one message.
///
/// Serializes to the chat endpoint's JSON body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Translation {
    /// The model answered conversationally
    Text {
        /// Model text
        #[serde(rename = "response")]
        message: String,
    },
    /// A query was generated and executed
    Sql {
        /// Chat summary of the rows
        #[serde(rename = "response")]
        message: String,
        /// Query that produced the rows
        #[serde(rename = "sql_query")]
        query: String,
        /// Every row, for the table view
        #[serde(rename = "results")]
        rows: Vec<Row>,
        /// Number of rows
        #[serde(rename = "count")]
        row_count: usize,
    },
    /// A query was generated but refused or failed
    SqlError {
        /// Message for the user
        #[serde(rename = "response")]
        message: String,
        /// The offending query
        #[serde(rename = "sql_query")]
        query: String,
    },
}

impl Translation {
    /// The `type` tag of this result.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Sql { .. } => "sql",
            Self::SqlError { .. } => "sql_error",
        }
    }

    /// The user-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Text { message } | Self::Sql { message, .. } | Self::SqlError { message, .. } => {
                message
            }
        }
    }
}

/// Translates user messages with an injected model and store.
#[derive(Clone)]
pub struct Translator {
    llm: Arc<dyn LanguageModel>,
    store: Arc<dyn DirectoryStore>,
    executor: QueryExecutor,
    settings: AssistantConfig,
}

impl Translator {
    /// Create a translator.
    #[must_use]
    pub fn new(
        llm: Arc<dyn LanguageModel>,
        store: Arc<dyn DirectoryStore>,
        settings: AssistantConfig,
    ) -> Self {
        let executor = QueryExecutor::new(Arc::clone(&store));
        Self {
            llm,
            store,
            executor,
            settings,
        }
    }

    /// The full system instruction, grounded on current store contents.
    ///
    /// The store sample is read on the blocking pool.
    pub async fn system_prompt(&self) -> String {
        let store = Arc::clone(&self.store);
        let sample_size = self.settings.industry_sample_size;

        let context =
            tokio::task::spawn_blocking(move || database_context(store.as_ref(), sample_size))
                .await
                .unwrap_or_else(|e| {
                    error!(error = %e, "Context task join error");
                    render_context(&[])
                });

        build_system_prompt(&context, self.settings.max_rows)
    }

    /// Translate one user message.
    ///
    /// Empty input fails with [`AssistantError::EmptyMessage`] before the
    /// model is called; a model failure fails with
    /// [`AssistantError::LanguageModel`]. Refused or failing queries are
    /// reported as [`Translation::SqlError`].
    pub async fn translate(&self, user_text: &str) -> Result<Translation> {
        info!(message = user_text, "Received message");

        if user_text.trim().is_empty() {
            return Err(AssistantError::EmptyMessage);
        }

        let request = ChatRequest {
            system: self.system_prompt().await,
            user: user_text.to_string(),
        };

        let timer = OperationTimer::new("llm_chat");
        let reply = self.llm.chat(request).await;
        let elapsed = timer.finish();
        metrics::record_llm_call(elapsed, reply.is_ok());

        let reply = match reply {
            Ok(reply) => reply,
            Err(e) => {
                error!(
                    model = self.llm.model_name(),
                    message = user_text,
                    error = %e,
                    "Language model call failed"
                );
                metrics::record_translation("failed");
                return Err(e.into());
            }
        };
        let reply = reply.trim();

        let translation = match extract_query(reply) {
            Some(query) => self.run_query(query).await,
            None => Translation::Text {
                message: reply.to_string(),
            },
        };

        info!(
            kind = translation.kind(),
            response = translation.message(),
            "Translation complete"
        );
        metrics::record_translation(translation.kind());
        Ok(translation)
    }

    async fn run_query(&self, query: String) -> Translation {
        info!(query = %query, "Extracted SQL query");

        if let Verdict::Rejected(reason) = gate::check(&query) {
            warn!(query = %query, reason = %reason, "Query rejected by safety gate");
            return Translation::SqlError {
                message: format!("Error executing query: {reason}"),
                query,
            };
        }

        // SQLite calls block; keep them off the async workers
        let executor = self.executor.clone();
        let gated = query.clone();
        let executed = tokio::task::spawn_blocking(move || executor.execute(&gated))
            .await
            .unwrap_or_else(|e| Err(format!("Task join error: {e}")));

        match executed {
            Ok(result) => Translation::Sql {
                message: format_results(&result.rows),
                query,
                rows: result.rows,
                row_count: result.row_count,
            },
            Err(reason) => Translation::SqlError {
                message: format!("Error executing query: {reason}"),
                query,
            },
        }
    }
}
