//! Query executor
//!
//! Runs gated queries on the store's read path. Failures come back as a
//! message so the translator can report them to the user.

use std::sync::Arc;

use tracing::{error, info};

use crate::db::DirectoryStore;
use crate::logging::OperationTimer;
use crate::metrics;
use crate::models::QueryRows;

/// Executes read queries against a [`DirectoryStore`]
#[derive(Clone)]
pub struct QueryExecutor {
    store: Arc<dyn DirectoryStore>,
}

impl QueryExecutor {
    /// Executor over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn DirectoryStore>) -> Self {
        Self { store }
    }

    /// Run `query`, returning every row or the store's error message.
    ///
    /// The query must already have passed [`crate::gate::check`].
    pub fn execute(&self, query: &str) -> Result<QueryRows, String> {
        let timer = OperationTimer::new("execute_query");
        info!(query, "Executing SQL");

        let result = self.store.run_read_query(query);
        let elapsed = timer.finish();
        metrics::record_query(elapsed, result.is_ok());

        match result {
            Ok(rows) => {
                info!(row_count = rows.row_count, "Query returned rows");
                Ok(rows)
            }
            Err(e) => {
                error!(query, error = %e, "SQL error");
                Err(e.to_string())
            }
        }
    }
}
