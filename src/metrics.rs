use metrics::{counter, histogram};
use std::time::Duration;

/// Translations by outcome (`text`, `sql`, `sql_error`, `failed`)
pub const TRANSLATIONS_TOTAL: &str = "directory_assistant_translations_total";
/// Queries refused by the safety gate
pub const GATE_REJECTIONS_TOTAL: &str = "directory_assistant_gate_rejections_total";
/// Executed queries by status
pub const QUERIES_TOTAL: &str = "directory_assistant_queries_total";
/// Query execution time
pub const QUERY_DURATION: &str = "directory_assistant_query_duration_seconds";
/// Language model round-trip time
pub const LLM_DURATION: &str = "directory_assistant_llm_duration_seconds";

/// Record the outcome of one translation
pub fn record_translation(outcome: &'static str) {
    counter!(TRANSLATIONS_TOTAL, "outcome" => outcome).increment(1);
}

/// Record a gate rejection, labelled by the keyword or rule that fired
pub fn record_gate_rejection(rule: &'static str) {
    counter!(GATE_REJECTIONS_TOTAL, "rule" => rule).increment(1);
}

/// Record one query execution
pub fn record_query(duration: Duration, success: bool) {
    let status = if success { "success" } else { "error" };
    counter!(QUERIES_TOTAL, "status" => status).increment(1);
    histogram!(QUERY_DURATION, "status" => status).record(duration.as_secs_f64());
}

/// Record one language model call
pub fn record_llm_call(duration: Duration, success: bool) {
    let status = if success { "success" } else { "error" };
    histogram!(LLM_DURATION, "status" => status).record(duration.as_secs_f64());
}
