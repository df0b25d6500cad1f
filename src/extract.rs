//! Extraction of the embedded query from model output.
//!
//! The model marks a query as `SQL{ ... }`. The token is matched without
//! regard to case, the body is kept verbatim and may span lines. The body ends
//! at the first `}` after the opening brace, so a query containing a literal
//! `}` is cut short at that point.

use std::sync::OnceLock;

use regex::Regex;

fn sql_block_regex() -> &'static Regex {
    static SQL_BLOCK: OnceLock<Regex> = OnceLock::new();
    SQL_BLOCK.get_or_init(|| {
        // Static pattern; compiling it cannot fail
        #[allow(clippy::unwrap_used)]
        Regex::new(r"(?is)SQL\{(.*?)\}").unwrap()
    })
}

/// The trimmed body of the first `SQL{...}` block in `response`, if any.
#[must_use]
pub fn extract_query(response: &str) -> Option<String> {
    sql_block_regex()
        .captures(response)
        .and_then(|captures| captures.get(1))
        .map(|body| body.as_str().trim().to_string())
}
