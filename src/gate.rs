//! Query safety gate
//!
//! The only check standing between model output and the store. It works on
//! plain text: a query must start with `SELECT` and must not contain any
//! denylisted keyword anywhere, not even inside an identifier or a string
//! literal. A column such as `update_count` is therefore refused as well.

use std::fmt;

use crate::metrics;

/// Keywords that must not appear anywhere in a query, upper-case.
pub const DENYLISTED_KEYWORDS: [&str; 9] = [
    "DROP", "DELETE", "UPDATE", "INSERT", "ALTER", "CREATE", "TRUNCATE", "EXEC", "EXECUTE",
];

/// Why a query was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The query does not begin with `SELECT`
    NotReadQuery,
    /// The query contains a denylisted keyword
    ForbiddenKeyword(&'static str),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotReadQuery => write!(f, "only read queries permitted (query must start with SELECT)"),
            Self::ForbiddenKeyword(keyword) => write!(f, "forbidden keyword: {keyword}"),
        }
    }
}

/// Gate decision for one candidate query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Safe to hand to the executor
    Permitted,
    /// Must not be executed
    Rejected(Rejection),
}

impl Verdict {
    /// True for [`Verdict::Permitted`].
    #[must_use]
    pub const fn is_permitted(&self) -> bool {
        matches!(self, Self::Permitted)
    }
}

/// Classify a candidate query.
#[must_use]
pub fn check(query: &str) -> Verdict {
    let normalized = query.trim().to_uppercase();

    if !normalized.starts_with("SELECT") {
        metrics::record_gate_rejection("NOT_SELECT");
        return Verdict::Rejected(Rejection::NotReadQuery);
    }

    if let Some(keyword) = DENYLISTED_KEYWORDS
        .iter()
        .copied()
        .find(|keyword| normalized.contains(keyword))
    {
        metrics::record_gate_rejection(keyword);
        return Verdict::Rejected(Rejection::ForbiddenKeyword(keyword));
    }

    Verdict::Permitted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_matching_keyword_is_reported() {
        // EXECUTE contains EXEC, which comes first in the list
        assert_eq!(
            check("SELECT 1; EXECUTE something"),
            Verdict::Rejected(Rejection::ForbiddenKeyword("EXEC"))
        );
    }

    #[test]
    fn test_rejection_messages() {
        assert!(Rejection::NotReadQuery.to_string().contains("only read queries permitted"));
        assert!(Rejection::ForbiddenKeyword("DROP").to_string().contains("DROP"));
    }
}
