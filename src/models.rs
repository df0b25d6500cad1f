//! Data models for the business directory and query results
//!
//! The assistant never owns directory records; these insert structs exist so
//! the CLI and tests can populate a store. Query results are plain JSON maps
//! keyed by column name.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One result row: column name to value, in the column order the store
/// returned.
pub type Row = Map<String, Value>;

/// Rows materialized from a read query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryRows {
    /// Every row the query produced
    pub rows: Vec<Row>,
    /// Number of rows observed
    pub row_count: usize,
}

impl QueryRows {
    /// Wrap materialized rows, counting them.
    #[must_use]
    pub fn new(rows: Vec<Row>) -> Self {
        let row_count = rows.len();
        Self { rows, row_count }
    }
}

/// New industry for insertion
#[derive(Debug, Clone)]
pub struct NewIndustry {
    /// Upper-case display name, unique across industries
    pub name: String,
    /// Optional description
    pub description: Option<String>,
}

impl NewIndustry {
    /// Industry with just a name.
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: None,
        }
    }
}

/// New sub-industry for insertion
#[derive(Debug, Clone)]
pub struct NewSubIndustry {
    /// Parent industry
    pub industry_id: i64,
    /// Name, unique within the parent industry
    pub name: String,
    /// Optional description
    pub description: Option<String>,
}

/// New enterprise for insertion
#[derive(Debug, Clone)]
pub struct NewEnterprise {
    /// Company name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Country; the store defaults to `Chile` when absent
    pub country: Option<String>,
    /// Optional website
    pub website: Option<String>,
    /// Optional industry association
    pub industry_id: Option<i64>,
    /// Optional sub-industry association
    pub sub_industry_id: Option<i64>,
}

impl NewEnterprise {
    /// Enterprise with only a name and no associations.
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            country: None,
            website: None,
            industry_id: None,
            sub_industry_id: None,
        }
    }
}

/// New contact for insertion
#[derive(Debug, Clone)]
pub struct NewContact {
    /// Owning enterprise
    pub enterprise_id: i64,
    /// Contact name
    pub name: String,
    /// Email address (optional)
    pub email: Option<String>,
    /// Phone number (optional)
    pub phone: Option<String>,
    /// Position in the company (optional)
    pub position: Option<String>,
    /// `LinkedIn` profile URL (optional)
    pub linkedin_profile: Option<String>,
    /// Age (optional)
    pub age: Option<i64>,
    /// Whether the contact has been reached already
    pub contacted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_rows_counts() {
        let mut row = Row::new();
        row.insert("total".to_string(), json!(3));
        let rows = QueryRows::new(vec![row.clone(), row]);
        assert_eq!(rows.row_count, 2);
        assert_eq!(QueryRows::default().row_count, 0);
    }
}
