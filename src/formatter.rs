//! Chat summaries for query results
//!
//! The summary is what the chat shows; the raw rows travel next to it for the
//! table view and are never embedded in the text.

use serde_json::Value;

use crate::models::Row;

/// Summary for an empty result set.
pub const NO_RESULTS_MESSAGE: &str = "No results found.";

/// Summarize `rows` for the chat.
#[must_use]
pub fn format_results(rows: &[Row]) -> String {
    if rows.is_empty() {
        return NO_RESULTS_MESSAGE.to_string();
    }

    // A lone COUNT(*) or SUM-like cell reads better as a labelled value
    if let [row] = rows {
        if row.len() == 1 {
            if let Some((column, value)) = row.iter().next() {
                let lowered = column.to_lowercase();
                if lowered.contains("count") || lowered.contains("total") {
                    return format!("**{}:** {}", column_label(column), display_value(value));
                }
            }
        }
    }

    format!(
        "Query succeeded: found {} record(s). The data is shown in the table.",
        rows.len()
    )
}

/// Human label for a column name: separators become spaces, words title-cased.
#[must_use]
pub fn column_label(column: &str) -> String {
    let spaced = column
        .split(|c: char| c == '_' || c == '-' || c == '.' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    title_case(&spaced)
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_alphabetic = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_alphabetic {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_alphabetic = true;
        } else {
            out.push(c);
            previous_alphabetic = false;
        }
    }
    out
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_label() {
        assert_eq!(column_label("total"), "Total");
        assert_eq!(column_label("total_empresas"), "Total Empresas");
        assert_eq!(column_label("COUNT(*)"), "Count(*)");
        assert_eq!(column_label("num-contacts.count"), "Num Contacts Count");
    }

    #[test]
    fn test_title_case_keeps_accents() {
        assert_eq!(title_case("ÁREA total"), "Área Total");
    }
}
