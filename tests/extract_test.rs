//! Property and example tests for `SQL{...}` extraction

use directory_assistant::extract::extract_query;
use proptest::prelude::*;

#[test]
fn test_count_query_extracted() {
    let reply = "SQL{SELECT COUNT(*) as total FROM core_enterprise}";
    assert_eq!(
        extract_query(reply).as_deref(),
        Some("SELECT COUNT(*) as total FROM core_enterprise")
    );
}

#[test]
fn test_surrounding_prose_ignored() {
    let reply = "Claro, aquí está:\nSQL{\n  SELECT id, name FROM core_industry LIMIT 50\n}\nEspero que sirva.";
    assert_eq!(
        extract_query(reply).as_deref(),
        Some("SELECT id, name FROM core_industry LIMIT 50")
    );
}

#[test]
fn test_mixed_case_token() {
    assert_eq!(extract_query("Sql{SELECT 1}").as_deref(), Some("SELECT 1"));
    assert_eq!(extract_query("sQl{SELECT 1}").as_deref(), Some("SELECT 1"));
}

#[test]
fn test_no_token_no_query() {
    assert_eq!(extract_query("¡Hola! ¿En qué puedo ayudarte?"), None);
    assert_eq!(extract_query("SQL {SELECT 1}"), None);
    assert_eq!(extract_query("{SELECT 1}"), None);
}

proptest! {
    #[test]
    fn prop_text_without_token_is_never_a_query(text in "[^{}]*") {
        prop_assert_eq!(extract_query(&text), None);
    }

    #[test]
    fn prop_body_is_trimmed_verbatim(
        prefix in "[a-zA-Z ,.!?]{0,20}",
        body in "[^{}]{0,80}",
        suffix in "[^{}]{0,20}",
    ) {
        prop_assume!(!prefix.to_uppercase().contains("SQL"));
        let reply = format!("{prefix}SQL{{{body}}}{suffix}");
        let extracted = extract_query(&reply);
        prop_assert_eq!(extracted.as_deref(), Some(body.trim()));
    }

    #[test]
    fn prop_body_ends_at_first_closing_brace(
        first in "[^{}]{0,40}",
        rest in "[^{}]{0,40}",
    ) {
        let reply = format!("SQL{{{first}}}{rest}}}");
        let extracted = extract_query(&reply);
        prop_assert_eq!(extracted.as_deref(), Some(first.trim()));
    }
}
