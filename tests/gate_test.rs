//! Unit tests for the query safety gate

use directory_assistant::gate::{check, Rejection, Verdict, DENYLISTED_KEYWORDS};

#[test]
fn test_select_literal_permitted() {
    assert_eq!(check("SELECT 1"), Verdict::Permitted);
}

#[test]
fn test_lowercase_select_permitted() {
    assert_eq!(check("select * from core_enterprise"), Verdict::Permitted);
}

#[test]
fn test_leading_whitespace_ignored() {
    assert!(check("  \n\tSELECT name FROM core_industry LIMIT 5").is_permitted());
}

#[test]
fn test_drop_rejected() {
    assert_eq!(
        check("DROP TABLE core_enterprise"),
        Verdict::Rejected(Rejection::NotReadQuery)
    );
}

#[test]
fn test_stacked_delete_rejected() {
    assert_eq!(
        check("SELECT * FROM core_enterprise; DELETE FROM core_enterprise"),
        Verdict::Rejected(Rejection::ForbiddenKeyword("DELETE"))
    );
}

#[test]
fn test_empty_query_rejected() {
    assert_eq!(check(""), Verdict::Rejected(Rejection::NotReadQuery));
    assert_eq!(check("   "), Verdict::Rejected(Rejection::NotReadQuery));
}

#[test]
fn test_with_clause_rejected() {
    // Only queries starting with SELECT are accepted
    assert!(!check("WITH t AS (SELECT 1) SELECT * FROM t").is_permitted());
}

#[test]
fn test_every_denylisted_keyword_rejected() {
    for keyword in DENYLISTED_KEYWORDS {
        let query = format!("SELECT 1; {} x", keyword.to_lowercase());
        assert!(
            matches!(check(&query), Verdict::Rejected(Rejection::ForbiddenKeyword(_))),
            "{keyword} was not rejected"
        );
    }
}

#[test]
fn test_substring_inside_identifier_rejected() {
    // Known limitation: matching is on raw substrings
    assert_eq!(
        check("SELECT update_count FROM stats"),
        Verdict::Rejected(Rejection::ForbiddenKeyword("UPDATE"))
    );
    assert_eq!(
        check("SELECT created_at FROM core_enterprise"),
        Verdict::Rejected(Rejection::ForbiddenKeyword("CREATE"))
    );
}

#[test]
fn test_substring_inside_literal_rejected() {
    assert!(!check("SELECT name FROM core_enterprise WHERE name LIKE '%DROPBOX%'").is_permitted());
}

#[test]
fn test_rejection_reason_names_keyword() {
    let Verdict::Rejected(reason) = check("SELECT 1; TRUNCATE core_contact") else {
        panic!("expected rejection");
    };
    assert!(reason.to_string().contains("TRUNCATE"));
}
