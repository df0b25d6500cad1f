//! Live data grounding for the system instruction.
//!
//! Lists real industry names so generated queries search for values that
//! exist. Store problems never escape: the block falls back to a placeholder.

use tracing::error;

use crate::db::DirectoryStore;

/// Shown instead of names when no sample is available.
pub const NO_INDUSTRIES_PLACEHOLDER: &str = "No industries available yet";

/// Representative industry names from the directory's classification.
const COMMON_INDUSTRIES: [&str; 6] = [
    "AGRICULTURA, GANADERIA, SILVICULTURA Y PESCA",
    "COMERCIO AL POR MAYOR Y AL POR MENOR; REPARACION DE VEHICULOS AUTOMOTORES Y MOTOCICLETAS",
    "INDUSTRIA MANUFACTURERA",
    "TRANSPORTE Y ALMACENAMIENTO",
    "ACTIVIDADES PROFESIONALES, CIENTIFICAS Y TECNICAS",
    "CONSTRUCCION",
];

/// Build the live-context block from up to `sample_size` industry names.
#[must_use]
pub fn database_context(store: &dyn DirectoryStore, sample_size: usize) -> String {
    let sample = match store.sample_industry_names(sample_size) {
        Ok(names) => names,
        Err(e) => {
            error!(error = %e, "Error getting database context");
            Vec::new()
        }
    };
    render_context(&sample)
}

/// Render the context block around an already fetched `sample`.
#[must_use]
pub fn render_context(sample: &[String]) -> String {
    let names = if sample.is_empty() {
        NO_INDUSTRIES_PLACEHOLDER.to_string()
    } else {
        sample
            .iter()
            .map(|name| format!("'{name}'"))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let common = COMMON_INDUSTRIES
        .iter()
        .map(|name| format!("- '{name}'"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "## INDUSTRIES CURRENTLY IN THE DATABASE (use these exact names):\n\
         {names}\n\n\
         Common industries:\n\
         {common}\n\n\
         IMPORTANT: names are stored in UPPER-CASE with accents. Use LIKE '%WORD%' to search them.\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MockDirectoryStore;
    use crate::error::AssistantError;

    #[test]
    fn test_names_are_quoted_and_joined() {
        let mut store = MockDirectoryStore::new();
        store
            .expect_sample_industry_names()
            .withf(|limit| *limit == 20)
            .times(1)
            .returning(|_| Ok(vec!["CONSTRUCCION".to_string(), "MINERIA".to_string()]));

        let context = database_context(&store, 20);
        assert!(context.contains("'CONSTRUCCION', 'MINERIA'"));
        assert!(!context.contains(NO_INDUSTRIES_PLACEHOLDER));
    }

    #[test]
    fn test_store_failure_degrades_to_placeholder() {
        let mut store = MockDirectoryStore::new();
        store
            .expect_sample_industry_names()
            .returning(|_| Err(AssistantError::Database(rusqlite::Error::InvalidQuery)));

        let context = database_context(&store, 20);
        assert!(context.contains(NO_INDUSTRIES_PLACEHOLDER));
        assert!(context.contains("INDUSTRIA MANUFACTURERA"));
    }

    #[test]
    fn test_empty_table_degrades_to_placeholder() {
        let mut store = MockDirectoryStore::new();
        store
            .expect_sample_industry_names()
            .returning(|_| Ok(Vec::new()));

        assert!(database_context(&store, 5).contains(NO_INDUSTRIES_PLACEHOLDER));
    }
}
