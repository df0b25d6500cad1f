//! System instruction for the SQL assistant.

use crate::schema::SCHEMA_DESCRIPTION;

/// Worked examples: what the user asks and the exact reply expected.
const EXAMPLES: [(&str, &str); 10] = [
    (
        "muestra 10 empresas",
        "SELECT id, name, country, description FROM core_enterprise LIMIT 10",
    ),
    (
        "empresas con su industria",
        "SELECT e.name AS empresa, i.name AS industria FROM core_enterprise e \
         LEFT JOIN core_industry i ON e.industry_id = i.id LIMIT 20",
    ),
    ("cuántas empresas hay", "SELECT COUNT(*) AS total FROM core_enterprise"),
    (
        "industrias con más empresas",
        "SELECT i.name AS industria, COUNT(e.id) AS total FROM core_industry i \
         LEFT JOIN core_enterprise e ON i.id = e.industry_id GROUP BY i.id, i.name \
         ORDER BY total DESC LIMIT 20",
    ),
    (
        "empresas de agricultura",
        "SELECT e.name AS empresa, i.name AS industria FROM core_enterprise e \
         LEFT JOIN core_industry i ON e.industry_id = i.id \
         WHERE UPPER(i.name) LIKE '%AGRICULTURA%' LIMIT 30",
    ),
    (
        "empresas del sector comercio",
        "SELECT e.name, e.description, i.name AS industria FROM core_enterprise e \
         LEFT JOIN core_industry i ON e.industry_id = i.id \
         WHERE UPPER(i.name) LIKE '%COMERCIO%' LIMIT 20",
    ),
    (
        "sub-industrias de manufactura",
        "SELECT s.name AS sub_industria, i.name AS industria FROM core_sub_industry s \
         LEFT JOIN core_industry i ON s.industry_id = i.id \
         WHERE UPPER(i.name) LIKE '%MANUFACTUR%' LIMIT 30",
    ),
    (
        "contactos no contactados de empresas de transporte",
        "SELECT c.name AS contacto, c.email, c.position, e.name AS empresa FROM core_contact c \
         LEFT JOIN core_enterprise e ON c.enterprise_id = e.id \
         LEFT JOIN core_industry i ON e.industry_id = i.id \
         WHERE c.contacted = 0 AND UPPER(i.name) LIKE '%TRANSPORTE%' LIMIT 25",
    ),
    (
        "cuántos contactos tiene cada empresa",
        "SELECT e.name AS empresa, COUNT(c.id) AS total_contactos FROM core_enterprise e \
         LEFT JOIN core_contact c ON c.enterprise_id = e.id GROUP BY e.id, e.name \
         ORDER BY total_contactos DESC LIMIT 50",
    ),
    (
        "lista todas las industrias",
        "SELECT id, name FROM core_industry ORDER BY name LIMIT 50",
    ),
];

/// Assemble the system instruction around the live `database_context`.
///
/// Output depends only on its arguments.
#[must_use]
pub fn build_system_prompt(database_context: &str, max_rows: usize) -> String {
    let mut prompt = String::with_capacity(8 * 1024);

    prompt.push_str(
        "You are an expert SQL assistant for a database of Chilean companies.\n\n\
         IMPORTANT: when the user asks for data, reply with the SQL only. Do NOT explain, \
         do NOT give instructions.\n\n",
    );
    prompt.push_str(SCHEMA_DESCRIPTION);
    prompt.push('\n');
    prompt.push_str(database_context);
    prompt.push('\n');

    prompt.push_str("## CRITICAL RULES:\n");
    let rules = [
        "If the question needs data, reply ONLY with: SQL{your query here}".to_string(),
        "Do not add explanations before or after the SQL".to_string(),
        "ALWAYS use LEFT JOIN for relations (never INNER JOIN) so companies without an industry are kept"
            .to_string(),
        format!("ALWAYS include LIMIT (maximum {max_rows}); use LIMIT {max_rows} when unsure"),
        "For text search use: UPPER(column) LIKE '%WORD%' with the word in UPPER-CASE".to_string(),
        "Industry names are UPPER-CASE with accents (Á, É, Í, Ó, Ú, Ñ)".to_string(),
        "Do NOT invent industry names; search with LIKE instead".to_string(),
        "Never write a literal } inside the query".to_string(),
    ];
    for (idx, rule) in rules.iter().enumerate() {
        prompt.push_str(&format!("{}. {rule}\n", idx + 1));
    }

    prompt.push_str("\n## CORRECT examples:\n\n");
    for (question, query) in EXAMPLES {
        prompt.push_str(&format!("User: \"{question}\"\nYou: SQL{{{query}}}\n\n"));
    }

    prompt.push_str(
        "If the message does NOT need the database (such as \"hola\", \"gracias\", \"ayuda\"), \
         reply conversationally in the user's language, without SQL.",
    );

    prompt
}
