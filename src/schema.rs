//! Database schema definitions
//!
//! Table and column name constants for the business directory store, the
//! schema description handed to the language model, and the bootstrap DDL.
//! The description is authored by hand and versioned with the DDL below; bump
//! [`SCHEMA_VERSION`] whenever either changes.

/// Version of the schema description and DDL in this module.
pub const SCHEMA_VERSION: u32 = 1;

/// Industries table schema
pub mod industries {
    /// Table name
    pub const TABLE: &str = "core_industry";
    /// Primary key column
    pub const ID: &str = "id";
    /// Unique upper-case display name
    pub const NAME: &str = "name";
    /// Free-text description
    pub const DESCRIPTION: &str = "description";
    /// Creation timestamp column
    pub const CREATED_AT: &str = "created_at";
    /// Last update timestamp column
    pub const UPDATED_AT: &str = "updated_at";
}

/// Sub-industries table schema
pub mod sub_industries {
    /// Table name
    pub const TABLE: &str = "core_sub_industry";
    /// Primary key column
    pub const ID: &str = "id";
    /// Foreign key to the industries table
    pub const INDUSTRY_ID: &str = "industry_id";
    /// Name, unique within its industry
    pub const NAME: &str = "name";
    /// Free-text description
    pub const DESCRIPTION: &str = "description";
    /// Creation timestamp column
    pub const CREATED_AT: &str = "created_at";
    /// Last update timestamp column
    pub const UPDATED_AT: &str = "updated_at";
}

/// Enterprises table schema
pub mod enterprises {
    /// Table name
    pub const TABLE: &str = "core_enterprise";
    /// Primary key column
    pub const ID: &str = "id";
    /// Company name
    pub const NAME: &str = "name";
    /// Free-text description
    pub const DESCRIPTION: &str = "description";
    /// Country, `Chile` unless stated otherwise
    pub const COUNTRY: &str = "country";
    /// Website URL
    pub const WEBSITE: &str = "website";
    /// Optional foreign key to the industries table
    pub const INDUSTRY_ID: &str = "industry_id";
    /// Optional foreign key to the sub-industries table
    pub const SUB_INDUSTRY_ID: &str = "sub_industry_id";
    /// Creation timestamp column
    pub const CREATED_AT: &str = "created_at";
    /// Last update timestamp column
    pub const UPDATED_AT: &str = "updated_at";
}

/// Contacts table schema
pub mod contacts {
    /// Table name
    pub const TABLE: &str = "core_contact";
    /// Primary key column
    pub const ID: &str = "id";
    /// Foreign key to the enterprises table
    pub const ENTERPRISE_ID: &str = "enterprise_id";
    /// Contact name
    pub const NAME: &str = "name";
    /// Email address
    pub const EMAIL: &str = "email";
    /// Phone number
    pub const PHONE: &str = "phone";
    /// Job position
    pub const POSITION: &str = "position";
    /// `LinkedIn` profile URL
    pub const LINKEDIN_PROFILE: &str = "linkedin_profile";
    /// Age in years
    pub const AGE: &str = "age";
    /// Whether the contact has already been reached
    pub const CONTACTED: &str = "contacted";
    /// Creation timestamp column
    pub const CREATED_AT: &str = "created_at";
    /// Last update timestamp column
    pub const UPDATED_AT: &str = "updated_at";
}

/// Schema description embedded in the system instruction.
pub const SCHEMA_DESCRIPTION: &str = "\
## Database structure

### core_industry (industries)
- id: INTEGER (primary key)
- name: VARCHAR(255) UNIQUE (UPPER-CASE, with accents and special characters)
- description: TEXT
- created_at, updated_at: DATETIME

### core_sub_industry (sub-industries)
- id: INTEGER (primary key)
- industry_id: INTEGER (foreign key -> core_industry.id)
- name: VARCHAR(255)
- description: TEXT
- created_at, updated_at: DATETIME

### core_enterprise (companies)
- id: INTEGER (primary key)
- name: VARCHAR(255)
- description: TEXT
- country: VARCHAR(100) DEFAULT 'Chile'
- website: VARCHAR(200)
- industry_id: INTEGER (foreign key -> core_industry.id, may be NULL)
- sub_industry_id: INTEGER (foreign key -> core_sub_industry.id, may be NULL)
- created_at, updated_at: DATETIME

### core_contact (contacts)
- id: INTEGER (primary key)
- enterprise_id: INTEGER (foreign key -> core_enterprise.id)
- name, email, phone, position, linkedin_profile: VARCHAR
- age: INTEGER
- contacted: BOOLEAN
- created_at, updated_at: DATETIME
";

/// DDL creating the four directory tables if they do not exist.
pub const CREATE_TABLES_SQL: &str = "
    CREATE TABLE IF NOT EXISTS core_industry (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name VARCHAR(255) NOT NULL UNIQUE,
        description TEXT,
        created_at DATETIME NOT NULL,
        updated_at DATETIME NOT NULL
    );

    CREATE TABLE IF NOT EXISTS core_sub_industry (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        industry_id INTEGER NOT NULL REFERENCES core_industry(id) ON DELETE CASCADE,
        name VARCHAR(255) NOT NULL,
        description TEXT,
        created_at DATETIME NOT NULL,
        updated_at DATETIME NOT NULL,
        UNIQUE (industry_id, name)
    );

    CREATE TABLE IF NOT EXISTS core_enterprise (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name VARCHAR(255) NOT NULL,
        description TEXT,
        country VARCHAR(100) NOT NULL DEFAULT 'Chile',
        website VARCHAR(200),
        industry_id INTEGER REFERENCES core_industry(id) ON DELETE SET NULL,
        sub_industry_id INTEGER REFERENCES core_sub_industry(id) ON DELETE SET NULL,
        created_at DATETIME NOT NULL,
        updated_at DATETIME NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_enterprise_industry ON core_enterprise(industry_id);

    CREATE TABLE IF NOT EXISTS core_contact (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        enterprise_id INTEGER NOT NULL REFERENCES core_enterprise(id) ON DELETE CASCADE,
        name VARCHAR(255) NOT NULL,
        email VARCHAR(254),
        phone VARCHAR(20),
        position VARCHAR(100),
        linkedin_profile VARCHAR(200),
        age INTEGER,
        contacted BOOLEAN NOT NULL DEFAULT 0,
        created_at DATETIME NOT NULL,
        updated_at DATETIME NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_contact_enterprise ON core_contact(enterprise_id);
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_names_every_table() {
        for table in [
            industries::TABLE,
            sub_industries::TABLE,
            enterprises::TABLE,
            contacts::TABLE,
        ] {
            assert!(SCHEMA_DESCRIPTION.contains(table), "missing {table}");
            assert!(CREATE_TABLES_SQL.contains(table), "missing DDL for {table}");
        }
    }

    #[test]
    fn test_description_names_foreign_keys() {
        assert!(SCHEMA_DESCRIPTION.contains(enterprises::INDUSTRY_ID));
        assert!(SCHEMA_DESCRIPTION.contains(enterprises::SUB_INDUSTRY_ID));
        assert!(SCHEMA_DESCRIPTION.contains(contacts::ENTERPRISE_ID));
    }
}
