//! SQLite directory store
//!
//! A read-write pool for bootstrap and fixtures, and a read-only pool that
//! every generated query runs on.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Utc;
use r2d2::{ManageConnection, Pool};
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, OpenFlags};
use serde_json::{Number, Value};
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::error::Result;
use crate::models::{NewContact, NewEnterprise, NewIndustry, NewSubIndustry, QueryRows, Row};
use crate::schema::{
    contacts, enterprises, industries, sub_industries, CREATE_TABLES_SQL, SCHEMA_VERSION,
};

/// Pool of rusqlite connections
pub type DbPool = Pool<SqliteConnectionManager>;
/// Connection checked out of a [`DbPool`]
pub type DbConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Read access the assistant needs from the directory store.
#[cfg_attr(test, mockall::automock)]
pub trait DirectoryStore: Send + Sync {
    /// Up to `limit` industry names, in store order.
    fn sample_industry_names(&self, limit: usize) -> Result<Vec<String>>;

    /// Run an arbitrary read query and materialize every row.
    fn run_read_query(&self, sql: &str) -> Result<QueryRows>;
}

/// r2d2 manager for rusqlite file connections
#[derive(Debug, Clone)]
pub struct SqliteConnectionManager {
    path: PathBuf,
    read_only: bool,
}

impl SqliteConnectionManager {
    /// Manager opening read-write connections, creating the file if needed.
    #[must_use]
    pub fn file(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            read_only: false,
        }
    }

    /// Manager opening connections that cannot write.
    #[must_use]
    pub fn read_only(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            read_only: true,
        }
    }
}

impl ManageConnection for SqliteConnectionManager {
    type Connection = Connection;
    type Error = rusqlite::Error;

    fn connect(&self) -> std::result::Result<Connection, rusqlite::Error> {
        let conn = if self.read_only {
            Connection::open_with_flags(
                &self.path,
                OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )?
        } else {
            Connection::open(&self.path)?
        };
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        if self.read_only {
            conn.execute_batch("PRAGMA query_only = ON;")?;
        }
        Ok(conn)
    }

    fn is_valid(&self, conn: &mut Connection) -> std::result::Result<(), rusqlite::Error> {
        conn.execute_batch("SELECT 1")
    }

    fn has_broken(&self, _conn: &mut Connection) -> bool {
        false
    }
}

/// Database manager for the business directory
pub struct Database {
    pool: DbPool,
    read_pool: DbPool,
}

impl Database {
    /// Open (creating if needed) the SQLite file and make sure the schema exists.
    pub fn open(config: &DatabaseConfig) -> Result<Self> {
        let path = Path::new(&config.path);

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let timeout = Duration::from_secs(config.connection_timeout_secs);
        let pool = Pool::builder()
            .max_size(config.max_connections)
            .connection_timeout(timeout)
            .build(SqliteConnectionManager::file(path))?;

        let db_conn = pool.get()?;
        Self::ensure_schema(&db_conn)?;
        drop(db_conn);

        // The read pool can only be built once the file exists
        let read_pool = Pool::builder()
            .max_size(config.max_connections)
            .connection_timeout(timeout)
            .build(SqliteConnectionManager::read_only(path))?;

        info!(path = %path.display(), "Directory database opened");
        Ok(Self { pool, read_pool })
    }

    /// Open a database at `path` with default pool settings.
    pub fn open_path(path: &Path) -> Result<Self> {
        Self::open(&DatabaseConfig {
            path: path.to_string_lossy().into_owned(),
            ..DatabaseConfig::default()
        })
    }

    /// Create the directory tables if they don't exist and stamp the
    /// schema version into `PRAGMA user_version`
    pub fn ensure_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(CREATE_TABLES_SQL)?;
        conn.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
        debug!(version = SCHEMA_VERSION, "Schema ensured");
        Ok(())
    }

    /// Schema version recorded in the database file
    pub fn schema_version(&self) -> Result<u32> {
        let conn = self.get_read_connection()?;
        Ok(conn.query_row("PRAGMA user_version", [], |row| row.get(0))?)
    }

    /// Get a read-write connection from the pool
    pub fn get_connection(&self) -> Result<DbConnection> {
        Ok(self.pool.get()?)
    }

    /// Get a read-only connection from the pool
    pub fn get_read_connection(&self) -> Result<DbConnection> {
        Ok(self.read_pool.get()?)
    }

    /// Insert an industry, returning its id
    pub fn add_industry(&self, industry: &NewIndustry) -> Result<i64> {
        let conn = self.get_connection()?;
        let now = Utc::now().naive_utc();

        conn.execute(
            &format!(
                "INSERT INTO {} ({}, {}, {}, {}) VALUES (?, ?, ?, ?)",
                industries::TABLE,
                industries::NAME,
                industries::DESCRIPTION,
                industries::CREATED_AT,
                industries::UPDATED_AT
            ),
            params![industry.name, industry.description, now, now],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Insert a sub-industry, returning its id
    pub fn add_sub_industry(&self, sub_industry: &NewSubIndustry) -> Result<i64> {
        let conn = self.get_connection()?;
        let now = Utc::now().naive_utc();

        conn.execute(
            &format!(
                "INSERT INTO {} ({}, {}, {}, {}, {}) VALUES (?, ?, ?, ?, ?)",
                sub_industries::TABLE,
                sub_industries::INDUSTRY_ID,
                sub_industries::NAME,
                sub_industries::DESCRIPTION,
                sub_industries::CREATED_AT,
                sub_industries::UPDATED_AT
            ),
            params![
                sub_industry.industry_id,
                sub_industry.name,
                sub_industry.description,
                now,
                now
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Insert an enterprise, returning its id
    pub fn add_enterprise(&self, enterprise: &NewEnterprise) -> Result<i64> {
        let conn = self.get_connection()?;
        let now = Utc::now().naive_utc();
        let country = enterprise.country.as_deref().unwrap_or("Chile");

        conn.execute(
            &format!(
                "INSERT INTO {} ({}, {}, {}, {}, {}, {}, {}, {}) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                enterprises::TABLE,
                enterprises::NAME,
                enterprises::DESCRIPTION,
                enterprises::COUNTRY,
                enterprises::WEBSITE,
                enterprises::INDUSTRY_ID,
                enterprises::SUB_INDUSTRY_ID,
                enterprises::CREATED_AT,
                enterprises::UPDATED_AT
            ),
            params![
                enterprise.name,
                enterprise.description,
                country,
                enterprise.website,
                enterprise.industry_id,
                enterprise.sub_industry_id,
                now,
                now
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Insert a contact, returning its id
    pub fn add_contact(&self, contact: &NewContact) -> Result<i64> {
        let conn = self.get_connection()?;
        let now = Utc::now().naive_utc();

        conn.execute(
            &format!(
                "INSERT INTO {} ({}, {}, {}, {}, {}, {}, {}, {}, {}, {}) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                contacts::TABLE,
                contacts::ENTERPRISE_ID,
                contacts::NAME,
                contacts::EMAIL,
                contacts::PHONE,
                contacts::POSITION,
                contacts::LINKEDIN_PROFILE,
                contacts::AGE,
                contacts::CONTACTED,
                contacts::CREATED_AT,
                contacts::UPDATED_AT
            ),
            params![
                contact.enterprise_id,
                contact.name,
                contact.email,
                contact.phone,
                contact.position,
                contact.linkedin_profile,
                contact.age,
                contact.contacted,
                now,
                now
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }
}

impl DirectoryStore for Database {
    fn sample_industry_names(&self, limit: usize) -> Result<Vec<String>> {
        let conn = self.get_read_connection()?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM {} ORDER BY {} LIMIT ?",
            industries::NAME,
            industries::TABLE,
            industries::ID
        ))?;
        let names = stmt
            .query_map(params![limit], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        debug!(count = names.len(), "Sampled industry names");
        Ok(names)
    }

    fn run_read_query(&self, sql: &str) -> Result<QueryRows> {
        let conn = self.get_read_connection()?;
        let mut stmt = conn.prepare(sql)?;

        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(ToString::to_string)
            .collect();

        let mut rows = Vec::new();
        let mut cursor = stmt.query([])?;
        while let Some(row) = cursor.next()? {
            let mut mapped = Row::with_capacity(columns.len());
            for (idx, column) in columns.iter().enumerate() {
                mapped.insert(column.clone(), sql_value_to_json(row.get_ref(idx)?));
            }
            rows.push(mapped);
        }

        Ok(QueryRows::new(rows))
    }
}

/// Convert a raw SQLite value to JSON
fn sql_value_to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Value::String(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}
