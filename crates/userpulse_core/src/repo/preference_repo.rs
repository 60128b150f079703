//! Preference store contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable get/set APIs over durable key-value storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `set`/`set_list` upsert exactly one key; there is no cross-key
//!   transaction, so a crash between two `set` calls may persist a subset.
//! - `set_list` serializes the whole list in one write; readers never observe
//!   a partially updated list.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Well-known preference keys shared with the presentation layer.
pub mod keys {
    /// User display name, plain string.
    pub const NAME: &str = "name";
    /// Display language code, `en` or `fa`.
    pub const LANGUAGE: &str = "language";
    /// Theme code, `light` or `dark`.
    pub const THEME_MODE: &str = "themeMode";
    /// Todo list, JSON array of strings.
    pub const TODOS: &str = "todos";
}

pub type RepoResult<T> = Result<T, RepoError>;

/// Preference persistence and query errors.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Stored value under a list key is not a JSON array of strings.
    InvalidData {
        key: String,
        message: String,
    },
    /// Connection has no migrations applied.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData { key, message } => {
                write!(f, "invalid persisted value under `{key}`: {message}")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; migrations not applied"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable key-value preference storage contract.
///
/// Mirrors browser-origin local storage semantics: survives restarts, one
/// value per key, cleared only by explicit external action.
pub trait PreferenceRepository {
    /// Returns the stored value for `key`, or `None` when absent.
    fn get(&self, key: &str) -> RepoResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> RepoResult<()>;

    /// Returns the stored list under `key`; absent key yields an empty list.
    fn get_list(&self, key: &str) -> RepoResult<Vec<String>>;

    /// Serializes `items` as one value under `key`, replacing the whole list.
    fn set_list(&self, key: &str, items: &[String]) -> RepoResult<()>;

    /// Removes the value under `key`. Absent key is a no-op.
    fn remove(&self, key: &str) -> RepoResult<()>;
}

/// SQLite-backed preference repository.
pub struct SqlitePreferenceRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePreferenceRepository<'conn> {
    /// Wraps a migrated connection, validating the schema first.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `PRAGMA user_version` is behind.
    /// - `MissingRequiredTable` when `preferences` does not exist.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version: u32 =
            conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let table_exists: bool = conn.query_row(
            "SELECT EXISTS (
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'preferences'
            );",
            [],
            |row| row.get(0),
        )?;
        if !table_exists {
            return Err(RepoError::MissingRequiredTable("preferences"));
        }

        Ok(Self { conn })
    }
}

impl PreferenceRepository for SqlitePreferenceRepository<'_> {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1;",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO preferences (key, value)
             VALUES (?1, ?2)
             ON CONFLICT (key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn get_list(&self, key: &str) -> RepoResult<Vec<String>> {
        let Some(raw) = self.get(key)? else {
            return Ok(Vec::new());
        };

        serde_json::from_str(&raw).map_err(|err| RepoError::InvalidData {
            key: key.to_string(),
            message: format!("expected a JSON array of strings: {err}"),
        })
    }

    fn set_list(&self, key: &str, items: &[String]) -> RepoResult<()> {
        let raw = serde_json::to_string(items).map_err(|err| RepoError::InvalidData {
            key: key.to_string(),
            message: format!("list serialization failed: {err}"),
        })?;
        self.set(key, &raw)
    }

    fn remove(&self, key: &str) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM preferences WHERE key = ?1;", [key])?;
        Ok(())
    }
}
