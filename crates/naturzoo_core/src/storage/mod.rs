//! Storage context contract shared by every entity repository.
//!
//! # Responsibility
//! - Define the boundary between repositories and the backing store.
//! - Define the single storage failure type that flows up unchanged.
//!
//! # Invariants
//! - Implementations are used through a shared `&dyn StorageContext`; no
//!   method takes `&mut self`.
//! - The trait carries no `Send`/`Sync` bound. Concurrent use is only as safe
//!   as the concrete implementation makes it.

use crate::db::DbError;
use crate::model::{EntityKind, Record, Table};
use std::error::Error;
use std::fmt::{Display, Formatter};

mod sqlite;

pub use sqlite::SqliteStorage;

pub type StorageResult<T> = Result<T, StorageError>;

/// Any failure raised by a storage context.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    Sqlite(rusqlite::Error),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    UnknownColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Backend-specific failure from a non-SQLite context.
    Unavailable(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
            Self::UnknownColumn { table, column } => {
                write!(f, "unknown column `{column}` for table `{table}`")
            }
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Sqlite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Backing store consumed by the entity and log repositories.
pub trait StorageContext {
    /// Confirms the dataset behind `kind` can be served.
    ///
    /// Called once per repository at construction time.
    fn ensure_entity(&self, _kind: EntityKind) -> StorageResult<()> {
        Ok(())
    }

    /// Confirms the activity log can be served.
    fn ensure_log(&self) -> StorageResult<()> {
        Ok(())
    }

    /// Human-readable number of stored `kind` records.
    fn count(&self, kind: EntityKind) -> StorageResult<String>;

    /// Every stored `kind` record, in storage order.
    fn list_all(&self, kind: EntityKind) -> StorageResult<Table>;

    /// `id` + `label` projection of every stored `kind` record.
    fn list_dropdown(&self, kind: EntityKind) -> StorageResult<Table>;

    fn insert(&self, kind: EntityKind, record: &Record) -> StorageResult<()>;

    /// Most recent modification time of any `kind` record.
    fn last_modified(&self, kind: EntityKind) -> StorageResult<String>;

    /// Activity log lines, oldest first.
    fn read_log(&self) -> StorageResult<Vec<String>>;
}
