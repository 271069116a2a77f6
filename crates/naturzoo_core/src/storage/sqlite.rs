//! SQLite-backed storage context.
//!
//! # Responsibility
//! - Map each `EntityKind` onto its table and dropdown label expression.
//! - Keep every SQL statement of the zoo store inside this file.
//!
//! # Invariants
//! - Only column names from the static table specs reach SQL text; values
//!   are always bound as parameters.
//! - Timestamps are stored as epoch milliseconds and rendered in UTC.

use super::{StorageContext, StorageError, StorageResult};
use crate::db::migrations::{current_version, latest_version};
use crate::model::{CellValue, EntityKind, Record, Row, Table};
use log::{debug, error};
use rusqlite::types::{ToSqlOutput, Value, ValueRef};
use rusqlite::{params_from_iter, Connection, ToSql};
use std::time::Instant;

const UPDATED_AT_COLUMN: &str = "updated_at";
const LOG_TABLE: &str = "log";
const LOG_COLUMNS: &[&str] = &["id", "logged_at", "message"];

struct TableSpec {
    table: &'static str,
    /// Insertable columns, in grid display order.
    columns: &'static [&'static str],
    label_sql: &'static str,
}

const ADDRESS: TableSpec = TableSpec {
    table: "address",
    columns: &["id", "street", "house_number", "postal_code", "city", "country"],
    label_sql: "street || ' ' || house_number || ', ' || postal_code || ' ' || city",
};

const ANIMAL: TableSpec = TableSpec {
    table: "animal",
    columns: &["id", "name", "species", "enclosure_id", "foodplan_id", "birth_date"],
    label_sql: "name || ' (' || species || ')'",
};

const BUILDING: TableSpec = TableSpec {
    table: "building",
    columns: &["id", "name", "territory_id", "description"],
    label_sql: "name",
};

const ENCLOSURE: TableSpec = TableSpec {
    table: "enclosure",
    columns: &["id", "name", "building_id", "area_sqm"],
    label_sql: "name",
};

const FOODPLAN: TableSpec = TableSpec {
    table: "foodplan",
    columns: &["id", "name", "food_id", "quantity", "feeding_time"],
    label_sql: "name || ' ' || feeding_time",
};

const FOOD: TableSpec = TableSpec {
    table: "food",
    columns: &["id", "name", "unit", "supplier_id"],
    label_sql: "name || ' [' || unit || ']'",
};

const GUARDIAN: TableSpec = TableSpec {
    table: "guardian",
    columns: &["id", "first_name", "last_name", "address_id", "phone", "enclosure_id"],
    label_sql: "last_name || ', ' || first_name",
};

const SUPPLIER: TableSpec = TableSpec {
    table: "supplier",
    columns: &["id", "name", "address_id", "phone", "email"],
    label_sql: "name",
};

const TERRITORY: TableSpec = TableSpec {
    table: "territory",
    columns: &["id", "name", "description"],
    label_sql: "name",
};

fn table_spec(kind: EntityKind) -> &'static TableSpec {
    match kind {
        EntityKind::Address => &ADDRESS,
        EntityKind::Animal => &ANIMAL,
        EntityKind::Building => &BUILDING,
        EntityKind::Enclosure => &ENCLOSURE,
        EntityKind::Foodplan => &FOODPLAN,
        EntityKind::Food => &FOOD,
        EntityKind::Guardian => &GUARDIAN,
        EntityKind::Supplier => &SUPPLIER,
        EntityKind::Territory => &TERRITORY,
    }
}

/// Storage context over a migrated connection opened by `open_db`.
///
/// Borrows the connection; `rusqlite::Connection` is not `Sync`, so neither
/// is this context nor any `Zoo` built on it.
pub struct SqliteStorage<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStorage<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn observe<T>(
        &self,
        operation: &'static str,
        dataset: &'static str,
        run: impl FnOnce() -> StorageResult<T>,
    ) -> StorageResult<T> {
        let started_at = Instant::now();
        let result = run();
        match &result {
            Ok(_) => debug!(
                "event=storage_{operation} module=storage status=ok dataset={dataset} duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=storage_{operation} module=storage status=error dataset={dataset} duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            ),
        }
        result
    }

    fn query_table(&self, sql: &str, columns: &[&str]) -> StorageResult<Table> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([])?;
        let mut table = Table::new(columns.iter().map(|column| column.to_string()).collect());

        while let Some(row) = rows.next()? {
            let mut values = Row::new();
            for (index, column) in columns.iter().enumerate() {
                values.insert(column.to_string(), cell_from_sql(row.get_ref(index)?));
            }
            table.push_row(values);
        }

        Ok(table)
    }

    fn ensure_schema_version(&self) -> StorageResult<()> {
        let actual_version = current_version(self.conn)?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(StorageError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(())
    }

    fn ensure_table<'c>(
        &self,
        table: &'static str,
        required_columns: impl IntoIterator<Item = &'c &'static str>,
    ) -> StorageResult<()> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
            );",
            [table],
            |row| row.get(0),
        )?;
        if exists == 0 {
            return Err(StorageError::MissingRequiredTable(table));
        }

        let mut stmt = self.conn.prepare(&format!("PRAGMA table_info({table});"))?;
        let present = stmt
            .query_map([], |row| row.get::<_, String>("name"))?
            .collect::<Result<Vec<_>, _>>()?;

        for column in required_columns {
            if !present.iter().any(|name| name == *column) {
                return Err(StorageError::MissingRequiredColumn {
                    table,
                    column: *column,
                });
            }
        }
        Ok(())
    }
}

impl StorageContext for SqliteStorage<'_> {
    fn ensure_entity(&self, kind: EntityKind) -> StorageResult<()> {
        let spec = table_spec(kind);
        self.ensure_schema_version()?;
        self.ensure_table(
            spec.table,
            spec.columns.iter().chain(std::iter::once(&UPDATED_AT_COLUMN)),
        )
    }

    fn ensure_log(&self) -> StorageResult<()> {
        self.ensure_schema_version()?;
        self.ensure_table(LOG_TABLE, LOG_COLUMNS)
    }

    fn count(&self, kind: EntityKind) -> StorageResult<String> {
        let spec = table_spec(kind);
        self.observe("count", spec.table, || {
            let count: i64 = self.conn.query_row(
                &format!("SELECT COUNT(*) FROM {};", spec.table),
                [],
                |row| row.get(0),
            )?;
            Ok(count.to_string())
        })
    }

    fn list_all(&self, kind: EntityKind) -> StorageResult<Table> {
        let spec = table_spec(kind);
        self.observe("list_all", spec.table, || {
            let mut columns = spec.columns.to_vec();
            columns.push(UPDATED_AT_COLUMN);
            let sql = format!("SELECT {} FROM {};", columns.join(", "), spec.table);
            self.query_table(&sql, &columns)
        })
    }

    fn list_dropdown(&self, kind: EntityKind) -> StorageResult<Table> {
        let spec = table_spec(kind);
        self.observe("list_dropdown", spec.table, || {
            let sql = format!(
                "SELECT id, {} AS label FROM {} ORDER BY label COLLATE NOCASE, id;",
                spec.label_sql, spec.table
            );
            self.query_table(&sql, &["id", "label"])
        })
    }

    fn insert(&self, kind: EntityKind, record: &Record) -> StorageResult<()> {
        let spec = table_spec(kind);
        self.observe("insert", spec.table, || {
            let mut columns = Vec::with_capacity(record.len());
            for column in record.columns() {
                if !spec.columns.contains(&column) {
                    return Err(StorageError::UnknownColumn {
                        table: spec.table,
                        column,
                    });
                }
                columns.push(column);
            }

            let placeholders = (1..=columns.len())
                .map(|index| format!("?{index}"))
                .collect::<Vec<_>>()
                .join(", ");
            let sql = format!(
                "INSERT INTO {} ({}) VALUES ({placeholders});",
                spec.table,
                columns.join(", ")
            );
            self.conn.execute(
                &sql,
                params_from_iter(record.fields().iter().map(|(_, value)| value)),
            )?;
            Ok(())
        })
    }

    fn last_modified(&self, kind: EntityKind) -> StorageResult<String> {
        let spec = table_spec(kind);
        self.observe("last_modified", spec.table, || {
            let latest: Option<String> = self
                .conn
                .query_row(
                    &format!(
                        "SELECT strftime('%Y-%m-%d %H:%M:%S', MAX({UPDATED_AT_COLUMN}) / 1000, 'unixepoch')
                         FROM {};",
                        spec.table
                    ),
                    [],
                    |row| row.get(0),
                )?;
            Ok(latest.unwrap_or_default())
        })
    }

    fn read_log(&self) -> StorageResult<Vec<String>> {
        self.observe("read_log", LOG_TABLE, || {
            let mut stmt = self.conn.prepare(
                "SELECT '[' || strftime('%Y-%m-%d %H:%M:%S', logged_at / 1000, 'unixepoch') || '] ' || message
                 FROM log
                 ORDER BY id ASC;",
            )?;
            let lines = stmt
                .query_map([], |row| row.get::<_, String>(0))?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(lines)
        })
    }
}

impl ToSql for CellValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Self::Null => ToSqlOutput::Owned(Value::Null),
            Self::Integer(value) => ToSqlOutput::Owned(Value::Integer(*value)),
            Self::Real(value) => ToSqlOutput::Owned(Value::Real(*value)),
            Self::Text(value) => ToSqlOutput::Borrowed(ValueRef::Text(value.as_bytes())),
        })
    }
}

fn cell_from_sql(value: ValueRef<'_>) -> CellValue {
    match value {
        ValueRef::Null => CellValue::Null,
        ValueRef::Integer(value) => CellValue::Integer(value),
        ValueRef::Real(value) => CellValue::Real(value),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            CellValue::Text(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}
