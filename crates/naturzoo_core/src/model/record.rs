//! Column values, insert records and tabular results.
//!
//! # Invariants
//! - `Record` preserves field insertion order.
//! - `Table::columns` lists every key present in each row, in display order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// One cell of a record or a tabular result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl CellValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<&String> for CellValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<Uuid> for CellValue {
    fn from(value: Uuid) -> Self {
        Self::Text(value.to_string())
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Type-erased entity record handed to `StorageContext::insert`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(&'static str, CellValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one column value, builder style.
    pub fn with(mut self, column: &'static str, value: impl Into<CellValue>) -> Self {
        self.fields.push((column, value.into()));
        self
    }

    pub fn fields(&self) -> &[(&'static str, CellValue)] {
        &self.fields
    }

    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(column, _)| *column)
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// One row of a tabular result, keyed by column name.
pub type Row = BTreeMap<String, CellValue>;

/// Ordered rows with named columns, as returned by grid and dropdown reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Collects one column across all rows, `Null` where a row lacks it.
    pub fn column_values(&self, column: &str) -> Vec<CellValue> {
        self.rows
            .iter()
            .map(|row| row.get(column).cloned().unwrap_or(CellValue::Null))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{CellValue, Record, Row, Table};

    #[test]
    fn optional_values_map_to_null() {
        assert_eq!(CellValue::from(None::<String>), CellValue::Null);
        assert_eq!(
            CellValue::from(Some("gecko")),
            CellValue::Text("gecko".to_string())
        );
    }

    #[test]
    fn record_keeps_insertion_order() {
        let record = Record::new()
            .with("name", "Kiri")
            .with("species", "kea")
            .with("birth_date", None::<String>);

        let columns: Vec<_> = record.columns().collect();
        assert_eq!(columns, vec!["name", "species", "birth_date"]);
        assert_eq!(record.get("species"), Some(&CellValue::from("kea")));
        assert!(record.get("missing").is_none());
    }

    #[test]
    fn column_values_fill_missing_cells_with_null() {
        let mut table = Table::new(vec!["id".to_string(), "label".to_string()]);
        let mut first = Row::new();
        first.insert("label".to_string(), CellValue::from("North"));
        table.push_row(first);
        table.push_row(Row::new());

        assert_eq!(
            table.column_values("label"),
            vec![CellValue::from("North"), CellValue::Null]
        );
    }
}
