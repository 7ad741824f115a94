//! Tabular query results.
//!
//! A [`Table`] is the uniform return shape for query results: ordered rows,
//! each a mapping from column name to JSON value. Column names come from the
//! prepared statement's declared output attributes, captured in a
//! [`TableSchema`] at preparation time rather than sniffed from row data.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A single declared output column of a prepared statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    /// Database-specific type (e.g., "INT8", "VARCHAR", "TIMESTAMPTZ")
    pub type_name: String,
    /// Position in the statement's output row, starting at 0.
    pub ordinal: usize,
}

impl ColumnDescriptor {
    /// Create a new column descriptor.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>, ordinal: usize) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            ordinal,
        }
    }
}

/// The declared output schema of a prepared statement, in declared order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub columns: Vec<ColumnDescriptor>,
}

impl TableSchema {
    /// Create a schema from an ordered list of descriptors.
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        Self { columns }
    }

    /// The declared column names, in order.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Look up a column descriptor by name.
    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Number of declared columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if the schema has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// An in-memory tabular query result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Table {
    /// Column names in declared order. Empty when the result has no rows.
    pub columns: Vec<String>,
    /// Fetched rows in fetch order, keyed by column name.
    pub rows: Vec<serde_json::Map<String, JsonValue>>,
}

impl Table {
    /// Create a table from declared columns and fetched rows.
    pub fn new(columns: Vec<String>, rows: Vec<serde_json::Map<String, JsonValue>>) -> Self {
        Self { columns, rows }
    }

    /// Create an empty table with no columns and no rows.
    ///
    /// This is the zero-row result shape: declared column names are discarded,
    /// so callers must not assume a schema is present on an empty table.
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Get the number of rows in the table.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns in the table.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a single cell by row index and column name.
    pub fn get(&self, row: usize, column: &str) -> Option<&JsonValue> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Iterate over the values of one column, in fetch order.
    ///
    /// Rows missing the column yield `Null`.
    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a JsonValue> {
        self.rows
            .iter()
            .map(move |r| r.get(column).unwrap_or(&JsonValue::Null))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_row(id: i64, symbol: &str) -> serde_json::Map<String, JsonValue> {
        let mut row = serde_json::Map::new();
        row.insert("id".to_string(), json!(id));
        row.insert("symbol".to_string(), json!(symbol));
        row
    }

    #[test]
    fn test_empty_table_has_no_columns() {
        let table = Table::empty();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_table_accessors() {
        let table = Table::new(
            vec!["id".to_string(), "symbol".to_string()],
            vec![sample_row(1, "AAPL"), sample_row(2, "TSLA")],
        );
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.get(0, "symbol"), Some(&json!("AAPL")));
        assert_eq!(table.get(1, "id"), Some(&json!(2)));
        assert_eq!(table.get(2, "id"), None);
        assert_eq!(table.get(0, "missing"), None);
    }

    #[test]
    fn test_column_values_in_fetch_order() {
        let table = Table::new(
            vec!["id".to_string(), "symbol".to_string()],
            vec![sample_row(1, "AAPL"), sample_row(2, "TSLA")],
        );
        let symbols: Vec<&JsonValue> = table.column_values("symbol").collect();
        assert_eq!(symbols, vec![&json!("AAPL"), &json!("TSLA")]);
    }

    #[test]
    fn test_schema_lookup() {
        let schema = TableSchema::new(vec![
            ColumnDescriptor::new("id", "INT8", 0),
            ColumnDescriptor::new("symbol", "VARCHAR", 1),
        ]);
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.column_names(), vec!["id", "symbol"]);
        assert_eq!(schema.column("symbol").unwrap().ordinal, 1);
        assert!(schema.column("missing").is_none());
    }

    #[test]
    fn test_table_serde_round_trip() {
        let table = Table::new(vec!["id".to_string()], vec![sample_row(7, "SPY")]);
        let encoded = serde_json::to_string(&table).unwrap();
        let decoded: Table = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.columns, table.columns);
        assert_eq!(decoded.get(0, "id"), Some(&json!(7)));
    }
}
