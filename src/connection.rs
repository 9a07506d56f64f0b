//! DuckDB connection wrapper holding the in-memory price store.
//!
//! The source file is introspected with `DESCRIBE` before loading, so any
//! extra numeric columns present in the file become queryable features
//! without code changes.

use crate::config;
use crate::error::{FuturesError, Result};
use crate::source::DataSource;
use chrono::{Days, NaiveDate};
use duckdb::{types::ValueRef, Connection as DuckDbConnection};
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

/// DuckDB column types that can be read as an `f64` feature.
fn numeric_types() -> HashSet<&'static str> {
    HashSet::from([
        "DOUBLE", "FLOAT", "REAL", "TINYINT", "SMALLINT", "INTEGER", "BIGINT", "HUGEINT",
        "UTINYINT", "USMALLINT", "UINTEGER", "UBIGINT",
    ])
}

fn is_numeric_type(column_type: &str) -> bool {
    numeric_types().contains(column_type) || column_type.starts_with("DECIMAL")
}

/// Wraps a DuckDB connection and the tables loaded into it.
pub struct Connection {
    conn: DuckDbConnection,
    loaded_tables: RefCell<HashSet<String>>,
}

impl Connection {
    /// Open an empty in-memory database.
    pub fn new() -> Result<Self> {
        let conn = DuckDbConnection::open_in_memory()?;
        Ok(Self {
            conn,
            loaded_tables: RefCell::new(HashSet::new()),
        })
    }

    /// Open an in-memory database and load the price store from `source`.
    pub fn open(source: &DataSource) -> Result<Self> {
        let conn = Self::new()?;
        conn.load_table(config::PRICES_TABLE, source)?;
        Ok(conn)
    }

    /// Materialize `source` as a table, replacing any previous table of the
    /// same name.
    ///
    /// The file must contain `date` and `ticker` columns; `date` is cast to
    /// DuckDB's `DATE` type so range comparisons are calendar comparisons.
    pub fn load_table(&self, table_name: &str, source: &DataSource) -> Result<()> {
        let reader = source.reader();
        let schema = self.describe(&format!("SELECT * FROM {}", reader))?;

        for required in config::REQUIRED_COLUMNS {
            if !schema.iter().any(|(name, _)| name == required) {
                return Err(FuturesError::InvalidArgument(format!(
                    "Price data file {} has no '{}' column",
                    source, required
                )));
            }
        }

        self.conn.execute_batch(&format!(
            "CREATE OR REPLACE TABLE {} AS \
             SELECT * REPLACE (CAST(date AS DATE) AS date) FROM {}",
            table_name, reader
        ))?;
        self.loaded_tables
            .borrow_mut()
            .insert(table_name.to_string());

        let rows = self.row_count(table_name)?;
        log::info!(
            "Loaded table {} from {} ({} rows, {} columns)",
            table_name,
            source,
            rows,
            schema.len()
        );
        Ok(())
    }

    /// Execute SQL and return results as a `Vec` of `HashMap`s.
    ///
    /// Each row is represented as a `HashMap<String, serde_json::Value>`.
    /// DATE values come back as `YYYY-MM-DD` strings.
    pub fn execute(
        &self,
        sql: &str,
        params: &[String],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        let mut stmt = self.conn.prepare(sql)?;

        let param_values: Vec<&dyn duckdb::ToSql> = params
            .iter()
            .map(|p| p as &dyn duckdb::ToSql)
            .collect();

        let mut rows_result = stmt.query(param_values.as_slice())?;

        // Column metadata is only available once the query has run
        let stmt_ref = rows_result.as_ref().ok_or_else(|| {
            FuturesError::InvalidArgument("query returned no statement metadata".into())
        })?;
        let column_names: Vec<String> = stmt_ref
            .column_names()
            .into_iter()
            .map(|s| s.to_string())
            .collect();
        let column_count = stmt_ref.column_count();

        let mut out: Vec<HashMap<String, serde_json::Value>> = Vec::new();

        while let Some(row) = rows_result.next()? {
            let mut map = HashMap::with_capacity(column_count);
            for (i, col_name) in column_names.iter().enumerate().take(column_count) {
                map.insert(col_name.clone(), convert_value_ref(row.get_ref(i)?));
            }
            out.push(map);
        }

        Ok(out)
    }

    /// Execute SQL and deserialize each row into type `T`.
    pub fn execute_into<T: DeserializeOwned>(
        &self,
        sql: &str,
        params: &[String],
    ) -> Result<Vec<T>> {
        let rows = self.execute(sql, params)?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            let value = serde_json::Value::Object(row.into_iter().collect());
            results.push(serde_json::from_value(value)?);
        }
        Ok(results)
    }

    /// Execute SQL and return the first column of the first row.
    ///
    /// Returns `None` if the result set is empty.
    pub fn execute_scalar(
        &self,
        sql: &str,
        params: &[String],
    ) -> Result<Option<serde_json::Value>> {
        let mut stmt = self.conn.prepare(sql)?;
        let param_values: Vec<&dyn duckdb::ToSql> = params
            .iter()
            .map(|p| p as &dyn duckdb::ToSql)
            .collect();

        let mut rows = stmt.query(param_values.as_slice())?;

        if let Some(row) = rows.next()? {
            Ok(Some(convert_value_ref(row.get_ref(0)?)))
        } else {
            Ok(None)
        }
    }

    /// `(column_name, column_type)` pairs of a loaded table, in file order.
    pub fn columns(&self, table_name: &str) -> Result<Vec<(String, String)>> {
        self.require_table(table_name)?;
        self.describe(&format!("SELECT * FROM {}", table_name))
    }

    /// Names of the columns of `table_name` that can be read as a feature.
    pub fn numeric_columns(&self, table_name: &str) -> Result<Vec<String>> {
        Ok(self
            .columns(table_name)?
            .into_iter()
            .filter(|(_, t)| is_numeric_type(t))
            .map(|(name, _)| name)
            .collect())
    }

    /// Check whether `table_name` has a column named `column`.
    pub fn has_column(&self, table_name: &str, column: &str) -> Result<bool> {
        Ok(self
            .columns(table_name)?
            .iter()
            .any(|(name, _)| name == column))
    }

    /// Number of rows in a loaded table.
    pub fn row_count(&self, table_name: &str) -> Result<usize> {
        self.require_table(table_name)?;
        let count = self
            .execute_scalar(&format!("SELECT COUNT(*) FROM {}", table_name), &[])?
            .and_then(|v| v.as_u64())
            .unwrap_or(0);
        Ok(count as usize)
    }

    /// Check whether a table has been loaded.
    pub fn has_table(&self, name: &str) -> bool {
        self.loaded_tables.borrow().contains(name)
    }

    /// Return a sorted list of all loaded table names.
    pub fn tables(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loaded_tables.borrow().iter().cloned().collect();
        names.sort();
        names
    }

    /// Access the underlying DuckDB connection for advanced usage.
    pub fn raw(&self) -> &DuckDbConnection {
        &self.conn
    }

    fn require_table(&self, name: &str) -> Result<()> {
        if self.has_table(name) {
            Ok(())
        } else {
            Err(FuturesError::NotFound(format!("Table {} is not loaded", name)))
        }
    }

    /// Run `DESCRIBE` over a query. Only reads file headers / footers.
    fn describe(&self, query: &str) -> Result<Vec<(String, String)>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT column_name, column_type FROM (DESCRIBE {})",
            query
        ))?;

        let mut rows = stmt.query([])?;
        let mut schema = Vec::new();
        while let Some(row) = rows.next()? {
            let col_name: String = row.get(0)?;
            let col_type: String = row.get(1)?;
            schema.push((col_name, col_type));
        }
        Ok(schema)
    }
}

/// Convert a DuckDB `ValueRef` to a `serde_json::Value`.
fn convert_value_ref(val: ValueRef<'_>) -> serde_json::Value {
    match val {
        ValueRef::Null => serde_json::Value::Null,
        ValueRef::Boolean(b) => serde_json::Value::Bool(b),
        ValueRef::TinyInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::SmallInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::Int(n) => serde_json::Value::Number(n.into()),
        ValueRef::BigInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::UTinyInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::USmallInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::UInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::UBigInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::HugeInt(n) => {
            // HugeInt may not fit in i64; fall back to string
            if let Ok(i) = i64::try_from(n) {
                serde_json::Value::Number(i.into())
            } else {
                serde_json::Value::String(n.to_string())
            }
        }
        ValueRef::Float(f) => serde_json::Number::from_f64(f as f64)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Double(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Text(bytes) => serde_json::Value::String(String::from_utf8_lossy(bytes).to_string()),
        ValueRef::Date32(days) => date_from_epoch_days(days)
            .map(|d| serde_json::Value::String(d.format("%Y-%m-%d").to_string()))
            .unwrap_or(serde_json::Value::Null),
        // Timestamps, intervals, lists etc. do not occur in the price store
        _ => serde_json::Value::Null,
    }
}

fn date_from_epoch_days(days: i32) -> Option<NaiveDate> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)?;
    if days >= 0 {
        epoch.checked_add_days(Days::new(days as u64))
    } else {
        epoch.checked_sub_days(Days::new(days.unsigned_abs() as u64))
    }
}
