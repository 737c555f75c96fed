//! Table handles.

use std::path::Path;

use litequery_config::{get_config, Config};
use rusqlite::types::Value;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value as JsonValue;

use crate::{
    connection,
    error::{DbError, Result},
    executor::{Completion, Executor, Outcome},
    query::{
        build_delete, build_insert, build_select, build_update, JoinKind, QueryState, Statement,
    },
    row::{Record, Row},
};

/// One table context: clause state plus its own SQLite connection.
///
/// Setters change the state used by later operations; running an operation
/// never resets it. Each operation builds its statement before the first
/// await, so a running query is unaffected by later setter calls.
///
/// # Example
///
/// ```
/// use litequery::{args, Table};
/// use serde_json::json;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> litequery::Result<()> {
/// let mut users = Table::in_memory("users")?;
/// users
///     .query("CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT, tags TEXT)", args![])
///     .await?;
///
/// let record = json!({"name": "ada", "tags": ["admin"]});
/// users.insert(record.as_object().unwrap()).await?;
///
/// users.set_columns(["name", "tags"]).add_sort("name ASC").set_limit(Some(10));
/// let rows = users.select("WHERE name = ?", args!["ada".to_string()]).await?;
/// assert_eq!(rows[0].get("tags"), Some(&json!(["admin"])));
/// # Ok(())
/// # }
/// ```
pub struct Table {
    state: QueryState,
    executor: Executor,
}

impl Table {
    /// Opens a handle on the database named by the global configuration.
    ///
    /// The configuration is read once, here. Later calls to
    /// [`litequery_config::set_database`] do not affect this handle.
    pub fn new(table: impl Into<String>) -> Result<Self> {
        Self::with_config(&get_config(), table)
    }

    /// Opens a handle using an explicit configuration.
    pub fn with_config(config: &Config, table: impl Into<String>) -> Result<Self> {
        let conn = connection::open(config.get_db_path(), config)?;
        Ok(Self::from_connection(conn, table))
    }

    /// Opens a handle on the database file at `path` with default options.
    pub fn open<P: AsRef<Path>>(path: P, table: impl Into<String>) -> Result<Self> {
        let conn = connection::open(path, &Config::default_config())?;
        Ok(Self::from_connection(conn, table))
    }

    /// Opens a handle on a private in-memory database.
    pub fn in_memory(table: impl Into<String>) -> Result<Self> {
        Ok(Self::from_connection(connection::open_in_memory()?, table))
    }

    fn from_connection(conn: rusqlite::Connection, table: impl Into<String>) -> Self {
        Self {
            state: QueryState::new(table),
            executor: Executor::new(conn),
        }
    }

    pub fn set_table(&mut self, table: impl Into<String>) -> &mut Self {
        self.state.set_table(table);
        self
    }

    pub fn table(&self) -> &str {
        self.state.table()
    }

    /// Replaces the projected columns. An empty list selects `*`.
    pub fn set_columns<I, S>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state.set_columns(columns);
        self
    }

    pub fn columns(&self) -> &[String] {
        self.state.columns()
    }

    pub fn set_limit(&mut self, limit: Option<i64>) -> &mut Self {
        self.state.set_limit(limit);
        self
    }

    pub fn limit(&self) -> Option<i64> {
        self.state.limit()
    }

    pub fn add_sort(&mut self, term: impl Into<String>) -> &mut Self {
        self.state.add_sort(term);
        self
    }

    pub fn clear_sort(&mut self) -> &mut Self {
        self.state.clear_sort();
        self
    }

    /// Appends a join. `kind` is `"left"`, `"inner"` or `"right"` in any case;
    /// anything else joins LEFT.
    pub fn add_join(&mut self, kind: &str, table: &str, col_a: &str, col_b: &str) -> &mut Self {
        self.add_join_kind(JoinKind::parse(kind), table, col_a, col_b)
    }

    pub fn add_join_kind(
        &mut self,
        kind: JoinKind,
        table: &str,
        col_a: &str,
        col_b: &str,
    ) -> &mut Self {
        self.state.add_join(kind, table, col_a, col_b);
        self
    }

    pub fn clear_joins(&mut self) -> &mut Self {
        self.state.clear_joins();
        self
    }

    /// The clause state used by the next operation.
    pub fn state(&self) -> &QueryState {
        &self.state
    }

    /// Selects rows matching `fragment` and decodes every column.
    ///
    /// Pass `""` to select without a filter.
    pub async fn select(&self, fragment: &str, args: Vec<Value>) -> Result<Vec<Row>> {
        let statement = build_select(&self.state, fragment, args);
        let rows = self
            .executor
            .run(statement)
            .await?
            .into_rows()
            .unwrap_or_default();
        Ok(rows.into_iter().map(|row| row.decode()).collect())
    }

    /// Like [`Table::select`], deserializing each row into `T`.
    pub async fn select_as<T: DeserializeOwned>(
        &self,
        fragment: &str,
        args: Vec<Value>,
    ) -> Result<Vec<T>> {
        self.select(fragment, args)
            .await?
            .into_iter()
            .map(Row::deserialize)
            .collect()
    }

    /// Inserts one row. Arrays and objects are stored as JSON text.
    pub async fn insert(&self, record: &Record) -> Result<Completion> {
        let statement = build_insert(self.state.table(), record)?;
        Ok(self
            .executor
            .run(statement)
            .await?
            .into_completion()
            .unwrap_or_default())
    }

    /// Inserts any value that serializes to a map, such as a struct.
    pub async fn insert_from<T: Serialize>(&self, value: &T) -> Result<Completion> {
        let record = to_record(value)?;
        self.insert(&record).await
    }

    /// Updates rows matching `fragment`. SET values bind before `args`.
    pub async fn update(
        &self,
        record: &Record,
        fragment: &str,
        args: Vec<Value>,
    ) -> Result<Completion> {
        let statement = build_update(self.state.table(), record, fragment, args)?;
        Ok(self
            .executor
            .run(statement)
            .await?
            .into_completion()
            .unwrap_or_default())
    }

    pub async fn update_from<T: Serialize>(
        &self,
        value: &T,
        fragment: &str,
        args: Vec<Value>,
    ) -> Result<Completion> {
        let record = to_record(value)?;
        self.update(&record, fragment, args).await
    }

    /// Deletes rows matching `fragment`. Matching nothing is still a success.
    pub async fn delete(&self, fragment: &str, args: Vec<Value>) -> Result<Completion> {
        let statement = build_delete(self.state.table(), fragment, args);
        Ok(self
            .executor
            .run(statement)
            .await?
            .into_completion()
            .unwrap_or_default())
    }

    /// Runs raw SQL on this handle's connection without decoding.
    pub async fn query(&self, sql: &str, args: Vec<Value>) -> Result<Outcome> {
        self.executor.run(Statement::new(sql, args)).await
    }

    /// Releases the connection once any in-flight statement finishes.
    /// Operations afterwards fail with [`DbError::ConnectionClosed`].
    pub async fn close(&self) -> Result<()> {
        self.executor.close().await
    }

    pub fn is_closed(&self) -> bool {
        self.executor.is_closed()
    }
}

fn to_record<T: Serialize>(value: &T) -> Result<Record> {
    match serde_json::to_value(value)? {
        JsonValue::Object(map) => Ok(map),
        _ => Err(DbError::NotARecord),
    }
}
