//! Row types returned by reads and record types accepted by writes.

use rusqlite::types::Value;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value as JsonValue};

use crate::{codec::decode_value, error::Result};

/// Ordered column/value payload for INSERT and UPDATE.
///
/// Key order is the column order of the generated statement.
pub type Record = Map<String, JsonValue>;

/// A result row as produced by SQLite, before decoding.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    columns: Vec<String>,
    values: Vec<Value>,
}

impl RawRow {
    pub(crate) fn new(columns: Vec<String>, values: Vec<Value>) -> Self {
        Self { columns, values }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Raw value of a column by name.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|idx| self.values.get(idx))
    }

    /// Decodes every column independently.
    ///
    /// If a column name repeats (e.g. across a join) the later value wins.
    pub fn decode(self) -> Row {
        self.columns
            .into_iter()
            .zip(self.values)
            .map(|(column, value)| (column, decode_value(value)))
            .collect()
    }
}

/// A decoded result row: column name to JSON value, in column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row(Map<String, JsonValue>);

impl Row {
    pub fn get(&self, column: &str) -> Option<&JsonValue> {
        self.0.get(column)
    }

    /// Deserializes one column. A missing column deserializes from `null`,
    /// so `Option<T>` targets yield `None`.
    pub fn get_as<T: DeserializeOwned>(&self, column: &str) -> Result<T> {
        let value = self.0.get(column).cloned().unwrap_or(JsonValue::Null);
        Ok(serde_json::from_value(value)?)
    }

    /// Deserializes the whole row into `T`.
    pub fn deserialize<T: DeserializeOwned>(self) -> Result<T> {
        Ok(serde_json::from_value(JsonValue::Object(self.0))?)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_map(self) -> Map<String, JsonValue> {
        self.0
    }
}

impl From<Map<String, JsonValue>> for Row {
    fn from(map: Map<String, JsonValue>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, JsonValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, JsonValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Row {
    type Item = (String, JsonValue);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
