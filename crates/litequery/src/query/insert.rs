//! INSERT statement assembly.

use crate::{
    codec::encode_value,
    error::{DbError, Result},
    query::clause::{placeholders, Statement},
    row::Record,
};

/// Builds `INSERT INTO <table> (<cols>) VALUES(<placeholders>)`.
///
/// One placeholder and one parameter per record entry, in record order.
/// An empty record is rejected since it has no valid rendering.
pub fn build_insert(table: &str, record: &Record) -> Result<Statement> {
    if record.is_empty() {
        return Err(DbError::EmptyRecord("insert"));
    }

    let (columns, values): (Vec<&str>, Vec<_>) = record
        .iter()
        .map(|(column, value)| (column.as_str(), encode_value(value)))
        .unzip();

    let sql = format!(
        "INSERT INTO {} ({}) VALUES({})",
        table,
        columns.join(", "),
        placeholders(values.len())
    );

    Ok(Statement::new(sql, values))
}
