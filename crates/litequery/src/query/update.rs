//! UPDATE statement assembly.

use rusqlite::types::Value;

use crate::{
    codec::encode_value,
    error::{DbError, Result},
    query::clause::{join_segments, where_segment, Statement},
    row::Record,
};

/// Builds `UPDATE <table> SET <col> = ?, .. [WHERE <fragment>]`.
///
/// SET values come first in the parameter list, followed by `args` for the
/// placeholders inside `fragment`.
pub fn build_update(
    table: &str,
    record: &Record,
    fragment: &str,
    args: Vec<Value>,
) -> Result<Statement> {
    if record.is_empty() {
        return Err(DbError::EmptyRecord("update"));
    }

    let mut params = Vec::with_capacity(record.len() + args.len());
    let sets: Vec<String> = record
        .iter()
        .map(|(column, value)| {
            params.push(encode_value(value));
            format!("{} = ?", column)
        })
        .collect();
    params.extend(args);

    let sql = join_segments([
        format!("UPDATE {} SET {}", table, sets.join(", ")),
        where_segment(fragment),
    ]);

    Ok(Statement::new(sql, params))
}
