use rusqlite::types::Value;

use crate::query::clause::{join_segments, where_segment, Statement};

/// Builds `DELETE FROM <table> [WHERE <fragment>]`.
pub fn build_delete(table: &str, fragment: &str, args: Vec<Value>) -> Statement {
    let sql = join_segments([format!("DELETE FROM {}", table), where_segment(fragment)]);
    Statement::new(sql, args)
}
