//! SELECT statement assembly.

use rusqlite::types::Value;

use crate::query::{
    clause::{join_segments, where_segment, Statement},
    state::QueryState,
};

/// Builds `SELECT <cols> FROM <table> [joins] [WHERE ..] [ORDER BY ..] [LIMIT n]`.
///
/// `args` bind the `?` marks inside `fragment` and are passed through as-is.
pub fn build_select(state: &QueryState, fragment: &str, args: Vec<Value>) -> Statement {
    let projection = if state.columns().is_empty() {
        "*".to_string()
    } else {
        state.columns().join(", ")
    };

    let order = if state.sort().is_empty() {
        String::new()
    } else {
        format!("ORDER BY {}", state.sort().join(", "))
    };

    let limit = state
        .limit()
        .map(|limit| format!("LIMIT {}", limit))
        .unwrap_or_default();

    let sql = join_segments([
        format!("SELECT {} FROM {}", projection, state.table()),
        state.joins().join(" "),
        where_segment(fragment),
        order,
        limit,
    ]);

    Statement::new(sql, args)
}
