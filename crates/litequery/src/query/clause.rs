//! Clause helpers shared between the statement builders.

use rusqlite::types::Value;

/// A rendered SQL statement together with its positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Statement {
    pub fn new(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Number of `?` marks in the rendered text.
    pub fn placeholder_count(&self) -> usize {
        self.sql.matches('?').count()
    }
}

/// Removes one leading `WHERE` keyword, so callers may pass either
/// `"id = ?"` or `"WHERE id = ?"`.
///
/// The keyword only matches as a whole word: `"whereabouts = ?"` is left alone.
pub fn strip_where(fragment: &str) -> &str {
    let fragment = fragment.trim();
    let Some(head) = fragment.get(..5) else {
        return fragment;
    };

    if !head.eq_ignore_ascii_case("where") {
        return fragment;
    }

    let rest = &fragment[5..];
    match rest.chars().next() {
        Some(c) if c.is_alphanumeric() || c == '_' => fragment,
        _ => rest.trim_start(),
    }
}

/// `n` placeholders joined by `", "`. Empty for `n == 0`.
pub fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

/// Joins the non-empty segments with a single space.
pub(crate) fn join_segments<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    segments
        .into_iter()
        .filter_map(|s| {
            let s = s.as_ref().trim();
            (!s.is_empty()).then(|| s.to_string())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `WHERE <fragment>`, or an empty string when there is no condition.
pub(crate) fn where_segment(fragment: &str) -> String {
    let condition = strip_where(fragment);
    if condition.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", condition)
    }
}
