//! Per-handle query state.
//!
//! Holds the structural parts of a query (table, projection, joins, sort and
//! limit). The statement builders read it; nothing here touches the database.

/// The kind of a JOIN clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinKind {
    #[default]
    Left,
    Inner,
    Right,
}

impl JoinKind {
    /// Parses a join kind case-insensitively. Unknown kinds fall back to `Left`.
    pub fn parse(kind: &str) -> Self {
        match kind.trim().to_ascii_lowercase().as_str() {
            "inner" => JoinKind::Inner,
            "right" => JoinKind::Right,
            _ => JoinKind::Left,
        }
    }

    /// SQL keyword for this join kind.
    pub const fn keyword(self) -> &'static str {
        match self {
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Right => "RIGHT JOIN",
        }
    }
}

impl From<&str> for JoinKind {
    fn from(kind: &str) -> Self {
        JoinKind::parse(kind)
    }
}

/// Structural query configuration for one table handle.
///
/// State persists across operations. Reusing a handle for a differently shaped
/// query means overwriting columns and limit, or clearing joins and sort.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    table: String,
    columns: Vec<String>,
    joins: Vec<String>,
    sort: Vec<String>,
    limit: Option<i64>,
}

impl QueryState {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Default::default()
        }
    }

    pub fn set_table(&mut self, table: impl Into<String>) {
        self.table = table.into();
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Replaces the projection. An empty list selects `*`.
    pub fn set_columns<I, S>(&mut self, columns: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn set_limit(&mut self, limit: Option<i64>) {
        self.limit = limit;
    }

    pub fn limit(&self) -> Option<i64> {
        self.limit
    }

    /// Appends a raw ORDER BY term such as `"name DESC"`.
    pub fn add_sort(&mut self, term: impl Into<String>) {
        self.sort.push(term.into());
    }

    pub fn sort(&self) -> &[String] {
        &self.sort
    }

    pub fn clear_sort(&mut self) {
        self.sort.clear();
    }

    /// Renders and appends `<KIND> JOIN <table> ON <col_a> = <col_b>`.
    pub fn add_join(
        &mut self,
        kind: impl Into<JoinKind>,
        table: &str,
        col_a: &str,
        col_b: &str,
    ) {
        let kind = kind.into();
        self.joins
            .push(format!("{} {} ON {} = {}", kind.keyword(), table, col_a, col_b));
    }

    pub fn joins(&self) -> &[String] {
        &self.joins
    }

    pub fn clear_joins(&mut self) {
        self.joins.clear();
    }
}
