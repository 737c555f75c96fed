//! Error types for litequery.

use litequery_config::ConfigError;
use miette::Diagnostic;
use thiserror::Error;

/// Database error type for litequery operations.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("Database connection failed for {path}: {source}")]
    #[diagnostic(
        code(litequery::connection),
        help("Check if the database file exists and is accessible")
    )]
    ConnectionError {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    /// Any failure reported by SQLite, passed through unchanged.
    #[error("Database query failed: {0}")]
    #[diagnostic(
        code(litequery::query),
        help("Check the statement text, table name and bound parameters")
    )]
    QueryError(#[from] rusqlite::Error),

    #[error("Database connection is closed")]
    #[diagnostic(
        code(litequery::closed),
        help("Construct a new table handle after calling close()")
    )]
    ConnectionClosed,

    #[error("Cannot {0} an empty record")]
    #[diagnostic(
        code(litequery::empty_record),
        help("Provide at least one column value")
    )]
    EmptyRecord(&'static str),

    #[error("Value does not serialize to a record")]
    #[diagnostic(
        code(litequery::not_a_record),
        help("Only structs and maps can be written as rows")
    )]
    NotARecord,

    #[error("JSON conversion failed: {0}")]
    #[diagnostic(code(litequery::json))]
    JsonError(#[from] serde_json::Error),

    #[error("Database connection lock poisoned")]
    #[diagnostic(code(litequery::poison))]
    PoisonError,

    #[error("Database task failed: {0}")]
    #[diagnostic(code(litequery::task))]
    TaskError(#[from] tokio::task::JoinError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

/// Result type alias for litequery operations.
pub type Result<T> = std::result::Result<T, DbError>;
