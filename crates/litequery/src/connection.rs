//! Database connection setup.
//!
//! Every table handle owns exactly one SQLite connection. File databases are
//! opened with the busy timeout and journal mode from [`Config`].

use std::path::Path;

use litequery_config::Config;
use rusqlite::Connection;
use tracing::debug;

use crate::error::{DbError, Result};

/// Opens a file database and applies the connection options.
///
/// # Errors
///
/// Returns [`DbError::ConnectionError`] if the file cannot be opened or the
/// pragmas cannot be applied.
pub fn open<P: AsRef<Path>>(path: P, config: &Config) -> Result<Connection> {
    let path = path.as_ref();
    let connection_error = |source| DbError::ConnectionError {
        path: path.display().to_string(),
        source,
    };

    let conn = Connection::open(path).map_err(connection_error)?;
    conn.busy_timeout(config.get_busy_timeout())
        .map_err(connection_error)?;

    // WAL mode for better concurrent access
    if config.use_wal() {
        let _: String = conn
            .query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))
            .map_err(connection_error)?;
    }

    debug!("opened database at {}", path.display());
    Ok(conn)
}

/// Opens a private in-memory database.
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(|source| DbError::ConnectionError {
        path: ":memory:".to_string(),
        source,
    })
}
