//! Statement dispatch.
//!
//! The executor is the only part of the crate that performs I/O. SQLite calls
//! are blocking, so each statement runs on the blocking pool through
//! [`tokio::task::spawn_blocking`] and the caller awaits its single result.

use std::sync::{Arc, Mutex, PoisonError};

use rusqlite::{params_from_iter, types::Value, Connection};
use tracing::debug;

use crate::{
    error::{DbError, Result},
    query::Statement,
    row::RawRow,
};

/// Acknowledgement of a successful write. Carries no row data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Completion {
    /// Rows changed by the statement. Zero is still a success.
    pub rows_affected: usize,
    /// Rowid of the most recent successful INSERT on this connection.
    pub last_insert_id: i64,
}

/// Result of running a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Rows(Vec<RawRow>),
    Done(Completion),
}

impl Outcome {
    /// The rows of a read, or `None` for a write.
    pub fn into_rows(self) -> Option<Vec<RawRow>> {
        match self {
            Outcome::Rows(rows) => Some(rows),
            Outcome::Done(_) => None,
        }
    }

    /// The acknowledgement of a write, or `None` for a read.
    pub fn into_completion(self) -> Option<Completion> {
        match self {
            Outcome::Rows(_) => None,
            Outcome::Done(completion) => Some(completion),
        }
    }
}

/// Returns true when the statement starts with the `SELECT` keyword.
pub fn is_read(sql: &str) -> bool {
    sql.trim_start()
        .get(..6)
        .is_some_and(|head| head.eq_ignore_ascii_case("select"))
}

/// Runs statements against one connection.
#[derive(Clone)]
pub struct Executor {
    conn: Arc<Mutex<Option<Connection>>>,
}

impl Executor {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(Some(conn))),
        }
    }

    /// Runs one statement exactly once.
    ///
    /// Reads resolve with the produced rows, writes with a [`Completion`].
    /// Store failures come back unchanged as [`DbError::QueryError`].
    pub async fn run(&self, statement: Statement) -> Result<Outcome> {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn.lock().map_err(|_| DbError::PoisonError)?;
            let conn = guard.as_mut().ok_or(DbError::ConnectionClosed)?;
            dispatch(conn, &statement)
        })
        .await?
    }

    /// Closes the connection. Later runs fail with [`DbError::ConnectionClosed`].
    ///
    /// Waiting for an in-flight statement to release the connection happens
    /// on the blocking pool, like [`Executor::run`]. Closing an already closed
    /// executor is a no-op.
    pub async fn close(&self) -> Result<()> {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn.lock().map_err(|_| DbError::PoisonError)?;
            let Some(conn) = guard.take() else {
                return Ok(());
            };

            match conn.close() {
                Ok(()) => {
                    debug!("closed database connection");
                    Ok(())
                }
                Err((conn, err)) => {
                    *guard = Some(conn);
                    Err(err.into())
                }
            }
        })
        .await?
    }

    pub fn is_closed(&self) -> bool {
        self.conn
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }
}

fn dispatch(conn: &mut Connection, statement: &Statement) -> Result<Outcome> {
    let params = params_from_iter(statement.params.iter());

    if is_read(&statement.sql) {
        debug!(
            sql = %statement.sql,
            params = statement.params.len(),
            "running read statement"
        );

        let mut stmt = conn.prepare(&statement.sql)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        let mut rows = stmt.query(params)?;
        let mut result = Vec::new();
        while let Some(row) = rows.next()? {
            let values = (0..columns.len())
                .map(|idx| row.get::<_, Value>(idx))
                .collect::<rusqlite::Result<Vec<_>>>()?;
            result.push(RawRow::new(columns.clone(), values));
        }

        Ok(Outcome::Rows(result))
    } else {
        debug!(
            sql = %statement.sql,
            params = statement.params.len(),
            "running write statement"
        );

        let mut stmt = conn.prepare(&statement.sql)?;
        let rows_affected = stmt.execute(params)?;
        stmt.finalize()?;

        Ok(Outcome::Done(Completion {
            rows_affected,
            last_insert_id: conn.last_insert_rowid(),
        }))
    }
}
