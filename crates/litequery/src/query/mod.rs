//! The statement builder.
//!
//! Turns a [`QueryState`] plus per-call inputs (a raw WHERE fragment, a
//! [`Record`](crate::Record), bound arguments) into a [`Statement`]: SQL text and
//! its positional parameters. Everything here is pure; nothing touches the
//! database.
//!
//! # Overview
//!
//! - [`build_select`]: `SELECT` with projection, joins, filter, ordering and limit.
//! - [`build_insert`]: `INSERT INTO` with one placeholder per record entry.
//! - [`build_update`]: `UPDATE .. SET` with SET parameters ahead of WHERE arguments.
//! - [`build_delete`]: `DELETE FROM` with an optional filter.
//!
//! WHERE fragments are trusted caller text. A leading `WHERE` keyword is
//! optional and stripped; only values go through parameter binding.
//!
//! # Example
//!
//! ```
//! use litequery::query::{build_select, QueryState};
//! use litequery::Value;
//!
//! let mut state = QueryState::new("users");
//! state.set_columns(["id", "username"]);
//! state.add_sort("created_at DESC");
//! state.set_limit(Some(10));
//!
//! let stmt = build_select(&state, "WHERE active = ?", vec![Value::Integer(1)]);
//! assert_eq!(
//!     stmt.sql,
//!     "SELECT id, username FROM users WHERE active = ? ORDER BY created_at DESC LIMIT 10"
//! );
//! ```

pub mod clause;
pub mod delete;
pub mod insert;
pub mod select;
pub mod state;
pub mod update;

pub use clause::{placeholders, strip_where, Statement};
pub use delete::build_delete;
pub use insert::build_insert;
pub use select::build_select;
pub use state::{JoinKind, QueryState};
pub use update::build_update;
