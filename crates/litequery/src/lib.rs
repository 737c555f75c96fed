//! A small fluent query builder and execution shim over SQLite.
//!
//! A [`Table`] holds clause state (columns, joins, sort, limit) and one
//! connection. Its `select`/`insert`/`update`/`delete` methods render SQL with
//! `?` placeholders, bind values positionally, run the statement on the
//! blocking pool and, for reads, decode JSON text columns back into structured
//! values.

pub mod codec;
pub mod connection;
pub mod error;
pub mod executor;
pub mod macros;
pub mod query;
pub mod row;
pub mod table;

pub use error::{DbError, Result};
pub use executor::{Completion, Outcome};
pub use litequery_config as config;
pub use query::{JoinKind, QueryState, Statement};
pub use row::{RawRow, Record, Row};
pub use rusqlite::types::Value;
pub use table::Table;

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use serde_json::json;
    use serial_test::serial;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Package {
        id: i64,
        name: String,
        version: String,
        downloads: u64,
        description: Option<String>,
        maintainers: Option<Vec<String>>,
    }

    fn record(value: serde_json::Value) -> Record {
        match value {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    async fn setup_db() -> Table {
        let table = Table::in_memory("packages").unwrap();
        table
            .query(
                "CREATE TABLE packages (
                    id INTEGER PRIMARY KEY,
                    name TEXT NOT NULL,
                    version TEXT NOT NULL,
                    downloads INTEGER NOT NULL DEFAULT 0,
                    maintainers TEXT,
                    description TEXT,
                    extra TEXT
                )",
                args![],
            )
            .await
            .unwrap();
        table
    }

    #[tokio::test]
    async fn test_insert() {
        let db = setup_db().await;

        let done = db
            .insert(&record(json!({
                "name": "soar",
                "version": "1.0.0",
                "downloads": 100000,
                "description": "Test description",
                "maintainers": ["John Doe", "Jane Smith"]
            })))
            .await
            .unwrap();

        assert_eq!(done.rows_affected, 1);
        assert!(done.last_insert_id > 0);

        let pkgs: Vec<Package> = db
            .select_as("id = ?", args![done.last_insert_id])
            .await
            .unwrap();

        assert_eq!(pkgs.len(), 1);
        let pkg = &pkgs[0];
        assert_eq!(pkg.name, "soar");
        assert_eq!(pkg.version, "1.0.0");
        assert_eq!(pkg.downloads, 100000);
        assert_eq!(pkg.description, Some("Test description".into()));
        assert_eq!(
            pkg.maintainers,
            Some(vec!["John Doe".to_string(), "Jane Smith".to_string()])
        );
    }

    #[tokio::test]
    async fn test_structured_value_round_trip() {
        let db = setup_db().await;
        db.insert(&record(json!({"name": "zls", "version": "0.15.1", "extra": {"x": 1}})))
            .await
            .unwrap();

        let rows = db.select("", args![]).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("extra"), Some(&json!({"x": 1})));
        assert_eq!(rows[0].get("maintainers"), Some(&serde_json::Value::Null));
    }

    #[tokio::test]
    async fn test_select_with_like() {
        let mut db = setup_db().await;

        db.insert(&record(json!({
            "name": "zls",
            "version": "0.15.1",
            "description": "Zig Language Server"
        })))
        .await
        .unwrap();

        db.insert(&record(json!({
            "name": "rust-analyzer",
            "version": "1.92.0-nightly",
            "description": "Rusty Language Server"
        })))
        .await
        .unwrap();

        db.set_columns(["name"]);
        let pkgs = db
            .select("WHERE name LIKE ?", args!["%rust%".to_string()])
            .await
            .unwrap();

        assert_eq!(pkgs.len(), 1);
        assert_eq!(pkgs[0].get("name"), Some(&json!("rust-analyzer")));
        assert_eq!(pkgs[0].len(), 1);
    }

    #[tokio::test]
    async fn test_join_sort_limit() {
        let mut db = setup_db().await;
        db.query(
            "CREATE TABLE releases (package_id INTEGER, channel TEXT)",
            args![],
        )
        .await
        .unwrap();

        for name in ["alpha", "beta", "gamma"] {
            let done = db
                .insert(&record(json!({"name": name, "version": "1"})))
                .await
                .unwrap();
            db.query(
                "INSERT INTO releases (package_id, channel) VALUES(?, ?)",
                args![done.last_insert_id, format!("{name}-stable")],
            )
            .await
            .unwrap();
        }

        db.set_columns(["packages.name", "releases.channel"])
            .add_join("inner", "releases", "packages.id", "releases.package_id")
            .add_sort("packages.name DESC")
            .set_limit(Some(2));

        let rows = db.select("packages.id > ?", args![0]).await.unwrap();
        let names: Vec<_> = rows.iter().filter_map(|r| r.get("name")).collect();
        assert_eq!(names, [&json!("gamma"), &json!("beta")]);
        assert_eq!(rows[0].get("channel"), Some(&json!("gamma-stable")));
    }

    #[tokio::test]
    async fn test_instance_reuse_reflects_new_columns() {
        let mut db = setup_db().await;
        db.insert(&record(json!({"name": "soar", "version": "1.0.0"})))
            .await
            .unwrap();

        db.set_columns(["name"]);
        let rows = db.select("", args![]).await.unwrap();
        assert_eq!(rows[0].columns().collect::<Vec<_>>(), ["name"]);

        db.set_columns(["version", "downloads"]);
        let rows = db.select("", args![]).await.unwrap();
        assert_eq!(
            rows[0].columns().collect::<Vec<_>>(),
            ["version", "downloads"]
        );
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let db = setup_db().await;
        let id = db
            .insert(&record(json!({"name": "soar", "version": "1.0.0"})))
            .await
            .unwrap()
            .last_insert_id;

        let done = db
            .update(
                &record(json!({"version": "2.0.0", "maintainers": ["QaidVoid"]})),
                "WHERE id = ?",
                args![id],
            )
            .await
            .unwrap();
        assert_eq!(done.rows_affected, 1);

        let rows = db.select("id = ?", args![id]).await.unwrap();
        assert_eq!(rows[0].get("version"), Some(&json!("2.0.0")));
        assert_eq!(rows[0].get("maintainers"), Some(&json!(["QaidVoid"])));

        let done = db.delete("id = ?", args![id]).await.unwrap();
        assert_eq!(done.rows_affected, 1);
        assert!(db.select("", args![]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_from_struct() {
        #[derive(Serialize)]
        struct VersionBump<'a> {
            version: &'a str,
            downloads: u64,
        }

        let db = setup_db().await;
        db.insert(&record(json!({"name": "soar", "version": "1.0.0"})))
            .await
            .unwrap();

        db.update_from(
            &VersionBump {
                version: "1.1.0",
                downloads: 7,
            },
            "name = ?",
            args!["soar".to_string()],
        )
        .await
        .unwrap();

        let rows = db.select("", args![]).await.unwrap();
        assert_eq!(rows[0].get("version"), Some(&json!("1.1.0")));
        assert_eq!(rows[0].get("downloads"), Some(&json!(7)));
    }

    #[tokio::test]
    async fn test_insert_from_struct() {
        let db = setup_db().await;
        let pkg = Package {
            id: 42,
            name: "soar".into(),
            version: "0.9.0".into(),
            downloads: 3,
            description: None,
            maintainers: Some(vec!["a".into()]),
        };

        db.insert_from(&pkg).await.unwrap();
        let pkgs: Vec<Package> = db.select_as("", args![]).await.unwrap();
        assert_eq!(pkgs, vec![pkg]);
    }

    #[tokio::test]
    async fn test_numeric_text_decodes_as_number() {
        let db = setup_db().await;
        db.insert(&record(json!({"name": "soar", "version": "42"})))
            .await
            .unwrap();

        let rows = db.select("", args![]).await.unwrap();
        assert_eq!(rows[0].get("version"), Some(&json!(42)));
    }

    #[tokio::test]
    async fn test_zero_row_writes_succeed() {
        let db = setup_db().await;

        let done = db
            .update(&record(json!({"version": "9"})), "id = ?", args![999])
            .await
            .unwrap();
        assert_eq!(done.rows_affected, 0);

        let done = db.delete("id = ?", args![999]).await.unwrap();
        assert_eq!(done.rows_affected, 0);
    }

    #[tokio::test]
    async fn test_missing_table_is_an_error() {
        let mut db = setup_db().await;
        db.set_table("nope");

        let result = db.select("", args![]).await;
        assert!(matches!(result, Err(DbError::QueryError(_))));
    }

    #[tokio::test]
    async fn test_constraint_violation_is_an_error() {
        let db = setup_db().await;
        let result = db.insert(&record(json!({"name": "soar"}))).await;
        assert!(matches!(result, Err(DbError::QueryError(_))));
    }

    #[tokio::test]
    async fn test_empty_insert_rejected() {
        let db = setup_db().await;
        let result = db.insert(&Record::new()).await;
        assert!(matches!(result, Err(DbError::EmptyRecord("insert"))));
    }

    #[tokio::test]
    async fn test_operations_after_close_fail() {
        let db = setup_db().await;
        db.close().await.unwrap();
        assert!(db.is_closed());

        let result = db.select("", args![]).await;
        assert!(matches!(result, Err(DbError::ConnectionClosed)));

        let result = db.insert(&record(json!({"name": "x", "version": "1"}))).await;
        assert!(matches!(result, Err(DbError::ConnectionClosed)));
    }

    #[tokio::test]
    async fn test_file_database_shared_between_handles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.db");

        let writer = Table::open(&path, "notes").unwrap();
        writer
            .query("CREATE TABLE notes (body TEXT)", args![])
            .await
            .unwrap();
        writer
            .insert(&record(json!({"body": {"text": "hi"}})))
            .await
            .unwrap();
        writer.close().await.unwrap();

        let reader = Table::open(&path, "notes").unwrap();
        let rows = reader.select("", args![]).await.unwrap();
        assert_eq!(rows[0].get("body"), Some(&json!({"text": "hi"})));
    }

    #[tokio::test]
    #[serial]
    async fn test_default_path_read_at_construction() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.db");
        let second = dir.path().join("second.db");
        let previous = config::get_config();

        config::set_database(&first);
        let table = Table::new("t").unwrap();
        config::set_database(&second);

        table
            .query("CREATE TABLE t (v TEXT)", args![])
            .await
            .unwrap();
        table
            .insert(&record(json!({"v": "kept"})))
            .await
            .unwrap();

        config::set_config(previous);

        assert!(first.exists());
        assert!(!second.exists());
    }

    #[tokio::test]
    #[serial]
    async fn test_set_database_overrides_env_path() {
        let dir = tempfile::tempdir().unwrap();
        let env_db = dir.path().join("env.db");
        let chosen_db = dir.path().join("chosen.db");
        let previous = config::get_config();
        let previous_env = std::env::var(config::DB_PATH_ENV).ok();

        std::env::set_var(config::DB_PATH_ENV, &env_db);
        config::init().unwrap();
        config::set_database(&chosen_db);
        let table = Table::new("t");

        match previous_env {
            Some(value) => std::env::set_var(config::DB_PATH_ENV, value),
            None => std::env::remove_var(config::DB_PATH_ENV),
        }
        config::set_config(previous);

        let table = table.unwrap();
        table
            .query("CREATE TABLE t (v TEXT)", args![])
            .await
            .unwrap();

        assert!(chosen_db.exists());
        assert!(!env_db.exists());
    }
}
