use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("TOML deserialization error: {0}")]
    #[diagnostic(
        code(litequery_config::toml_deserialize),
        help("Check your litequery.toml syntax and structure")
    )]
    TomlDeError(#[from] toml::de::Error),

    #[error("Database path cannot be empty")]
    #[diagnostic(
        code(litequery_config::empty_db_path),
        help("Set db_path to a file path or remove it to use the default")
    )]
    EmptyDatabasePath,

    #[error("Busy timeout must be greater than zero")]
    #[diagnostic(
        code(litequery_config::busy_timeout),
        help("Set busy_timeout in milliseconds, or remove it to use the default")
    )]
    InvalidBusyTimeout,

    #[error("IO error: {0}")]
    #[diagnostic(code(litequery_config::io))]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
