use std::{
    fs,
    path::PathBuf,
    sync::{LazyLock, PoisonError, RwLock},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{ConfigError, Result};

/// Environment variable that seeds the database path when the configuration
/// is loaded.
pub const DB_PATH_ENV: &str = "LITEQUERY_DB";

/// File name used for the database when no path is configured.
pub const DEFAULT_DB_FILE: &str = "database.sqlite";

/// Busy timeout applied to new connections when none is configured.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

/// Connection configuration shared by every table handle.
///
/// Handles read this once when they are constructed. Changing the global
/// configuration afterwards only affects handles constructed later.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Path to the SQLite database file.
    /// Default: $PWD/database.sqlite
    pub db_path: Option<String>,

    /// How long a connection waits on a locked database, in milliseconds.
    /// Default: 5000
    pub busy_timeout: Option<u64>,

    /// If true, file databases are switched to WAL journal mode on open.
    /// Default: true
    pub wal: Option<bool>,
}

pub static CONFIG: LazyLock<RwLock<Option<Config>>> = LazyLock::new(|| RwLock::new(None));

pub static CONFIG_PATH: LazyLock<RwLock<PathBuf>> = LazyLock::new(|| {
    RwLock::new(match std::env::var("LITEQUERY_CONFIG") {
        Ok(path_str) => PathBuf::from(path_str),
        Err(_) => PathBuf::from("litequery.toml"),
    })
});

/// Loads the configuration file and installs it as the global configuration.
pub fn init() -> Result<()> {
    let config = Config::new()?;
    let mut global_config = CONFIG.write().unwrap_or_else(PoisonError::into_inner);
    *global_config = Some(config);
    Ok(())
}

fn ensure_config_initialized() {
    let mut config_guard = CONFIG.write().unwrap_or_else(PoisonError::into_inner);
    if config_guard.is_none() {
        let config = Config::new().unwrap_or_else(|err| {
            warn!("Falling back to default configuration: {err}");
            Config::default_config()
        });
        *config_guard = Some(config);
    }
}

/// Returns a snapshot of the global configuration, loading it on first use.
pub fn get_config() -> Config {
    {
        let config_guard = CONFIG.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(config) = config_guard.as_ref() {
            return config.clone();
        }
    }

    ensure_config_initialized();

    CONFIG
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
        .unwrap_or_default()
}

/// Sets the default database path used by handles constructed from now on.
pub fn set_database<P: Into<PathBuf>>(path: P) {
    ensure_config_initialized();

    let path: PathBuf = path.into();
    let mut config_guard = CONFIG.write().unwrap_or_else(PoisonError::into_inner);
    if let Some(config) = config_guard.as_mut() {
        config.db_path = Some(path.to_string_lossy().into_owned());
    }
}

/// Returns the database path a newly constructed handle would open.
pub fn database_path() -> PathBuf {
    get_config().get_db_path()
}

/// Replaces the global configuration, mostly useful for embedding and tests.
pub fn set_config(config: Config) {
    let mut config_guard = CONFIG.write().unwrap_or_else(PoisonError::into_inner);
    *config_guard = Some(config);
}

impl Config {
    pub fn default_config() -> Self {
        Self {
            db_path: None,
            busy_timeout: Some(DEFAULT_BUSY_TIMEOUT_MS),
            wal: Some(true),
        }
    }

    /// Creates a new configuration by loading it from the configuration file.
    /// If the configuration file is not found, it uses the default configuration.
    pub fn new() -> Result<Self> {
        let config_path = CONFIG_PATH
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .to_path_buf();

        let mut config = match fs::read_to_string(&config_path) {
            Ok(content) => {
                info!("Loaded configuration from {}", config_path.display());
                toml::from_str(&content)?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default_config(),
            Err(err) => return Err(ConfigError::IoError(err)),
        };

        config.resolve()?;

        Ok(config)
    }

    /// Applies the `LITEQUERY_DB` override, validates and fills in defaults.
    ///
    /// The override is read here only, so a later [`set_database`] wins over it.
    pub fn resolve(&mut self) -> Result<()> {
        if let Ok(env_path) = std::env::var(DB_PATH_ENV) {
            self.db_path = Some(env_path);
        }

        if self.db_path.as_deref().is_some_and(|path| path.trim().is_empty()) {
            return Err(ConfigError::EmptyDatabasePath);
        }

        if self.busy_timeout == Some(0) {
            return Err(ConfigError::InvalidBusyTimeout);
        }

        if self.busy_timeout.is_none() {
            self.busy_timeout = Some(DEFAULT_BUSY_TIMEOUT_MS);
        }

        if self.wal.is_none() {
            self.wal = Some(true);
        }

        Ok(())
    }

    pub fn get_db_path(&self) -> PathBuf {
        if let Some(db_path) = &self.db_path {
            return PathBuf::from(db_path);
        }
        std::env::current_dir()
            .map(|dir| dir.join(DEFAULT_DB_FILE))
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DB_FILE))
    }

    pub fn get_busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout.unwrap_or(DEFAULT_BUSY_TIMEOUT_MS))
    }

    pub fn use_wal(&self) -> bool {
        self.wal.unwrap_or(true)
    }
}
