pub mod config;
pub mod error;

pub use config::{
    database_path, get_config, init, set_config, set_database, Config, DB_PATH_ENV,
};
pub use error::ConfigError;

#[cfg(test)]
pub mod test_utils;
