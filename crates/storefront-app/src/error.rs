//! # Application Errors
//!
//! Loading configuration and booting the engine are the only fallible steps.
//! After boot, the configuration is read-only and lookups cannot fail.

use std::path::PathBuf;

/// Boxed error returned by initializer closures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while reading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid configuration in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Errors raised while booting the [`Engine`](crate::engine::Engine).
#[derive(Debug, thiserror::Error)]
pub enum BootError {
    #[error("Initializer registered twice: {0}")]
    DuplicateInitializer(String),
    #[error("Initializer {name} failed: {source}")]
    Initializer { name: String, source: BoxError },
    #[error("Invalid parameter filter: {0}")]
    InvalidFilter(#[from] regex::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
