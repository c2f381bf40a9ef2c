//! Configuration loading errors.

use thiserror::Error;

/// Error loading or parsing a configuration file.
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("Failed to read config file: {0}")]
    Io(String),

    #[error("Failed to parse config YAML: {0}")]
    Parse(String),
}
