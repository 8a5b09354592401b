//! Error types for jumpmark

use thiserror::Error;

/// Result type alias for jumpmark operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// An apply operation ran before the first `refresh_config`
    #[error("Overlay manager has no style configuration yet")]
    NotConfigured,

    #[error("{0}")]
    Message(String),
}
