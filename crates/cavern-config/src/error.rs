//! Configuration error types.

use cavern_map::MapError;

/// Errors raised while loading, saving, or checking configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read config: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to write the config file to disk.
    #[error("failed to write config: {0}")]
    WriteError(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse config: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// Failed to serialize config to RON.
    #[error("failed to serialize config: {0}")]
    SerializeError(#[source] ron::Error),

    /// Generation parameters were rejected.
    #[error("invalid generation settings: {0}")]
    Generation(#[from] MapError),

    /// A mesh setting was out of range.
    #[error("invalid mesh setting `{field}`: {reason}")]
    InvalidMesh {
        field: &'static str,
        reason: &'static str,
    },
}
