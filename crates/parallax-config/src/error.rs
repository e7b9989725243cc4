//! Configuration error types.

use std::path::PathBuf;

use parallax_starfield::StarfieldError;

/// Errors from reading, writing or checking `config.ron`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[source] ron::Error),

    /// A layer in the file can never be built.
    #[error("invalid starfield settings: {0}")]
    Starfield(#[from] StarfieldError),

    #[error("no config directory available on this platform")]
    NoConfigDir,
}
