use parallax_config::ConfigError;
use parallax_starfield::StarfieldError;

/// Errors that stop the demo host.
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid starfield: {0}")]
    Starfield(#[from] StarfieldError),

    #[error("failed to write snapshot: {0}")]
    Io(#[from] std::io::Error),
}
