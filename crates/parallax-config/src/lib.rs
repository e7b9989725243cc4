//! `config.ron` handling for the starfield tools.
//!
//! [`Config`] bundles the [`StarfieldConfig`](parallax_starfield::StarfieldConfig)
//! with the demo walk and logging options. Every section is `#[serde(default)]`,
//! so a file may list only what it changes. [`CliArgs`] flags override the file.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{CONFIG_FILE, Config, DebugConfig, DemoConfig};
pub use error::ConfigError;
