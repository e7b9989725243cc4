//! Command-line flags for the demo host.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Flags given on the command line win over `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "parallax-starfield", about = "Parallax starfield streaming demo")]
pub struct CliArgs {
    /// Base seed shared by every layer.
    #[arg(long)]
    pub seed: Option<String>,

    /// How many position updates the walk performs.
    #[arg(long)]
    pub steps: Option<u32>,

    /// SVG file the last frame is written to.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// `EnvFilter` directives, e.g. `debug` or `info,parallax_starfield=trace`.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Also write JSON logs under `<config dir>/logs` (debug builds).
    #[arg(long)]
    pub log_to_file: bool,

    /// Directory holding `config.ron`, instead of the platform default.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Overwrite the fields `args` sets; everything else keeps its file value.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = &args.seed {
            self.starfield.seed.clone_from(seed);
        }
        if let Some(steps) = args.steps {
            self.demo.steps = steps;
        }
        if let Some(output) = &args.output {
            self.demo.output.clone_from(output);
        }
        if let Some(level) = &args.log_level {
            self.debug.log_level.clone_from(level);
        }
        self.debug.log_to_file |= args.log_to_file;
    }
}
