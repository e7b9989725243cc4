//! Demo host that walks a viewer across the starfield and writes an SVG
//! snapshot of the last frame.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p parallax-demo -- --seed glap --steps 200`.

mod error;
mod svg;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use glam::DVec2;
use parallax_config::{CliArgs, Config, ConfigError};
use parallax_starfield::StarfieldSystem;
use tracing::info;

use crate::error::DemoError;
use crate::svg::SvgRenderer;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("parallax-demo: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), DemoError> {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = match args.config.clone() {
        Some(dir) => dir,
        None => Config::default_dir()?,
    };

    // Load or create config, then apply CLI overrides
    let (mut config, load_error) = load_config(&config_dir);
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    parallax_log::init_logging(
        config.debug.log_to_file.then_some(log_dir.as_path()),
        cfg!(debug_assertions),
        Some(&config),
    );
    if let Some(error) = load_error {
        tracing::warn!(
            config_dir = %config_dir.display(),
            "{error}; using default settings"
        );
    }

    let mut system = StarfieldSystem::new(config.starfield.clone())?;
    let demo = &config.demo;
    let mut renderer = SvgRenderer::new(DVec2::new(demo.view_width, demo.view_height));

    let mut viewer = demo.start;
    let mut changes = 0u32;
    for step in 0..demo.steps {
        viewer = demo.start + demo.velocity * f64::from(step);
        if system.update_position(viewer.x, viewer.y) {
            changes += 1;
            let diff = renderer.sync(&system);
            tracing::debug!(
                step,
                x = viewer.x,
                y = viewer.y,
                added = diff.added.len(),
                removed = diff.removed.len(),
                "resident chunks changed"
            );
        }
    }

    for layer in system.layers() {
        let stats = layer.stats();
        info!(
            layer = layer.name(),
            resident = layer.len(),
            capacity = layer.capacity(),
            hits = stats.hits,
            generated = stats.generated,
            evicted = stats.evicted,
            "layer summary"
        );
    }

    let mut out = BufWriter::new(File::create(&demo.output)?);
    let frame = renderer.write_frame(&system, viewer, &mut out)?;
    out.flush()?;

    info!(
        steps = demo.steps,
        changes,
        chunks = frame.chunks,
        objects = frame.objects,
        "wrote {}",
        demo.output.display()
    );
    Ok(())
}

/// The config in `config_dir`, or the defaults together with the reason the
/// file was rejected. The error is reported once logging is up.
fn load_config(config_dir: &Path) -> (Config, Option<ConfigError>) {
    match Config::load_or_create(config_dir) {
        Ok(config) => (config, None),
        Err(error) => (Config::default(), Some(error)),
    }
}
