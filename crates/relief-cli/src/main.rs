//! `relief`: mesh raster elevation grids into GPU-ready buffers.
//!
//! Surfaces are configured in `relief.ron`; flags override the loaded values.
//! Run with `relief --surface albano` to mesh one surface, or `relief --all`
//! to mesh every configured surface on the worker pool.

mod build;
mod dump;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use relief_config::{CliArgs, Config, ConfigError, SurfaceConfig};
use tracing::{error, info};

use crate::report::SurfaceReport;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let Some(config_dir) = args
        .config
        .clone()
        .or_else(|| dirs::config_dir().map(|dir| dir.join("relief")))
    else {
        eprintln!("Could not resolve a config directory, pass --config");
        return ExitCode::FAILURE;
    };

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    if let Some(log_file) =
        relief_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config))
    {
        info!("Writing JSON log to {}", log_file.display());
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {e}");
        return ExitCode::FAILURE;
    }

    let data_dir = args
        .data_dir
        .clone()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));
    let config = config.resolve(&data_dir);

    let surfaces = match select_surfaces(&config, args.all) {
        Ok(surfaces) => surfaces,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let results = build::build_surfaces(&surfaces, config.meshing.workers, config.meshing.budget);

    let mut failed = 0;
    for result in results {
        let surface = match result.surface {
            Ok(surface) => surface,
            Err(e) => {
                error!(surface = %result.name, "Failed to build surface: {e}");
                failed += 1;
                continue;
            }
        };

        let report = SurfaceReport::new(&result.name, &surface, config.camera.speed_divisor);
        println!("{report}");

        if let Some(dir) = &args.dump {
            match dump::dump_mesh(dir, &result.name, surface.mesh()) {
                Ok(files) => info!(
                    surface = %result.name,
                    "Wrote {} and {}",
                    files.vertices.display(),
                    files.indices.display()
                ),
                Err(e) => {
                    error!(surface = %result.name, "Failed to write buffers: {e}");
                    failed += 1;
                }
            }
        }
    }

    if failed > 0 {
        error!("{failed} surface(s) failed");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Surfaces to build: all of them, or just the active one.
fn select_surfaces(config: &Config, all: bool) -> Result<Vec<&SurfaceConfig>, ConfigError> {
    if all {
        Ok(config.surfaces.iter().collect())
    } else {
        config.active().map(|surface| vec![surface])
    }
}
