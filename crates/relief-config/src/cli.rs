//! Command-line argument parsing for the `relief` tool.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Mesh raster elevation grids into GPU-ready vertex and index buffers.
///
/// CLI values override settings loaded from `relief.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "relief", about = "Raster grid to surface mesh converter")]
pub struct CliArgs {
    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory that relative surface paths are resolved against.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Surface to build (overrides `active_surface`).
    #[arg(long, conflicts_with = "all")]
    pub surface: Option<String>,

    /// Build every configured surface.
    #[arg(long)]
    pub all: bool,

    /// Worker threads (0 = one per CPU).
    #[arg(long)]
    pub workers: Option<usize>,

    /// Camera speed divisor used for the reported camera speed.
    #[arg(long)]
    pub speed_divisor: Option<f32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Write `<name>.vertices.bin` and `<name>.indices.bin` into this directory.
    #[arg(long)]
    pub dump: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref name) = args.surface {
            self.active_surface = name.clone();
        }
        if let Some(workers) = args.workers {
            self.meshing.workers = workers;
        }
        if let Some(divisor) = args.speed_divisor {
            self.camera.speed_divisor = divisor;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
