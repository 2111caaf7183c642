//! Command-line argument parsing for the exoviz binary.

use std::path::PathBuf;

use clap::Parser;

use crate::{Config, VariantChoice};

/// exoviz command-line arguments.
///
/// Display settings override values loaded from `config.ron`. The body
/// parameter flags describe the record to visualize and are not persisted.
#[derive(Parser, Debug, Default)]
#[command(name = "exoviz", about = "Interactive celestial-body visualizer")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Renderer configuration to open.
    #[arg(long, value_enum)]
    pub variant: Option<VariantChoice>,

    /// Surface color texture for the textured variant.
    #[arg(long)]
    pub surface_map: Option<PathBuf>,

    /// Bump texture for the textured variant.
    #[arg(long)]
    pub bump_map: Option<PathBuf>,

    /// Seed for starfield placement.
    #[arg(long)]
    pub star_seed: Option<u64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// JSON file holding one body parameter record.
    #[arg(long)]
    pub params: Option<PathBuf>,

    /// Display name of the body.
    #[arg(long)]
    pub name: Option<String>,

    /// Radius in Earth radii.
    #[arg(long)]
    pub radius: Option<f64>,

    /// Equilibrium temperature in Kelvin.
    #[arg(long)]
    pub temperature: Option<f64>,

    /// Insolation flux in Earth-flux units.
    #[arg(long)]
    pub insolation: Option<f64>,

    /// Host star effective temperature in Kelvin.
    #[arg(long)]
    pub stellar_temperature: Option<f64>,

    /// Orbital period in days.
    #[arg(long)]
    pub period: Option<f64>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(variant) = args.variant {
            self.viewer.variant = variant;
        }
        if let Some(ref path) = args.surface_map {
            self.assets.surface_map = path.clone();
        }
        if let Some(ref path) = args.bump_map {
            self.assets.bump_map = path.clone();
        }
        if let Some(seed) = args.star_seed {
            self.render.star_seed = seed;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
