//! The `exoviz` binary.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI
//! flags. The body to show comes from `--params <record.json>` and/or the
//! individual body flags.

use std::process::ExitCode;

use clap::Parser;
use exoviz_app::platform::PlatformDirs;
use exoviz_app::{params_from_args, run, variants_for};
use exoviz_config::{CliArgs, Config, TEXTURE_SOURCE_URL};
use exoviz_params::{InfoOverlay, color_legend, map_to_visual_attributes};
use exoviz_scene::Variant;
use tracing::{error, info, warn};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let dirs = match &args.config {
        Some(root) => Some(PlatformDirs::with_config_root(root)),
        None => PlatformDirs::resolve().ok(),
    };

    // Load or create config, then apply CLI overrides
    let mut config = match dirs.as_ref().map(|dirs| Config::load_or_create(&dirs.config_dir)) {
        Some(Ok(config)) => config,
        Some(Err(e)) => {
            eprintln!("Failed to load config: {e}, using defaults");
            Config::default()
        }
        None => Config::default(),
    };
    config.apply_cli_overrides(&args);

    let log_dir = dirs.as_ref().and_then(|dirs| match dirs.create_dirs() {
        Ok(()) => Some(dirs.log_dir.clone()),
        Err(e) => {
            eprintln!("Failed to create log directory: {e}");
            None
        }
    });
    exoviz_log::init_logging(log_dir.as_deref(), cfg!(debug_assertions), Some(&config));
    if dirs.is_none() {
        warn!("No OS config directory; running with default config");
    }

    let params = match params_from_args(&args) {
        Ok(params) => params,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let attrs = map_to_visual_attributes(&params);
    for line in InfoOverlay::new(&params, &attrs).lines() {
        info!("{line}");
    }
    for entry in color_legend() {
        info!("Legend: {} {}", entry.color, entry.text);
    }

    let variants = variants_for(config.viewer.variant);
    if variants.contains(&Variant::DwarfPlanet) {
        for path in config.assets.missing() {
            warn!(
                "Texture map {} not found; download it from {TEXTURE_SOURCE_URL}",
                path.display()
            );
        }
    }
    match run(config, params, variants) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
