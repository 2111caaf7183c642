//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level visualizer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window settings.
    pub window: WindowConfig,
    /// Rendering settings.
    pub render: RenderConfig,
    /// Pointer and touch interaction settings.
    pub interaction: InteractionConfig,
    /// Texture asset locations.
    pub assets: AssetConfig,
    /// Which renderer configuration to open.
    pub viewer: ViewerConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    /// Enable vsync (PresentMode::Fifo).
    pub vsync: bool,
    /// Request a transparent window so the clear color shows the desktop.
    pub transparent: bool,
    /// Prefix of every window title. Left out when blank.
    pub title: String,
}

/// Rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Width and height segment count of the body sphere.
    pub sphere_segments: u32,
    /// Number of backdrop stars for variants that draw a starfield.
    pub star_count: u32,
    /// Seed for star placement.
    pub star_seed: u64,
}

/// Pointer and touch interaction configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InteractionConfig {
    /// Delay after a drag ends before auto-rotation resumes, in milliseconds.
    pub resume_delay_ms: u64,
}

/// Where the default dwarf-planet maps are published.
pub const TEXTURE_SOURCE_URL: &str =
    "https://github.com/jeromeetienne/threex.planets/tree/master/images";

/// Texture asset configuration for the textured variant.
///
/// The maps are not bundled. Download `plutomap1k.jpg` and `plutobump1k.jpg`
/// from [`TEXTURE_SOURCE_URL`] into `assets/` next to the working directory,
/// or point these paths elsewhere. Without them the dwarf planet is drawn
/// flat white.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetConfig {
    /// Equirectangular surface color map.
    pub surface_map: PathBuf,
    /// Equirectangular height map used for bump shading.
    pub bump_map: PathBuf,
}

impl AssetConfig {
    /// Configured maps that do not exist on disk.
    #[must_use]
    pub fn missing(&self) -> Vec<&Path> {
        [self.surface_map.as_path(), self.bump_map.as_path()]
            .into_iter()
            .filter(|path| !path.is_file())
            .collect()
    }
}

/// Which renderer configuration(s) to open at startup.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
pub enum VariantChoice {
    /// Data-driven exoplanet sphere.
    #[default]
    Exoplanet,
    /// Textured dwarf planet with a starfield backdrop.
    DwarfPlanet,
    /// One window per variant.
    Both,
}

/// Viewer selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
    /// Renderer configuration to mount.
    pub variant: VariantChoice,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            vsync: true,
            transparent: true,
            title: "exoviz".to_string(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            sphere_segments: 64,
            star_count: 10_000,
            star_seed: 0x57A2_F1E1D,
        }
    }
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            resume_delay_ms: 2000,
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            surface_map: PathBuf::from("assets").join("plutomap1k.jpg"),
            bump_map: PathBuf::from("assets").join("plutobump1k.jpg"),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let config = read_config(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized = ron::ser::to_string_pretty(self, pretty)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::Write {
            path: config_path.clone(),
            source,
        })?;
        Ok(())
    }

    /// Resume delay as a [`std::time::Duration`].
    #[must_use]
    pub fn resume_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.interaction.resume_delay_ms)
    }
}

fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(ron::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("width: 1280"));
        assert!(ron_str.contains("star_count: 10000"));
        assert!(ron_str.contains("resume_delay_ms: 2000"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.viewer.variant = VariantChoice::Both;
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(window: (), render: (), debug: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.interaction, InteractionConfig::default());
        assert_eq!(config.assets, AssetConfig::default());
        assert_eq!(config.viewer.variant, VariantChoice::Exoplanet);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: Config = ron::from_str("(render: (star_count: 500))").unwrap();
        assert_eq!(config.render.star_count, 500);
        assert_eq!(config.render.sphere_segments, 64);
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_variant_parses_from_ron() {
        let config: Config = ron::from_str("(viewer: (variant: DwarfPlanet))").unwrap();
        assert_eq!(config.viewer.variant, VariantChoice::DwarfPlanet);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.window.width = 1920;
        config.window.height = 1080;
        config.assets.surface_map = PathBuf::from("textures").join("ceres.png");

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_load_picks_up_edited_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut modified = Config::default();
        modified.interaction.resume_delay_ms = 500;
        modified.save(dir.path()).unwrap();

        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(loaded.resume_delay(), std::time::Duration::from_millis(500));
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.ron"), "{{not valid}}").unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_unreadable_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("config.ron")).unwrap();
        let err = Config::load_or_create(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Read { ref path, .. } if path.ends_with("config.ron")));
        assert!(err.to_string().contains("config.ron"));
    }

    #[test]
    fn test_missing_texture_maps_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let surface = dir.path().join("plutomap1k.jpg");
        std::fs::write(&surface, b"jpeg").unwrap();
        let assets = AssetConfig {
            surface_map: surface,
            bump_map: dir.path().join("plutobump1k.jpg"),
        };
        assert_eq!(assets.missing(), vec![dir.path().join("plutobump1k.jpg").as_path()]);

        let defaults = AssetConfig::default();
        assert!(defaults.surface_map.ends_with("plutomap1k.jpg"));
        assert!(defaults.bump_map.ends_with("plutobump1k.jpg"));
    }

    #[test]
    fn test_resume_delay_duration() {
        let config = Config::default();
        assert_eq!(config.resume_delay(), std::time::Duration::from_millis(2000));
    }
}
