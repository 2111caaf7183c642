//! Configuration for the exoviz visualizer.
//!
//! Settings persist to disk as a RON file and can be overridden from the
//! command line. Unknown or missing fields fall back to defaults so old and
//! new config files stay loadable.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    AssetConfig, Config, DebugConfig, InteractionConfig, RenderConfig, VariantChoice,
    TEXTURE_SOURCE_URL, ViewerConfig, WindowConfig,
};
pub use error::ConfigError;
