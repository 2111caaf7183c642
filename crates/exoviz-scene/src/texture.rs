//! Decoded surface and bump maps.

use std::path::{Path, PathBuf};

/// Errors from loading a texture image.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    /// The file could not be opened or decoded.
    #[error("failed to load texture {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The image decoded to zero pixels.
    #[error("texture {0} has zero size")]
    Empty(PathBuf),
}

/// An RGBA8 image ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA rows, top row first.
    pub rgba: Vec<u8>,
}

impl TextureImage {
    /// Decode an image file to RGBA8.
    pub fn load(path: &Path) -> Result<Self, TextureError> {
        let img = image::open(path).map_err(|source| TextureError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(TextureError::Empty(path.to_path_buf()));
        }
        log::debug!("Loaded texture {} ({width}x{height})", path.display());
        Ok(Self {
            width,
            height,
            rgba: rgba.into_raw(),
        })
    }

    /// [`load`](Self::load), logging a warning and returning `None` on failure.
    pub fn load_or_warn(path: &Path) -> Option<Self> {
        match Self::load(path) {
            Ok(image) => Some(image),
            Err(e) => {
                log::warn!("{e}; rendering without it");
                None
            }
        }
    }
}
