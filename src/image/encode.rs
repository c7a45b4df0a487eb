//! Writing rendered images to disk

use crate::error::{ExportError, Result};
use image::{DynamicImage, ImageFormat};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
}

impl OutputFormat {
    /// Pick the format from the file extension, PNG when unknown
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("jpg" | "jpeg") => Self::Jpeg,
            _ => Self::Png,
        }
    }

    #[must_use]
    pub fn image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg => ImageFormat::Jpeg,
        }
    }
}

/// Encode `image` and write it to `path`
pub fn write_image(image: &DynamicImage, path: &Path) -> Result<()> {
    let format = OutputFormat::from_path(path);
    image
        .save_with_format(path, format.image_format())
        .map_err(|e| ExportError::OutputWriteFailed(format!("{}: {e}", path.display())))?;

    info!("Wrote {:?} image to {}", format, path.display());
    Ok(())
}
