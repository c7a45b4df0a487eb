//! Host-facing entry points
//!
//! ```no_run
//! use ctwin::api;
//! use ctwin::config::ExportConfig;
//!
//! api::init(false)?;
//! let handle = api::new_handle(&ExportConfig::new("slice.dcm").with_output("slice.png"))?;
//! println!("{}", handle.get_metadata()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::config::ExportConfig;
use crate::error::{ExportError, Result};
use crate::object::{DicomImage, LoadState};
use crate::types::ImageData;
use tracing::info;

/// One-time process setup; installs the logging subscriber
///
/// # Errors
///
/// Fails when a global subscriber is already installed.
pub fn init(verbose: bool) -> anyhow::Result<()> {
    crate::logging::init(verbose)?;
    info!("ctwin {} initialized", env!("CARGO_PKG_VERSION"));
    Ok(())
}

/// Open handle to one DICOM image
#[derive(Debug)]
pub struct Handle {
    image: DicomImage,
}

impl Handle {
    /// Build a handle without loading it
    #[must_use]
    pub fn new(config: &ExportConfig) -> Self {
        let mut image = DicomImage::new(&config.dicom_path);
        if let Some(presets) = config.load_presets() {
            image = image.with_presets(presets);
        }
        if let Some(output_path) = &config.output_path {
            image = image.with_output(output_path);
        }
        Self { image }
    }

    /// Load the image; repeated calls return the first outcome
    pub fn load(&mut self) -> Result<()> {
        self.image.load().map(|_| ())
    }

    #[must_use]
    pub fn image(&self) -> &DicomImage {
        &self.image
    }

    #[must_use]
    pub fn image_data(&self) -> Option<&ImageData> {
        self.image.image_data()
    }

    /// Image metadata as pretty-printed JSON, without pixel data
    ///
    /// # Errors
    ///
    /// `MetadataUnavailable` unless the image loaded successfully.
    pub fn get_metadata(&self) -> Result<String> {
        let data = match self.image.state() {
            LoadState::Loaded(loaded) => &loaded.data,
            LoadState::Unloaded => {
                return Err(ExportError::MetadataUnavailable(
                    "image has not been loaded".to_string(),
                ));
            }
            LoadState::Failed(e) => {
                return Err(ExportError::MetadataUnavailable(format!("load failed: {e}")));
            }
        };

        let json = serde_json::to_string_pretty(data)
            .map_err(|e| ExportError::MetadataUnavailable(e.to_string()))?;
        info!("Image metadata:\n{json}");
        Ok(json)
    }
}

/// Create a handle and load it immediately
///
/// # Errors
///
/// Any error from [`Handle::load`].
pub fn new_handle(config: &ExportConfig) -> Result<Handle> {
    let mut handle = Handle::new(config);
    handle.load()?;
    Ok(handle)
}
