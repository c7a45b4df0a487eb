//! Export configuration
//!
//! All paths the pipeline touches come in through [`ExportConfig`].

use crate::cli::Args;
use crate::windowing::WindowPresetTable;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    pub dicom_path: PathBuf,
    pub preset_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
}

impl ExportConfig {
    /// Configuration that only reads `dicom_path`
    pub fn new(dicom_path: impl Into<PathBuf>) -> Self {
        Self {
            dicom_path: dicom_path.into(),
            preset_path: None,
            output_path: None,
        }
    }

    #[must_use]
    pub fn with_presets(mut self, path: impl Into<PathBuf>) -> Self {
        self.preset_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Load the preset table once for sharing
    ///
    /// A missing or broken table is logged and treated as absent.
    #[must_use]
    pub fn load_presets(&self) -> Option<Arc<WindowPresetTable>> {
        let path = self.preset_path.as_deref()?;
        match WindowPresetTable::load(path) {
            Ok(table) => Some(Arc::new(table)),
            Err(e) => {
                warn!("{e}; using default windowing");
                None
            }
        }
    }
}

impl From<&Args> for ExportConfig {
    fn from(args: &Args) -> Self {
        let output_path = args
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(&args.file));

        Self {
            dicom_path: args.file.clone(),
            preset_path: args.presets.clone(),
            output_path: Some(output_path),
        }
    }
}

/// The input path with its extension replaced by `.png`
#[must_use]
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("png")
}
