pub mod api;
pub mod cli;
pub mod config;
pub mod dicom;
pub mod display_metadata;
pub mod error;
pub mod image;
pub mod logging;
pub mod object;
pub mod types;
pub mod windowing;

// Re-export commonly used items
pub use display_metadata::print_metadata;
pub use error::{ExportError, Result};
pub use object::{DicomImage, LoadState, LoadedImage};
