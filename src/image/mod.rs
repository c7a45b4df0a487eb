//! From raw pixel buffers to encoded 8-bit images

mod encode;
mod matrix;
mod strategy;
mod units;

pub use encode::{write_image, OutputFormat};
pub use matrix::{PhysicalMatrix, RawView, Samples};
pub use strategy::{CtStrategy, ExtractionStrategy, StrategyFactory};
pub use units::to_physical_units;
