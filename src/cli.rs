use clap::Parser;
use std::path::PathBuf;

/// Export a CT DICOM image as a windowed 8-bit PNG or JPEG
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// DICOM file to export
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output image path, PNG or JPEG by extension
    /// (default is to replace the input extension with `.png`)
    #[arg(short = 'o', long = "out")]
    pub output: Option<PathBuf>,

    /// JSON table of window presets keyed by body part
    #[arg(short = 'p', long = "presets", value_name = "JSON")]
    pub presets: Option<PathBuf>,

    /// Show image metadata and debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Print image metadata as JSON to stdout
    #[arg(short, long)]
    pub metadata: bool,
}
