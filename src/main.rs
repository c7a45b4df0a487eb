use clap::Parser;
use ctwin::api::{self, Handle};
use ctwin::cli::Args;
use ctwin::config::ExportConfig;

fn main() {
    let args = Args::parse();

    if let Err(e) = api::init(args.verbose) {
        eprintln!("[ERROR] {e:#}");
    }

    if let Err(e) = process_file(&args) {
        println!("Error: {e:#}");
        std::process::exit(1);
    }
}

/// Export a single DICOM file
fn process_file(args: &Args) -> anyhow::Result<()> {
    // Stage 1: Resolve paths and presets
    let config = ExportConfig::from(args);
    let mut handle = Handle::new(&config);

    // Stage 2: Load, extract and write the image
    let loaded = handle.load();

    // Stage 3: Verbose output, also for partially loaded files
    if args.verbose {
        ctwin::print_metadata(handle.image());
    }
    loaded?;

    // Stage 4: Metadata JSON
    if args.metadata {
        println!("{}", handle.get_metadata()?);
    }

    if let Some(output_path) = &config.output_path {
        println!("Image saved to {}", output_path.display());
    }

    Ok(())
}
