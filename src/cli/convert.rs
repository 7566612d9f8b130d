//! Convert command implementation.
//!
//! Loads a layer manifest, runs the pipeline and writes `index.html`.

use std::path::PathBuf;

use clap::Args;

use crate::convert::{write_document, Converter};
use crate::error::Result;
use crate::layer::LayerManifest;
use crate::output::{display_path, plural, Printer};

/// Convert a layer manifest into an HTML page
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Layer manifest (.yaml, .yml or .json)
    pub manifest: PathBuf,

    /// Output directory
    #[arg(long, short, default_value = "dist")]
    pub output: PathBuf,
}

/// Returns the path of the written page.
pub fn run(args: ConvertArgs, printer: &Printer) -> Result<PathBuf> {
    printer.status("Loading", &display_path(&args.manifest));
    let manifest = LayerManifest::load(&args.manifest)?;

    printer.status("Converting", &display_path(&args.manifest));
    let conversion = Converter::new().convert(&manifest)?;
    printer.diagnostics(&conversion.diagnostics);

    let path = write_document(&conversion.document, &args.output)?;
    printer.status(
        "Finished",
        &format!(
            "{} -> {}",
            plural(conversion.document.tree().len(), "element", "elements"),
            printer.cyan(&display_path(&path))
        ),
    );

    Ok(path)
}
