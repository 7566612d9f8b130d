//! Validate command implementation.
//!
//! Runs the full conversion for each manifest and reports diagnostics
//! without writing anything.

use std::path::PathBuf;

use clap::Args;

use crate::convert::Converter;
use crate::error::{Result, StrataError};
use crate::layer::LayerManifest;
use crate::output::{display_path, plural, Printer};

/// Check layer manifests without writing output
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Manifests to validate
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

/// Returns the total number of diagnostics.
pub fn run(args: ValidateArgs, printer: &Printer) -> Result<usize> {
    let converter = Converter::new();
    let mut total = 0;

    for file in &args.files {
        let display = display_path(file);
        printer.status("Checking", &display);

        let manifest = LayerManifest::load(file)?;
        let conversion = converter.convert(&manifest)?;
        printer.diagnostics(&conversion.diagnostics);
        total += conversion.diagnostics.len();
    }

    if total == 0 {
        printer.status(
            "Finished",
            &format!("{} valid", plural(args.files.len(), "manifest", "manifests")),
        );
        return Ok(0);
    }

    if args.strict {
        return Err(StrataError::Structure {
            message: format!("{} found", plural(total, "problem", "problems")),
            help: Some("Run without --strict to treat these as warnings".to_string()),
        });
    }

    printer.warning("Finished", &plural(total, "problem", "problems"));
    Ok(total)
}
