pub mod completions;
pub mod convert;
pub mod validate;

use clap::{Parser, Subcommand};

/// strata - Layered design documents to HTML and CSS
#[derive(Parser, Debug)]
#[command(name = "strata")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a layer manifest into an HTML page
    Convert(convert::ConvertArgs),

    /// Check layer manifests without writing output
    Validate(validate::ValidateArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
