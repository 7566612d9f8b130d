use clap::Parser;
use miette::Result;
use strata::cli::{Cli, Commands};
use strata::output::Printer;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Convert(args) => {
            strata::cli::convert::run(args, &printer)?;
        }
        Commands::Validate(args) => {
            strata::cli::validate::run(args, &printer)?;
        }
        Commands::Completions(args) => strata::cli::completions::run(args)?,
    }

    Ok(())
}
