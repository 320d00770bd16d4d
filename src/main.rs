use clap::Parser;
use imgmap::cli::{Cli, Commands};
use imgmap::output::Printer;
use miette::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Run(args) => imgmap::cli::run::run(args, &printer)?,
        Commands::Check(args) => imgmap::cli::check::run(args, &printer)?,
        Commands::Presets(args) => imgmap::cli::presets::run(args, &printer)?,
        Commands::Formats => imgmap::cli::formats::run(&printer)?,
        Commands::Init(args) => imgmap::cli::init::run(args, &printer)?,
        Commands::Completions(args) => imgmap::cli::completions::run(args)?,
    }

    Ok(())
}
