pub mod check;
pub mod completions;
pub mod formats;
pub mod init;
pub mod presets;
pub mod run;

use clap::{Parser, Subcommand};

/// imgmap - rule-based image colour remapping
#[derive(Parser, Debug)]
#[command(name = "imgmap")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply a program of expressions to an image or a directory of images
    Run(run::RunArgs),

    /// Lint map files without touching any image
    Check(check::CheckArgs),

    /// List builtin and configured presets
    Presets(presets::PresetsArgs),

    /// List the available output formats
    Formats,

    /// Write a default imgmap.yaml
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_with_signed_tokens() {
        let cli = Cli::try_parse_from([
            "imgmap", "run", "in.png", "-e", "? ? ? ? -10 ? ? ?", "--from", "? ? ? ?", "--to",
            "-5% ? ? ?", "--brightness", "-20", "-o", "out.png",
        ])
        .unwrap();

        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.exprs, vec!["? ? ? ? -10 ? ? ?"]);
        assert_eq!(args.to.as_deref(), Some("-5% ? ? ?"));
        assert_eq!(args.brightness.as_deref(), Some("-20"));
    }

    #[test]
    fn test_from_requires_to() {
        assert!(Cli::try_parse_from(["imgmap", "run", "--from", "? ? ? ?"]).is_err());
    }
}
