//! Presets command implementation.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::config::Config;
use crate::error::Result;
use crate::output::Printer;
use crate::types::BuiltinPresets;

/// List builtin and configured presets
#[derive(Args, Debug, Default)]
pub struct PresetsArgs {
    /// Show each preset's expressions
    #[arg(long, short)]
    pub verbose: bool,

    /// Config file (default: ./imgmap.yaml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: PresetsArgs, printer: &Printer) -> Result<()> {
    let config = Config::discover(args.config.as_deref(), Path::new("."))?;

    for preset in BuiltinPresets::all() {
        printer.info(&preset.name, &preset.description);
        if args.verbose {
            for expr in &preset.expressions {
                eprintln!("{:>12} {}", "", printer.dim(&expr.to_string()));
            }
        }
    }

    for (name, lines) in &config.presets {
        if BuiltinPresets::get(name).is_some() {
            printer.warning(name, "shadowed by builtin");
            continue;
        }
        printer.info(name, &printer.dim("(config)"));
        if args.verbose {
            for line in lines {
                eprintln!("{:>12} {}", "", printer.dim(line.trim()));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_presets_with_config() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("imgmap.yaml");
        std::fs::write(&config, "presets:\n  night:\n    - \"? ? ? ? -40% -40% ? ?\"\n").unwrap();

        let args = PresetsArgs {
            verbose: true,
            config: Some(config),
        };
        run(args, &Printer::plain()).unwrap();
    }

    #[test]
    fn test_presets_bad_config() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("imgmap.yaml");
        std::fs::write(&config, "presets: 12").unwrap();

        let args = PresetsArgs {
            verbose: false,
            config: Some(config),
        };
        assert!(run(args, &Printer::plain()).is_err());
    }
}
