//! Init command implementation.
//!
//! Writes a commented `imgmap.yaml` with the default settings.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::config::{Config, CONFIG_FILENAME};
use crate::error::{MapError, Result};
use crate::output::{display_path, Printer};

const TEMPLATE: &str = "\
# imgmap configuration

# Output format when neither --format nor the output extension picks one.
format: png

# Encoder options, as key:value pairs separated by ';'.
#   png:  compression:default|fast|best
#   jpeg: quality:1-100
#   pnm:  format:p2|p3|p5|p6
options: \"\"

# Evaluate image rows in parallel.
parallel: true

# Named programs for `imgmap run --preset NAME`.
presets:
  night:
    - \"? ? ? ?  -40% -40% ? ?\"
";

/// Write a default imgmap.yaml
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to write into (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite an existing imgmap.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let config_path = Config::path_in(&args.path);

    if config_path.exists() && !args.force {
        return Err(MapError::Validation {
            message: format!("{} already exists", display_path(&config_path)),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    fs::write(&config_path, TEMPLATE).map_err(|e| MapError::Io {
        path: config_path.clone(),
        message: format!("Failed to write {}: {}", CONFIG_FILENAME, e),
    })?;

    printer.success("Created", &display_path(&config_path));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_template_parses() {
        let config = Config::parse(TEMPLATE).unwrap();
        assert_eq!(config.format, "png");
        assert!(config.parallel);
        assert_eq!(config.preset("night").unwrap().expressions().count(), 1);
    }

    #[test]
    fn test_init_creates_config() {
        let dir = tempdir().unwrap();
        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: false,
        };

        run(args, &Printer::plain()).unwrap();

        let content = fs::read_to_string(dir.path().join(CONFIG_FILENAME)).unwrap();
        assert!(content.contains("format: png"));
    }

    #[test]
    fn test_init_errors_if_config_exists() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "format: gif").unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: false,
        };

        assert!(run(args, &Printer::plain()).is_err());
    }

    #[test]
    fn test_init_force_overwrites() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "format: gif").unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: true,
        };

        run(args, &Printer::plain()).unwrap();

        let content = fs::read_to_string(dir.path().join(CONFIG_FILENAME)).unwrap();
        assert!(content.contains("format: png"));
    }
}
