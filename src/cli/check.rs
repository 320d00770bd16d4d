//! Check command implementation.
//!
//! Lints map files and reports diagnostics, either for humans on stderr or
//! as JSON on stdout.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;

use crate::error::{MapError, Result};
use crate::output::{plural, Printer};
use crate::parser::Program;
use crate::validation::{check_program, print_diagnostics, ValidationResult};

/// Lint map files without touching any image
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Map files to check
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Print diagnostics as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: CheckArgs, printer: &Printer) -> Result<()> {
    let result = check_files(&args.files)?;

    if args.json {
        let mut stdout = io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, &result).map_err(|e| MapError::Io {
            path: PathBuf::from("<stdout>"),
            message: e.to_string(),
        })?;
        writeln!(stdout)?;
    } else {
        print_diagnostics(&result, printer);
    }

    if result.has_errors() {
        return Err(MapError::Validation {
            message: format!("{} found", plural(result.error_count(), "error", "errors")),
            help: None,
        });
    }

    Ok(())
}

/// Load and lint every file.
pub fn check_files(files: &[PathBuf]) -> Result<ValidationResult> {
    let mut result = ValidationResult::new();
    for file in files {
        let program = Program::load(file)?;
        result.merge(check_program(&program));
    }
    result.sort();
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_check_clean_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ok.map");
        fs::write(&path, "; fine\n>200 ? ? ? 0 0 0 ?\n").unwrap();

        let args = CheckArgs {
            files: vec![path],
            json: false,
        };
        run(args, &Printer::plain()).unwrap();
    }

    #[test]
    fn test_check_warnings_only_succeeds() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("warn.map");
        fs::write(&path, "0 0 0 ? ? ? 128\n").unwrap();

        let result = check_files(&[path.clone()]).unwrap();
        assert_eq!(result.warning_count(), 1);

        let args = CheckArgs {
            files: vec![path],
            json: true,
        };
        run(args, &Printer::plain()).unwrap();
    }

    #[test]
    fn test_check_errors_fail() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.map");
        let b = dir.path().join("b.map");
        fs::write(&a, "#r ? ? ? 0 0 0 0\n").unwrap();
        fs::write(&b, "? ? ? ? >5 ? ? ?\n").unwrap();

        let result = check_files(&[b.clone(), a.clone()]).unwrap();
        assert_eq!(result.error_count(), 2);
        assert_eq!(result.iter().next().unwrap().source, a.display().to_string());

        let args = CheckArgs {
            files: vec![a, b],
            json: false,
        };
        assert!(run(args, &Printer::plain()).is_err());
    }

    #[test]
    fn test_check_missing_file() {
        let dir = tempdir().unwrap();
        assert!(check_files(&[dir.path().join("nope.map")]).is_err());
    }
}
