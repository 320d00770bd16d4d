//! Validation for rules and programs.
//!
//! Rule validation decides whether a channel is legal for its role and is
//! applied to every expression as it is parsed. Program checks run a suite
//! of lints over a parsed program and report errors and warnings. Used by
//! `imgmap check`.

mod checks;
mod warning;

pub use checks::{validate_match_rule, validate_produce_rule};
pub use warning::{Diagnostic, Severity, ValidationResult};

use crate::output::{plural, Printer};
use crate::parser::Program;

/// Run all program checks.
pub fn check_program(program: &Program) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_rejected_lines(program));
    result.merge(checks::check_token_counts(program));
    result.merge(checks::check_unreachable_matches(program));
    result.merge(checks::check_identity_expressions(program));

    result.sort();
    result
}

/// Print diagnostics to stderr.
pub fn print_diagnostics(result: &ValidationResult, printer: &Printer) {
    for d in result.iter() {
        printer.diagnostic(
            &d.severity.to_string(),
            &d.code,
            d.severity == Severity::Error,
            &format!("{}:{}", d.source, d.line),
            &d.message,
            d.help.as_deref(),
        );
    }

    let errors = result.error_count();
    let warnings = result.warning_count();

    if errors > 0 {
        printer.error(
            "Failed",
            &format!(
                "{}, {}",
                plural(errors, "error", "errors"),
                plural(warnings, "warning", "warnings")
            ),
        );
    } else if warnings > 0 {
        printer.warning("Checked", &plural(warnings, "warning", "warnings"));
    } else {
        printer.success("Checked", "no problems found");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_empty_program() {
        let result = check_program(&Program::new());
        assert!(result.is_ok());
    }

    #[test]
    fn test_check_valid_program() {
        let program = Program::parse(
            "ok.map",
            "; header\n>200 ? ? ? 0 0 0 ?\n0 0 0 ? ? ? ? 128\n",
        );
        let result = check_program(&program);
        assert!(result.is_ok());
    }

    #[test]
    fn test_check_collects_in_line_order() {
        let program = Program::parse(
            "bad.map",
            "? ? ? ? ? ? ? ?\n1 2 3\n#r ? ? ? 0 0 0 ?\n",
        );
        let result = check_program(&program);

        assert!(result.has_errors());
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.warning_count(), 2);

        let lines: Vec<usize> = result.iter().map(|d| d.line).collect();
        assert_eq!(lines, vec![1, 2, 3]);
    }
}
