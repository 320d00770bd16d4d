//! Rule legality and program lint checks.
//!
//! The rule checks decide whether a channel form is legal for its role.
//! The program checks each take a `&Program` and return a `ValidationResult`.

use crate::error::{MapError, Result};
use crate::parser::{LineOutcome, Program, EXPRESSION_TOKENS};
use crate::types::{Channel, Operator, Rule};

use super::warning::{Diagnostic, ValidationResult};

const POSITIONS: [&str; 4] = ["R", "G", "B", "A"];

/// Check that a rule is legal on the match side.
///
/// Named references, percentages and the `+`/`-` operators are rejected.
pub fn validate_match_rule(rule: &Rule) -> Result<()> {
    for (channel, position) in rule.channels().iter().zip(POSITIONS) {
        match channel {
            Channel::Wildcard => {}
            Channel::Named(_) => {
                return Err(MapError::Validation {
                    message: format!(
                        "named reference {} is not valid in a match context (channel {})",
                        channel, position
                    ),
                    help: Some("Use a number, a comparison or `?` to match".to_string()),
                });
            }
            Channel::Number(n) => {
                if n.operator.is_arithmetic() {
                    return Err(MapError::Validation {
                        message: format!(
                            "operator {:?} is not valid in a match context (channel {})",
                            n.operator.symbol(),
                            position
                        ),
                        help: Some("Match with <, <=, >, >= or a plain number".to_string()),
                    });
                }
                if n.percentage {
                    return Err(MapError::Validation {
                        message: format!(
                            "percentage {} is not valid in a match context (channel {})",
                            channel, position
                        ),
                        help: None,
                    });
                }
            }
        }
    }

    Ok(())
}

/// Check that a rule is legal on the produce side.
///
/// Comparison operators are rejected; everything else is allowed.
pub fn validate_produce_rule(rule: &Rule) -> Result<()> {
    for (channel, position) in rule.channels().iter().zip(POSITIONS) {
        if let Channel::Number(n) = channel {
            if n.operator.is_comparison() {
                return Err(MapError::Validation {
                    message: format!(
                        "operator {:?} is not valid in a produce context (channel {})",
                        n.operator.symbol(),
                        position
                    ),
                    help: Some("Produce with +, -, a plain number, `?` or a # reference".to_string()),
                });
            }
        }
    }

    Ok(())
}

/// Lines that failed to parse or validate.
pub fn check_rejected_lines(program: &Program) -> ValidationResult {
    let mut result = ValidationResult::new();

    for line in program.lines() {
        if let Some(err) = line.error() {
            let message = match err {
                MapError::Parse { message, .. } | MapError::Validation { message, .. } => {
                    message.clone()
                }
                other => other.to_string(),
            };
            let mut diagnostic = Diagnostic::error(err.code(), message).at(&line.source, line.number);
            if let Some(help) = err.help_text() {
                diagnostic = diagnostic.with_help(help);
            }
            result.push(diagnostic);
        }
    }

    result
}

/// Non-blank lines that are silently skipped because they are not eight tokens.
pub fn check_token_counts(program: &Program) -> ValidationResult {
    let mut result = ValidationResult::new();

    for line in program.lines() {
        if let LineOutcome::Ignored { tokens } = line.outcome {
            if tokens > 0 {
                result.push(
                    Diagnostic::warning(
                        "imgmap::token-count",
                        format!(
                            "line has {} tokens and will be skipped",
                            tokens
                        ),
                    )
                    .with_help(format!(
                        "An expression is {} tokens: 4 to match and 4 to produce",
                        EXPRESSION_TOKENS
                    ))
                    .at(&line.source, line.number),
                );
            }
        }
    }

    result
}

/// Match rules that can never accept a pixel (`<0`, `>255`).
pub fn check_unreachable_matches(program: &Program) -> ValidationResult {
    let mut result = ValidationResult::new();

    for line in program.lines() {
        let Some(expr) = line.expression() else {
            continue;
        };

        for (channel, position) in expr.from.channels().iter().zip(POSITIONS) {
            if let Channel::Number(n) = channel {
                let never = matches!(
                    (n.operator, n.value),
                    (Operator::Less, 0) | (Operator::Greater, 255)
                );
                if never {
                    result.push(
                        Diagnostic::warning(
                            "imgmap::unreachable",
                            format!("{} on channel {} never matches", channel, position),
                        )
                        .at(&line.source, line.number),
                    );
                }
            }
        }
    }

    result
}

/// Expressions whose produce rule is all wildcards and so never change a pixel.
pub fn check_identity_expressions(program: &Program) -> ValidationResult {
    let mut result = ValidationResult::new();

    for line in program.lines() {
        if let Some(expr) = line.expression() {
            if expr.to.is_wildcard() {
                result.push(
                    Diagnostic::warning(
                        "imgmap::identity",
                        "produce rule `? ? ? ?` leaves every pixel unchanged",
                    )
                    .at(&line.source, line.number),
                );
            }
        }
    }

    result
}
