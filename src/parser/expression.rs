//! Expression line parsing.
//!
//! An expression line is eight whitespace-separated channel tokens: four
//! for the match rule followed by four for the produce rule. Everything
//! after a `;` is a comment.

use crate::error::Result;
use crate::types::Expression;
use crate::validation::{validate_match_rule, validate_produce_rule};

use super::parse_rule;

/// Number of tokens in an expression line.
pub const EXPRESSION_TOKENS: usize = 8;

/// Remove a trailing `;` comment.
pub fn strip_comment(line: &str) -> &str {
    match line.find(';') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// Count the tokens of a line once its comment is stripped.
pub fn token_count(line: &str) -> usize {
    strip_comment(line).split_whitespace().count()
}

/// Parse and validate one expression line.
///
/// Returns `Ok(None)` when the line is not an expression at all (blank,
/// comment only, or a token count other than eight); such lines are skipped
/// without complaint. Parse and validation failures are errors for the line.
pub fn parse_expression(line: &str) -> Result<Option<Expression>> {
    let tokens: Vec<&str> = strip_comment(line).split_whitespace().collect();
    if tokens.len() != EXPRESSION_TOKENS {
        return Ok(None);
    }

    let from = parse_rule(&tokens[..4].join(" ")).map_err(|e| e.context("source rule"))?;
    let to = parse_rule(&tokens[4..].join(" ")).map_err(|e| e.context("destination rule"))?;

    validate_match_rule(&from).map_err(|e| e.context("source rule"))?;
    validate_produce_rule(&to).map_err(|e| e.context("destination rule"))?;

    Ok(Some(Expression::new(from, to)))
}
