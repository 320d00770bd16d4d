//! Parser modules for the imgmap rule language.
//!
//! # Program Structure
//!
//! A program is plain text, one expression per line:
//!
//! ```text
//! ; match R G B A      produce R G B A
//! >200 ? ? ?           0 0 0 ?          ; bright reds become black
//! 0 0 0 ?              ? ? ? 128        ; then half their alpha
//! ```
//!
//! Lines that are not exactly eight tokens are skipped. Lines that are
//! eight tokens but fail to parse or validate are rejected and reported.
//!
//! # Usage
//!
//! ```
//! use imgmap::parser::Program;
//!
//! let program = Program::parse("<expr>", ">200 ? ? ? 0 0 0 ?");
//! assert_eq!(program.expressions().count(), 1);
//! ```

mod channel;
mod expression;
mod program;

pub use channel::{parse_channel, parse_rule};
pub use expression::{parse_expression, strip_comment, token_count, EXPRESSION_TOKENS};
pub use program::{LineOutcome, Program, ProgramLine};
