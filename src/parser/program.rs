//! Program parsing.
//!
//! A program is a sequence of independent text lines. Every physical line
//! is kept together with its line number so later stages can report
//! against it.

use std::fmt;
use std::fs;
use std::io::BufRead;
use std::path::Path;

use crate::error::{MapError, Result};
use crate::types::Expression;

use super::{parse_expression, token_count};

/// What a single program line turned out to be.
#[derive(Debug)]
pub enum LineOutcome {
    /// A parsed and validated expression.
    Expression(Expression),
    /// Not an expression; `tokens == 0` means blank or comment only.
    Ignored { tokens: usize },
    /// Looked like an expression but failed to parse or validate.
    Rejected(MapError),
}

/// One line of a program.
#[derive(Debug)]
pub struct ProgramLine {
    /// Name of the source the line came from (file path, `<expr>`, preset name).
    pub source: String,
    /// Line number within the source (1-indexed).
    pub number: usize,
    /// Raw line text.
    pub text: String,
    pub outcome: LineOutcome,
}

impl ProgramLine {
    /// The expression on this line, if it has one.
    pub fn expression(&self) -> Option<&Expression> {
        match &self.outcome {
            LineOutcome::Expression(expr) => Some(expr),
            _ => None,
        }
    }

    /// The parse or validation error of this line, if it was rejected.
    pub fn error(&self) -> Option<&MapError> {
        match &self.outcome {
            LineOutcome::Rejected(err) => Some(err),
            _ => None,
        }
    }

    /// `source:line`, for messages.
    pub fn location(&self) -> String {
        format!("{}:{}", self.source, self.number)
    }
}

impl fmt::Display for ProgramLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location(), self.text.trim())
    }
}

/// An ordered list of program lines.
#[derive(Debug, Default)]
pub struct Program {
    lines: Vec<ProgramLine>,
}

impl Program {
    /// Create an empty program.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse program text. Never fails: bad lines are recorded as rejected.
    pub fn parse(source: &str, text: &str) -> Self {
        let lines = text
            .lines()
            .enumerate()
            .map(|(i, line)| parse_line(source, i + 1, line))
            .collect();

        Self { lines }
    }

    /// Read a program from a stream, one line at a time.
    pub fn from_reader<R: BufRead>(source: &str, reader: R) -> Result<Self> {
        let mut lines = Vec::new();
        for (i, line) in reader.lines().enumerate() {
            lines.push(parse_line(source, i + 1, &line?));
        }
        Ok(Self { lines })
    }

    /// Load a program from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| MapError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read map file: {}", e),
        })?;

        Ok(Self::parse(&path.display().to_string(), &text))
    }

    /// Build a program from already-constructed expressions.
    pub fn from_expressions(
        source: &str,
        expressions: impl IntoIterator<Item = Expression>,
    ) -> Self {
        let lines = expressions
            .into_iter()
            .enumerate()
            .map(|(i, expr)| ProgramLine {
                source: source.to_string(),
                number: i + 1,
                text: expr.to_string(),
                outcome: LineOutcome::Expression(expr),
            })
            .collect();

        Self { lines }
    }

    /// Append another program after this one.
    pub fn extend(&mut self, other: Program) {
        self.lines.extend(other.lines);
    }

    pub fn lines(&self) -> &[ProgramLine] {
        &self.lines
    }

    /// Valid expressions, in order.
    pub fn expressions(&self) -> impl Iterator<Item = &Expression> {
        self.lines.iter().filter_map(ProgramLine::expression)
    }

    /// Lines that failed to parse or validate.
    pub fn rejected(&self) -> impl Iterator<Item = &ProgramLine> {
        self.lines.iter().filter(|l| l.error().is_some())
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

fn parse_line(source: &str, number: usize, text: &str) -> ProgramLine {
    let outcome = match parse_expression(text) {
        Ok(Some(expr)) => LineOutcome::Expression(expr),
        Ok(None) => LineOutcome::Ignored {
            tokens: token_count(text),
        },
        Err(err) => LineOutcome::Rejected(err),
    };

    ProgramLine {
        source: source.to_string(),
        number,
        text: text.to_string(),
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    const MAP: &str = "\
; recolour bright reds
>200 ? ? ? 0 0 0 ?

1 2 3 4 5 6 7
#r ? ? ? 0 0 0 ?
0 0 0 ? ? ? ? 128
";

    #[test]
    fn test_parse_program_lines() {
        let program = Program::parse("test.map", MAP);

        assert_eq!(program.len(), 6);
        assert_eq!(program.expressions().count(), 2);

        let rejected: Vec<_> = program.rejected().collect();
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].number, 5);
        assert_eq!(rejected[0].location(), "test.map:5");
    }

    #[test]
    fn test_ignored_lines_count_tokens() {
        let program = Program::parse("test.map", MAP);
        let lines = program.lines();

        assert!(matches!(lines[0].outcome, LineOutcome::Ignored { tokens: 0 }));
        assert!(matches!(lines[2].outcome, LineOutcome::Ignored { tokens: 0 }));
        assert!(matches!(lines[3].outcome, LineOutcome::Ignored { tokens: 7 }));
    }

    #[test]
    fn test_from_reader_matches_parse() {
        let program = Program::from_reader("stdin", Cursor::new(MAP)).unwrap();
        assert_eq!(program.len(), 6);
        assert_eq!(program.expressions().count(), 2);
    }

    #[test]
    fn test_crlf_lines() {
        let program = Program::parse("win.map", ">200 ? ? ? 0 0 0 ?\r\n? ? ? ? ? ? ? 255\r\n");
        assert_eq!(program.expressions().count(), 2);
    }

    #[test]
    fn test_load_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("red.map");
        fs::write(&path, MAP).unwrap();

        let program = Program::load(&path).unwrap();
        assert_eq!(program.expressions().count(), 2);
        assert!(program.lines()[0].source.ends_with("red.map"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let result = Program::load(&dir.path().join("missing.map"));
        assert!(matches!(result, Err(MapError::Io { .. })));
    }

    #[test]
    fn test_extend_keeps_line_numbers() {
        let mut program = Program::parse("a", "? ? ? ? ? ? ? 1");
        program.extend(Program::parse("b", "\n? ? ? ? ? ? ? 2"));

        let locations: Vec<String> = program
            .lines()
            .iter()
            .filter(|l| l.expression().is_some())
            .map(ProgramLine::location)
            .collect();
        assert_eq!(locations, vec!["a:1", "b:2"]);
    }

    #[test]
    fn test_from_expressions() {
        let expr = parse_expression("? ? ? ? #m #m #m ?").unwrap().unwrap();
        let program = Program::from_expressions("grayscale-mean", [expr]);
        assert_eq!(program.len(), 1);
        assert_eq!(program.lines()[0].expression(), Some(&expr));
    }
}
