//! Channel values: the atoms of the rule language.

use std::fmt;
use std::str::FromStr;

use crate::error::{MapError, Result};

/// Operator prefix of a numeric channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Operator {
    /// No prefix: equality on the match side, literal on the produce side.
    #[default]
    None,
    Add,
    Sub,
    Less,
    LessEq,
    Greater,
    GreaterEq,
}

impl Operator {
    /// Textual prefix of the operator.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::None => "",
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Less => "<",
            Operator::LessEq => "<=",
            Operator::Greater => ">",
            Operator::GreaterEq => ">=",
        }
    }

    /// Comparison operators are only meaningful when matching.
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            Operator::Less | Operator::LessEq | Operator::Greater | Operator::GreaterEq
        )
    }

    /// Arithmetic operators are only meaningful when producing.
    pub fn is_arithmetic(self) -> bool {
        matches!(self, Operator::Add | Operator::Sub)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A named reference to a value of the source pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedRef {
    R,
    G,
    B,
    A,
    Average,
    Lightness,
    Luminosity,
    Mean,
}

impl NamedRef {
    /// Resolve the letter following `#` in a channel token.
    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'r' => Some(NamedRef::R),
            'g' => Some(NamedRef::G),
            'b' => Some(NamedRef::B),
            'a' => Some(NamedRef::A),
            'm' => Some(NamedRef::Mean),
            _ => None,
        }
    }

    /// Token letter, for the references that have one.
    pub fn letter(self) -> Option<char> {
        match self {
            NamedRef::R => Some('r'),
            NamedRef::G => Some('g'),
            NamedRef::B => Some('b'),
            NamedRef::A => Some('a'),
            NamedRef::Mean => Some('m'),
            NamedRef::Average | NamedRef::Lightness | NamedRef::Luminosity => None,
        }
    }

    /// Whether the value comes from the derived metrics rather than a raw channel.
    pub fn is_derived(self) -> bool {
        matches!(
            self,
            NamedRef::Average | NamedRef::Lightness | NamedRef::Luminosity | NamedRef::Mean
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            NamedRef::R => "r",
            NamedRef::G => "g",
            NamedRef::B => "b",
            NamedRef::A => "a",
            NamedRef::Average => "average",
            NamedRef::Lightness => "lightness",
            NamedRef::Luminosity => "luminosity",
            NamedRef::Mean => "m",
        }
    }
}

/// A numeric channel value with an optional operator and percentage flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Number {
    pub operator: Operator,
    pub value: u8,
    pub percentage: bool,
}

impl Number {
    pub const fn new(operator: Operator, value: u8) -> Self {
        Self {
            operator,
            value,
            percentage: false,
        }
    }

    /// Mark the value as a percentage of the current channel value.
    pub const fn percent(mut self) -> Self {
        self.percentage = true;
        self
    }
}

/// A single channel of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// `?` - matches anything, passes the current value through.
    Wildcard,
    /// `#r`, `#g`, `#b`, `#a`, `#m` or one of the derived metrics.
    Named(NamedRef),
    /// `[op][0x]value[%]`
    Number(Number),
}

impl Channel {
    /// A plain numeric literal with no operator.
    pub const fn literal(value: u8) -> Self {
        Channel::Number(Number::new(Operator::None, value))
    }

    /// Whether evaluating this channel needs the derived metrics of the pixel.
    pub fn needs_derived(&self) -> bool {
        matches!(self, Channel::Named(name) if name.is_derived())
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Wildcard => f.write_str("?"),
            Channel::Named(name) => match name.letter() {
                Some(letter) => write!(f, "#{}", letter),
                // No token exists for these; show a label that cannot be mistaken for one.
                None => write!(f, "({})", name.name()),
            },
            Channel::Number(n) => {
                write!(f, "{}{}", n.operator, n.value)?;
                if n.percentage {
                    f.write_str("%")?;
                }
                Ok(())
            }
        }
    }
}

impl FromStr for Channel {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self> {
        crate::parser::parse_channel(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_tokens() {
        assert_eq!(Channel::Wildcard.to_string(), "?");
        assert_eq!(Channel::Named(NamedRef::G).to_string(), "#g");
        assert_eq!(Channel::Named(NamedRef::Mean).to_string(), "#m");
        assert_eq!(Channel::literal(10).to_string(), "10");
        assert_eq!(
            Channel::Number(Number::new(Operator::GreaterEq, 200)).to_string(),
            ">=200"
        );
        assert_eq!(
            Channel::Number(Number::new(Operator::Sub, 15).percent()).to_string(),
            "-15%"
        );
    }

    #[test]
    fn test_derived_names_have_no_token() {
        let c = Channel::Named(NamedRef::Luminosity);
        assert_eq!(c.to_string(), "(luminosity)");
        assert_eq!(Channel::Named(NamedRef::Average).to_string(), "(average)");
        assert!(crate::parser::parse_channel(&c.to_string()).is_err());
        assert!(c.needs_derived());
        assert!(!Channel::Named(NamedRef::R).needs_derived());
    }

    #[test]
    fn test_operator_classes() {
        assert!(Operator::Less.is_comparison());
        assert!(!Operator::Less.is_arithmetic());
        assert!(Operator::Sub.is_arithmetic());
        assert!(!Operator::None.is_comparison());
        assert!(!Operator::None.is_arithmetic());
    }

    #[test]
    fn test_named_letter_case_insensitive() {
        assert_eq!(NamedRef::from_letter('R'), Some(NamedRef::R));
        assert_eq!(NamedRef::from_letter('m'), Some(NamedRef::Mean));
        assert_eq!(NamedRef::from_letter('x'), None);
    }
}
