//! Rules and expressions.

use std::fmt;
use std::str::FromStr;

use crate::error::{MapError, Result};

use super::Channel;

/// Four channels, positionally bound to R, G, B and A.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rule {
    pub r: Channel,
    pub g: Channel,
    pub b: Channel,
    pub a: Channel,
}

impl Rule {
    pub const fn new(r: Channel, g: Channel, b: Channel, a: Channel) -> Self {
        Self { r, g, b, a }
    }

    /// A rule with a wildcard in every position.
    pub const WILDCARD: Self = Self::new(
        Channel::Wildcard,
        Channel::Wildcard,
        Channel::Wildcard,
        Channel::Wildcard,
    );

    /// The channels in R, G, B, A order.
    pub fn channels(&self) -> [Channel; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Whether every position is a wildcard.
    pub fn is_wildcard(&self) -> bool {
        self.channels().iter().all(|c| *c == Channel::Wildcard)
    }

    /// Whether producing this rule needs the derived metrics of the source pixel.
    pub fn needs_derived(&self) -> bool {
        self.channels().iter().any(Channel::needs_derived)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.r, self.g, self.b, self.a)
    }
}

impl FromStr for Rule {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self> {
        crate::parser::parse_rule(s)
    }
}

/// A match rule bound to a produce rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Expression {
    /// Filter: which pixels the expression applies to.
    pub from: Rule,
    /// Formula: how a matching pixel is recoloured.
    pub to: Rule,
}

impl Expression {
    pub const fn new(from: Rule, to: Rule) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NamedRef, Number, Operator};

    #[test]
    fn test_rule_display() {
        let rule = Rule::new(
            Channel::Number(Number::new(Operator::Greater, 200)),
            Channel::Wildcard,
            Channel::Named(NamedRef::B),
            Channel::literal(255),
        );
        insta::assert_snapshot!(rule.to_string(), @">200 ? #b 255");
    }

    #[test]
    fn test_wildcard_rule() {
        assert!(Rule::WILDCARD.is_wildcard());
        assert!(!Rule::WILDCARD.needs_derived());

        let rule = Rule::new(
            Channel::Wildcard,
            Channel::Wildcard,
            Channel::Wildcard,
            Channel::literal(0),
        );
        assert!(!rule.is_wildcard());
    }

    #[test]
    fn test_needs_derived() {
        let rule = Rule::new(
            Channel::Named(NamedRef::Lightness),
            Channel::Named(NamedRef::R),
            Channel::Wildcard,
            Channel::Wildcard,
        );
        assert!(rule.needs_derived());
    }
}
