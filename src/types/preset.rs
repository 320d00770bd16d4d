//! Named, pre-built programs.
//!
//! The token grammar can only name `#r`, `#g`, `#b`, `#a` and `#m`; the
//! average, lightness and luminosity metrics are reachable through these
//! presets instead.

use crate::error::Result;
use crate::parser::Program;
use crate::validation::validate_produce_rule;

use super::{Channel, Expression, NamedRef, Number, Operator, Rule};

/// A named sequence of expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub name: String,
    pub description: String,
    pub expressions: Vec<Expression>,
}

impl Preset {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        expressions: Vec<Expression>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            expressions,
        }
    }

    /// The preset as a runnable program, sourced as `preset:<name>`.
    pub fn program(&self) -> Program {
        Program::from_expressions(&format!("preset:{}", self.name), self.expressions.clone())
    }
}

/// Registry of builtin presets.
pub struct BuiltinPresets;

impl BuiltinPresets {
    /// Get all builtin presets.
    pub fn all() -> Vec<Preset> {
        vec![
            Preset::new(
                "grayscale",
                "Gamma-correct luminosity grayscale",
                vec![gray(NamedRef::Luminosity)],
            ),
            Preset::new(
                "grayscale-average",
                "Grayscale from the average of R, G and B",
                vec![gray(NamedRef::Average)],
            ),
            Preset::new(
                "grayscale-lightness",
                "Grayscale from the midpoint of the smallest and largest channel",
                vec![gray(NamedRef::Lightness)],
            ),
            Preset::new(
                "grayscale-mean",
                "Same as `? ? ? ? #m #m #m ?`",
                vec![gray(NamedRef::Mean)],
            ),
            Preset::new(
                "black-white",
                "Luminosity threshold at 128: black below, white from there up",
                vec![
                    gray(NamedRef::Luminosity),
                    threshold(Operator::Less, 0),
                    threshold(Operator::GreaterEq, 255),
                ],
            ),
            Preset::new(
                "opaque",
                "Set alpha to 255 everywhere",
                vec![Expression::new(
                    Rule::WILDCARD,
                    Rule::new(
                        Channel::Wildcard,
                        Channel::Wildcard,
                        Channel::Wildcard,
                        Channel::literal(255),
                    ),
                )],
            ),
        ]
    }

    /// Get a builtin preset by name.
    pub fn get(name: &str) -> Option<Preset> {
        Self::all().into_iter().find(|p| p.name == name)
    }

    /// Apply one produce-side channel to R, G and B of every pixel.
    ///
    /// `+10%` brightens by ten percent, `-20` darkens by twenty levels.
    pub fn brightness(channel: Channel) -> Result<Preset> {
        let to = Rule::new(channel, channel, channel, Channel::Wildcard);
        validate_produce_rule(&to)?;

        Ok(Preset::new(
            "brightness",
            format!("Apply {} to R, G and B", channel),
            vec![Expression::new(Rule::WILDCARD, to)],
        ))
    }
}

/// After a grayscale pass R holds the metric; recolour R, G and B by comparing it to 128.
fn threshold(operator: Operator, value: u8) -> Expression {
    let from = Rule::new(
        Channel::Number(Number::new(operator, 128)),
        Channel::Wildcard,
        Channel::Wildcard,
        Channel::Wildcard,
    );
    let c = Channel::literal(value);
    Expression::new(from, Rule::new(c, c, c, Channel::Wildcard))
}

fn gray(metric: NamedRef) -> Expression {
    let c = Channel::Named(metric);
    Expression::new(Rule::WILDCARD, Rule::new(c, c, c, Channel::Wildcard))
}
