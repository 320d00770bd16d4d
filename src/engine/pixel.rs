//! Per-pixel evaluation: matching, derived metrics and channel production.
//!
//! All arithmetic saturates at 0 and 255; nothing wraps.

use crate::types::{Channel, Colour, Expression, NamedRef, Number, Operator, Rule};

use super::srgb;

/// Grayscale metrics of a source pixel, referenced by named channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Derived {
    /// `round((r + g + b) / 3)`
    pub average: u8,
    /// `round((min(r, g, b) + max(r, g, b)) / 2)`
    pub lightness: u8,
    /// Gamma-correct weighted luminosity.
    pub luminosity: u8,
    /// Average of R, G and B; the value behind `#m`.
    pub mean: u8,
}

impl Derived {
    /// Compute all metrics of a pixel.
    pub fn of(c: Colour) -> Self {
        let sum = u16::from(c.r) + u16::from(c.g) + u16::from(c.b);
        // sum / 3 never has a fractional part of exactly one half.
        let average = ((sum + 1) / 3) as u8;
        let lightness = ((u16::from(c.min_rgb()) + u16::from(c.max_rgb()) + 1) / 2) as u8;

        Self {
            average,
            lightness,
            luminosity: srgb::luminosity(c),
            mean: average,
        }
    }
}

/// Value of a named reference for a source pixel.
pub fn named_value(name: NamedRef, pixel: Colour, derived: &Derived) -> u8 {
    match name {
        NamedRef::R => pixel.r,
        NamedRef::G => pixel.g,
        NamedRef::B => pixel.b,
        NamedRef::A => pixel.a,
        NamedRef::Average => derived.average,
        NamedRef::Lightness => derived.lightness,
        NamedRef::Luminosity => derived.luminosity,
        NamedRef::Mean => derived.mean,
    }
}

/// Whether every channel of the match rule accepts the pixel.
pub fn matches(pixel: Colour, rule: &Rule) -> bool {
    match_channel(pixel.r, &rule.r)
        && match_channel(pixel.g, &rule.g)
        && match_channel(pixel.b, &rule.b)
        && match_channel(pixel.a, &rule.a)
}

fn match_channel(value: u8, channel: &Channel) -> bool {
    match channel {
        // Named references never reach matching: validation rejects them.
        Channel::Wildcard | Channel::Named(_) => true,
        Channel::Number(n) => match n.operator {
            Operator::Less => value < n.value,
            Operator::LessEq => value <= n.value,
            Operator::Greater => value > n.value,
            Operator::GreaterEq => value >= n.value,
            Operator::None | Operator::Add | Operator::Sub => value == n.value,
        },
    }
}

/// Produce one output channel.
///
/// `current` is the source value of the channel being produced.
pub fn produce(current: u8, pixel: Colour, derived: &Derived, channel: &Channel) -> u8 {
    match channel {
        Channel::Wildcard => current,
        Channel::Named(name) => named_value(*name, pixel, derived),
        Channel::Number(n) => produce_number(current, n),
    }
}

fn produce_number(current: u8, n: &Number) -> u8 {
    let amount = if n.percentage {
        percent_of(current, n.value)
    } else {
        n.value
    };

    match n.operator {
        Operator::Add => current.saturating_add(amount),
        Operator::Sub => current.saturating_sub(amount),
        // Comparisons never reach production: validation rejects them.
        Operator::None
        | Operator::Less
        | Operator::LessEq
        | Operator::Greater
        | Operator::GreaterEq => amount,
    }
}

/// `round(current * 0.01 * percent)`, clamped to 255.
fn percent_of(current: u8, percent: u8) -> u8 {
    let scaled = (f64::from(current) * 0.01 * f64::from(percent)).round();
    scaled.min(255.0) as u8
}

/// Apply an expression to one pixel. Non-matching pixels come back unchanged.
pub fn transform(pixel: Colour, expr: &Expression) -> Colour {
    if !matches(pixel, &expr.from) {
        return pixel;
    }

    let derived = if expr.to.needs_derived() {
        Derived::of(pixel)
    } else {
        Derived::default()
    };

    Colour::new(
        produce(pixel.r, pixel, &derived, &expr.to.r),
        produce(pixel.g, pixel, &derived, &expr.to.g),
        produce(pixel.b, pixel, &derived, &expr.to.b),
        produce(pixel.a, pixel, &derived, &expr.to.a),
    )
}
