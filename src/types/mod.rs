//! Core domain types for imgmap.
//!
//! This module contains the fundamental types of the rule language:
//! - `Colour` - RGBA pixel values
//! - `Channel` - wildcard, named reference, or qualified number
//! - `Rule` / `Expression` - four-channel tuples and match/produce pairs
//! - `Preset` - named programs built in code

mod channel;
mod colour;
mod preset;
mod rule;

pub use channel::{Channel, NamedRef, Number, Operator};
pub use colour::Colour;
pub use preset::{BuiltinPresets, Preset};
pub use rule::{Expression, Rule};
