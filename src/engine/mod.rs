//! The rule engine.
//!
//! Evaluates expressions against pixels and images, and runs whole
//! programs with the current/scratch buffer pipeline.

mod apply;
mod executor;
mod pixel;
pub mod srgb;

pub use apply::{apply, apply_parallel, PixelBuffer};
pub use executor::{Buffers, Execution, Executor};
pub use pixel::{matches, named_value, produce, transform, Derived};
