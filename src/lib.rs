//! imgmap - rule-based image colour remapping
//!
//! A small rule language for rewriting the pixels of an image. Each
//! expression pairs a match rule with a produce rule; a program is a list of
//! expressions applied in order, each one seeing the previous one's output.
//!
//! ```
//! use imgmap::{Executor, Program};
//! use image::{Rgba, RgbaImage};
//!
//! let program = Program::parse("inline", ">200 ? ? ?  0 0 0 ?");
//! let image = RgbaImage::from_pixel(2, 2, Rgba([250, 10, 10, 255]));
//! let execution = Executor::new().run(&program, image).unwrap();
//! assert_eq!(execution.image.get_pixel(0, 0).0, [0, 0, 0, 255]);
//! ```

pub mod cli;
pub mod codec;
pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod parser;
pub mod types;
pub mod validation;

pub use codec::{decode, EncoderOptions, Format, FormatRegistry};
pub use config::{Config, CONFIG_FILENAME};
pub use engine::{apply, apply_parallel, transform, Buffers, Execution, Executor, PixelBuffer};
pub use error::{MapError, Result};
pub use parser::{parse_channel, parse_expression, parse_rule, LineOutcome, Program, ProgramLine};
pub use types::{
    BuiltinPresets, Channel, Colour, Expression, NamedRef, Number, Operator, Preset, Rule,
};
pub use validation::{check_program, Diagnostic, Severity, ValidationResult};
