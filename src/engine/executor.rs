//! Program execution.
//!
//! Expressions run in program order. Each one reads the current image and
//! writes a scratch image of the same size; the two are swapped afterwards so
//! the next expression sees the previous one's output. Rejected lines leave
//! both buffers untouched.

use image::RgbaImage;

use crate::error::Result;
use crate::parser::{LineOutcome, Program, ProgramLine};
use crate::types::Expression;

use super::apply::{apply, apply_parallel};

/// The two live image buffers of a run.
#[derive(Debug)]
pub struct Buffers {
    current: RgbaImage,
    scratch: RgbaImage,
}

impl Buffers {
    /// Take ownership of the input image and allocate a matching scratch buffer.
    pub fn new(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            current: image,
            scratch: RgbaImage::new(width, height),
        }
    }

    /// The image the next expression reads.
    pub fn current(&self) -> &RgbaImage {
        &self.current
    }

    fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.scratch);
    }

    /// Give up the scratch buffer and return the result.
    pub fn into_current(self) -> RgbaImage {
        self.current
    }
}

/// Outcome of running a program.
#[derive(Debug)]
pub struct Execution<'p> {
    /// The final image.
    pub image: RgbaImage,
    /// Number of expressions applied.
    pub applied: usize,
    /// Non-blank lines skipped because they were not expressions.
    pub skipped: usize,
    /// Lines that failed to parse or validate.
    pub rejected: Vec<&'p ProgramLine>,
}

/// Runs programs against images.
#[derive(Debug, Clone, Copy)]
pub struct Executor {
    parallel: bool,
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}

impl Executor {
    /// An executor that evaluates rows in parallel.
    pub fn new() -> Self {
        Self { parallel: true }
    }

    /// Choose between row-parallel and single-threaded evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Run every line of `program` against `image`.
    pub fn run<'p>(&self, program: &'p Program, image: RgbaImage) -> Result<Execution<'p>> {
        let mut buffers = Buffers::new(image);
        let mut applied = 0;
        let mut skipped = 0;
        let mut rejected = Vec::new();

        for line in program.lines() {
            match &line.outcome {
                LineOutcome::Expression(expr) => {
                    self.step(expr, &mut buffers)?;
                    applied += 1;
                }
                LineOutcome::Ignored { tokens } => {
                    if *tokens > 0 {
                        skipped += 1;
                    }
                }
                LineOutcome::Rejected(_) => rejected.push(line),
            }
        }

        Ok(Execution {
            image: buffers.into_current(),
            applied,
            skipped,
            rejected,
        })
    }

    /// Apply one expression and make its output the current image.
    pub fn step(&self, expr: &Expression, buffers: &mut Buffers) -> Result<()> {
        if self.parallel {
            apply_parallel(expr, &buffers.current, &mut buffers.scratch)?;
        } else {
            apply(expr, &buffers.current, &mut buffers.scratch)?;
        }
        buffers.swap();
        Ok(())
    }
}
