//! Applying an expression across an image buffer.

use image::RgbaImage;
use rayon::prelude::*;

use crate::error::{MapError, Result};
use crate::types::{Colour, Expression};

use super::pixel::transform;

/// A 2-D RGBA pixel buffer the engine can read and write.
pub trait PixelBuffer {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn get(&self, x: u32, y: u32) -> Colour;
    fn set(&mut self, x: u32, y: u32, colour: Colour);

    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }
}

impl PixelBuffer for RgbaImage {
    fn width(&self) -> u32 {
        RgbaImage::width(self)
    }

    fn height(&self) -> u32 {
        RgbaImage::height(self)
    }

    fn get(&self, x: u32, y: u32) -> Colour {
        Colour::from(*self.get_pixel(x, y))
    }

    fn set(&mut self, x: u32, y: u32, colour: Colour) {
        self.put_pixel(x, y, colour.into());
    }
}

/// Apply an expression to every pixel of `src`, writing into `dst`.
///
/// Matching pixels are recoloured, all others are copied verbatim. `dst` is
/// never read, so its previous contents do not matter.
pub fn apply<S, D>(expr: &Expression, src: &S, dst: &mut D) -> Result<()>
where
    S: PixelBuffer + ?Sized,
    D: PixelBuffer + ?Sized,
{
    check_dimensions(src.dimensions(), dst.dimensions())?;

    for y in 0..src.height() {
        for x in 0..src.width() {
            dst.set(x, y, transform(src.get(x, y), expr));
        }
    }

    Ok(())
}

/// Same as [`apply`], evaluated one row per task.
pub fn apply_parallel(expr: &Expression, src: &RgbaImage, dst: &mut RgbaImage) -> Result<()> {
    check_dimensions(src.dimensions(), dst.dimensions())?;

    let row = src.width() as usize * 4;
    if row == 0 {
        return Ok(());
    }

    dst.par_chunks_mut(row)
        .zip(src.par_chunks(row))
        .for_each(|(out_row, in_row)| {
            for (out, px) in out_row.chunks_exact_mut(4).zip(in_row.chunks_exact(4)) {
                let colour = transform(Colour::new(px[0], px[1], px[2], px[3]), expr);
                out.copy_from_slice(&colour.to_rgba());
            }
        });

    Ok(())
}

fn check_dimensions(src: (u32, u32), dst: (u32, u32)) -> Result<()> {
    if src != dst {
        return Err(MapError::Apply {
            message: format!(
                "destination is {}x{} but source is {}x{}",
                dst.0, dst.1, src.0, src.1
            ),
        });
    }
    Ok(())
}
