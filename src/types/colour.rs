//! Colour type.

use image::Rgba;

/// An RGBA pixel value, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    /// Create a new colour from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new opaque colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Fully transparent colour.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Convert to RGBA array.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Smallest of the three colour channels.
    pub fn min_rgb(self) -> u8 {
        self.r.min(self.g).min(self.b)
    }

    /// Largest of the three colour channels.
    pub fn max_rgb(self) -> u8 {
        self.r.max(self.g).max(self.b)
    }
}

impl From<[u8; 4]> for Colour {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

impl From<Rgba<u8>> for Colour {
    fn from(px: Rgba<u8>) -> Self {
        Self::from(px.0)
    }
}

impl From<Colour> for Rgba<u8> {
    fn from(c: Colour) -> Self {
        Rgba(c.to_rgba())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_max_rgb_ignore_alpha() {
        let c = Colour::new(10, 200, 30, 0);
        assert_eq!(c.min_rgb(), 10);
        assert_eq!(c.max_rgb(), 200);
    }

    #[test]
    fn test_rgba_conversion() {
        let c = Colour::new(1, 2, 3, 4);
        let px: Rgba<u8> = c.into();
        assert_eq!(px.0, [1, 2, 3, 4]);
        assert_eq!(Colour::from(px), c);
    }
}
