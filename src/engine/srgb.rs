//! sRGB transfer functions and perceptual luminosity.
//!
//! Luminosity has to be computed on linear light: decode each channel with
//! the inverse sRGB transfer function, take the weighted sum, then encode
//! the result again. Weighting the encoded values directly is off by up to
//! 20%.

use palette::{LinSrgb, Srgb};

use crate::types::Colour;

/// Rec. 709 / sRGB luminance weights.
pub const RED_WEIGHT: f64 = 0.212655;
pub const GREEN_WEIGHT: f64 = 0.715158;
pub const BLUE_WEIGHT: f64 = 0.072187;

/// Decode an 8-bit sRGB channel to linear light in `[0, 1]`.
pub fn linearize(value: u8) -> f64 {
    let v = f64::from(value) / 255.0;
    let lin: LinSrgb<f64> = Srgb::new(v, v, v).into_linear();
    lin.red
}

/// Encode linear light back to an 8-bit sRGB channel, rounding to nearest.
pub fn encode(linear: f64) -> u8 {
    let linear = linear.clamp(0.0, 1.0);
    let srgb: Srgb<f64> = Srgb::from_linear(LinSrgb::new(linear, linear, linear));
    (srgb.red * 255.0 + 0.5).clamp(0.0, 255.0) as u8
}

/// Gamma-correct luminosity of a pixel. Alpha is ignored.
pub fn luminosity(c: Colour) -> u8 {
    encode(
        RED_WEIGHT * linearize(c.r)
            + GREEN_WEIGHT * linearize(c.g)
            + BLUE_WEIGHT * linearize(c.b),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inv_gamma(c: u8) -> f64 {
        let c = f64::from(c) / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }

    fn gamma(v: f64) -> u8 {
        let v = if v <= 0.0031308 {
            v * 12.92
        } else {
            1.055 * v.powf(1.0 / 2.4) - 0.055
        };
        (v * 255.0 + 0.5) as u8
    }

    #[test]
    fn test_endpoints() {
        assert_eq!(luminosity(Colour::WHITE), 255);
        assert_eq!(luminosity(Colour::BLACK), 0);
        assert_eq!(linearize(0), 0.0);
        assert!((linearize(255) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_gray_is_fixed_point() {
        for v in [1u8, 17, 64, 128, 200, 254] {
            assert_eq!(luminosity(Colour::rgb(v, v, v)), v, "gray {}", v);
        }
    }

    #[test]
    fn test_matches_reference_formula() {
        for r in (0..=255u16).step_by(3) {
            for g in (0..=255u16).step_by(3) {
                for b in (0..=255u16).step_by(3) {
                    let (r, g, b) = (r as u8, g as u8, b as u8);
                    let expected = gamma(
                        RED_WEIGHT * inv_gamma(r)
                            + GREEN_WEIGHT * inv_gamma(g)
                            + BLUE_WEIGHT * inv_gamma(b),
                    );
                    let got = luminosity(Colour::rgb(r, g, b));
                    assert_eq!(got, expected, "({}, {}, {})", r, g, b);
                }
            }
        }
    }

    #[test]
    fn test_differs_from_naive_weighting() {
        // Pure green: naive weighting of encoded values gives 182.
        let naive = (0.715158 * 255.0_f64).round() as u8;
        let lum = luminosity(Colour::rgb(0, 255, 0));
        assert_eq!(naive, 182);
        assert_eq!(lum, 220);
    }

    #[test]
    fn test_alpha_ignored() {
        assert_eq!(
            luminosity(Colour::new(30, 60, 90, 0)),
            luminosity(Colour::new(30, 60, 90, 255))
        );
    }
}
