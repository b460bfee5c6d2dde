//! Perceptual luma of an RGB triple
//! L = 0.299*R + 0.587*G + 0.114*B
//!
//! Evaluated left to right in `f64` with no gamma correction and no rounding,
//! so results match other IEEE-754 double implementations bit for bit.
//! Integer approximations such as `(76*R + 150*G + 29*B) >> 8` are not
//! interchangeable here: they move pixels across the threshold.

/// Red weight
pub const COEF_R: f64 = 0.299;
/// Green weight
pub const COEF_G: f64 = 0.587;
/// Blue weight
pub const COEF_B: f64 = 0.114;

/// Luminance of a single pixel, in `0.0..=255.0`
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> f64 {
    COEF_R * r as f64 + COEF_G * g as f64 + COEF_B * b as f64
}

/// Luminance of the first three channels of an RGBA pixel (alpha ignored)
#[inline]
pub fn rgba_luminance(px: &[u8]) -> f64 {
    luminance(px[0], px[1], px[2])
}
