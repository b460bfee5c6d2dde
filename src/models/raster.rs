use crate::error::BinarizeError;

/// Bytes per RGBA pixel
pub const CHANNELS: usize = 4;

/// RGBA raster stored as a flat row-major byte buffer.
///
/// The buffer always holds exactly `width * height * 4` bytes; every
/// constructor checks this, so a `RasterImage` in hand is always well formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl RasterImage {
    /// Wrap an RGBA buffer, rejecting zero dimensions and length mismatches
    pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self, BinarizeError> {
        check_layout(&pixels, width, height)?;
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create an image where every pixel has the same RGBA value
    pub fn filled(width: usize, height: usize, rgba: [u8; 4]) -> Result<Self, BinarizeError> {
        let count = width
            .checked_mul(height)
            .filter(|n| n.checked_mul(CHANNELS).is_some());
        let Some(count) = count else {
            return Err(BinarizeError::InvalidImage {
                width,
                height,
                expected: usize::MAX,
                len: 0,
            });
        };
        Self::new(width, height, rgba.repeat(count))
    }

    /// Build an image from a list of RGBA pixels in row-major order
    pub fn from_pixels(
        width: usize,
        height: usize,
        pixels: &[[u8; 4]],
    ) -> Result<Self, BinarizeError> {
        Self::new(width, height, pixels.concat())
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of pixels
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Raw RGBA bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Consume the image and return its RGBA bytes
    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }

    /// RGBA value at (x, y), or `None` when out of bounds
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * CHANNELS;
        Some([
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ])
    }

    /// Iterate over pixels as 4-byte chunks
    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> {
        self.pixels.chunks_exact(CHANNELS)
    }
}

/// Validate that `pixels` is an RGBA buffer for a `width` x `height` image
pub(crate) fn check_layout(pixels: &[u8], width: usize, height: usize) -> Result<(), BinarizeError> {
    let expected = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(CHANNELS));

    match expected {
        Some(expected) if width > 0 && height > 0 && pixels.len() == expected => Ok(()),
        _ => Err(BinarizeError::InvalidImage {
            width,
            height,
            expected: expected.unwrap_or(usize::MAX),
            len: pixels.len(),
        }),
    }
}
