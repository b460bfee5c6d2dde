use crate::codec;
use crate::error::PipelineError;
use crate::models::RasterImage;
use crate::utils::binarization::BLACK;
use std::path::Path;

/// Load an image file as an RGBA raster.
pub fn load_rgba<P: AsRef<Path>>(path: P) -> Result<RasterImage, PipelineError> {
    let bytes = std::fs::read(path)?;
    codec::decode(&bytes)
}

/// Black/white pixel counts of a binarized raster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryStats {
    /// Pixels whose red channel is black
    pub black_pixels: usize,
    /// Total pixels
    pub total_pixels: usize,
    /// `black_pixels / total_pixels`
    pub black_ratio: f64,
}

/// Count black pixels in a binarized raster.
pub fn binary_stats(image: &RasterImage) -> BinaryStats {
    let total_pixels = image.pixel_count();
    let black_pixels = image.pixels().filter(|px| px[0] == BLACK).count();
    let black_ratio = if total_pixels == 0 {
        0.0
    } else {
        black_pixels as f64 / total_pixels as f64
    };
    BinaryStats {
        black_pixels,
        total_pixels,
        black_ratio,
    }
}
