//! Decoding fetched bytes into [`RasterImage`] and encoding pages as PNG

use crate::error::PipelineError;
use crate::models::RasterImage;
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use std::path::Path;

/// Decode any supported image format into an RGBA raster
pub fn decode(bytes: &[u8]) -> Result<RasterImage, PipelineError> {
    let img = image::load_from_memory(bytes).map_err(|e| PipelineError::Decode(e.to_string()))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(RasterImage::new(
        width as usize,
        height as usize,
        rgba.into_raw(),
    )?)
}

/// Encode a raster as an RGBA PNG
pub fn encode_png(image: &RasterImage) -> Result<Vec<u8>, PipelineError> {
    let width = u32::try_from(image.width())
        .map_err(|_| PipelineError::Encode(format!("width {} too large", image.width())))?;
    let height = u32::try_from(image.height())
        .map_err(|_| PipelineError::Encode(format!("height {} too large", image.height())))?;

    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(image.as_bytes(), width, height, ColorType::Rgba8)
        .map_err(|e| PipelineError::Encode(e.to_string()))?;
    Ok(out)
}

/// Write already-encoded PNG bytes to `path`
pub fn save_png<P: AsRef<Path>>(path: P, png: &[u8]) -> Result<(), PipelineError> {
    std::fs::write(path.as_ref(), png)?;
    tracing::info!(path = %path.as_ref().display(), bytes = png.len(), "Saved coloring page");
    Ok(())
}
