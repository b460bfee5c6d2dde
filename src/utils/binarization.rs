use crate::error::BinarizeError;
use crate::models::raster::{CHANNELS, check_layout};
use crate::models::{RasterImage, ThresholdConfig};
use crate::utils::luminance::rgba_luminance;
use rayon::prelude::*;

/// Output value for pixels at or below the threshold
pub const BLACK: u8 = 0;
/// Output value for pixels above the threshold
pub const WHITE: u8 = 255;

/// Threshold every RGBA pixel of `pixels` in place.
/// Alpha bytes are never written.
#[inline]
fn threshold_pixels(pixels: &mut [u8], threshold: u8) {
    let cutoff = threshold as f64;
    for px in pixels.chunks_exact_mut(CHANNELS) {
        // Strictly greater: a tie is black
        let v = if rgba_luminance(px) > cutoff { WHITE } else { BLACK };
        px[0] = v;
        px[1] = v;
        px[2] = v;
    }
}

/// Binarize a raw RGBA buffer into a newly allocated buffer
///
/// # Arguments
/// * `rgba` - RGBA bytes, exactly `width * height * 4` long
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `threshold` - Luminance cutoff; values strictly above it become white
///
/// # Returns
/// A buffer of the same length where R = G = B is 0 or 255 and alpha is copied
pub fn threshold_binarize_rgba(
    rgba: &[u8],
    width: usize,
    height: usize,
    threshold: u8,
) -> Result<Vec<u8>, BinarizeError> {
    check_layout(rgba, width, height)?;
    let mut out = rgba.to_vec();
    threshold_pixels(&mut out, threshold);
    Ok(out)
}

/// Binarize a raw RGBA buffer in place (no allocation)
///
/// The buffer is left untouched if the layout check fails.
pub fn threshold_binarize_rgba_into(
    rgba: &mut [u8],
    width: usize,
    height: usize,
    threshold: u8,
) -> Result<(), BinarizeError> {
    check_layout(rgba, width, height)?;
    threshold_pixels(rgba, threshold);
    Ok(())
}

/// Map an image to pure black/white by luminance, leaving the input intact
pub fn binarize(
    image: &RasterImage,
    threshold: ThresholdConfig,
) -> Result<RasterImage, BinarizeError> {
    let out = threshold_binarize_rgba(
        image.as_bytes(),
        image.width(),
        image.height(),
        threshold.value(),
    )?;
    RasterImage::new(image.width(), image.height(), out)
}

/// Binarize with a raw integer threshold, as read from flags or config
pub fn binarize_with(image: &RasterImage, threshold: i64) -> Result<RasterImage, BinarizeError> {
    let threshold = ThresholdConfig::new(threshold)?;
    binarize(image, threshold)
}

/// Destructive variant of [`binarize`] for callers that own the image
pub fn binarize_in_place(
    image: &mut RasterImage,
    threshold: ThresholdConfig,
) -> Result<(), BinarizeError> {
    let (width, height) = (image.width(), image.height());
    threshold_binarize_rgba_into(image.as_bytes_mut(), width, height, threshold.value())
}

// ============== Parallel Processing with Rayon ==============

/// Binarize using parallel processing
/// Processes rows in parallel; output is identical to [`binarize`]
pub fn binarize_parallel(
    image: &RasterImage,
    threshold: ThresholdConfig,
) -> Result<RasterImage, BinarizeError> {
    let (width, height) = (image.width(), image.height());
    check_layout(image.as_bytes(), width, height)?;

    let mut out = image.as_bytes().to_vec();
    let t = threshold.value();
    out.par_chunks_mut(width * CHANNELS)
        .for_each(|row| threshold_pixels(row, t));

    RasterImage::new(width, height, out)
}

/// True when every pixel satisfies R = G = B with a value of 0 or 255
pub fn is_binary(image: &RasterImage) -> bool {
    image
        .pixels()
        .all(|px| px[0] == px[1] && px[1] == px[2] && (px[0] == BLACK || px[0] == WHITE))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(v: u8, a: u8) -> [u8; 4] {
        [v, v, v, a]
    }

    #[test]
    fn test_reference_2x2() {
        let img = RasterImage::from_pixels(
            2,
            2,
            &[gray(255, 255), gray(0, 255), gray(200, 255), gray(100, 255)],
        )
        .unwrap();

        let out = binarize(&img, ThresholdConfig::default()).unwrap();
        let expected = RasterImage::from_pixels(
            2,
            2,
            &[gray(255, 255), gray(0, 255), gray(255, 255), gray(0, 255)],
        )
        .unwrap();
        assert_eq!(out, expected);
    }

    #[test]
    fn test_tie_is_black() {
        let img = RasterImage::from_pixels(2, 1, &[gray(180, 255), gray(181, 255)]).unwrap();
        let out = binarize(&img, ThresholdConfig::from(180)).unwrap();
        assert_eq!(out.pixel(0, 0), Some(gray(0, 255)));
        assert_eq!(out.pixel(1, 0), Some(gray(255, 255)));
    }

    #[test]
    fn test_alpha_preserved() {
        let img =
            RasterImage::from_pixels(3, 1, &[[250, 10, 40, 0], [12, 250, 99, 77], gray(255, 200)])
                .unwrap();
        let out = binarize(&img, ThresholdConfig::default()).unwrap();
        let alphas: Vec<u8> = out.pixels().map(|p| p[3]).collect();
        assert_eq!(alphas, vec![0, 77, 200]);
        assert!(is_binary(&out));
    }

    #[test]
    fn test_input_not_mutated() {
        let img = RasterImage::from_pixels(1, 1, &[[120, 130, 140, 255]]).unwrap();
        let before = img.clone();
        let _ = binarize(&img, ThresholdConfig::default()).unwrap();
        assert_eq!(img, before);
    }

    #[test]
    fn test_raw_buffer_length_mismatch() {
        let err = threshold_binarize_rgba(&[0u8; 15], 2, 2, 180).unwrap_err();
        assert!(matches!(err, BinarizeError::InvalidImage { len: 15, .. }));
    }

    #[test]
    fn test_in_place_untouched_on_error() {
        let mut buf = vec![200u8; 12];
        let before = buf.clone();
        assert!(threshold_binarize_rgba_into(&mut buf, 2, 2, 180).is_err());
        assert_eq!(buf, before);
    }

    #[test]
    fn test_in_place_matches_copy() {
        let img = RasterImage::from_pixels(
            2,
            2,
            &[[10, 200, 30, 1], [250, 250, 10, 2], [181, 181, 181, 3], [0, 0, 0, 4]],
        )
        .unwrap();
        let copied = binarize(&img, ThresholdConfig::default()).unwrap();
        let mut owned = img.clone();
        binarize_in_place(&mut owned, ThresholdConfig::default()).unwrap();
        assert_eq!(owned, copied);
    }

    #[test]
    fn test_binarize_with_rejects_out_of_range() {
        let img = RasterImage::filled(1, 1, gray(10, 255)).unwrap();
        assert_eq!(
            binarize_with(&img, 300).unwrap_err(),
            BinarizeError::InvalidArgument(300)
        );
        assert_eq!(
            binarize_with(&img, -5).unwrap_err(),
            BinarizeError::InvalidArgument(-5)
        );
        assert!(binarize_with(&img, 0).is_ok());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let (w, h) = (37, 23);
        let mut data = Vec::with_capacity(w * h * 4);
        for i in 0..w * h {
            data.extend_from_slice(&[
                (i * 7 % 256) as u8,
                (i * 13 % 256) as u8,
                (i * 29 % 256) as u8,
                (i % 256) as u8,
            ]);
        }
        let img = RasterImage::new(w, h, data).unwrap();
        for t in [0u8, 90, 180, 255] {
            let seq = binarize(&img, t.into()).unwrap();
            let par = binarize_parallel(&img, t.into()).unwrap();
            assert_eq!(seq, par, "threshold {}", t);
        }
    }

    #[test]
    fn test_threshold_255_is_all_black() {
        let img = RasterImage::filled(2, 2, gray(255, 255)).unwrap();
        let out = binarize(&img, ThresholdConfig::from(255)).unwrap();
        assert!(out.pixels().all(|p| p == gray(0, 255)));
    }

    #[test]
    fn test_is_binary() {
        let binary = RasterImage::from_pixels(2, 1, &[gray(0, 9), gray(255, 9)]).unwrap();
        assert!(is_binary(&binary));
        let not = RasterImage::from_pixels(1, 1, &[[255, 0, 255, 255]]).unwrap();
        assert!(!is_binary(&not));
    }
}
