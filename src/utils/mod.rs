//! Utility functions for image processing
//!
//! This module provides the pixel-level pieces of the coloring page pipeline:
//! - Luminance (RGB to perceptual luma)
//! - Binarization (fixed-threshold black/white mapping, sequential and parallel)

pub mod binarization;
pub mod luminance;
