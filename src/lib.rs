//! coloring_page - turn text prompts into printable coloring pages
//!
//! Fetches a generated picture from a text-to-image endpoint, decodes it, and
//! maps every pixel to pure black or white with a fixed luminance threshold so
//! the result prints as clean line art.
//!
//! The binarizer itself is a pure function over RGBA buffers and can be used
//! on its own:
//!
//! ```
//! use coloring_page::{RasterImage, ThresholdConfig, binarize};
//!
//! let img = RasterImage::from_pixels(2, 1, &[[200, 200, 200, 255], [100, 100, 100, 255]])?;
//! let out = binarize(&img, ThresholdConfig::default())?;
//! assert_eq!(out.pixel(0, 0), Some([255, 255, 255, 255]));
//! assert_eq!(out.pixel(1, 0), Some([0, 0, 0, 255]));
//! # Ok::<(), coloring_page::BinarizeError>(())
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// PNG/JPEG/WebP decoding and PNG encoding
pub mod codec;
/// Environment configuration
pub mod config;
/// Error types
pub mod error;
/// Core data structures (RasterImage, ThresholdConfig, history)
pub mod models;
/// Generation pipeline and session state
pub mod pipeline;
/// Prompt template, suggestions, and file naming
pub mod prompt;
/// Image sources (HTTP endpoint, local file)
pub mod source;
/// Helpers for the command-line tool
pub mod tools;
/// Pixel-level functions (luminance, binarization)
pub mod utils;

pub use config::Config;
pub use error::{BinarizeError, PipelineError};
pub use models::{RasterImage, RecentPage, RecentPages, ThresholdConfig};
pub use pipeline::{ColoringPage, Generator, Stage, process_bytes};
pub use source::{FileSource, ImageSource, PageRequest, PollinationsSource};
pub use utils::binarization::{
    binarize, binarize_in_place, binarize_parallel, binarize_with, is_binary,
};
pub use utils::luminance::luminance;
