//! Fetch → decode → binarize → encode, plus the session state around it

use crate::codec;
use crate::config::{Config, parallel_min_rows};
use crate::error::PipelineError;
use crate::models::{RasterImage, RecentPage, RecentPages, ThresholdConfig};
use crate::prompt;
use crate::source::{ImageSource, PageRequest};
use crate::utils::binarization::{binarize, binarize_parallel};
use std::fmt;

/// Progress of a single generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Building the request
    Generating,
    /// Waiting on the image source
    WaitingForImage,
    /// Decoding and thresholding
    CleaningUp,
    /// Page is ready
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Stage::Generating => "Generating image...",
            Stage::WaitingForImage => "Waiting for AI...",
            Stage::CleaningUp => "Cleaning up lines...",
            Stage::Done => "Done",
        };
        f.write_str(text)
    }
}

/// A finished coloring page
#[derive(Debug, Clone)]
pub struct ColoringPage {
    /// Prompt the page was generated from
    pub prompt: String,
    /// Seed used for the request, if fetched remotely
    pub seed: Option<u64>,
    /// Binarized pixels
    pub image: RasterImage,
    /// PNG encoding of `image`
    pub png: Vec<u8>,
}

impl ColoringPage {
    /// Suggested file name for saving this page
    pub fn file_name(&self) -> String {
        prompt::download_file_name(&self.prompt)
    }
}

/// Decode raw bytes, threshold them, and encode the result as PNG.
///
/// Tall images are split across the rayon pool by rows.
pub fn process_bytes(
    bytes: &[u8],
    threshold: ThresholdConfig,
) -> Result<(RasterImage, Vec<u8>), PipelineError> {
    let decoded = codec::decode(bytes)?;
    let binary = if decoded.height() >= parallel_min_rows() {
        binarize_parallel(&decoded, threshold)?
    } else {
        binarize(&decoded, threshold)?
    };
    let png = codec::encode_png(&binary)?;
    Ok((binary, png))
}

/// Generates pages from a source and remembers recent ones
pub struct Generator<S: ImageSource> {
    source: S,
    config: Config,
    history: RecentPages,
    last_prompt: Option<String>,
}

impl<S: ImageSource> Generator<S> {
    /// Create a generator with an empty history
    pub fn new(source: S, config: Config) -> Self {
        Self {
            source,
            config,
            history: RecentPages::new(),
            last_prompt: None,
        }
    }

    /// Generate a page for `prompt` with a fresh seed
    pub fn generate(&mut self, prompt: &str) -> Result<ColoringPage, PipelineError> {
        let request = PageRequest::new(prompt, &self.config)?;
        self.generate_request(request)
    }

    /// Generate a page for a fully specified request
    pub fn generate_request(&mut self, request: PageRequest) -> Result<ColoringPage, PipelineError> {
        tracing::info!(prompt = %request.prompt, stage = %Stage::Generating);
        self.last_prompt = Some(request.prompt.clone());

        tracing::info!(stage = %Stage::WaitingForImage);
        let bytes = self.source.fetch(&request).inspect_err(|e| {
            tracing::error!(error = %e, "Generation failed");
        })?;

        tracing::info!(stage = %Stage::CleaningUp, bytes = bytes.len());
        let (image, png) = process_bytes(&bytes, self.config.threshold).inspect_err(|e| {
            tracing::error!(error = %e, "Post-processing failed");
        })?;

        tracing::info!(
            stage = %Stage::Done,
            width = image.width(),
            height = image.height()
        );

        self.history.push(RecentPage {
            prompt: request.prompt.clone(),
            png: png.clone(),
        });

        Ok(ColoringPage {
            prompt: request.prompt,
            seed: Some(request.seed),
            image,
            png,
        })
    }

    /// Repeat the last prompt with a new seed; `None` if nothing was generated yet
    pub fn regenerate(&mut self) -> Option<Result<ColoringPage, PipelineError>> {
        let prompt = self.last_prompt.clone()?;
        Some(self.generate(&prompt))
    }

    /// Recently generated pages, newest first
    pub fn history(&self) -> &RecentPages {
        &self.history
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
