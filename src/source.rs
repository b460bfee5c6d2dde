//! Image sources: where the unprocessed picture comes from

use crate::config::Config;
use crate::error::PipelineError;
use crate::prompt;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::path::PathBuf;
use std::time::Duration;

/// Characters escaped in the prompt path segment (everything but `A-Za-z0-9-_.!~*'()`)
const PROMPT_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// One generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Trimmed user prompt, before enhancement
    pub prompt: String,
    /// Requested width in pixels
    pub width: u32,
    /// Requested height in pixels
    pub height: u32,
    /// Uniqueness token so repeated prompts produce new images
    pub seed: u64,
    /// Generator model name
    pub model: String,
}

impl PageRequest {
    /// Build a request for `prompt` using size and model from `config`.
    /// The seed is the current Unix time in milliseconds.
    pub fn new(prompt: &str, config: &Config) -> Result<Self, PipelineError> {
        let prompt = prompt::normalize(prompt)?;
        Ok(Self {
            prompt: prompt.to_string(),
            width: config.width,
            height: config.height,
            seed: current_seed(),
            model: config.model.clone(),
        })
    }

    /// Replace the seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Prompt after the line-art template has been applied
    pub fn enhanced_prompt(&self) -> String {
        prompt::enhance(&self.prompt)
    }
}

fn current_seed() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default()
}

/// Something that can produce encoded image bytes for a request
pub trait ImageSource {
    /// Fetch the raw (still encoded) image for `request`
    fn fetch(&self, request: &PageRequest) -> Result<Vec<u8>, PipelineError>;
}

/// Pollinations-style text-to-image HTTP endpoint
pub struct PollinationsSource {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl PollinationsSource {
    /// Create a source for `endpoint` (scheme + host, optional path prefix)
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, PipelineError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("coloring_page/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Create a source from endpoint and timeout settings
    pub fn from_config(config: &Config) -> Result<Self, PipelineError> {
        Self::new(&config.endpoint, config.timeout)
    }

    /// Full request URL for `request`
    pub fn locator(&self, request: &PageRequest) -> String {
        format!(
            "{}/prompt/{}?width={}&height={}&seed={}&nologo=true&model={}",
            self.endpoint,
            utf8_percent_encode(&request.enhanced_prompt(), PROMPT_SEGMENT),
            request.width,
            request.height,
            request.seed,
            utf8_percent_encode(&request.model, PROMPT_SEGMENT),
        )
    }
}

impl ImageSource for PollinationsSource {
    fn fetch(&self, request: &PageRequest) -> Result<Vec<u8>, PipelineError> {
        let url = self.locator(request);
        tracing::debug!(url = %url, seed = request.seed, "Requesting image");

        let response = self.client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = %status, "Image endpoint returned an error");
            return Err(PipelineError::Fetch(format!("HTTP {}", status)));
        }

        let bytes = response.bytes()?;
        tracing::debug!(bytes = bytes.len(), "Image received");
        Ok(bytes.to_vec())
    }
}

/// Reads an image from disk, ignoring the request; used for offline runs
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Source that always returns the contents of `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ImageSource for FileSource {
    fn fetch(&self, _request: &PageRequest) -> Result<Vec<u8>, PipelineError> {
        Ok(std::fs::read(&self.path)?)
    }
}
