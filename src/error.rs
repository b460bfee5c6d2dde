use thiserror::Error;

/// Failures of the binarization core. Both are raised before any pixel is written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BinarizeError {
    /// Buffer length does not equal `width * height * 4`, or a dimension is zero
    #[error("Invalid image: {width}x{height} needs {expected} bytes, got {len}")]
    InvalidImage {
        /// Declared width in pixels
        width: usize,
        /// Declared height in pixels
        height: usize,
        /// Required buffer length
        expected: usize,
        /// Actual buffer length
        len: usize,
    },

    /// Threshold outside `0..=255`
    #[error("Invalid threshold: {0} (expected 0-255)")]
    InvalidArgument(i64),
}

/// Failures of the fetch / decode / encode collaborators around the core.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Prompt was blank after trimming
    #[error("Prompt is empty")]
    EmptyPrompt,

    /// Transport failure or non-success HTTP status
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Fetched bytes are not a decodable image
    #[error("Decode error: {0}")]
    Decode(String),

    /// PNG encoding failed
    #[error("Encode error: {0}")]
    Encode(String),

    /// Reading a source file or writing the page failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The binarizer rejected its input
    #[error(transparent)]
    Binarize(#[from] BinarizeError),
}

impl From<reqwest::Error> for PipelineError {
    fn from(e: reqwest::Error) -> Self {
        PipelineError::Fetch(e.to_string())
    }
}
