use crate::error::BinarizeError;

/// Luminance cutoff used when none is configured
pub const DEFAULT_THRESHOLD: u8 = 180;

/// Fixed luminance threshold applied identically to every pixel.
///
/// Pixels with luminance strictly greater than the threshold become white;
/// everything else, including exact ties, becomes black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ThresholdConfig {
    threshold: u8,
}

impl ThresholdConfig {
    /// Build from an unchecked integer, failing outside `0..=255`
    pub fn new(threshold: i64) -> Result<Self, BinarizeError> {
        u8::try_from(threshold)
            .map(Self::from)
            .map_err(|_| BinarizeError::InvalidArgument(threshold))
    }

    /// Threshold value
    pub fn value(&self) -> u8 {
        self.threshold
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl From<u8> for ThresholdConfig {
    fn from(threshold: u8) -> Self {
        Self { threshold }
    }
}
