//! Codec configuration.

/// Configuration for a compression session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecParams {
    /// Check that every derived code table is prefix-free and complete
    /// (default: on in debug builds)
    pub verify_codes: bool,
    /// Minimum input length, in symbols, for parallel frequency counting.
    /// Only consulted when the `rayon` feature is enabled.
    pub parallel_threshold: usize,
}

impl Default for CodecParams {
    fn default() -> Self {
        Self {
            verify_codes: cfg!(debug_assertions),
            parallel_threshold: 1 << 20,
        }
    }
}

impl CodecParams {
    /// Creates parameters with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables the prefix-free check after code derivation.
    pub fn with_verify_codes(mut self, verify: bool) -> Self {
        self.verify_codes = verify;
        self
    }

    /// Sets the input length at which frequency counting goes parallel.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold.max(1);
        self
    }
}
