//! Limits applied when framing lookup batches.

/// Default maximum encoded message size (32 KiB).
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 32 * 1024;

/// Default maximum number of entries in one batch.
pub const DEFAULT_MAX_BATCH_SIZE: usize = 30;

/// Lookup framing configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct LookupConfig {
    /// Largest encoded frame accepted or produced, in bytes.
    pub max_message_size: usize,
    /// Largest number of requests (or responses) in one batch. Zero is
    /// read as one.
    pub max_batch_size: usize,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }
}

impl LookupConfig {
    pub fn with_max_message_size(mut self, max_message_size: usize) -> Self {
        self.max_message_size = max_message_size;
        self
    }

    pub fn with_max_batch_size(mut self, max_batch_size: usize) -> Self {
        self.max_batch_size = max_batch_size;
        self
    }

    /// Effective batch limit, never below one.
    pub fn batch_limit(&self) -> usize {
        self.max_batch_size.max(1)
    }
}
