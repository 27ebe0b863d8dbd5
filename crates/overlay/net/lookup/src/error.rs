//! Error types for lookup batch conversion and framing.

use core::{convert::Infallible, fmt};

use overlay_primitives::NodeIdError;

/// A node id that failed to convert, tagged with its batch position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("node id at index {index}: {source}")]
pub struct ConversionError {
    /// Position of the record within the batch.
    pub index: usize,
    pub source: NodeIdError,
}

/// Every failed slot of a single batch conversion.
///
/// Never empty: [`combine`](Self::combine) returns `None` when there is
/// nothing to report. Failures are ordered by ascending index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateConversionError {
    failures: Vec<ConversionError>,
}

impl AggregateConversionError {
    /// Fold positioned failures into one error, or `None` if there are none.
    pub fn combine(failures: impl IntoIterator<Item = ConversionError>) -> Option<Self> {
        let mut failures: Vec<_> = failures.into_iter().collect();
        if failures.is_empty() {
            return None;
        }
        failures.sort_by_key(|failure| failure.index);
        Some(Self { failures })
    }

    /// Number of failed slots.
    pub fn count(&self) -> usize {
        self.failures.len()
    }

    pub fn failures(&self) -> &[ConversionError] {
        &self.failures
    }

    /// Positions of the failed slots, ascending.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.failures.iter().map(|failure| failure.index)
    }

    pub fn into_failures(self) -> Vec<ConversionError> {
        self.failures
    }
}

impl fmt::Display for AggregateConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} node id conversion(s) failed", self.failures.len())?;
        for (i, failure) in self.failures.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}[{}] {}", failure.index, failure.source)?;
        }
        Ok(())
    }
}

impl std::error::Error for AggregateConversionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.failures
            .first()
            .map(|failure| failure as &(dyn std::error::Error + 'static))
    }
}

/// Errors from encoding or decoding framed lookup batches.
#[derive(Debug, thiserror::Error)]
pub enum LookupCodecError {
    /// Malformed protobuf or frame.
    #[error("protocol error: {0}")]
    Protocol(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A request carried an identity that is not a node id.
    #[error("invalid request at index {index}: {source}")]
    InvalidRequest { index: usize, source: NodeIdError },
    #[error("batch of {len} exceeds limit of {max}")]
    BatchTooLarge { len: usize, max: usize },
}

impl From<quick_protobuf_codec::Error> for LookupCodecError {
    fn from(error: quick_protobuf_codec::Error) -> Self {
        Self::Protocol(error.to_string())
    }
}

impl From<Infallible> for LookupCodecError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}
