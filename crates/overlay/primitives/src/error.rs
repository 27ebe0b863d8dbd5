//! Error types for node identity parsing.

/// Errors from [`NodeId`](crate::NodeId) parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NodeIdError {
    /// Raw identity bytes are not a well-formed node id.
    #[error("invalid node id format: expected {expected} bytes, got {actual}")]
    InvalidFormat { expected: usize, actual: usize },
}
