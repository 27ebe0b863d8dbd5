//! Core primitive types for storage overlay nodes.
//!
//! - [`NodeId`] - fixed-length peer identity
//! - [`NodeIdList`] - ordered identity collection used by lookup batches
//!
//! Kept separate from the protocol crates so the directory and the wire layer
//! can share identities without depending on each other.

mod error;
mod node_id;

pub use error::NodeIdError;
pub use node_id::{NODE_ID_SIZE, NodeId, NodeIdList};
