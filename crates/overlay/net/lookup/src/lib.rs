//! Lookup protocol translation for the storage overlay.
//!
//! Sits between the lookup wire messages and the node directory:
//!
//! - [`to_request_batch`] / [`from_response_batch`] convert id lists to
//!   request batches and response batches back to node records
//! - [`node_ids_from_nodes`] recovers ids from records, reporting every
//!   malformed slot through one [`AggregateConversionError`]
//! - [`Node::snapshot`] and [`SharedNode`] hand records out of the directory
//!   without sharing them with status trackers
//! - [`LookupRequestCodec`] / [`LookupResponseCodec`] frame batches for a
//!   stream transport
//!
//! # Positional correlation
//!
//! Response `i` answers request `i`. Absent records and ids that fail to
//! parse keep their slot (as `None` or [`NodeId::ZERO`](overlay_primitives::NodeId::ZERO)),
//! so results can always be zipped with the request list.

mod batch;
mod codec;
mod config;
mod error;
mod message;
mod metrics;
mod node;
mod shared;

pub use batch::{from_response_batch, node_ids_from_nodes, to_request_batch, to_request_batches};
pub use codec::{BatchLen, LookupRequestCodec, LookupResponseCodec, ProtoCodec};
pub use config::{DEFAULT_MAX_BATCH_SIZE, DEFAULT_MAX_MESSAGE_SIZE, LookupConfig};
pub use error::{AggregateConversionError, ConversionError, LookupCodecError};
pub use message::{LookupRequest, LookupRequests, LookupResponse, LookupResponses};
pub use node::{Node, NodeAddress, NodeMetadata, NodeRestrictions, NodeTransport, NodeType};
pub use shared::{SharedNode, snapshot_all};

mod proto {
    include!(concat!(env!("OUT_DIR"), "/proto/mod.rs"));
}
