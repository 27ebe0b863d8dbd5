//! Conversions between node id lists, lookup batches and node records.
//!
//! All functions here are pure and keep positional correlation: output slot
//! `i` always belongs to input slot `i`.

use overlay_primitives::{NodeId, NodeIdList};
use tracing::{debug, trace};

use crate::{
    AggregateConversionError, ConversionError, LookupRequest, LookupRequests, LookupResponses,
    Node,
};

/// Build one lookup request per id, in order.
pub fn to_request_batch(ids: &[NodeId]) -> LookupRequests {
    let requests: Vec<_> = ids.iter().copied().map(LookupRequest::new).collect();
    trace!(count = requests.len(), "built lookup request batch");
    LookupRequests { requests }
}

/// Split `ids` into consecutive request batches of at most `max_batch_size`.
///
/// A limit of zero is treated as one, matching [`crate::LookupConfig::batch_limit`].
/// Concatenating the returned batches
/// gives the same requests as [`to_request_batch`].
pub fn to_request_batches(ids: &[NodeId], max_batch_size: usize) -> Vec<LookupRequests> {
    ids.chunks(max_batch_size.max(1))
        .map(to_request_batch)
        .collect()
}

/// Take the record (or its absence) out of every response, in order.
pub fn from_response_batch(batch: LookupResponses) -> Vec<Option<Node>> {
    let nodes: Vec<_> = batch
        .responses
        .into_iter()
        .map(|response| response.node)
        .collect();

    let absent = nodes.iter().filter(|node| node.is_none()).count();
    trace!(count = nodes.len(), absent, "unpacked lookup response batch");
    nodes
}

/// Parse the id of every record.
///
/// Absent records and records whose id does not parse yield
/// [`NodeId::ZERO`] in their slot; only parse failures are reported, all of
/// them together in the returned aggregate.
pub fn node_ids_from_nodes(
    nodes: &[Option<Node>],
) -> (NodeIdList, Option<AggregateConversionError>) {
    let mut ids = NodeIdList::with_capacity(nodes.len());
    let mut failures = Vec::new();

    for (index, node) in nodes.iter().enumerate() {
        let Some(node) = node else {
            ids.push(NodeId::ZERO);
            continue;
        };

        match node.node_id() {
            Ok(id) => ids.push(id),
            Err(source) => {
                debug!(index, error = %source, "failed to parse node id");
                ids.push(NodeId::ZERO);
                failures.push(ConversionError { index, source });
            }
        }
    }

    (ids, AggregateConversionError::combine(failures))
}
