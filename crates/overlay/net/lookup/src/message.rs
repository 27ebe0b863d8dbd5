//! Lookup request and response batches.
//!
//! Batches are positional: response `i` answers request `i`, and a response
//! without a record still occupies its slot.

use overlay_primitives::{NodeId, NodeIdError, NodeIdList};

use crate::{LookupCodecError, Node, proto::lookup as pb};

/// Request to resolve a single node id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LookupRequest {
    pub id: NodeId,
}

impl LookupRequest {
    pub fn new(id: NodeId) -> Self {
        Self { id }
    }
}

impl TryFrom<pb::LookupRequest> for LookupRequest {
    type Error = NodeIdError;

    fn try_from(value: pb::LookupRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            id: NodeId::from_bytes(&value.identity)?,
        })
    }
}

impl From<LookupRequest> for pb::LookupRequest {
    fn from(value: LookupRequest) -> Self {
        pb::LookupRequest {
            identity: value.id.to_vec(),
        }
    }
}

/// Ordered batch of lookup requests.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LookupRequests {
    pub requests: Vec<LookupRequest>,
}

impl LookupRequests {
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Requested ids in request order.
    pub fn node_ids(&self) -> NodeIdList {
        self.requests.iter().map(|request| request.id).collect()
    }
}

impl TryFrom<pb::LookupRequests> for LookupRequests {
    type Error = LookupCodecError;

    fn try_from(value: pb::LookupRequests) -> Result<Self, Self::Error> {
        let requests = value
            .requests
            .into_iter()
            .enumerate()
            .map(|(index, request)| {
                LookupRequest::try_from(request)
                    .map_err(|source| LookupCodecError::InvalidRequest { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { requests })
    }
}

impl From<LookupRequests> for pb::LookupRequests {
    fn from(value: LookupRequests) -> Self {
        pb::LookupRequests {
            requests: value.requests.into_iter().map(Into::into).collect(),
        }
    }
}

/// Answer to a single lookup; `node` is `None` when the peer is unknown or
/// unreachable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LookupResponse {
    pub node: Option<Node>,
}

impl LookupResponse {
    pub fn found(node: Node) -> Self {
        Self { node: Some(node) }
    }

    pub fn not_found() -> Self {
        Self { node: None }
    }
}

impl From<pb::LookupResponse> for LookupResponse {
    fn from(value: pb::LookupResponse) -> Self {
        Self {
            node: value.record.map(Node::from),
        }
    }
}

impl From<LookupResponse> for pb::LookupResponse {
    fn from(value: LookupResponse) -> Self {
        pb::LookupResponse {
            record: value.node.map(Into::into),
        }
    }
}

/// Ordered batch of lookup responses.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LookupResponses {
    pub responses: Vec<LookupResponse>,
}

impl LookupResponses {
    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}

impl FromIterator<LookupResponse> for LookupResponses {
    fn from_iter<I: IntoIterator<Item = LookupResponse>>(iter: I) -> Self {
        Self {
            responses: iter.into_iter().collect(),
        }
    }
}

impl From<pb::LookupResponses> for LookupResponses {
    fn from(value: pb::LookupResponses) -> Self {
        value.responses.into_iter().map(Into::into).collect()
    }
}

impl From<LookupResponses> for pb::LookupResponses {
    fn from(value: LookupResponses) -> Self {
        pb::LookupResponses {
            responses: value.responses.into_iter().map(Into::into).collect(),
        }
    }
}
