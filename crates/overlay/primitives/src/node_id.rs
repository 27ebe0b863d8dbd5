use core::fmt;
use core::ops::Deref;

use alloy_primitives::B256;

use crate::NodeIdError;

/// Length of a node id in bytes.
pub const NODE_ID_SIZE: usize = 32;

/// A peer's identity on the overlay network.
///
/// The zero value ([`NodeId::ZERO`]) is never issued to a real node and is
/// used as the placeholder for slots whose identity could not be recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeId(B256);

impl NodeId {
    /// The all-zero node id.
    pub const ZERO: Self = Self(B256::ZERO);

    pub const fn new(bytes: [u8; NODE_ID_SIZE]) -> Self {
        Self(B256::new(bytes))
    }

    /// Parse a node id from raw identity bytes.
    ///
    /// Fails with [`NodeIdError::InvalidFormat`] unless `bytes` is exactly
    /// [`NODE_ID_SIZE`] long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, NodeIdError> {
        if bytes.len() != NODE_ID_SIZE {
            return Err(NodeIdError::InvalidFormat {
                expected: NODE_ID_SIZE,
                actual: bytes.len(),
            });
        }
        Ok(Self(B256::from_slice(bytes)))
    }

    pub fn as_slice(&self) -> &[u8] {
        self.0.as_slice()
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<B256> for NodeId {
    fn from(value: B256) -> Self {
        Self(value)
    }
}

impl From<[u8; NODE_ID_SIZE]> for NodeId {
    fn from(value: [u8; NODE_ID_SIZE]) -> Self {
        Self::new(value)
    }
}

impl From<NodeId> for B256 {
    fn from(value: NodeId) -> Self {
        value.0
    }
}

impl TryFrom<&[u8]> for NodeId {
    type Error = NodeIdError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(value)
    }
}

impl AsRef<[u8]> for NodeId {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

/// Ordered list of node ids.
///
/// Order mirrors the lookup batch the list was built from or will be sent as,
/// so element `i` always refers to request/response slot `i`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeIdList(Vec<NodeId>);

impl NodeIdList {
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    pub fn push(&mut self, id: NodeId) {
        self.0.push(id);
    }

    /// Raw bytes of every id, in list order.
    pub fn to_bytes(&self) -> Vec<Vec<u8>> {
        self.0.iter().map(NodeId::to_vec).collect()
    }

    pub fn into_inner(self) -> Vec<NodeId> {
        self.0
    }
}

impl Deref for NodeIdList {
    type Target = [NodeId];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<NodeId>> for NodeIdList {
    fn from(value: Vec<NodeId>) -> Self {
        Self(value)
    }
}

impl From<NodeIdList> for Vec<NodeId> {
    fn from(value: NodeIdList) -> Self {
        value.0
    }
}

impl FromIterator<NodeId> for NodeIdList {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<NodeId> for NodeIdList {
    fn extend<I: IntoIterator<Item = NodeId>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for NodeIdList {
    type Item = NodeId;
    type IntoIter = std::vec::IntoIter<NodeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a NodeIdList {
    type Item = &'a NodeId;
    type IntoIter = core::slice::Iter<'a, NodeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
