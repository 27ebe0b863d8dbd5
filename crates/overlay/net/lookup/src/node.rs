//! Node records carried by lookup responses.
//!
//! A [`Node`] is the directory's view of a peer: raw identity bytes as
//! received, optional address/metadata/restriction blocks, and the status
//! fields that background trackers keep updating. Every block is an owned
//! value, so a [`Node::snapshot`] never shares state with its source.

use overlay_primitives::{NodeId, NodeIdError};

use crate::proto::lookup as pb;

/// Role a node plays in the network.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Hash,
    strum::Display,
    strum::FromRepr,
    arbitrary::Arbitrary,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum NodeType {
    /// Unset or unknown on the wire.
    #[default]
    Invalid = 0,
    Satellite = 1,
    Storage = 2,
    Uplink = 3,
    Bootstrap = 4,
}

impl From<pb::NodeType> for NodeType {
    fn from(value: pb::NodeType) -> Self {
        match value {
            pb::NodeType::INVALID => Self::Invalid,
            pb::NodeType::SATELLITE => Self::Satellite,
            pb::NodeType::STORAGE => Self::Storage,
            pb::NodeType::UPLINK => Self::Uplink,
            pb::NodeType::BOOTSTRAP => Self::Bootstrap,
        }
    }
}

impl From<NodeType> for pb::NodeType {
    fn from(value: NodeType) -> Self {
        match value {
            NodeType::Invalid => Self::INVALID,
            NodeType::Satellite => Self::SATELLITE,
            NodeType::Storage => Self::STORAGE,
            NodeType::Uplink => Self::UPLINK,
            NodeType::Bootstrap => Self::BOOTSTRAP,
        }
    }
}

/// Transport a node is dialed over.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Hash,
    strum::Display,
    strum::FromRepr,
    arbitrary::Arbitrary,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum NodeTransport {
    #[default]
    TcpTlsGrpc = 0,
}

impl From<pb::NodeTransport> for NodeTransport {
    fn from(value: pb::NodeTransport) -> Self {
        match value {
            pb::NodeTransport::TCP_TLS_GRPC => Self::TcpTlsGrpc,
        }
    }
}

impl From<NodeTransport> for pb::NodeTransport {
    fn from(value: NodeTransport) -> Self {
        match value {
            NodeTransport::TcpTlsGrpc => Self::TCP_TLS_GRPC,
        }
    }
}

/// Where a node can be reached.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash, arbitrary::Arbitrary)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeAddress {
    pub transport: NodeTransport,
    pub address: String,
}

impl NodeAddress {
    pub fn new(transport: NodeTransport, address: impl Into<String>) -> Self {
        Self {
            transport,
            address: address.into(),
        }
    }
}

/// Operator contact details.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash, arbitrary::Arbitrary)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeMetadata {
    pub email: String,
    pub wallet: String,
}

/// Capacity a node advertises.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash, arbitrary::Arbitrary)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeRestrictions {
    pub free_bandwidth: i64,
    pub free_disk: i64,
}

/// A peer record as known to the directory.
///
/// `id` holds the identity bytes exactly as received; use [`Node::node_id`]
/// to parse them.
#[derive(Debug, PartialEq, Eq, Default, arbitrary::Arbitrary)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub id: Vec<u8>,
    pub address: Option<NodeAddress>,
    pub metadata: Option<NodeMetadata>,
    pub restrictions: Option<NodeRestrictions>,
    pub node_type: NodeType,

    /// Outcome of the most recent audit.
    pub audit_success: bool,
    /// Whether the node answered its last uptime check.
    pub is_up: bool,
    /// Latency samples, oldest first.
    pub latency_list: Vec<i64>,

    /// Pending status updates not yet written back to the directory.
    pub update_audit_success: bool,
    pub update_latency: bool,
    pub update_uptime: bool,
}

impl Node {
    /// A record with the given identity and every other field unset.
    pub fn with_id(id: NodeId) -> Self {
        Self {
            id: id.to_vec(),
            ..Default::default()
        }
    }

    /// Parse the raw identity bytes.
    pub fn node_id(&self) -> Result<NodeId, NodeIdError> {
        NodeId::from_bytes(&self.id)
    }

    /// Detached copy of this record.
    ///
    /// Present blocks are rebuilt field by field and absent blocks stay
    /// absent, so nothing in the result is shared with `self`.
    pub fn snapshot(&self) -> Self {
        let Self {
            id,
            address,
            metadata,
            restrictions,
            node_type,
            audit_success,
            is_up,
            latency_list,
            update_audit_success,
            update_latency,
            update_uptime,
        } = self;

        Self {
            id: id.as_slice().to_vec(),
            address: address.as_ref().map(|address| NodeAddress {
                transport: address.transport,
                address: address.address.clone(),
            }),
            metadata: metadata.as_ref().map(|metadata| NodeMetadata {
                email: metadata.email.clone(),
                wallet: metadata.wallet.clone(),
            }),
            restrictions: restrictions.as_ref().map(|restrictions| NodeRestrictions {
                free_bandwidth: restrictions.free_bandwidth,
                free_disk: restrictions.free_disk,
            }),
            node_type: *node_type,
            audit_success: *audit_success,
            is_up: *is_up,
            latency_list: latency_list.as_slice().to_vec(),
            update_audit_success: *update_audit_success,
            update_latency: *update_latency,
            update_uptime: *update_uptime,
        }
    }
}

impl Clone for Node {
    fn clone(&self) -> Self {
        self.snapshot()
    }
}

impl From<pb::Node> for Node {
    fn from(value: pb::Node) -> Self {
        Self {
            id: value.identity,
            address: value.address.map(|address| NodeAddress {
                transport: address.transport_kind.into(),
                address: address.address_string,
            }),
            metadata: value.metadata.map(|metadata| NodeMetadata {
                email: metadata.email,
                wallet: metadata.wallet,
            }),
            restrictions: value.restrictions.map(|restrictions| NodeRestrictions {
                free_bandwidth: restrictions.free_bandwidth,
                free_disk: restrictions.free_disk,
            }),
            node_type: value.node_type.into(),
            audit_success: value.audit_success,
            is_up: value.reachable,
            latency_list: value.latency_samples,
            update_audit_success: value.pending_audit_update,
            update_latency: value.pending_latency_update,
            update_uptime: value.pending_uptime_update,
        }
    }
}

impl From<Node> for pb::Node {
    fn from(value: Node) -> Self {
        pb::Node {
            identity: value.id,
            address: value.address.map(|address| pb::NodeAddress {
                transport_kind: address.transport.into(),
                address_string: address.address,
            }),
            node_type: value.node_type.into(),
            restrictions: value.restrictions.map(|restrictions| pb::NodeRestrictions {
                free_bandwidth: restrictions.free_bandwidth,
                free_disk: restrictions.free_disk,
            }),
            metadata: value.metadata.map(|metadata| pb::NodeMetadata {
                email: metadata.email,
                wallet: metadata.wallet,
            }),
            latency_samples: value.latency_list,
            audit_success: value.audit_success,
            reachable: value.is_up,
            pending_latency_update: value.update_latency,
            pending_audit_update: value.update_audit_success,
            pending_uptime_update: value.update_uptime,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use proptest_arbitrary_interop::arb;

    fn full_node() -> Node {
        Node {
            id: vec![7u8; 32],
            address: Some(NodeAddress::new(NodeTransport::TcpTlsGrpc, "10.0.0.1:7777")),
            metadata: Some(NodeMetadata {
                email: "operator@example.com".to_string(),
                wallet: "0xdeadbeef".to_string(),
            }),
            restrictions: Some(NodeRestrictions {
                free_bandwidth: 1 << 30,
                free_disk: 1 << 40,
            }),
            node_type: NodeType::Storage,
            audit_success: true,
            is_up: true,
            latency_list: vec![12, 9, 31],
            update_audit_success: true,
            update_latency: false,
            update_uptime: true,
        }
    }

    #[test]
    fn snapshot_is_field_equal() {
        let node = full_node();
        assert_eq!(node.snapshot(), node);
    }

    #[test]
    fn snapshot_does_not_share_blocks() {
        let source = full_node();
        let mut copy = source.snapshot();

        copy.address.as_mut().unwrap().address.push_str("9");
        copy.metadata.as_mut().unwrap().email.clear();
        copy.restrictions.as_mut().unwrap().free_disk = 0;
        copy.latency_list.push(100);
        copy.id[0] = 0;

        assert_eq!(source, full_node());
        assert_ne!(copy, source);
    }

    #[test]
    fn source_mutation_does_not_reach_snapshot() {
        let mut source = full_node();
        let copy = source.snapshot();

        source.address = None;
        source.latency_list.clear();
        source.is_up = false;
        source.update_latency = true;

        assert_eq!(copy, full_node());
    }

    #[test]
    fn snapshot_keeps_absent_blocks_absent() {
        let node = Node {
            address: None,
            metadata: None,
            restrictions: None,
            ..full_node()
        };
        let copy = node.snapshot();
        assert!(copy.address.is_none());
        assert!(copy.metadata.is_none());
        assert!(copy.restrictions.is_none());
    }

    #[test]
    fn snapshot_keeps_empty_identity() {
        let node = Node::default();
        let copy = node.snapshot();
        assert!(copy.id.is_empty());
        assert_eq!(copy, node);
    }

    #[test]
    fn proto_field_mapping() {
        let proto: pb::Node = full_node().into();
        assert_eq!(proto.identity, vec![7u8; 32]);
        assert_eq!(proto.address.as_ref().unwrap().address_string, "10.0.0.1:7777");
        assert_eq!(proto.node_type, pb::NodeType::STORAGE);
        assert!(proto.reachable);
        assert!(proto.pending_audit_update);
        assert!(!proto.pending_latency_update);
        assert!(proto.pending_uptime_update);
        assert_eq!(proto.latency_samples, vec![12, 9, 31]);
        assert_eq!(Node::from(proto), full_node());
    }

    #[test]
    fn node_type_display() {
        assert_eq!(NodeType::Storage.to_string(), "storage");
        assert_eq!(NodeType::from_repr(4), Some(NodeType::Bootstrap));
        assert_eq!(NodeType::from_repr(9), None);
        assert_eq!(NodeTransport::TcpTlsGrpc.to_string(), "tcp_tls_grpc");
    }

    proptest! {
        #[test]
        fn snapshot_equals_source(node in arb::<Node>()) {
            prop_assert_eq!(node.snapshot(), node.clone());
            prop_assert_eq!(&node.snapshot(), &node);
        }

        #[test]
        fn proto_conversion_preserves_record(node in arb::<Node>()) {
            let proto: pb::Node = node.snapshot().into();
            prop_assert_eq!(Node::from(proto), node);
        }
    }
}
