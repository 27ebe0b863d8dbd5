//! Directory handle for a node that background trackers keep updating.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::Node;

/// A node record shared between the directory and its status trackers.
///
/// Clones of the handle refer to the same record. Readers that need to hand
/// the record outside the directory take a [`snapshot`](Self::snapshot),
/// which is detached from every later [`update`](Self::update).
#[derive(Debug, Clone, Default)]
pub struct SharedNode {
    inner: Arc<RwLock<Node>>,
}

impl SharedNode {
    pub fn new(node: Node) -> Self {
        Self {
            inner: Arc::new(RwLock::new(node)),
        }
    }

    /// Detached copy of the current record, taken under the read lock.
    pub fn snapshot(&self) -> Node {
        self.inner.read().snapshot()
    }

    /// Mutate the record in place under the write lock.
    pub fn update<R>(&self, f: impl FnOnce(&mut Node) -> R) -> R {
        f(&mut *self.inner.write())
    }
}

impl From<Node> for SharedNode {
    fn from(node: Node) -> Self {
        Self::new(node)
    }
}

/// Snapshot every handle, in order.
pub fn snapshot_all(nodes: &[SharedNode]) -> Vec<Node> {
    nodes.iter().map(SharedNode::snapshot).collect()
}
