//! Virtual node abstractions.
//!
//! # Virtual Nodes (VNodes) Concept
//!
//! Instead of each identifier having a single token on the ring, it gets `R`
//! tokens (virtual nodes). This provides:
//!
//! 1. **Better Load Distribution**: More tokens = smoother distribution of keys
//! 2. **Gradual Rebalancing**: When identifiers join/leave, only a fraction of keys move
//!
//! Virtual nodes are not separately addressable: callers only ever see the
//! identifier and item that own them.
//!
//! # Performance Characteristics
//!
//! - **Memory**: O(R) per identifier
//! - **Lookup**: O(log M) where M = total distinct positions on the ring
//! - **Rebalancing**: roughly 1/N of keys move when one of N identifiers joins/leaves

use crate::partitioner::Partitioner;
use crate::token::Token;

/// Builds the hash input for one replica: `"identifier:replica"`.
pub fn vnode_key(identifier: &str, replica: usize) -> String {
    format!("{identifier}:{replica}")
}

/// A virtual node on the hash ring.
///
/// Positions are a pure function of `(identifier, replica)` and the
/// partitioner, so re-inserting an identifier lands on the same tokens and
/// deleting it can recompute exactly what to remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VirtualNode {
    /// Token position on the ring.
    pub token: Token,
    /// Index of this replica in `[0, R)`.
    pub replica: usize,
}

impl VirtualNode {
    /// Hashes replica `replica` of `identifier`.
    pub fn new(partitioner: &dyn Partitioner, identifier: &str, replica: usize) -> Self {
        let token = partitioner.partition(vnode_key(identifier, replica).as_bytes());
        Self { token, replica }
    }

    /// All `replicas` virtual nodes of `identifier`, in replica order.
    pub fn for_identifier(
        partitioner: &dyn Partitioner,
        identifier: &str,
        replicas: usize,
    ) -> Vec<Self> {
        (0..replicas)
            .map(|replica| Self::new(partitioner, identifier, replica))
            .collect()
    }
}

impl std::fmt::Display for VirtualNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VNode(token={}, replica={})", self.token, self.replica)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partitioner::{Blake3Partitioner, FnPartitioner};

    #[test]
    fn test_vnode_key_format() {
        assert_eq!(vnode_key("node1", 0), "node1:0");
        assert_eq!(vnode_key("db:primary", 19), "db:primary:19");
    }

    #[test]
    fn test_vnode_is_deterministic() {
        let a = VirtualNode::new(&Blake3Partitioner, "node1", 3);
        let b = VirtualNode::new(&Blake3Partitioner, "node1", 3);
        assert_eq!(a, b);
    }

    #[test]
    fn test_for_identifier_hashes_each_replica() {
        let seen = FnPartitioner::new("echo-len", |key: &[u8]| key.len() as u64);
        let vnodes = VirtualNode::for_identifier(&seen, "n", 12);
        assert_eq!(vnodes.len(), 12);
        // "n:0".."n:9" are 3 bytes, "n:10" and "n:11" are 4.
        assert_eq!(vnodes[0].token, Token(3));
        assert_eq!(vnodes[11].token, Token(4));
        assert_eq!(vnodes[11].replica, 11);
    }

    #[test]
    fn test_replicas_spread_out() {
        let vnodes = VirtualNode::for_identifier(&Blake3Partitioner, "node1", 20);
        let mut tokens: Vec<Token> = vnodes.iter().map(|v| v.token).collect();
        tokens.sort();
        tokens.dedup();
        assert_eq!(tokens.len(), 20);
    }
}
