//! Virtual node abstractions.
//!
//! # Virtual Nodes (VNodes) Concept
//!
//! Instead of each host having a single token on the ring, each host has
//! `R` tokens (the replica count). This provides:
//!
//! 1. **Better Load Distribution**: more tokens = smoother distribution of keys
//! 2. **Gradual Rebalancing**: when hosts join/leave, only a fraction of keys move
//!
//! # Position Derivation
//!
//! The token of virtual node `i` of host `id` is `hash(id + "#" + i)` for
//! `i` in `[0, R)`. The derivation is deterministic, so a host that quits
//! and rejoins lands on exactly the same positions and no ring state ever
//! needs to be persisted.
//!
//! # Performance Characteristics
//!
//! - **Lookup**: O(log n) where n = total vnodes
//! - **Join/Quit**: O(R log n) searches plus O(R n) element shifts

use std::fmt;

use crate::partitioner::Partitioner;
use crate::token::Token;

/// A virtual node on the hash ring.
///
/// Represents a single token position owned by a host.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VirtualNode {
    /// Token position on the ring.
    pub token: Token,

    /// Id of the host that owns this virtual node.
    pub host: String,
}

impl VirtualNode {
    #[inline]
    pub fn new(token: Token, host: impl Into<String>) -> Self {
        Self {
            token,
            host: host.into(),
        }
    }

    /// Create virtual node `index` of `host` by hashing `"{host}#{index}"`.
    pub fn from_index(partitioner: &dyn Partitioner, host: &str, index: usize) -> Self {
        Self::new(partitioner.partition(vnode_key(host, index).as_bytes()), host)
    }

    #[inline]
    pub fn token(&self) -> Token {
        self.token
    }

    #[inline]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Clockwise distance to another virtual node.
    #[inline]
    pub fn distance_to(&self, other: &Self) -> u64 {
        self.token.distance_to(other.token)
    }
}

impl fmt::Display for VirtualNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VNode(token={}, host={})", self.token, self.host)
    }
}

/// Hash input for virtual node `index` of `host`.
pub fn vnode_key(host: &str, index: usize) -> String {
    format!("{host}#{index}")
}

/// Tokens of all `replicas` virtual nodes of `host`, sorted ascending.
///
/// Duplicates (two replicas of one host hashing to the same token) are kept
/// so the caller can detect them.
pub fn vnode_positions(partitioner: &dyn Partitioner, host: &str, replicas: usize) -> Vec<Token> {
    let mut tokens: Vec<Token> = (0..replicas)
        .map(|i| partitioner.partition(vnode_key(host, i).as_bytes()))
        .collect();
    tokens.sort_unstable();
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partitioner::{FnPartitioner, Fnv1aPartitioner};

    #[test]
    fn test_vnode_key_format() {
        assert_eq!(vnode_key("10.9.97.189", 0), "10.9.97.189#0");
        assert_eq!(vnode_key("", 1), "#1");
    }

    #[test]
    fn test_vnode_from_index() {
        let vnode0 = VirtualNode::from_index(&Fnv1aPartitioner, "node1", 0);
        let vnode1 = VirtualNode::from_index(&Fnv1aPartitioner, "node1", 1);

        assert_ne!(vnode0.token(), vnode1.token());
        assert_eq!(vnode0.host(), "node1");
        assert_eq!(vnode1.host(), "node1");
        assert_eq!(
            vnode0.token(),
            Fnv1aPartitioner.partition(b"node1#0"),
            "position is hash(host#index)"
        );
    }

    #[test]
    fn test_positions_sorted_and_deterministic() {
        let first = vnode_positions(&Fnv1aPartitioner, "10.9.24.3", 16);
        let second = vnode_positions(&Fnv1aPartitioner, "10.9.24.3", 16);
        assert_eq!(first, second);
        assert_eq!(first.len(), 16);
        assert!(first.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_positions_keep_duplicates() {
        let constant = FnPartitioner::new("constant", |_key: &[u8]| 5);
        assert_eq!(vnode_positions(&constant, "h", 3), vec![Token(5); 3]);
    }

    #[test]
    fn test_vnode_distance_and_ordering() {
        let vnode1 = VirtualNode::new(Token(100), "a");
        let vnode2 = VirtualNode::new(Token(200), "b");

        assert_eq!(vnode1.distance_to(&vnode2), 100);
        assert!(vnode1 < vnode2);
    }
}
