//! Simple replication strategy.
//!
//! Places N replicas on distinct hosts, walking clockwise from the key's
//! position. Works well for single data center deployments where network
//! topology doesn't matter.
//!
//! # Algorithm
//!
//! 1. Find the first virtual node at or after the key's token (the primary)
//! 2. Continue clockwise, skipping virtual nodes of hosts already chosen
//! 3. Stop after N distinct hosts or one full turn of the ring
//!
//! The walk happens under a single read lock, so the result is consistent
//! with one ring membership even while hosts join and quit.

use corelib::HashRing;
use tracing::debug;

use crate::error::ReplicationError;
use crate::strategy::ReplicationStrategy;

/// Simple replication strategy: N replicas on consecutive distinct hosts.
///
/// # Example
///
/// ```rust
/// use corelib::RingBuilder;
/// use replication::{ReplicationStrategy, SimpleStrategy};
///
/// let ring = RingBuilder::new()
///     .add_host("a")
///     .add_host("b")
///     .add_host("c")
///     .build()
///     .unwrap();
/// let strategy = SimpleStrategy::new(2).unwrap();
///
/// let replicas = strategy.replicas_for_key(&ring, b"my-key").unwrap();
/// assert_eq!(replicas.len(), 2);
/// assert_eq!(replicas[0], ring.get("my-key").unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct SimpleStrategy {
    replication_factor: usize,
}

impl SimpleStrategy {
    /// Create a strategy with the given replication factor (at least 1).
    pub fn new(replication_factor: usize) -> Result<Self, ReplicationError> {
        if replication_factor == 0 {
            return Err(ReplicationError::ZeroReplicationFactor);
        }
        Ok(Self { replication_factor })
    }
}

impl Default for SimpleStrategy {
    /// Three copies: primary plus two replicas.
    fn default() -> Self {
        Self {
            replication_factor: 3,
        }
    }
}

impl ReplicationStrategy for SimpleStrategy {
    fn replication_factor(&self) -> usize {
        self.replication_factor
    }

    fn replicas_for_key(&self, ring: &HashRing, key: &[u8]) -> Result<Vec<String>, ReplicationError> {
        let hosts = ring.get_n_bytes(key, self.replication_factor)?;
        if hosts.len() < self.replication_factor {
            debug!(
                wanted = self.replication_factor,
                found = hosts.len(),
                "ring has fewer hosts than the replication factor"
            );
        }
        Ok(hosts)
    }

    fn name(&self) -> &'static str {
        "SimpleStrategy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corelib::{RingBuilder, RingError};
    use std::collections::HashSet;

    fn ring(hosts: &[&str]) -> HashRing {
        hosts
            .iter()
            .fold(RingBuilder::new().with_replicas(8), |b, h| b.add_host(*h))
            .build()
            .unwrap()
    }

    #[test]
    fn test_simple_strategy_replication_factor() {
        let strategy = SimpleStrategy::new(3).unwrap();
        assert_eq!(strategy.replication_factor(), 3);
        assert_eq!(SimpleStrategy::default().replication_factor(), 3);
        assert_eq!(SimpleStrategy::new(0).unwrap_err(), ReplicationError::ZeroReplicationFactor);
    }

    #[test]
    fn test_simple_strategy_replicas() {
        let ring = ring(&["node1", "node2", "node3"]);
        let strategy = SimpleStrategy::new(3).unwrap();
        let replicas = strategy.replicas_for_key(&ring, b"test-key").unwrap();

        assert_eq!(replicas.len(), 3);
        let unique: HashSet<_> = replicas.iter().collect();
        assert_eq!(unique.len(), 3);
        assert_eq!(replicas[0], ring.get("test-key").unwrap());
    }

    #[test]
    fn test_fewer_hosts_than_factor() {
        let ring = ring(&["node1", "node2"]);
        let strategy = SimpleStrategy::new(5).unwrap();
        let placement = strategy.place(&ring, b"k").unwrap();
        assert_eq!(placement.len(), 2);
        assert!(placement.is_under_replicated());
    }

    #[test]
    fn test_empty_ring() {
        let strategy = SimpleStrategy::default();
        assert_eq!(
            strategy.replicas_for_key(&HashRing::new(), b"k"),
            Err(ReplicationError::Ring(RingError::EmptyRing))
        );
    }

    #[test]
    fn test_placement_survives_unrelated_quit() {
        let ring = ring(&["a", "b", "c", "d"]);
        let strategy = SimpleStrategy::new(1).unwrap();
        let keys: Vec<String> = (0..200).map(|i| format!("key-{i}")).collect();
        let before: Vec<_> = keys
            .iter()
            .map(|k| strategy.place(&ring, k.as_bytes()).unwrap().primary)
            .collect();

        ring.quit("d").unwrap();

        for (key, old) in keys.iter().zip(before) {
            let new = strategy.place(&ring, key.as_bytes()).unwrap().primary;
            if old != "d" {
                assert_eq!(new, old, "{key}");
            }
        }
    }
}
