//! Replica placement results.

use crate::error::ReplicationError;
use corelib::RingError;

/// Hosts chosen to hold one key: the primary plus its replicas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplicaPlacement {
    pub primary: String,
    pub replicas: Vec<String>,
    /// Replication factor that was requested.
    pub wanted: usize,
}

impl ReplicaPlacement {
    /// Splits an ordered host list (primary first) into a placement.
    pub fn from_hosts(mut hosts: Vec<String>, wanted: usize) -> Result<Self, ReplicationError> {
        if hosts.is_empty() {
            return Err(RingError::EmptyRing.into());
        }
        let replicas = hosts.split_off(1);
        let primary = hosts.remove(0);
        Ok(Self {
            primary,
            replicas,
            wanted,
        })
    }

    /// All hosts, primary first.
    pub fn hosts(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.primary.as_str()).chain(self.replicas.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        1 + self.replicas.len()
    }

    /// A placement always holds a primary.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// True when the ring has fewer hosts than the replication factor.
    pub fn is_under_replicated(&self) -> bool {
        self.len() < self.wanted
    }
}
