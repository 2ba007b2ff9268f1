//! Ring configuration and builder.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::node::Host;
use crate::partitioner::{FnPartitioner, Partitioner, PartitionerKind};
use crate::ring::ring::{HashRing, DEFAULT_REPLICAS};

/// Serializable ring settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingConfig {
    /// Virtual nodes per host, in `1..=MAX_REPLICAS`.
    pub replicas: usize,
    pub partitioner: PartitionerKind,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            replicas: DEFAULT_REPLICAS,
            partitioner: PartitionerKind::default(),
        }
    }
}

/// Builder for a [`HashRing`] with an initial membership.
///
/// ```rust
/// use corelib::RingBuilder;
///
/// let ring = RingBuilder::new()
///     .with_replicas(8)
///     .add_named_host("10.9.97.189", "server1")
///     .add_host("10.9.24.3")
///     .build()
///     .unwrap();
/// assert_eq!(ring.vnode_count(), 16);
/// ```
pub struct RingBuilder {
    partitioner: Arc<dyn Partitioner>,
    replicas: usize,
    hosts: Vec<Host>,
}

impl RingBuilder {
    pub fn new() -> Self {
        Self::from_config(&RingConfig::default())
    }

    pub fn from_config(config: &RingConfig) -> Self {
        Self {
            partitioner: config.partitioner.build(),
            replicas: config.replicas,
            hosts: Vec::new(),
        }
    }

    pub fn with_replicas(mut self, replicas: usize) -> Self {
        self.replicas = replicas;
        self
    }

    pub fn with_partitioner(mut self, partitioner: Arc<dyn Partitioner>) -> Self {
        self.partitioner = partitioner;
        self
    }

    pub fn with_partitioner_kind(self, kind: PartitionerKind) -> Self {
        self.with_partitioner(kind.build())
    }

    /// Use a plain function as the hash.
    pub fn with_hash_fn<F>(self, name: &'static str, func: F) -> Self
    where
        F: Fn(&[u8]) -> u32 + Send + Sync + 'static,
    {
        self.with_partitioner(Arc::new(FnPartitioner::new(name, func)))
    }

    pub fn add_host(mut self, id: impl Into<String>) -> Self {
        self.hosts.push(Host::unnamed(id));
        self
    }

    pub fn add_named_host(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.hosts.push(Host::new(id, name));
        self
    }

    /// Builds the ring, joining hosts in the order they were added.
    ///
    /// Fails on the first rejected join.
    pub fn build(self) -> Result<HashRing> {
        let ring = HashRing::with_partitioner(self.partitioner, self.replicas)?;
        for host in self.hosts {
            ring.join_host(host)?;
        }
        Ok(ring)
    }
}

impl Default for RingBuilder {
    fn default() -> Self {
        Self::new()
    }
}
