//! Replication strategy abstractions.
//!
//! Replication strategies determine how many replicas to create and where
//! to place them on the ring.
//!
//! - **SimpleStrategy**: N replicas placed on distinct hosts clockwise around the ring

pub mod simple;

pub use simple::SimpleStrategy;

use corelib::HashRing;

use crate::error::ReplicationError;
use crate::placement::ReplicaPlacement;

/// Trait for replication strategies.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (Send + Sync) as they may be
/// shared across threads.
pub trait ReplicationStrategy: Send + Sync + 'static {
    /// Number of copies of each key, including the primary.
    fn replication_factor(&self) -> usize;

    /// Find the hosts for a key, primary first.
    ///
    /// The primary is always the host `ring.get(key)` returns. Fewer than
    /// `replication_factor` hosts are returned when the ring is smaller.
    fn replicas_for_key(&self, ring: &HashRing, key: &[u8]) -> Result<Vec<String>, ReplicationError>;

    /// Strategy name (for logging/debugging).
    fn name(&self) -> &'static str;

    fn place(&self, ring: &HashRing, key: &[u8]) -> Result<ReplicaPlacement, ReplicationError> {
        let hosts = self.replicas_for_key(ring, key)?;
        ReplicaPlacement::from_hosts(hosts, self.replication_factor())
    }
}
