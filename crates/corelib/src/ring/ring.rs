//! Hash ring data structure.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{Result, RingError};
use crate::node::Host;
use crate::partitioner::{Fnv1aPartitioner, Partitioner};
use crate::ring::builder::RingConfig;
use crate::ring::state::RingState;
use crate::token::Token;
use crate::topology::Topology;
use crate::vnode::{vnode_positions, VirtualNode};

/// Default number of virtual nodes per host.
pub const DEFAULT_REPLICAS: usize = 2;

/// Upper bound on virtual nodes per host.
pub const MAX_REPLICAS: usize = 1 << 16;

/// A concurrent consistent hash ring.
///
/// Maps string keys to registered hosts. Each host owns `replicas` virtual
/// nodes at deterministic positions, so adding or removing a host only moves
/// the keys adjacent to its own positions.
///
/// # Concurrency
///
/// All state sits behind one `parking_lot::RwLock`. `get` and the other
/// readers take the shared lock; `join` and `quit` take the exclusive lock
/// for their whole read-modify-write, so a reader observes the ring either
/// entirely before or entirely after any membership change. Hashing happens
/// outside the lock. No operation suspends or spawns work.
///
/// The ring never logs and never retries; every failure is returned.
pub struct HashRing {
    state: RwLock<RingState>,
    partitioner: Arc<dyn Partitioner>,
    replicas: usize,
}

impl HashRing {
    /// An empty ring using FNV-1a and two virtual nodes per host.
    pub fn new() -> Self {
        Self::from_parts(Arc::new(Fnv1aPartitioner), DEFAULT_REPLICAS)
    }

    /// An empty ring with `replicas` virtual nodes per host.
    ///
    /// Rejects `replicas` outside `1..=MAX_REPLICAS`.
    pub fn with_replicas(replicas: usize) -> Result<Self> {
        Self::with_partitioner(Arc::new(Fnv1aPartitioner), replicas)
    }

    /// An empty ring with a caller-supplied hash function.
    pub fn with_partitioner(partitioner: Arc<dyn Partitioner>, replicas: usize) -> Result<Self> {
        if !(1..=MAX_REPLICAS).contains(&replicas) {
            return Err(RingError::InvalidReplicaCount(replicas));
        }
        Ok(Self::from_parts(partitioner, replicas))
    }

    /// An empty ring built from a configuration.
    pub fn with_config(config: &RingConfig) -> Result<Self> {
        Self::with_partitioner(config.partitioner.build(), config.replicas)
    }

    fn from_parts(partitioner: Arc<dyn Partitioner>, replicas: usize) -> Self {
        Self {
            state: RwLock::new(RingState::default()),
            partitioner,
            replicas,
        }
    }

    /// Registers a host whose display name is its id.
    pub fn join(&self, id: impl Into<String>) -> Result<()> {
        self.join_host(Host::unnamed(id))
    }

    /// Registers a host with a display name (an empty name falls back to the id).
    ///
    /// # Errors
    ///
    /// - [`RingError::AlreadyExists`] if the id is registered; nothing changes.
    /// - [`RingError::HashCollision`] if any of the host's virtual nodes lands
    ///   on an occupied position; nothing changes.
    pub fn join_named(&self, id: impl Into<String>, name: impl Into<String>) -> Result<()> {
        self.join_host(Host::new(id, name))
    }

    /// Registers a prepared host record; see [`HashRing::join_named`].
    pub fn join_host(&self, host: Host) -> Result<()> {
        let tokens = self.positions_for(&host.id);
        self.state.write().insert_host(host, tokens)
    }

    /// Unregisters a host and removes all of its virtual nodes.
    ///
    /// Returns the removed host record.
    ///
    /// # Errors
    ///
    /// - [`RingError::NotFound`] if the id is not registered.
    /// - [`RingError::Inconsistent`] if the ring's bookkeeping is corrupt; the
    ///   ring is left as it was.
    pub fn quit(&self, id: &str) -> Result<Host> {
        self.state.write().remove_host(id)
    }

    /// The id of the host responsible for `key`.
    ///
    /// Finds the first virtual node at or after `hash(key)`, wrapping to the
    /// smallest position when the key hashes past every node.
    pub fn get(&self, key: &str) -> Result<String> {
        self.get_bytes(key.as_bytes())
    }

    /// Like [`HashRing::get`] for a raw byte key.
    pub fn get_bytes(&self, key: &[u8]) -> Result<String> {
        let token = self.partitioner.partition(key);
        self.state.read().lookup(token).map(str::to_string)
    }

    /// Up to `n` distinct hosts for `key`, primary first, walking clockwise.
    pub fn get_n(&self, key: &str, n: usize) -> Result<Vec<String>> {
        self.get_n_bytes(key.as_bytes(), n)
    }

    /// Like [`HashRing::get_n`] for a raw byte key.
    pub fn get_n_bytes(&self, key: &[u8], n: usize) -> Result<Vec<String>> {
        let token = self.partitioner.partition(key);
        self.state.read().successors(token, n)
    }

    /// The host owning `token` directly, bypassing the partitioner.
    pub fn owner_of(&self, token: Token) -> Result<String> {
        self.state.read().lookup(token).map(str::to_string)
    }

    /// The token `key` hashes to.
    pub fn token_for(&self, key: &[u8]) -> Token {
        self.partitioner.partition(key)
    }

    /// Sorted tokens the host would occupy; independent of ring membership.
    pub fn positions_for(&self, id: &str) -> Vec<Token> {
        vnode_positions(self.partitioner.as_ref(), id, self.replicas)
    }

    pub fn host(&self, id: &str) -> Option<Host> {
        self.state.read().host(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.state.read().host(id).is_some()
    }

    /// All registered hosts, sorted by id.
    pub fn hosts(&self) -> Vec<Host> {
        let mut hosts: Vec<Host> = self.state.read().hosts().cloned().collect();
        hosts.sort_by(|a, b| a.id.cmp(&b.id));
        hosts
    }

    pub fn host_count(&self) -> usize {
        self.state.read().host_count()
    }

    pub fn vnode_count(&self) -> usize {
        self.state.read().vnode_count()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().is_empty()
    }

    /// The sorted ring.
    pub fn positions(&self) -> Vec<Token> {
        self.state.read().positions().to_vec()
    }

    pub fn host_positions(&self, id: &str) -> Option<Vec<Token>> {
        self.state.read().host_positions(id).map(<[Token]>::to_vec)
    }

    /// Every virtual node in ring order.
    pub fn vnodes(&self) -> Vec<VirtualNode> {
        self.state.read().vnodes()
    }

    pub fn topology(&self) -> Topology {
        self.state.read().topology()
    }

    pub fn replica_count(&self) -> usize {
        self.replicas
    }

    pub fn partitioner_name(&self) -> &'static str {
        self.partitioner.name()
    }

    /// Checks the ring's structural invariants.
    ///
    /// Returns [`RingError::Inconsistent`] describing the first violation.
    pub fn verify(&self) -> Result<()> {
        self.state.read().check_invariants(self.replicas)
    }
}

impl Default for HashRing {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HashRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("HashRing")
            .field("partitioner", &self.partitioner.name())
            .field("replicas", &self.replicas)
            .field("hosts", &state.host_count())
            .field("vnodes", &state.vnode_count())
            .finish()
    }
}
