//! Replication errors.

use corelib::RingError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplicationError {
    /// A replication factor of zero was requested.
    #[error("replication factor must be at least 1")]
    ZeroReplicationFactor,

    #[error(transparent)]
    Ring(#[from] RingError),
}
