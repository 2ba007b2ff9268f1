//! Error types for the core library.

use thiserror::Error;

use crate::token::Token;

/// Result type alias for the core library.
pub type Result<T> = std::result::Result<T, RingError>;

/// Errors returned by ring operations.
///
/// Every variant except [`RingError::Inconsistent`] describes a caller-side
/// condition and is safe to recover from. `Inconsistent` means the ring's
/// own bookkeeping is broken; the operation that detected it made no changes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RingError {
    /// `join` was called for a host id that is already registered.
    #[error("host {0:?} already exists")]
    AlreadyExists(String),

    /// A virtual node of `host` landed on a position already held by `owner`.
    #[error("virtual node of host {host:?} collides with {owner:?} at position {position}")]
    HashCollision {
        host: String,
        position: Token,
        owner: String,
    },

    /// `quit` was called for a host id that is not registered.
    #[error("host {0:?} not found")]
    NotFound(String),

    /// `get` was called on a ring with no hosts.
    #[error("hash ring is empty")]
    EmptyRing,

    /// The virtual node count per host is zero or above `MAX_REPLICAS`.
    #[error("replica count must be between 1 and 65536, got {0}")]
    InvalidReplicaCount(usize),

    /// A partitioner name did not match any built-in partitioner.
    #[error("unknown partitioner {0:?}")]
    UnknownPartitioner(String),

    /// Internal bookkeeping violated a ring invariant.
    #[error("ring invariant violated: {0}")]
    Inconsistent(String),
}

impl RingError {
    /// True for errors that indicate a bug in the ring rather than misuse.
    pub fn is_internal(&self) -> bool {
        matches!(self, RingError::Inconsistent(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            RingError::AlreadyExists("h1".into()).to_string(),
            "host \"h1\" already exists"
        );
        assert_eq!(RingError::EmptyRing.to_string(), "hash ring is empty");
        let collision = RingError::HashCollision {
            host: "b".into(),
            position: Token(0xff),
            owner: "a".into(),
        };
        assert_eq!(
            collision.to_string(),
            "virtual node of host \"b\" collides with \"a\" at position 000000ff"
        );
    }

    #[test]
    fn test_only_inconsistent_is_internal() {
        assert!(RingError::Inconsistent("x".into()).is_internal());
        assert!(!RingError::NotFound("x".into()).is_internal());
        assert!(!RingError::EmptyRing.is_internal());
    }
}
