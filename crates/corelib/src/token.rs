//! Ring tokens.
//!
//! A token is a position on the 32-bit hash ring. Keys and virtual nodes are
//! both hashed to tokens; a key belongs to the first virtual node whose token
//! is greater than or equal to the key's token, wrapping past `u32::MAX`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of distinct positions on the ring.
pub const RING_SIZE: u64 = 1 << 32;

/// A position on the hash ring.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Token(pub u32);

impl Token {
    /// Minimum token value (start of ring).
    pub const MIN: Token = Token(0);
    /// Maximum token value (end of ring).
    pub const MAX: Token = Token(u32::MAX);

    /// Raw hash value.
    #[inline]
    pub fn value(self) -> u32 {
        self.0
    }

    /// Clockwise distance from `self` to `other`.
    ///
    /// The result is in `[0, RING_SIZE)`; equal tokens are zero apart.
    #[inline]
    pub fn distance_to(self, other: Token) -> u64 {
        (u64::from(other.0) + RING_SIZE - u64::from(self.0)) % RING_SIZE
    }
}

impl From<u32> for Token {
    fn from(value: u32) -> Self {
        Token(value)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}
