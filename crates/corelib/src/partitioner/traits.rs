//! Core partitioner trait definitions.

use crate::token::Token;

/// A partitioner converts keys into tokens for placement on the hash ring.
///
/// Partitioners are stateless and thread-safe, allowing concurrent
/// token generation without synchronization overhead. The ring assumes a
/// partitioner is a pure function: the same key must always produce the
/// same token.
pub trait Partitioner: Send + Sync + 'static {
    /// Converts a key into a token.
    fn partition(&self, key: &[u8]) -> Token;

    /// Returns the name of this partitioner.
    fn name(&self) -> &'static str;
}

/// Adapts any `Fn(&[u8]) -> u32` into a [`Partitioner`].
///
/// ```rust
/// use corelib::partitioner::{FnPartitioner, Partitioner};
///
/// let p = FnPartitioner::new("len", |key: &[u8]| key.len() as u32);
/// assert_eq!(p.partition(b"abc").value(), 3);
/// ```
#[derive(Clone)]
pub struct FnPartitioner<F> {
    name: &'static str,
    func: F,
}

impl<F> FnPartitioner<F>
where
    F: Fn(&[u8]) -> u32 + Send + Sync + 'static,
{
    pub fn new(name: &'static str, func: F) -> Self {
        Self { name, func }
    }
}

impl<F> Partitioner for FnPartitioner<F>
where
    F: Fn(&[u8]) -> u32 + Send + Sync + 'static,
{
    fn partition(&self, key: &[u8]) -> Token {
        Token((self.func)(key))
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

/// Folds a 64-bit digest into the 32-bit ring space.
#[inline]
pub(crate) fn fold64(hash: u64) -> u32 {
    (hash ^ (hash >> 32)) as u32
}
