//! XXH3 partitioner.

use xxhash_rust::xxh3::xxh3_64;

use crate::partitioner::traits::{fold64, Partitioner};
use crate::token::Token;

/// XXH3 (64-bit) partitioner, folded to 32 bits.
#[derive(Clone, Copy, Debug, Default)]
pub struct Xxh3Partitioner;

impl Partitioner for Xxh3Partitioner {
    fn partition(&self, key: &[u8]) -> Token {
        Token(fold64(xxh3_64(key)))
    }

    fn name(&self) -> &'static str {
        "Xxh3Partitioner"
    }
}
