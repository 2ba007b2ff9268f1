//! BLAKE3 partitioner.

use crate::partitioner::traits::Partitioner;
use crate::token::Token;

/// Uses the first four bytes of a BLAKE3 digest.
///
/// Much slower than the non-cryptographic partitioners; useful when keys may
/// be chosen adversarially.
#[derive(Clone, Copy, Debug, Default)]
pub struct Blake3Partitioner;

impl Partitioner for Blake3Partitioner {
    fn partition(&self, key: &[u8]) -> Token {
        let digest = blake3::hash(key);
        let b = digest.as_bytes();
        Token(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn name(&self) -> &'static str {
        "Blake3Partitioner"
    }
}
