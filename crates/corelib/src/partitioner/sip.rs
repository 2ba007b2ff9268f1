//! SipHash partitioner.

use std::hash::Hasher;

use siphasher::sip::SipHasher13;

use crate::partitioner::traits::{fold64, Partitioner};
use crate::token::Token;

/// SipHash-1-3 partitioner with the zero key, folded to 32 bits.
#[derive(Clone, Copy, Debug, Default)]
pub struct SipPartitioner;

impl Partitioner for SipPartitioner {
    fn partition(&self, key: &[u8]) -> Token {
        let mut hasher = SipHasher13::new();
        hasher.write(key);
        Token(fold64(hasher.finish()))
    }

    fn name(&self) -> &'static str {
        "SipPartitioner"
    }
}
