//! FNV-1a partitioner (the default).

use crate::partitioner::traits::Partitioner;
use crate::token::Token;

const FNV32_OFFSET: u32 = 0x811c_9dc5;
const FNV32_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a partitioner.
///
/// Produces the same values as the reference 32-bit FNV-1a definition, so
/// rings built with it agree with other FNV-1a based routers.
#[derive(Clone, Copy, Debug, Default)]
pub struct Fnv1aPartitioner;

impl Partitioner for Fnv1aPartitioner {
    fn partition(&self, key: &[u8]) -> Token {
        Token(fnv1a32(key))
    }

    fn name(&self) -> &'static str {
        "Fnv1aPartitioner"
    }
}

pub fn fnv1a32(data: &[u8]) -> u32 {
    data.iter().fold(FNV32_OFFSET, |hash, byte| {
        (hash ^ u32::from(*byte)).wrapping_mul(FNV32_PRIME)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vectors() {
        assert_eq!(fnv1a32(b""), 0x811c_9dc5);
        assert_eq!(fnv1a32(b"a"), 0xe40c_292c);
        assert_eq!(fnv1a32(b"foobar"), 0xbf9c_f968);
    }

    #[test]
    fn test_partition_matches_hash() {
        assert_eq!(Fnv1aPartitioner.partition(b"a"), Token(0xe40c_292c));
    }
}
