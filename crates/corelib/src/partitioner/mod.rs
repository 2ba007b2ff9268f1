//! Partitioner abstraction for consistent hashing.
//!
//! Partitioners are responsible for converting keys into tokens
//! that can be placed on the hash ring.

pub mod blake;
pub mod fnv;
pub mod sip;
pub mod traits;
pub mod xxh3;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::RingError;

pub use blake::Blake3Partitioner;
pub use fnv::Fnv1aPartitioner;
pub use sip::SipPartitioner;
pub use traits::{FnPartitioner, Partitioner};
pub use xxh3::Xxh3Partitioner;

/// The built-in partitioners, for configuration files and flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartitionerKind {
    #[default]
    Fnv1a,
    Sip,
    Xxh3,
    Blake3,
}

impl PartitionerKind {
    pub const ALL: [PartitionerKind; 4] = [
        PartitionerKind::Fnv1a,
        PartitionerKind::Sip,
        PartitionerKind::Xxh3,
        PartitionerKind::Blake3,
    ];

    /// Instantiates the partitioner.
    pub fn build(self) -> Arc<dyn Partitioner> {
        match self {
            PartitionerKind::Fnv1a => Arc::new(Fnv1aPartitioner),
            PartitionerKind::Sip => Arc::new(SipPartitioner),
            PartitionerKind::Xxh3 => Arc::new(Xxh3Partitioner),
            PartitionerKind::Blake3 => Arc::new(Blake3Partitioner),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PartitionerKind::Fnv1a => "fnv1a",
            PartitionerKind::Sip => "sip",
            PartitionerKind::Xxh3 => "xxh3",
            PartitionerKind::Blake3 => "blake3",
        }
    }
}

impl fmt::Display for PartitionerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartitionerKind {
    type Err = RingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PartitionerKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| RingError::UnknownPartitioner(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_names() {
        for kind in PartitionerKind::ALL {
            assert_eq!(kind.as_str().parse::<PartitionerKind>().unwrap(), kind);
        }
        assert_eq!("XXH3".parse::<PartitionerKind>().unwrap(), PartitionerKind::Xxh3);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            "md5".parse::<PartitionerKind>(),
            Err(RingError::UnknownPartitioner("md5".into()))
        );
    }

    #[test]
    fn test_builtins_are_deterministic_and_distinct() {
        let names: Vec<&str> = PartitionerKind::ALL
            .iter()
            .map(|kind| {
                let p = kind.build();
                assert_eq!(p.partition(b"10.9.97.189#0"), p.partition(b"10.9.97.189#0"));
                assert_ne!(p.partition(b"hello"), p.partition(b"halo"));
                p.name()
            })
            .collect();
        assert_eq!(
            names,
            ["Fnv1aPartitioner", "SipPartitioner", "Xxh3Partitioner", "Blake3Partitioner"]
        );
    }

    #[test]
    fn test_default_is_fnv1a() {
        assert_eq!(PartitionerKind::default().build().name(), "Fnv1aPartitioner");
    }

    #[test]
    fn test_fn_partitioner() {
        let p = FnPartitioner::new("constant", |_key: &[u8]| 7);
        assert_eq!(p.partition(b"anything"), crate::Token(7));
        assert_eq!(p.name(), "constant");
    }
}
