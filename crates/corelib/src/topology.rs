//! Ring topology snapshots.
//!
//! A [`Topology`] is an owned, point-in-time view of which host owns which
//! slice of the token space. It is detached from the ring, so it can be
//! inspected, serialized or compared without holding any lock.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::token::{Token, RING_SIZE};

/// The half-open range `(start, end]` of tokens owned by the virtual node
/// at `end`. The first range wraps past `Token::MAX`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TokenRange {
    pub start: Token,
    pub end: Token,
    pub host: String,
}

impl TokenRange {
    /// Number of tokens in the range.
    pub fn span(&self) -> u64 {
        match self.start.distance_to(self.end) {
            // Only one virtual node: it owns the whole ring.
            0 => RING_SIZE,
            d => d,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Topology {
    ranges: Vec<TokenRange>,
}

impl Topology {
    pub(crate) fn new(ranges: Vec<TokenRange>) -> Self {
        Self { ranges }
    }

    /// Ranges in ring order.
    pub fn ranges(&self) -> &[TokenRange] {
        &self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Owner of `token`, using the same lower-bound rule as the ring.
    pub fn owner_of(&self, token: Token) -> Option<&str> {
        if self.ranges.is_empty() {
            return None;
        }
        let idx = self.ranges.partition_point(|r| r.end < token);
        let range = self.ranges.get(idx).unwrap_or(&self.ranges[0]);
        Some(&range.host)
    }

    /// Fraction of the token space owned by each host.
    ///
    /// Values sum to 1.0 on a non-empty ring.
    pub fn ownership(&self) -> BTreeMap<String, f64> {
        let mut owned: BTreeMap<String, u64> = BTreeMap::new();
        for range in &self.ranges {
            *owned.entry(range.host.clone()).or_default() += range.span();
        }
        owned
            .into_iter()
            .map(|(host, span)| (host, span as f64 / RING_SIZE as f64))
            .collect()
    }
}
