//! Unsynchronized ring bookkeeping.
//!
//! `RingState` owns the four structures that make up a ring. It is always
//! accessed through the lock in [`HashRing`](super::HashRing); every method
//! here either fully applies a change or leaves the state untouched.

use std::collections::HashMap;

use crate::error::{Result, RingError};
use crate::node::Host;
use crate::token::Token;
use crate::topology::{TokenRange, Topology};
use crate::vnode::VirtualNode;

#[derive(Debug, Default, Clone)]
pub(crate) struct RingState {
    /// Every virtual node token, strictly ascending.
    positions: Vec<Token>,
    position_to_host: HashMap<Token, String>,
    /// Each host's tokens, strictly ascending.
    host_to_positions: HashMap<String, Vec<Token>>,
    hosts: HashMap<String, Host>,
}

impl RingState {
    pub(crate) fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub(crate) fn host_count(&self) -> usize {
        self.hosts.len()
    }

    pub(crate) fn vnode_count(&self) -> usize {
        self.positions.len()
    }

    pub(crate) fn host(&self, id: &str) -> Option<&Host> {
        self.hosts.get(id)
    }

    pub(crate) fn hosts(&self) -> impl Iterator<Item = &Host> {
        self.hosts.values()
    }

    pub(crate) fn positions(&self) -> &[Token] {
        &self.positions
    }

    pub(crate) fn host_positions(&self, id: &str) -> Option<&[Token]> {
        self.host_to_positions.get(id).map(Vec::as_slice)
    }

    /// Registers `host` at `tokens`, which must be sorted ascending.
    ///
    /// Collisions are checked before anything is written, so a rejected
    /// host leaves no trace.
    pub(crate) fn insert_host(&mut self, host: Host, tokens: Vec<Token>) -> Result<()> {
        if self.hosts.contains_key(&host.id) {
            return Err(RingError::AlreadyExists(host.id));
        }

        // Two replicas of the same host on one token.
        if let Some(pair) = tokens.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(RingError::HashCollision {
                position: pair[0],
                owner: host.id.clone(),
                host: host.id,
            });
        }

        if let Some((token, owner)) = tokens
            .iter()
            .find_map(|token| self.position_to_host.get(token).map(|owner| (*token, owner)))
        {
            return Err(RingError::HashCollision {
                host: host.id,
                position: token,
                owner: owner.clone(),
            });
        }

        for token in &tokens {
            // Err is guaranteed: the token is absent from position_to_host.
            if let Err(idx) = self.positions.binary_search(token) {
                self.positions.insert(idx, *token);
            }
            self.position_to_host.insert(*token, host.id.clone());
        }
        self.host_to_positions.insert(host.id.clone(), tokens);
        self.hosts.insert(host.id.clone(), host);
        Ok(())
    }

    /// Unregisters `id` and removes exactly its tokens from the ring.
    ///
    /// Each token is located with a fresh binary search over the current
    /// ring and spliced out by its own index; no cursor is carried between
    /// removals.
    pub(crate) fn remove_host(&mut self, id: &str) -> Result<Host> {
        let tokens = self
            .host_to_positions
            .get(id)
            .ok_or_else(|| RingError::NotFound(id.to_string()))?;

        // Validate everything first so an inconsistency aborts with no writes.
        for token in tokens {
            if self.positions.binary_search(token).is_err() {
                return Err(RingError::Inconsistent(format!(
                    "token {token} of host {id:?} is missing from the ring"
                )));
            }
            match self.position_to_host.get(token) {
                Some(owner) if owner == id => {}
                Some(owner) => {
                    return Err(RingError::Inconsistent(format!(
                        "token {token} of host {id:?} is mapped to {owner:?}"
                    )))
                }
                None => {
                    return Err(RingError::Inconsistent(format!(
                        "token {token} of host {id:?} has no owner"
                    )))
                }
            }
        }

        let tokens = self.host_to_positions.remove(id).unwrap_or_default();
        for token in &tokens {
            if let Ok(idx) = self.positions.binary_search(token) {
                self.positions.remove(idx);
            }
            self.position_to_host.remove(token);
        }

        self.hosts
            .remove(id)
            .ok_or_else(|| RingError::Inconsistent(format!("host {id:?} has tokens but no record")))
    }

    /// Index of the first position `>= token`, wrapping to 0.
    fn lower_bound(&self, token: Token) -> Result<usize> {
        if self.positions.is_empty() {
            return Err(RingError::EmptyRing);
        }
        let idx = self.positions.partition_point(|p| *p < token);
        Ok(if idx == self.positions.len() { 0 } else { idx })
    }

    fn owner_at(&self, idx: usize) -> Result<&str> {
        let token = self.positions[idx];
        self.position_to_host
            .get(&token)
            .map(String::as_str)
            .ok_or_else(|| RingError::Inconsistent(format!("token {token} has no owner")))
    }

    /// The host owning `token`.
    pub(crate) fn lookup(&self, token: Token) -> Result<&str> {
        let idx = self.lower_bound(token)?;
        self.owner_at(idx)
    }

    /// Up to `n` distinct hosts, walking clockwise from `token`.
    pub(crate) fn successors(&self, token: Token, n: usize) -> Result<Vec<String>> {
        let start = self.lower_bound(token)?;
        let want = n.min(self.hosts.len());
        let mut found: Vec<String> = Vec::with_capacity(want);

        let len = self.positions.len();
        for step in 0..len {
            if found.len() == want {
                break;
            }
            let owner = self.owner_at((start + step) % len)?;
            if !found.iter().any(|h| h == owner) {
                found.push(owner.to_string());
            }
        }
        Ok(found)
    }

    pub(crate) fn vnodes(&self) -> Vec<VirtualNode> {
        self.positions
            .iter()
            .filter_map(|token| {
                self.position_to_host
                    .get(token)
                    .map(|host| VirtualNode::new(*token, host.as_str()))
            })
            .collect()
    }

    pub(crate) fn topology(&self) -> Topology {
        let len = self.positions.len();
        let ranges = self
            .positions
            .iter()
            .enumerate()
            .filter_map(|(i, end)| {
                let start = self.positions[(i + len - 1) % len];
                self.position_to_host.get(end).map(|host| TokenRange {
                    start,
                    end: *end,
                    host: host.clone(),
                })
            })
            .collect();
        Topology::new(ranges)
    }

    /// Checks the structural invariants, reporting the first violation.
    pub(crate) fn check_invariants(&self, replicas: usize) -> Result<()> {
        let fail = |msg: String| Err(RingError::Inconsistent(msg));

        if let Some(pair) = self.positions.windows(2).find(|pair| pair[0] >= pair[1]) {
            return fail(format!(
                "ring is not strictly ascending at {} >= {}",
                pair[0], pair[1]
            ));
        }

        let mut flattened: Vec<Token> = self.host_to_positions.values().flatten().copied().collect();
        flattened.sort_unstable();
        if flattened != self.positions {
            return fail(format!(
                "ring holds {} tokens but hosts own {}",
                self.positions.len(),
                flattened.len()
            ));
        }

        if self.position_to_host.len() != self.positions.len() {
            return fail(format!(
                "{} owner entries for {} tokens",
                self.position_to_host.len(),
                self.positions.len()
            ));
        }
        for token in &self.positions {
            match self.position_to_host.get(token) {
                Some(owner) if self.hosts.contains_key(owner) => {}
                Some(owner) => return fail(format!("token {token} owned by unknown host {owner:?}")),
                None => return fail(format!("token {token} has no owner")),
            }
        }

        if self.host_to_positions.len() != self.hosts.len() {
            return fail(format!(
                "{} hosts registered but {} have tokens",
                self.hosts.len(),
                self.host_to_positions.len()
            ));
        }
        for (id, tokens) in &self.host_to_positions {
            if !self.hosts.contains_key(id) {
                return fail(format!("tokens recorded for unknown host {id:?}"));
            }
            if tokens.len() != replicas {
                return fail(format!(
                    "host {id:?} has {} tokens, expected {replicas}",
                    tokens.len()
                ));
            }
            if tokens.windows(2).any(|pair| pair[0] >= pair[1]) {
                return fail(format!("tokens of host {id:?} are not sorted"));
            }
            if let Some(token) = tokens
                .iter()
                .find(|token| self.position_to_host.get(*token) != Some(id))
            {
                return fail(format!("token {token} of host {id:?} mapped elsewhere"));
            }
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn corrupt_drop_position(&mut self, token: Token) {
        self.positions.retain(|p| *p != token);
    }
}
