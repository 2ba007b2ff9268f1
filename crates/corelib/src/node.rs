//! Host abstractions for the consistent hash ring.
//!
//! Hosts are the routing targets registered on the ring. They are identified
//! by an opaque string id (usually an address); the display name is only a
//! label for humans.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A registered routing target.
///
/// An empty id is a legal, distinct identity, but callers should avoid it:
/// it is easy to produce by accident and hard to tell apart in logs.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Host {
    pub id: String,
    /// Human-readable name; defaults to `id`.
    pub name: String,
}

impl Host {
    /// Construct a host, falling back to `id` when `name` is empty.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let id = id.into();
        let mut name = name.into();
        if name.is_empty() {
            name.clone_from(&id);
        }
        Self { id, name }
    }

    /// Construct a host whose name is its id.
    pub fn unnamed(id: impl Into<String>) -> Self {
        Self::new(id, String::new())
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name == self.id {
            f.write_str(&self.id)
        } else {
            write!(f, "{} ({})", self.name, self.id)
        }
    }
}
