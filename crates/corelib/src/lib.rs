//! Core library for consistent hashing implementation.
//!
//! This crate provides the fundamental abstractions for consistent hashing:
//! - Ring tokens (positions in the 32-bit hash space)
//! - Pluggable partitioners (key -> token hash functions)
//! - Hosts and their virtual nodes
//! - The concurrent hash ring and its topology snapshots
//!
//! # Example
//!
//! ```rust
//! use corelib::HashRing;
//!
//! let ring = HashRing::new();
//! ring.join_named("10.9.97.189", "server1").unwrap();
//! ring.join_named("10.9.24.3", "server2").unwrap();
//!
//! let owner = ring.get("hello").unwrap();
//! assert!(owner == "10.9.97.189" || owner == "10.9.24.3");
//! ```

pub mod error;
pub mod node;
pub mod partitioner;
pub mod ring;
pub mod token;
pub mod topology;
pub mod vnode;

pub use error::{Result, RingError};
pub use node::Host;
pub use partitioner::{Partitioner, PartitionerKind};
pub use ring::{HashRing, RingBuilder, RingConfig, MAX_REPLICAS};
pub use token::Token;
pub use topology::{TokenRange, Topology};
pub use vnode::VirtualNode;
