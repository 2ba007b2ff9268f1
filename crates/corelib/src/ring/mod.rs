//! Consistent hash ring implementation.
//!
//! The ring manages virtual node positions and provides efficient lookup
//! operations for finding hosts responsible for keys.

pub mod builder;
pub mod ring;
mod state;

pub use builder::{RingBuilder, RingConfig};
pub use ring::{HashRing, DEFAULT_REPLICAS, MAX_REPLICAS};
