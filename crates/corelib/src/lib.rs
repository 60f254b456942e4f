//! Core library for consistent hashing.
//!
//! This crate provides the building blocks of a consistent hash ring:
//! - Token positions on a `u64` circle
//! - Pluggable partitioners (hash functions)
//! - Virtual node placement
//! - The thread-safe ring itself, its builder and configuration
//! - Topology snapshots for ownership analysis
//!
//! The ring only decides which item owns a key. Moving data when membership
//! changes is left to the caller.

pub mod config;
pub mod error;
pub mod partitioner;
pub mod ring;
pub mod token;
pub mod topology;
pub mod vnode;

pub use config::{RingConfig, DEFAULT_REPLICAS};
pub use error::{Error, Result};
pub use partitioner::{HashKind, Partitioner};
pub use ring::{HashRing, RingBuilder};
pub use token::Token;
pub use topology::Topology;
pub use vnode::VirtualNode;
