//! Consistent hash ring implementation.
//!
//! The ring manages token positions and provides successor lookup for
//! finding the item responsible for a key.

pub mod builder;
#[allow(clippy::module_inception)]
pub mod ring;

pub use builder::RingBuilder;
pub use ring::HashRing;
