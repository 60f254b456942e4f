//! Core partitioner trait definitions.

use crate::token::Token;

/// A partitioner converts keys into tokens for placement on the hash ring.
///
/// Partitioners are stateless: `partition` takes `&self` and builds any digest
/// state it needs per call, so concurrent readers can hash keys without
/// holding the ring lock.
pub trait Partitioner: Send + Sync + 'static {
    /// Converts a key into a token.
    ///
    /// Must be deterministic: the same bytes always produce the same token.
    fn partition(&self, key: &[u8]) -> Token;

    /// Returns the name of this partitioner.
    fn name(&self) -> &'static str;
}
