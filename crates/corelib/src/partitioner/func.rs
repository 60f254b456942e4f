//! Closure-backed partitioner.

use crate::partitioner::traits::Partitioner;
use crate::token::Token;
use std::fmt;

/// Adapts a plain hash function `bytes -> u64` into a [`Partitioner`].
///
/// # Example
///
/// ```rust
/// use corelib::partitioner::{FnPartitioner, Partitioner};
///
/// let fnv = FnPartitioner::new("fnv1a", |key: &[u8]| {
///     key.iter().fold(0xcbf29ce484222325u64, |h, b| {
///         (h ^ u64::from(*b)).wrapping_mul(0x100000001b3)
///     })
/// });
/// assert_eq!(fnv.name(), "fnv1a");
/// ```
pub struct FnPartitioner<F> {
    name: &'static str,
    hash: F,
}

impl<F> FnPartitioner<F>
where
    F: Fn(&[u8]) -> u64 + Send + Sync + 'static,
{
    /// Wraps `hash` under the given name.
    pub fn new(name: &'static str, hash: F) -> Self {
        Self { name, hash }
    }
}

impl<F> Partitioner for FnPartitioner<F>
where
    F: Fn(&[u8]) -> u64 + Send + Sync + 'static,
{
    fn partition(&self, key: &[u8]) -> Token {
        Token((self.hash)(key))
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

impl<F> fmt::Debug for FnPartitioner<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnPartitioner").field("name", &self.name).finish()
    }
}
