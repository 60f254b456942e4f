//! Builder for constructing a populated ring in one expression.

use crate::config::{RingConfig, DEFAULT_REPLICAS};
use crate::error::Result;
use crate::partitioner::{Blake3Partitioner, Partitioner};
use crate::ring::HashRing;
use std::sync::Arc;

/// Collects settings and initial members, then builds a [`HashRing`].
///
/// ```rust
/// use corelib::ring::RingBuilder;
/// use corelib::partitioner::Xxh3Partitioner;
///
/// let ring = RingBuilder::new()
///     .with_replicas(100)
///     .with_partitioner(Xxh3Partitioner)
///     .add("node1", 1u32)
///     .add("node2", 2u32)
///     .build()
///     .unwrap();
///
/// assert_eq!(ring.len(), 2);
/// assert_eq!(ring.vnode_count(), 200);
/// ```
pub struct RingBuilder<T> {
    replicas: usize,
    partitioner: Option<Arc<dyn Partitioner>>,
    items: Vec<(String, T)>,
}

impl<T> RingBuilder<T> {
    pub fn new() -> Self {
        Self {
            replicas: DEFAULT_REPLICAS,
            partitioner: None,
            items: Vec::new(),
        }
    }

    /// Takes replica count and hash function from `config`.
    pub fn with_config(mut self, config: &RingConfig) -> Self {
        self.replicas = config.replicas;
        self.partitioner = Some(config.hash.partitioner());
        self
    }

    pub fn with_replicas(mut self, replicas: usize) -> Self {
        self.replicas = replicas;
        self
    }

    pub fn with_partitioner(mut self, partitioner: impl Partitioner) -> Self {
        self.partitioner = Some(Arc::new(partitioner));
        self
    }

    /// Queues `item` under `identifier`. Later additions of the same
    /// identifier replace earlier ones, as with [`HashRing::put`].
    pub fn add(mut self, identifier: impl Into<String>, item: T) -> Self {
        self.items.push((identifier.into(), item));
        self
    }

    /// Builds the ring, defaulting to BLAKE3 if no partitioner was set.
    pub fn build(self) -> Result<HashRing<T>> {
        let partitioner = self
            .partitioner
            .unwrap_or_else(|| Arc::new(Blake3Partitioner));
        let ring = HashRing::with_shared_partitioner(self.replicas, partitioner)?;
        for (identifier, item) in self.items {
            ring.put(identifier, item)?;
        }
        Ok(ring)
    }
}

impl<T> Default for RingBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::partitioner::HashKind;

    #[test]
    fn test_builder_defaults() {
        let ring = RingBuilder::new().add("node1", ()).build().unwrap();
        assert_eq!(ring.replicas(), DEFAULT_REPLICAS);
        assert_eq!(ring.partitioner_name(), "Blake3Partitioner");
        assert_eq!(ring.vnode_count(), DEFAULT_REPLICAS);
    }

    #[test]
    fn test_builder_from_config() {
        let config = RingConfig {
            replicas: 7,
            hash: HashKind::Sip13,
        };
        let ring = RingBuilder::new()
            .with_config(&config)
            .add("a", 1)
            .add("b", 2)
            .build()
            .unwrap();
        assert_eq!(ring.partitioner_name(), "SipPartitioner");
        assert_eq!(ring.vnode_count(), 14);
    }

    #[test]
    fn test_builder_later_add_wins() {
        let ring = RingBuilder::new()
            .add("a", "first")
            .add("a", "second")
            .build()
            .unwrap();
        assert_eq!(ring.len(), 1);
        assert_eq!(ring.get("a"), Some("second"));
    }

    #[test]
    fn test_builder_rejects_bad_input() {
        let zero = RingBuilder::<()>::new().with_replicas(0).build();
        assert!(matches!(zero, Err(Error::InvalidConfiguration(_))));

        let empty_id = RingBuilder::new().add("", ()).build();
        assert!(matches!(empty_id, Err(Error::InvalidIdentifier(_))));
    }
}
