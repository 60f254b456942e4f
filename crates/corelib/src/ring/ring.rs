//! Hash ring data structure.
//!
//! State is a `BTreeMap<Token, identifier>` (the sorted position index and the
//! position-to-owner mapping in one structure) plus a `HashMap` from identifier
//! to item, which is the source of truth for membership. Both sit behind a
//! single `RwLock`: `put`/`delete` take it exclusively, everything else shares it.

use crate::config::{RingConfig, DEFAULT_REPLICAS};
use crate::error::{Error, Result};
use crate::partitioner::{Blake3Partitioner, Partitioner};
use crate::token::Token;
use crate::topology::Topology;
use crate::vnode::VirtualNode;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace, warn};

struct RingState<T> {
    positions: BTreeMap<Token, Arc<str>>,
    items: HashMap<Arc<str>, T>,
}

impl<T> RingState<T> {
    fn new() -> Self {
        Self {
            positions: BTreeMap::new(),
            items: HashMap::new(),
        }
    }
}

/// A thread-safe consistent hash ring mapping keys to items.
///
/// Each identifier is placed on the ring at `replicas` positions, computed by
/// hashing `"identifier:i"` for `i` in `[0, replicas)`. A key belongs to the
/// first position at or after its own hash, wrapping to the lowest position.
///
/// When two virtual nodes hash to the same token, the most recent `put` owns
/// it. The other identifier stays a member with one fewer visible position.
///
/// # Example
///
/// ```rust
/// use corelib::ring::HashRing;
///
/// let ring: HashRing<&str> = HashRing::default();
/// ring.put("node1", "10.0.0.1:6379").unwrap();
/// ring.put("node2", "10.0.0.2:6379").unwrap();
///
/// let addr = ring.locate("user:42").unwrap();
/// assert!(addr == "10.0.0.1:6379" || addr == "10.0.0.2:6379");
/// ```
pub struct HashRing<T> {
    state: RwLock<RingState<T>>,
    replicas: usize,
    partitioner: Arc<dyn Partitioner>,
}

impl<T> HashRing<T> {
    /// Creates an empty ring with `replicas` virtual nodes per identifier.
    ///
    /// Fails with [`Error::InvalidConfiguration`] if `replicas` is zero.
    pub fn new(replicas: usize, partitioner: impl Partitioner) -> Result<Self> {
        Self::with_shared_partitioner(replicas, Arc::new(partitioner))
    }

    /// Like [`HashRing::new`] for a partitioner that is already shared.
    pub fn with_shared_partitioner(
        replicas: usize,
        partitioner: Arc<dyn Partitioner>,
    ) -> Result<Self> {
        if replicas == 0 {
            return Err(Error::InvalidConfiguration(
                "replica count must be positive".to_string(),
            ));
        }
        Ok(Self {
            state: RwLock::new(RingState::new()),
            replicas,
            partitioner,
        })
    }

    pub fn from_config(config: &RingConfig) -> Result<Self> {
        config.validate()?;
        Self::with_shared_partitioner(config.replicas, config.hash.partitioner())
    }

    /// Inserts `item` under `identifier`, or replaces the item if the
    /// identifier is already present. Positions depend only on the identifier,
    /// so a replacement never moves it on the ring.
    pub fn put(&self, identifier: impl Into<String>, item: T) -> Result<()> {
        let identifier = identifier.into();
        if identifier.is_empty() {
            return Err(Error::InvalidIdentifier(
                "identifier must not be empty".to_string(),
            ));
        }
        let vnodes =
            VirtualNode::for_identifier(self.partitioner.as_ref(), &identifier, self.replicas);

        let mut state = self.state.write();
        let id: Arc<str> = match state.items.get_key_value(identifier.as_str()) {
            Some((existing, _)) => Arc::clone(existing),
            None => Arc::from(identifier),
        };

        for vnode in &vnodes {
            if let Some(previous) = state.positions.insert(vnode.token, Arc::clone(&id)) {
                if previous != id {
                    warn!(
                        token = %vnode.token,
                        previous = %previous,
                        identifier = %id,
                        "virtual node collision, last put wins"
                    );
                }
            }
        }
        let replaced = state.items.insert(Arc::clone(&id), item).is_some();

        debug!(
            identifier = %id,
            replicas = self.replicas,
            replaced,
            vnodes = state.positions.len(),
            "put identifier on ring"
        );
        Ok(())
    }

    /// Removes `identifier` and every position it still owns.
    ///
    /// Returns `false` (and changes nothing) if it was not present. Positions
    /// taken over by another identifier through a collision are left alone.
    pub fn delete(&self, identifier: &str) -> bool {
        let vnodes =
            VirtualNode::for_identifier(self.partitioner.as_ref(), identifier, self.replicas);

        let mut state = self.state.write();
        if !state.items.contains_key(identifier) {
            trace!(identifier, "delete of absent identifier");
            return false;
        }

        for vnode in &vnodes {
            let owned = state
                .positions
                .get(&vnode.token)
                .is_some_and(|owner| &**owner == identifier);
            if owned {
                state.positions.remove(&vnode.token);
            }
        }
        state.items.remove(identifier);

        debug!(
            identifier,
            remaining = state.items.len(),
            vnodes = state.positions.len(),
            "deleted identifier from ring"
        );
        true
    }

    /// Number of distinct identifiers.
    pub fn len(&self) -> usize {
        self.state.read().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().items.is_empty()
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.state.read().items.contains_key(identifier)
    }

    /// Every identifier currently present, in no particular order.
    pub fn identifiers(&self) -> Vec<String> {
        self.state
            .read()
            .items
            .keys()
            .map(|id| id.to_string())
            .collect()
    }

    /// Number of distinct positions on the ring.
    pub fn vnode_count(&self) -> usize {
        self.state.read().positions.len()
    }

    /// Tokens that currently resolve to `identifier`, ascending.
    ///
    /// Normally `replicas` long; shorter only when a collision handed a
    /// position to another identifier. Empty if the identifier is absent.
    pub fn positions_of(&self, identifier: &str) -> Vec<Token> {
        let vnodes =
            VirtualNode::for_identifier(self.partitioner.as_ref(), identifier, self.replicas);

        let state = self.state.read();
        let mut tokens: Vec<Token> = vnodes
            .into_iter()
            .map(|vnode| vnode.token)
            .filter(|token| {
                state
                    .positions
                    .get(token)
                    .is_some_and(|owner| &**owner == identifier)
            })
            .collect();
        tokens.sort_unstable();
        tokens.dedup();
        tokens
    }

    /// All `(token, identifier)` pairs in ring order.
    pub fn tokens(&self) -> Vec<(Token, String)> {
        self.state
            .read()
            .positions
            .iter()
            .map(|(token, id)| (*token, id.to_string()))
            .collect()
    }

    /// Detached snapshot of the ring's positions.
    pub fn topology(&self) -> Topology {
        Topology::from_sorted(self.tokens())
    }

    pub fn replicas(&self) -> usize {
        self.replicas
    }

    pub fn partitioner_name(&self) -> &'static str {
        self.partitioner.name()
    }
}

impl<T: Clone> HashRing<T> {
    /// Returns the item owning `key`.
    ///
    /// Successor search over the sorted positions: the owner is the first
    /// position at or after `hash(key)`, or the lowest position if the key
    /// hashes past every one of them. Fails with [`Error::EmptyRing`] when no
    /// identifier is present.
    pub fn locate(&self, key: impl AsRef<[u8]>) -> Result<T> {
        let token = self.partitioner.partition(key.as_ref());

        let state = self.state.read();
        let (position, owner) = state
            .positions
            .range(token..)
            .next()
            .or_else(|| state.positions.iter().next())
            .ok_or(Error::EmptyRing)?;
        trace!(%token, %position, identifier = %owner, "located key");

        state.items.get(owner).cloned().ok_or(Error::EmptyRing)
    }

    /// Current item stored under `identifier`.
    pub fn get(&self, identifier: &str) -> Option<T> {
        self.state.read().items.get(identifier).cloned()
    }

    /// One item per identifier, in no particular order.
    pub fn all_items(&self) -> Vec<T> {
        self.state.read().items.values().cloned().collect()
    }
}

impl<T> Default for HashRing<T> {
    /// Empty ring with [`DEFAULT_REPLICAS`] and the BLAKE3 partitioner.
    fn default() -> Self {
        Self {
            state: RwLock::new(RingState::new()),
            replicas: DEFAULT_REPLICAS,
            partitioner: Arc::new(Blake3Partitioner),
        }
    }
}

impl<T> fmt::Debug for HashRing<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("HashRing")
            .field("replicas", &self.replicas)
            .field("partitioner", &self.partitioner.name())
            .field("items", &state.items.len())
            .field("vnodes", &state.positions.len())
            .finish()
    }
}
