//! Ring topology views.
//!
//! A [`Topology`] is a point-in-time copy of the ring's positions, detached
//! from the lock, for ownership and range analysis.

use crate::token::Token;
use std::collections::BTreeMap;

/// Snapshot of `(token, identifier)` pairs in ring order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Topology {
    entries: Vec<(Token, String)>,
}

impl Topology {
    /// Builds a topology from pairs that are already sorted by token with no
    /// duplicate tokens.
    pub(crate) fn from_sorted(entries: Vec<(Token, String)>) -> Self {
        debug_assert!(entries.windows(2).all(|w| w[0].0 < w[1].0));
        Self { entries }
    }

    /// Number of distinct positions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[(Token, String)] {
        &self.entries
    }

    /// Identifier owning `token`: the first position at or after it, wrapping
    /// to the lowest position.
    pub fn owner_of(&self, token: Token) -> Option<&str> {
        let idx = self.entries.partition_point(|(t, _)| *t < token);
        self.entries
            .get(idx)
            .or_else(|| self.entries.first())
            .map(|(_, id)| id.as_str())
    }

    /// Fraction of the ring owned by each identifier.
    ///
    /// A position owns the arc `(predecessor, position]`; the lowest position
    /// also owns the wrapped arc past the highest one. Fractions sum to 1.0.
    pub fn ownership(&self) -> BTreeMap<String, f64> {
        let mut owned: BTreeMap<String, f64> = BTreeMap::new();
        if self.entries.len() == 1 {
            owned.insert(self.entries[0].1.clone(), 1.0);
            return owned;
        }

        const RING: f64 = 18_446_744_073_709_551_616.0; // 2^64
        let mut prev = match self.entries.last() {
            Some((token, _)) => *token,
            None => return owned,
        };
        for (token, id) in &self.entries {
            let arc = prev.distance_to(*token) as f64 / RING;
            *owned.entry(id.clone()).or_default() += arc;
            prev = *token;
        }
        owned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topo(pairs: &[(u64, &str)]) -> Topology {
        Topology::from_sorted(
            pairs
                .iter()
                .map(|(t, id)| (Token(*t), id.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_owner_of_successor_and_wrap() {
        let t = topo(&[(100, "a"), (200, "b"), (300, "c")]);
        assert_eq!(t.owner_of(Token(50)), Some("a"));
        assert_eq!(t.owner_of(Token(100)), Some("a"));
        assert_eq!(t.owner_of(Token(101)), Some("b"));
        assert_eq!(t.owner_of(Token(300)), Some("c"));
        assert_eq!(t.owner_of(Token(301)), Some("a"));
        assert_eq!(t.owner_of(Token::MAX), Some("a"));
    }

    #[test]
    fn test_owner_of_empty() {
        assert_eq!(Topology::default().owner_of(Token(1)), None);
    }

    #[test]
    fn test_single_position_owns_everything() {
        let owned = topo(&[(42, "solo")]).ownership();
        assert_eq!(owned.get("solo"), Some(&1.0));
    }

    #[test]
    fn test_ownership_halves() {
        let half = 1u64 << 63;
        let owned = topo(&[(0, "a"), (half, "b")]).ownership();
        assert!((owned["a"] - 0.5).abs() < 1e-12);
        assert!((owned["b"] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_ownership_sums_to_one() {
        let t = topo(&[(7, "a"), (1 << 20, "b"), (1 << 40, "a"), (u64::MAX - 3, "c")]);
        let total: f64 = t.ownership().values().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }
}
