//! Partitioner abstraction for consistent hashing.
//!
//! Partitioners are responsible for converting keys into tokens
//! that can be placed on the hash ring.

pub mod blake;
pub mod func;
pub mod sip;
pub mod traits;
pub mod xxh3;

pub use blake::Blake3Partitioner;
pub use func::FnPartitioner;
pub use sip::SipPartitioner;
pub use traits::Partitioner;
pub use xxh3::Xxh3Partitioner;

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Names of the built-in partitioners, as they appear in configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashKind {
    #[default]
    Blake3,
    #[serde(alias = "siphash")]
    Sip13,
    Xxh3,
}

impl HashKind {
    /// Instantiates the partitioner this name refers to.
    pub fn partitioner(self) -> Arc<dyn Partitioner> {
        match self {
            HashKind::Blake3 => Arc::new(Blake3Partitioner),
            HashKind::Sip13 => Arc::new(SipPartitioner),
            HashKind::Xxh3 => Arc::new(Xxh3Partitioner),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HashKind::Blake3 => "blake3",
            HashKind::Sip13 => "sip13",
            HashKind::Xxh3 => "xxh3",
        }
    }
}

impl fmt::Display for HashKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "blake3" => Ok(HashKind::Blake3),
            "sip13" | "siphash" => Ok(HashKind::Sip13),
            "xxh3" => Ok(HashKind::Xxh3),
            other => Err(Error::InvalidConfiguration(format!(
                "unknown hash function '{other}' (expected blake3, sip13 or xxh3)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Token;

    #[test]
    fn test_builtins_are_deterministic() {
        for kind in [HashKind::Blake3, HashKind::Sip13, HashKind::Xxh3] {
            let p = kind.partitioner();
            assert_eq!(p.partition(b"12345"), p.partition(b"12345"), "{kind}");
            assert_ne!(p.partition(b"node1:0"), p.partition(b"node1:1"), "{kind}");
        }
    }

    #[test]
    fn test_builtins_disagree() {
        let key = b"node1:0";
        let a = Blake3Partitioner.partition(key);
        let b = SipPartitioner.partition(key);
        let c = Xxh3Partitioner.partition(key);
        assert!(a != b && b != c && a != c);
    }

    #[test]
    fn test_hash_kind_parse() {
        assert_eq!("blake3".parse::<HashKind>().unwrap(), HashKind::Blake3);
        assert_eq!("XXH3".parse::<HashKind>().unwrap(), HashKind::Xxh3);
        assert_eq!("siphash".parse::<HashKind>().unwrap(), HashKind::Sip13);
        assert!(matches!(
            "sha1".parse::<HashKind>(),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_hash_kind_names_round_trip_through_display() {
        for kind in [HashKind::Blake3, HashKind::Sip13, HashKind::Xxh3] {
            assert_eq!(kind.to_string().parse::<HashKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_fn_partitioner() {
        let p = FnPartitioner::new("len", |key: &[u8]| key.len() as u64);
        assert_eq!(p.partition(b"abcd"), Token(4));
        assert_eq!(p.name(), "len");
    }
}
