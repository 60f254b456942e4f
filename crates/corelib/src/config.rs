//! Ring configuration.

use crate::error::{Error, Result};
use crate::partitioner::HashKind;
use serde::{Deserialize, Serialize};

/// Virtual nodes per identifier when nothing else is configured.
pub const DEFAULT_REPLICAS: usize = 20;

/// Settings a [`HashRing`](crate::ring::HashRing) is built from.
///
/// ```rust
/// use corelib::config::RingConfig;
/// use corelib::partitioner::HashKind;
///
/// let config = RingConfig::from_json(r#"{ "replicas": 100, "hash": "xxh3" }"#).unwrap();
/// assert_eq!(config.replicas, 100);
/// assert_eq!(config.hash, HashKind::Xxh3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RingConfig {
    /// Virtual nodes per identifier. Must be positive.
    pub replicas: usize,
    /// Hash function used for both virtual nodes and lookup keys.
    pub hash: HashKind,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            replicas: DEFAULT_REPLICAS,
            hash: HashKind::default(),
        }
    }
}

impl RingConfig {
    /// Parses and validates a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::InvalidConfiguration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.replicas == 0 {
            return Err(Error::InvalidConfiguration(
                "replica count must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
