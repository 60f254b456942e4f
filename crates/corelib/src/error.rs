//! Error types for the core library.

/// Result type alias for the core library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the core library.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A lookup was made against a ring with no identifiers.
    #[error("no available items: the ring is empty")]
    EmptyRing,

    /// The ring could not be constructed from the given settings.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An identifier was rejected on insertion.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),
}
