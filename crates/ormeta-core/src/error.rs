//! Core error types.

use thiserror::Error;

/// Metadata registry errors.
///
/// Correlation itself never fails. These errors come from type declaration,
/// strict registration, manifest loading and the session boundary.
#[derive(Debug, Error)]
pub enum Error {
    /// An entity was registered twice while duplicates are rejected.
    #[error("entity already registered for type '{0}'")]
    DuplicateEntity(String),

    /// A manifest referenced a type that was never declared.
    #[error("unknown type: {0}")]
    UnknownType(String),

    /// A parent target was not issued by this registry.
    #[error("unknown parent type: {0}")]
    UnknownParent(String),

    /// A manifest declared the same type name twice.
    #[error("type declared more than once: {0}")]
    DuplicateType(String),

    /// Manifest parse error.
    #[error("manifest error: {0}")]
    Manifest(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Error reported by a session collaborator.
    #[error("session error: {0}")]
    Session(String),
}

/// Result alias for metadata operations.
pub type Result<T> = std::result::Result<T, Error>;
