//! Error types for wharf-registry.

use miette::Diagnostic;
use thiserror::Error;

/// Errors surfaced while synthesizing registry metadata.
///
/// Unknown packages and denied access are not errors here: both degrade to
/// empty results so the output never discloses what exists. Only failures
/// the caller must surface as a server fault appear in this enum.
#[derive(Error, Diagnostic, Debug)]
pub enum RegistryError {
    #[error("Package store query failed: {0}")]
    #[diagnostic(
        code(wharf_registry::store),
        help("The backing package store is unavailable or inconsistent")
    )]
    Store(String),

    #[error(transparent)]
    #[diagnostic(
        code(wharf_registry::json),
        help("The synthesized document could not be serialized")
    )]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
