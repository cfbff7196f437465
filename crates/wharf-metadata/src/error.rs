//! Error types for the metadata document model.

use miette::Diagnostic;
use thiserror::Error;
use wharf_utils::error::CompressionError;

/// Errors that can occur while re-encoding metadata documents.
///
/// Decoding is deliberately infallible: malformed stored content degrades to
/// empty output instead of surfacing here.
#[derive(Error, Diagnostic, Debug)]
pub enum MetadataError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Compression(#[from] CompressionError),

    #[error(transparent)]
    #[diagnostic(
        code(wharf_metadata::json),
        help("The document content could not be serialized")
    )]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for metadata operations.
pub type Result<T> = std::result::Result<T, MetadataError>;
