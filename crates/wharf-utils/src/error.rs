//! Error types for wharf-utils.

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised by the gzip codec helpers.
#[derive(Error, Diagnostic, Debug)]
pub enum CompressionError {
    #[error("Failed to compress content: {0}")]
    #[diagnostic(code(wharf_utils::compress))]
    Compress(#[source] std::io::Error),

    #[error("Failed to decompress content: {0}")]
    #[diagnostic(
        code(wharf_utils::decompress),
        help("The stored bytes may be truncated or corrupted")
    )]
    Decompress(#[source] std::io::Error),
}

/// A specialized Result type for compression operations.
pub type CompressionResult<T> = std::result::Result<T, CompressionError>;
