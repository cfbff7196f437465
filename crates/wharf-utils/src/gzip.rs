//! Gzip codec for stored document content.

use std::io::{Read, Write};

use flate2::{read::GzDecoder, write::GzEncoder, Compression};

use crate::error::{CompressionError, CompressionResult};

/// Magic bytes for gzip streams.
pub const GZIP_MAGIC_BYTES: [u8; 2] = [0x1f, 0x8b];

/// Returns `true` when the byte slice starts with the gzip magic.
pub fn is_gzipped(bytes: &[u8]) -> bool {
    bytes.len() >= 2 && bytes[..2] == GZIP_MAGIC_BYTES
}

/// Compresses a byte slice into a gzip stream.
///
/// # Errors
///
/// Returns [`CompressionError::Compress`] if the encoder fails.
pub fn compress(bytes: &[u8]) -> CompressionResult<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(bytes)
        .map_err(CompressionError::Compress)?;
    encoder.finish().map_err(CompressionError::Compress)
}

/// Decompresses a gzip stream back into its original bytes.
///
/// # Errors
///
/// Returns [`CompressionError::Decompress`] if the stream is not valid gzip
/// or ends before the declared payload does.
pub fn decompress(bytes: &[u8]) -> CompressionResult<Vec<u8>> {
    let mut decoder = GzDecoder::new(bytes);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(CompressionError::Decompress)?;
    Ok(out)
}
