use sha2::{Digest, Sha256};

/// Computes the sha256 digest of a byte slice.
///
/// Returns the digest as a lowercase hex-encoded string, the form the
/// registry protocol embeds in provider manifests and document names.
///
/// # Example
///
/// ```
/// use wharf_utils::hash::sha256_hex;
///
/// let digest = sha256_hex(b"hello world\n");
/// assert_eq!(
///     digest,
///     "a948904f2f0f479b8f8197694b30184b0d2ed1c1cd2a1ec0fb85d299a192a447"
/// );
/// ```
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

#[cfg(test)]
mod tests {
    use super::sha256_hex;

    #[test]
    fn test_sha256_hex() {
        assert_eq!(
            sha256_hex(b"hello world\n"),
            "a948904f2f0f479b8f8197694b30184b0d2ed1c1cd2a1ec0fb85d299a192a447"
        );
    }

    #[test]
    fn test_sha256_hex_empty() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_sha256_hex_is_lowercase() {
        let digest = sha256_hex(b"WHARF");
        assert!(digest.chars().all(|c| !c.is_ascii_uppercase()));
        assert_eq!(digest.len(), 64);
    }
}
