//! SHA-256 content hashing.

use sha2::{Digest, Sha256};

/// Computes lowercase hex SHA-256 digests of file contents.
pub struct Hasher;

impl Hasher {
    /// Hash an in-memory byte buffer.
    ///
    /// Used by extraction, where the same buffer also provides the file size,
    /// so size and hash always describe the same bytes.
    pub fn content_hash_from_bytes(data: &[u8]) -> String {
        hex::encode(Sha256::digest(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_digest() {
        assert_eq!(
            Hasher::content_hash_from_bytes(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_known_digest() {
        assert_eq!(
            Hasher::content_hash_from_bytes(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_identical_content_same_hash_single_byte_differs() {
        let a = vec![7u8; 4096];
        let mut b = a.clone();
        assert_eq!(
            Hasher::content_hash_from_bytes(&a),
            Hasher::content_hash_from_bytes(&b)
        );

        b[2048] ^= 0x01;
        assert_ne!(
            Hasher::content_hash_from_bytes(&a),
            Hasher::content_hash_from_bytes(&b)
        );
    }
}
