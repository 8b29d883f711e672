use sha2::{Digest, Sha256};

/// Compute SHA-256 hash of bytes, returning lowercase hex string.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Stable 32-bit seed for a key: the first 8 hex digits of its SHA-256.
///
/// Stable across processes and platforms, unlike `std::hash`.
pub fn seed_for_key(key: &str) -> u64 {
    let digest = sha256_hex(key.as_bytes());
    // The first 8 hex digits always fit in a u64.
    u64::from_str_radix(&digest[..8], 16).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_empty() {
        let h = sha256_hex(b"");
        assert_eq!(
            h,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn seed_uses_digest_prefix() {
        // sha256("hello") = 2cf24dba...
        assert_eq!(seed_for_key("hello"), 0x2cf2_4dba);
    }

    #[test]
    fn seeds_differ_per_key() {
        assert_eq!(seed_for_key("US"), seed_for_key("US"));
        assert_ne!(seed_for_key("US"), seed_for_key("news-US"));
    }
}
