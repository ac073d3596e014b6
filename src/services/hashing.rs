//! Content fingerprints used to spot re-submitted exports.
//!
//! Hashes are taken over the raw (merged) archive text, before extraction.

/// BLAKE3 digest of the UTF-8 bytes, lowercase hex (64 chars).
pub fn content_hash(content: &str) -> String {
    blake3::hash(content.as_bytes()).to_hex().to_string()
}

/// Hash both sides of an export; the two digests are independent.
pub fn hash_pair(followers: &str, following: &str) -> (String, String) {
    rayon::join(|| content_hash(followers), || content_hash(following))
}

#[cfg(test)]
#[path = "tests/hashing_tests.rs"]
mod tests;
