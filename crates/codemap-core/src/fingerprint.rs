//! Content fingerprinting for change detection.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 hex digest of file content.
///
/// Re-analysis compares this against the stored checksum to decide between
/// skipping and a full re-extraction.
pub fn checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}
