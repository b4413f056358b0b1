//! Hashing System - SHA-256 for Approval Fingerprints
//!
//! Provides deterministic, reproducible digests over canonical JSON.

use serde::Serialize;
use sha2::{Digest, Sha256};

/// Number of hex characters kept from the full digest.
pub const FINGERPRINT_LEN: usize = 16;

/// Compute SHA-256 hash of bytes, return hex string
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Convert to canonical JSON (compact, key order preserved as parsed)
///
/// Key order is part of the digest contract: `serde_json` is built with
/// `preserve_order`, so objects serialize in the textual order of the input
/// file, and the downstream consumer hashing the same file sees the same
/// bytes.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}

/// First [`FINGERPRINT_LEN`] hex chars of the SHA-256 over canonical JSON
pub fn fingerprint<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let canonical = canonical_json(value)?;
    let mut digest = sha256_hex(canonical.as_bytes());
    digest.truncate(FINGERPRINT_LEN);
    Ok(digest)
}
