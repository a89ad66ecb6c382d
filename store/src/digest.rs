//! # Content-Addressed Key Derivation
//!
//! Every record is stored under the SHA-256 digest of its own content,
//! rendered as 64 lowercase hex characters. Same content, same key,
//! whether derived in this process or the next restart. That one
//! property is what makes the store deduplicating: re-inserting an
//! identical record overwrites the same slot instead of minting a
//! sibling.
//!
//! ## Canonical serialization
//!
//! The hash input is the record's canonical JSON: struct fields in
//! declaration order, with every field always present and no elision of
//! zero or empty values. serde_json gives us this for free for plain
//! structs, since the schema *is* the declaration order. The canonical
//! bytes exist only as hash input; they are never what gets written to
//! the store.
//!
//! SHA-256 over that. Nothing fancier is needed; collision resistance
//! is inherited from the hash, not managed here.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::{StoreError, StoreResult};

/// Length of a derived key in hex characters (32-byte digest, hex-encoded).
pub const KEY_LENGTH: usize = 64;

/// Derive the storage key for a record.
///
/// Canonicalizes the record, hashes with SHA-256, and returns the digest
/// as a lowercase hex string of [`KEY_LENGTH`] characters. Deterministic:
/// two calls with equal records always agree.
///
/// # Errors
///
/// [`StoreError::Serialization`] if the record cannot be canonicalized.
/// For the record types in this crate that cannot happen; the error path
/// exists because the contract is generic over any `Serialize` type.
pub fn derive_key<T: Serialize>(record: &T) -> StoreResult<String> {
    let canonical =
        serde_json::to_vec(record).map_err(|e| StoreError::Serialization(e.to_string()))?;
    Ok(hex::encode(sha256(&canonical)))
}

/// Compute the SHA-256 digest of the input, as a fixed-size array.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let mut output = [0u8; 32];
    output.copy_from_slice(&hasher.finalize());
    output
}
