//! Error types for the Aerolith store.
//!
//! Every fallible operation in this crate returns a [`StoreError`]. The
//! variants map one-to-one onto the ways a content-addressed write or a
//! typed read can fail, so callers can match on exactly the failure they
//! care about instead of string-sniffing.

use thiserror::Error;

/// Errors that can occur while storing or loading ledger records.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The record could not be canonically serialized for key derivation.
    ///
    /// This is an invariant violation (a record type that cannot be
    /// represented in the canonical form), not a runtime condition worth
    /// retrying.
    #[error("canonical serialization failed: {0}")]
    Serialization(String),

    /// A required field was absent from the stored field map.
    #[error("field `{field}` missing from stored record")]
    FieldMissing {
        /// Name of the missing field.
        field: &'static str,
    },

    /// A field was present but held a value of the wrong runtime type.
    #[error("field `{field}`: expected {expected}, found {found}")]
    FieldType {
        /// Name of the offending field.
        field: &'static str,
        /// The type the record schema declares for this field.
        expected: &'static str,
        /// Short description of what the store actually returned.
        found: String,
    },

    /// No record exists under the given storage key.
    #[error("no record stored under key {key}")]
    NotFound {
        /// The content-derived key that was looked up.
        key: String,
    },

    /// The backing store could not be opened.
    #[error("store unavailable: {0}")]
    OpenFailed(String),

    /// The backing store rejected or failed a write. Wraps the backend's
    /// own error text without reinterpretation.
    #[error("store write failed: {0}")]
    WriteFailed(String),

    /// The backing store failed while reading.
    #[error("store read failed: {0}")]
    ReadFailed(String),
}

/// Convenience alias used across the crate.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
