//! # Block Records
//!
//! A block is the archival unit of the ledger: header metadata plus the
//! ordered list of transaction IDs it committed. Aerolith does not mine,
//! validate, or link blocks. It stores what it is given, verbatim, and
//! hands it back byte-for-byte equal.
//!
//! ## Schema
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  Block                                       │
//! │  ├── id: String                              │
//! │  ├── version: i32                            │
//! │  ├── prehash: String      (parent block hash)│
//! │  ├── merkleroot: String                      │
//! │  ├── timestamp: String                       │
//! │  ├── level: String                           │
//! │  ├── nonce: u32                              │
//! │  ├── size: i64                               │
//! │  ├── txcount: i64                            │
//! │  └── txid_list: Vec<String>  (ordered)       │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! The field set is fixed. A block is constructed fully populated or not
//! at all; there is no partial state, and nothing mutates a block after
//! it has been handed to the store.
//!
//! Field declaration order is load-bearing: the canonical serialization
//! that [`crate::digest::derive_key`] hashes walks the fields in exactly
//! this order. Reordering fields changes every stored key.

use serde::{Deserialize, Serialize};

/// An immutable block record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Block identifier as assigned by the chain.
    pub id: String,
    /// Block format version.
    pub version: i32,
    /// Hash of the preceding block.
    pub prehash: String,
    /// Merkle root over the block's transactions.
    pub merkleroot: String,
    /// Production timestamp, as an opaque string.
    pub timestamp: String,
    /// Chain level marker.
    pub level: String,
    /// Proof-of-work nonce.
    pub nonce: u32,
    /// Serialized block size in bytes.
    pub size: i64,
    /// Number of transactions committed by this block.
    pub txcount: i64,
    /// IDs of the committed transactions, in block order.
    pub txid_list: Vec<String>,
}
