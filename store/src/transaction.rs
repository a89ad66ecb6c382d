//! # Transaction Records
//!
//! The second record kind Aerolith archives. Like [`crate::block::Block`],
//! a transaction is an immutable value: constructed fully populated,
//! stored once, never updated in place.
//!
//! `amount` is a plain `f64` because that is what the upstream chain
//! emits and what the store's float bin holds; the store round-trips the
//! bits unchanged, so `12.34` in equals `12.34` out. No `Eq` derive for
//! that same reason.

use serde::{Deserialize, Serialize};

/// An immutable transaction record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction identifier.
    pub txid: String,
    /// Receiving address.
    pub output: String,
    /// Spending address.
    pub input: String,
    /// Transferred amount.
    pub amount: f64,
    /// Creation timestamp, as an opaque string.
    pub timestamp: String,
    /// Signature over the transaction body.
    pub sign: String,
    /// Public key of the signer.
    pub pubkey: String,
}
