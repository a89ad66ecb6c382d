// Copyright (c) 2026 Aerolith Contributors. MIT License.
// See LICENSE for details.

//! # Aerolith Store: Content-Addressed Ledger Persistence
//!
//! Aerolith stores immutable ledger records (blocks and transactions)
//! in a key-value store, under keys derived from the records themselves.
//! No sequence counters, no externally assigned IDs: the SHA-256 digest
//! of a record's canonical serialization *is* its primary key. Store the
//! same record twice and you get the same key back both times, which
//! makes the store implicitly deduplicating.
//!
//! ## Architecture
//!
//! ```text
//! caller ──> Gateway ──> derive_key (digest.rs)   "what key?"
//!               │
//!               ├──────> ToFields   (codec.rs)    "what bytes?"
//!               │
//!               └──────> KvStore    (store/kv.rs) "where?"
//! ```
//!
//! On the way back out, the store hands us a loosely-typed field map and
//! the codec turns it back into a typed record, validating the presence
//! and runtime type of every single field. A key-value store's word is
//! not to be trusted.
//!
//! ## Module Map
//!
//! - [`block`] / [`transaction`]: the two record schemas.
//! - [`digest`]: canonical serialization and key derivation.
//! - [`fields`]: the tagged value union crossing the store boundary.
//! - [`codec`]: typed record ⇄ field map, with per-field validation.
//! - [`store`]: the `KvStore` boundary trait, its backends, and the
//!   [`store::gateway::Gateway`] façade callers actually use.
//! - [`config`]: namespace and table names, passed in at construction.
//! - [`error`]: one error enum for everything that can go wrong.
//!
//! ## Design Philosophy
//!
//! 1. Decode is all-or-nothing. A half-populated record is worse than
//!    no record.
//! 2. The codec is the only module allowed to look at a field value's
//!    tag. Everyone else works with typed records.
//! 3. No retries, no timeouts, no policy. That belongs to the store
//!    client, not this crate.

pub mod block;
pub mod codec;
pub mod config;
pub mod digest;
pub mod error;
pub mod fields;
pub mod store;
pub mod transaction;
