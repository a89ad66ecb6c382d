//! # Storage Boundary
//!
//! Everything that talks to the key-value store lives here, behind one
//! trait and one façade:
//!
//! ```text
//! kv.rs      -- KvStore trait + backends (MemoryStore, SledStore)
//! gateway.rs -- Gateway: insert/fetch per record kind
//! ```
//!
//! The gateway composes the pieces the rest of the crate defines
//! (derive the key, encode the fields, call `put`; `get`, decode,
//! validate) and is the only API most callers need. The backends are
//! interchangeable: the gateway holds no opinion on where bytes actually
//! land, and every operation is a single synchronous request/response
//! with no session state in between.

pub mod gateway;
pub mod kv;

pub use gateway::Gateway;
pub use kv::{KvStore, MemoryStore, SledStore};
