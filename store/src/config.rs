//! # Store Configuration
//!
//! Where records live inside the key-value store: one logical namespace,
//! one table per record kind. The original deployment hardcoded these as
//! globals; here they are an explicit struct handed to the gateway at
//! construction, so two gateways can point at two namespaces in the same
//! process without stepping on each other.
//!
//! Tables are independent keyspaces. A block and a transaction whose
//! content happens to digest to the same key do not collide, because
//! they land in different tables.

use serde::{Deserialize, Serialize};

/// Default namespace for ledger records.
pub const DEFAULT_NAMESPACE: &str = "aerolith";

/// Default table for block records.
pub const DEFAULT_BLOCK_TABLE: &str = "blocks";

/// Default table for transaction records.
pub const DEFAULT_TX_TABLE: &str = "transactions";

/// Placement of ledger records within the backing key-value store.
///
/// Serde derives are here so the struct can be embedded in a larger
/// application config file; every field falls back to its default when
/// omitted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Logical grouping for all ledger tables.
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Table holding block records.
    #[serde(default = "default_block_table")]
    pub block_table: String,
    /// Table holding transaction records.
    #[serde(default = "default_tx_table")]
    pub tx_table: String,
}

impl StoreConfig {
    /// Config with default table names under a caller-chosen namespace.
    pub fn with_namespace(namespace: impl Into<String>) -> Self {
        StoreConfig {
            namespace: namespace.into(),
            ..StoreConfig::default()
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            namespace: default_namespace(),
            block_table: default_block_table(),
            tx_table: default_tx_table(),
        }
    }
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_block_table() -> String {
    DEFAULT_BLOCK_TABLE.to_string()
}

fn default_tx_table() -> String {
    DEFAULT_TX_TABLE.to_string()
}
