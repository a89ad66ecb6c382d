//! # Store Gateway
//!
//! The façade callers actually use. Four operations, two per record
//! kind:
//!
//! ```text
//! insert_block(&Block)            -> key        derive, encode, put
//! insert_transaction(&Transaction)-> key
//! fetch_block(key)                -> Block      get, decode, validate
//! fetch_transaction(key)          -> Transaction
//! ```
//!
//! The gateway is stateless: it holds a config and a backend, retains
//! nothing between calls, and is safe to share across threads whenever
//! the backend is. It never retries; a failed `put` or `get` surfaces
//! as the backend's error, untouched. Each record kind gets its own
//! table from the config, so content-derived keys cannot collide across
//! kinds.

use tracing::debug;

use crate::block::Block;
use crate::codec::{FromFields, ToFields};
use crate::config::StoreConfig;
use crate::digest::derive_key;
use crate::error::{StoreError, StoreResult};
use crate::fields::FieldMap;
use crate::store::kv::KvStore;
use crate::transaction::Transaction;

/// Content-addressed insert/fetch over an external key-value store.
#[derive(Debug)]
pub struct Gateway<S: KvStore> {
    config: StoreConfig,
    store: S,
}

impl<S: KvStore> Gateway<S> {
    /// Wrap a backend with namespace and table placement.
    pub fn new(config: StoreConfig, store: S) -> Self {
        Gateway { config, store }
    }

    /// The placement this gateway writes to.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Store a block under its content-derived key and return the key.
    ///
    /// Inserting the same block twice yields the same key and overwrites
    /// the first copy with an identical one.
    pub fn insert_block(&self, block: &Block) -> StoreResult<String> {
        let key = derive_key(block)?;
        let fields = block.to_fields();
        self.store
            .put(&self.config.namespace, &self.config.block_table, &key, &fields)?;
        debug!(key = %key, table = %self.config.block_table, "block stored");
        Ok(key)
    }

    /// Store a transaction under its content-derived key and return the key.
    pub fn insert_transaction(&self, tx: &Transaction) -> StoreResult<String> {
        let key = derive_key(tx)?;
        let fields = tx.to_fields();
        self.store
            .put(&self.config.namespace, &self.config.tx_table, &key, &fields)?;
        debug!(key = %key, table = %self.config.tx_table, "transaction stored");
        Ok(key)
    }

    /// Load and decode the block stored under `key`.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if nothing is stored there;
    /// [`StoreError::FieldMissing`] / [`StoreError::FieldType`] if what
    /// is stored does not decode as a block.
    pub fn fetch_block(&self, key: &str) -> StoreResult<Block> {
        let fields = self.fetch_fields(&self.config.block_table, key)?;
        let block = Block::from_fields(&fields)?;
        debug!(key = %key, table = %self.config.block_table, "block loaded");
        Ok(block)
    }

    /// Load and decode the transaction stored under `key`.
    pub fn fetch_transaction(&self, key: &str) -> StoreResult<Transaction> {
        let fields = self.fetch_fields(&self.config.tx_table, key)?;
        let tx = Transaction::from_fields(&fields)?;
        debug!(key = %key, table = %self.config.tx_table, "transaction loaded");
        Ok(tx)
    }

    fn fetch_fields(&self, table: &str, key: &str) -> StoreResult<FieldMap> {
        self.store
            .get(&self.config.namespace, table, key)?
            .ok_or_else(|| StoreError::NotFound {
                key: key.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::KEY_LENGTH;
    use crate::fields::FieldValue;
    use crate::store::kv::{MemoryStore, SledStore};

    fn sample_block() -> Block {
        Block {
            id: "testid".to_string(),
            version: 12,
            prehash: "testprehash".to_string(),
            merkleroot: "testmerkleroot".to_string(),
            timestamp: "test_timestamp".to_string(),
            level: "test_level".to_string(),
            nonce: 123,
            size: 1234,
            txcount: 12345,
            txid_list: vec!["testid1".to_string(), "testid2".to_string()],
        }
    }

    fn sample_tx() -> Transaction {
        Transaction {
            txid: "testtxid".to_string(),
            output: "testoutput".to_string(),
            input: "testinput".to_string(),
            amount: 12.34,
            timestamp: "test_timestamp".to_string(),
            sign: "test_sign".to_string(),
            pubkey: "test_pubkey".to_string(),
        }
    }

    fn memory_gateway() -> Gateway<MemoryStore> {
        Gateway::new(StoreConfig::default(), MemoryStore::new())
    }

    #[test]
    fn insert_then_fetch_block() {
        let gateway = memory_gateway();
        let block = sample_block();

        let key = gateway.insert_block(&block).expect("insert");
        assert_eq!(key.len(), KEY_LENGTH);

        let loaded = gateway.fetch_block(&key).expect("fetch");
        assert_eq!(loaded, block);
    }

    #[test]
    fn insert_then_fetch_transaction() {
        let gateway = memory_gateway();
        let tx = sample_tx();

        let key = gateway.insert_transaction(&tx).expect("insert");
        let loaded = gateway.fetch_transaction(&key).expect("fetch");
        assert_eq!(loaded, tx);
        assert_eq!(loaded.amount.to_bits(), tx.amount.to_bits());
    }

    #[test]
    fn fetch_unknown_key_is_not_found() {
        let gateway = memory_gateway();
        let absent = "0".repeat(KEY_LENGTH);

        match gateway.fetch_block(&absent) {
            Err(StoreError::NotFound { key }) => assert_eq!(key, absent),
            other => panic!("expected NotFound, got {other:?}"),
        }
        assert!(matches!(
            gateway.fetch_transaction(&absent),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn double_insert_dedups_to_one_record() {
        let config = StoreConfig::default();
        let store = MemoryStore::new();
        let gateway = Gateway::new(config, store);
        let block = sample_block();

        let first = gateway.insert_block(&block).expect("first insert");
        let second = gateway.insert_block(&block).expect("second insert");
        assert_eq!(first, second);

        // The second write landed on the same slot: one record, still
        // fetchable, still equal to the original.
        assert_eq!(gateway.store.record_count(), 1);
        assert_eq!(gateway.fetch_block(&first).expect("fetch"), block);
    }

    #[test]
    fn kinds_do_not_collide_across_tables() {
        let gateway = memory_gateway();
        let block_key = gateway.insert_block(&sample_block()).unwrap();
        let tx_key = gateway.insert_transaction(&sample_tx()).unwrap();

        // A block's key means nothing in the transaction table and
        // vice versa.
        assert!(matches!(
            gateway.fetch_transaction(&block_key),
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(
            gateway.fetch_block(&tx_key),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn distinct_blocks_get_distinct_keys() {
        let gateway = memory_gateway();
        let block = sample_block();
        let mut other = block.clone();
        other.nonce += 1;

        let key_a = gateway.insert_block(&block).unwrap();
        let key_b = gateway.insert_block(&other).unwrap();
        assert_ne!(key_a, key_b);
        assert_eq!(gateway.store.record_count(), 2);
    }

    #[test]
    fn corrupt_stored_record_fails_decode_not_fetch() {
        let config = StoreConfig::default();
        let store = MemoryStore::new();
        let block = sample_block();

        // Plant a record with a mistyped field directly in the backend,
        // under the key the gateway would derive.
        let key = crate::digest::derive_key(&block).unwrap();
        let mut fields = block.to_fields();
        fields.insert("nonce".to_string(), FieldValue::from("123"));
        store.put(&config.namespace, &config.block_table, &key, &fields).unwrap();

        let gateway = Gateway::new(config, store);
        assert!(matches!(
            gateway.fetch_block(&key),
            Err(StoreError::FieldType { field: "nonce", .. })
        ));
    }

    #[test]
    fn truncated_stored_record_fails_with_missing_field() {
        let config = StoreConfig::default();
        let store = MemoryStore::new();
        let block = sample_block();

        let key = crate::digest::derive_key(&block).unwrap();
        let mut fields = block.to_fields();
        fields.remove("merkleroot");
        store.put(&config.namespace, &config.block_table, &key, &fields).unwrap();

        let gateway = Gateway::new(config, store);
        assert!(matches!(
            gateway.fetch_block(&key),
            Err(StoreError::FieldMissing { field: "merkleroot" })
        ));
    }

    #[test]
    fn namespaced_gateways_do_not_see_each_other() {
        use std::sync::Arc;

        let store = Arc::new(MemoryStore::new());
        let left = Gateway::new(StoreConfig::with_namespace("left"), Arc::clone(&store));
        let right = Gateway::new(StoreConfig::with_namespace("right"), Arc::clone(&store));

        let key = left.insert_block(&sample_block()).unwrap();
        assert!(left.fetch_block(&key).is_ok());
        assert!(matches!(
            right.fetch_block(&key),
            Err(StoreError::NotFound { .. })
        ));
    }

    // -- End-to-end over the persistent backend -----------------------------

    #[test]
    fn sled_backed_roundtrip() {
        let gateway = Gateway::new(
            StoreConfig::default(),
            SledStore::open_temporary().expect("temp store"),
        );
        let block = sample_block();
        let tx = sample_tx();

        let block_key = gateway.insert_block(&block).expect("insert block");
        let tx_key = gateway.insert_transaction(&tx).expect("insert tx");

        assert_eq!(gateway.fetch_block(&block_key).expect("fetch block"), block);
        assert_eq!(gateway.fetch_transaction(&tx_key).expect("fetch tx"), tx);
    }

    #[test]
    fn sled_backed_keys_survive_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let block = sample_block();

        let key = {
            let gateway =
                Gateway::new(StoreConfig::default(), SledStore::open(dir.path()).unwrap());
            gateway.insert_block(&block).expect("insert")
        };

        // A fresh process derives the same key from the same content and
        // finds the record the previous one wrote.
        let gateway = Gateway::new(StoreConfig::default(), SledStore::open(dir.path()).unwrap());
        assert_eq!(derive_key(&block).unwrap(), key);
        assert_eq!(gateway.fetch_block(&key).expect("fetch"), block);
    }
}
