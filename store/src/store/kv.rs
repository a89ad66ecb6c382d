//! # Key-Value Backends
//!
//! The [`KvStore`] trait is the crate's contract with the outside world:
//! `put` a field map under a (namespace, table, key) triple, `get` it
//! back. Connection management, transport, and durability policy are the
//! backend's problem; the trait deliberately has no notion of retry,
//! timeout, or batching.
//!
//! Two backends ship with the crate:
//!
//! - [`MemoryStore`]: a `HashMap` behind a lock. For tests and
//!   ephemeral runs; vanishes with the process.
//! - [`SledStore`]: an embedded sled database, one tree per
//!   namespace/table pair, field maps persisted as bincode. Survives
//!   restarts, needs no server.

use std::collections::HashMap;
use std::path::Path;

use parking_lot::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::fields::FieldMap;

// ---------------------------------------------------------------------------
// KvStore
// ---------------------------------------------------------------------------

/// Minimal contract with an external key-value store.
///
/// Implementations must be safe for concurrent use; the gateway adds no
/// locking of its own. Writes overwrite silently: content-addressed
/// keys make that the desired behavior, since an overwritten record is
/// by construction identical to what it replaces.
pub trait KvStore: Send + Sync {
    /// Write a field map under the given key. Overwrites any existing
    /// entry at the same (namespace, table, key).
    fn put(
        &self,
        namespace: &str,
        table: &str,
        key: &str,
        fields: &FieldMap,
    ) -> StoreResult<()>;

    /// Read the field map stored under the given key, or `None` if no
    /// record exists there.
    fn get(&self, namespace: &str, table: &str, key: &str) -> StoreResult<Option<FieldMap>>;
}

/// Shared handles delegate, so one backend can sit behind several
/// gateways (e.g. different namespaces over the same database).
impl<S: KvStore + ?Sized> KvStore for std::sync::Arc<S> {
    fn put(
        &self,
        namespace: &str,
        table: &str,
        key: &str,
        fields: &FieldMap,
    ) -> StoreResult<()> {
        (**self).put(namespace, table, key, fields)
    }

    fn get(&self, namespace: &str, table: &str, key: &str) -> StoreResult<Option<FieldMap>> {
        (**self).get(namespace, table, key)
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-memory backend: a `HashMap` keyed by (namespace, table, key).
///
/// Ideal for unit tests: no filesystem side effects, no cleanup. The
/// `RwLock` makes concurrent readers cheap; writes are rare in the
/// workloads this backend serves.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<(String, String, String), FieldMap>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Total number of records across all namespaces and tables.
    pub fn record_count(&self) -> usize {
        self.records.read().len()
    }
}

impl KvStore for MemoryStore {
    fn put(
        &self,
        namespace: &str,
        table: &str,
        key: &str,
        fields: &FieldMap,
    ) -> StoreResult<()> {
        self.records.write().insert(
            (namespace.to_string(), table.to_string(), key.to_string()),
            fields.clone(),
        );
        Ok(())
    }

    fn get(&self, namespace: &str, table: &str, key: &str) -> StoreResult<Option<FieldMap>> {
        let records = self.records.read();
        Ok(records
            .get(&(namespace.to_string(), table.to_string(), key.to_string()))
            .cloned())
    }
}

// ---------------------------------------------------------------------------
// SledStore
// ---------------------------------------------------------------------------

/// Embedded persistent backend built on sled.
///
/// Each (namespace, table) pair maps to a named sled tree, an
/// independent keyspace, so equal keys in different tables never
/// collide. Field maps are serialized with bincode for the value bytes;
/// JSON is for debugging, bincode is for storage.
#[derive(Debug, Clone)]
pub struct SledStore {
    db: sled::Db,
}

impl SledStore {
    /// Open or create a store at the given filesystem path.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let db = sled::open(path).map_err(|e| StoreError::OpenFailed(e.to_string()))?;
        Ok(SledStore { db })
    }

    /// Create a temporary store that is cleaned up on drop.
    ///
    /// For tests and ephemeral runs where [`MemoryStore`] is too far
    /// from the real thing.
    pub fn open_temporary() -> StoreResult<Self> {
        let db = sled::Config::new()
            .temporary(true)
            .open()
            .map_err(|e| StoreError::OpenFailed(e.to_string()))?;
        Ok(SledStore { db })
    }

    fn tree(&self, namespace: &str, table: &str) -> Result<sled::Tree, sled::Error> {
        self.db.open_tree(format!("{namespace}/{table}"))
    }
}

impl KvStore for SledStore {
    fn put(
        &self,
        namespace: &str,
        table: &str,
        key: &str,
        fields: &FieldMap,
    ) -> StoreResult<()> {
        let tree = self
            .tree(namespace, table)
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        let bytes =
            bincode::serialize(fields).map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        tree.insert(key.as_bytes(), bytes)
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        // Flush so the write is durable when we report success.
        self.db
            .flush()
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        Ok(())
    }

    fn get(&self, namespace: &str, table: &str, key: &str) -> StoreResult<Option<FieldMap>> {
        let tree = self
            .tree(namespace, table)
            .map_err(|e| StoreError::ReadFailed(e.to_string()))?;
        match tree
            .get(key.as_bytes())
            .map_err(|e| StoreError::ReadFailed(e.to_string()))?
        {
            Some(bytes) => {
                let fields: FieldMap = bincode::deserialize(&bytes)
                    .map_err(|e| StoreError::ReadFailed(e.to_string()))?;
                Ok(Some(fields))
            }
            None => Ok(None),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldValue;

    fn sample_fields(marker: &str) -> FieldMap {
        FieldMap::from([
            ("id".to_string(), FieldValue::from(marker)),
            ("nonce".to_string(), FieldValue::Int(123)),
            ("amount".to_string(), FieldValue::Float(12.34)),
            (
                "txid_list".to_string(),
                FieldValue::List(vec![FieldValue::from("a"), FieldValue::from("b")]),
            ),
        ])
    }

    // -- MemoryStore --------------------------------------------------------

    #[test]
    fn memory_put_then_get() {
        let store = MemoryStore::new();
        let fields = sample_fields("one");
        store.put("ns", "blocks", "k1", &fields).unwrap();

        let loaded = store.get("ns", "blocks", "k1").unwrap();
        assert_eq!(loaded, Some(fields));
    }

    #[test]
    fn memory_get_missing_is_none() {
        let store = MemoryStore::new();
        assert!(store.get("ns", "blocks", "absent").unwrap().is_none());
    }

    #[test]
    fn memory_put_overwrites_same_key() {
        let store = MemoryStore::new();
        store.put("ns", "blocks", "k1", &sample_fields("old")).unwrap();
        store.put("ns", "blocks", "k1", &sample_fields("new")).unwrap();

        assert_eq!(store.record_count(), 1);
        let loaded = store.get("ns", "blocks", "k1").unwrap().unwrap();
        assert_eq!(loaded.get("id"), Some(&FieldValue::from("new")));
    }

    #[test]
    fn memory_tables_are_independent_keyspaces() {
        let store = MemoryStore::new();
        store.put("ns", "blocks", "same-key", &sample_fields("block")).unwrap();
        store.put("ns", "transactions", "same-key", &sample_fields("tx")).unwrap();

        assert_eq!(store.record_count(), 2);
        let from_blocks = store.get("ns", "blocks", "same-key").unwrap().unwrap();
        let from_txs = store.get("ns", "transactions", "same-key").unwrap().unwrap();
        assert_eq!(from_blocks.get("id"), Some(&FieldValue::from("block")));
        assert_eq!(from_txs.get("id"), Some(&FieldValue::from("tx")));
    }

    #[test]
    fn memory_concurrent_readers() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(MemoryStore::new());
        for i in 0..10 {
            store
                .put("ns", "blocks", &format!("k{i}"), &sample_fields(&format!("v{i}")))
                .unwrap();
        }

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..10 {
                        let loaded = store.get("ns", "blocks", &format!("k{i}")).unwrap();
                        assert!(loaded.is_some());
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("reader thread should not panic");
        }
    }

    // -- SledStore ----------------------------------------------------------

    #[test]
    fn sled_put_then_get() {
        let store = SledStore::open_temporary().unwrap();
        let fields = sample_fields("one");
        store.put("ns", "blocks", "k1", &fields).unwrap();

        let loaded = store.get("ns", "blocks", "k1").unwrap();
        assert_eq!(loaded, Some(fields));
    }

    #[test]
    fn sled_get_missing_is_none() {
        let store = SledStore::open_temporary().unwrap();
        assert!(store.get("ns", "blocks", "absent").unwrap().is_none());
    }

    #[test]
    fn sled_tables_are_independent_keyspaces() {
        let store = SledStore::open_temporary().unwrap();
        store.put("ns", "blocks", "same-key", &sample_fields("block")).unwrap();
        store.put("ns", "transactions", "same-key", &sample_fields("tx")).unwrap();

        let from_blocks = store.get("ns", "blocks", "same-key").unwrap().unwrap();
        let from_txs = store.get("ns", "transactions", "same-key").unwrap().unwrap();
        assert_eq!(from_blocks.get("id"), Some(&FieldValue::from("block")));
        assert_eq!(from_txs.get("id"), Some(&FieldValue::from("tx")));
    }

    #[test]
    fn sled_records_survive_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let fields = sample_fields("persistent");

        {
            let store = SledStore::open(dir.path()).unwrap();
            store.put("ns", "blocks", "k1", &fields).unwrap();
        }

        let reopened = SledStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get("ns", "blocks", "k1").unwrap(), Some(fields));
    }
}
