//! In-memory collaborator implementations
//!
//! Reference implementations of the lock provider and the driver seam,
//! used for local development and as counting fakes in tests. All state
//! is process-local and shared through `Arc`, so two coordinators handed
//! the same provider genuinely contend for the same lock.

use crate::bootstrap::client::{ClientFactory, DatabaseClient, DatabaseHandle};
use crate::bootstrap::context::{CollectionSpec, IndexSpec};
use crate::bootstrap::lock::{LockHandle, LockProvider};
use crate::common::{ConnectionUri, Error, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

fn lock_poisoned<T>(guard: std::sync::LockResult<T>) -> T {
    guard.unwrap_or_else(|e| e.into_inner())
}

// === Lock provider ===

/// Process-local named mutex with acquire/release counters.
#[derive(Default)]
pub struct MemoryLockProvider {
    held: Mutex<HashMap<String, Uuid>>,
    acquired: AtomicUsize,
    contended: AtomicUsize,
    released: AtomicUsize,
}

impl MemoryLockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquired_count(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    pub fn contended_count(&self) -> usize {
        self.contended.load(Ordering::SeqCst)
    }

    pub fn released_count(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    pub fn is_held(&self, name: &str) -> bool {
        lock_poisoned(self.held.lock()).contains_key(name)
    }
}

#[async_trait]
impl LockProvider for MemoryLockProvider {
    async fn try_acquire(&self, name: &str) -> Result<Option<LockHandle>> {
        let mut held = lock_poisoned(self.held.lock());
        if held.contains_key(name) {
            self.contended.fetch_add(1, Ordering::SeqCst);
            return Ok(None);
        }
        let handle = LockHandle::new(name);
        held.insert(name.to_string(), handle.token());
        self.acquired.fetch_add(1, Ordering::SeqCst);
        Ok(Some(handle))
    }

    async fn release(&self, handle: LockHandle) -> Result<()> {
        let mut held = lock_poisoned(self.held.lock());
        let owner = held
            .get(handle.name())
            .is_some_and(|token| *token == handle.token());
        if !owner {
            return Err(Error::Lock {
                name: handle.name().to_string(),
                reason: "release token does not match current holder".into(),
            });
        }
        held.remove(handle.name());
        self.released.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// === Driver seam ===

#[derive(Default)]
struct MemoryCollection {
    indexes: HashMap<String, IndexSpec>,
    documents: HashMap<String, serde_json::Value>,
}

/// One named database inside a [`MemoryCluster`].
pub struct MemoryDatabase {
    name: String,
    collections: Mutex<HashMap<String, MemoryCollection>>,
    ensure_calls: AtomicUsize,
}

impl MemoryDatabase {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            collections: Mutex::new(HashMap::new()),
            ensure_calls: AtomicUsize::new(0),
        }
    }

    pub fn collection_names(&self) -> Vec<String> {
        let mut names: Vec<String> = lock_poisoned(self.collections.lock())
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    pub fn has_index(&self, collection: &str, index: &str) -> bool {
        lock_poisoned(self.collections.lock())
            .get(collection)
            .is_some_and(|c| c.indexes.contains_key(index))
    }

    pub fn document(&self, collection: &str, id: &str) -> Option<serde_json::Value> {
        lock_poisoned(self.collections.lock())
            .get(collection)
            .and_then(|c| c.documents.get(id).cloned())
    }

    pub fn document_count(&self, collection: &str) -> usize {
        lock_poisoned(self.collections.lock())
            .get(collection)
            .map_or(0, |c| c.documents.len())
    }

    pub fn ensure_call_count(&self) -> usize {
        self.ensure_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DatabaseHandle for MemoryDatabase {
    fn name(&self) -> &str {
        &self.name
    }

    async fn ensure_collection(&self, spec: &CollectionSpec) -> Result<()> {
        self.ensure_calls.fetch_add(1, Ordering::SeqCst);
        let mut collections = lock_poisoned(self.collections.lock());
        let collection = collections.entry(spec.name.clone()).or_default();
        for index in &spec.indexes {
            collection.indexes.insert(index.name.clone(), index.clone());
        }
        Ok(())
    }

    async fn insert_if_absent(
        &self,
        collection: &str,
        id: &str,
        document: serde_json::Value,
    ) -> Result<bool> {
        let mut collections = lock_poisoned(self.collections.lock());
        let coll = collections.entry(collection.to_string()).or_default();
        if coll.documents.contains_key(id) {
            return Ok(false);
        }
        coll.documents.insert(id.to_string(), document);
        Ok(true)
    }
}

/// One simulated server, keyed by URI host. All clients connecting to the
/// same host share its databases.
pub struct MemoryCluster {
    databases: Mutex<HashMap<String, Arc<MemoryDatabase>>>,
}

impl MemoryCluster {
    fn new() -> Self {
        Self {
            databases: Mutex::new(HashMap::new()),
        }
    }

    pub fn database(&self, name: &str) -> Arc<MemoryDatabase> {
        let mut databases = lock_poisoned(self.databases.lock());
        databases
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(MemoryDatabase::new(name)))
            .clone()
    }

    pub fn database_names(&self) -> Vec<String> {
        let mut names: Vec<String> = lock_poisoned(self.databases.lock())
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

impl DatabaseClient for MemoryCluster {
    fn database(&self, name: &str) -> Arc<dyn DatabaseHandle> {
        MemoryCluster::database(self, name)
    }
}

/// Client factory over a set of in-memory clusters.
///
/// Hosts listed via [`fail_host`](MemoryClientFactory::fail_host) refuse
/// the handshake, for exercising connect-failure paths.
#[derive(Default)]
pub struct MemoryClientFactory {
    clusters: Mutex<HashMap<String, Arc<MemoryCluster>>>,
    failing: Mutex<HashSet<String>>,
    connects: AtomicUsize,
}

impl MemoryClientFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_host(&self, host: &str) {
        lock_poisoned(self.failing.lock()).insert(host.to_string());
    }

    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    /// The cluster for a host, creating it if needed. Lets tests inspect
    /// state the coordinator wrote through a separate client handle.
    pub fn cluster(&self, host: &str) -> Arc<MemoryCluster> {
        let mut clusters = lock_poisoned(self.clusters.lock());
        clusters
            .entry(host.to_string())
            .or_insert_with(|| Arc::new(MemoryCluster::new()))
            .clone()
    }
}

#[async_trait]
impl ClientFactory for MemoryClientFactory {
    async fn connect(&self, uri: &ConnectionUri) -> Result<Arc<dyn DatabaseClient>> {
        let host = uri.host().unwrap_or("localhost").to_string();
        if lock_poisoned(self.failing.lock()).contains(&host) {
            return Err(Error::Connect {
                context: host,
                reason: "connection refused".into(),
            });
        }
        self.connects.fetch_add(1, Ordering::SeqCst);
        Ok(self.cluster(&host))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lock_mutual_exclusion() {
        let locks = MemoryLockProvider::new();

        let first = locks.try_acquire("Migration_Mongo_orders").await.unwrap();
        assert!(first.is_some());
        let second = locks.try_acquire("Migration_Mongo_orders").await.unwrap();
        assert!(second.is_none());
        assert_eq!(locks.contended_count(), 1);

        locks.release(first.unwrap()).await.unwrap();
        assert!(!locks.is_held("Migration_Mongo_orders"));
        assert!(locks
            .try_acquire("Migration_Mongo_orders")
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_release_rejects_stale_handle() {
        let locks = MemoryLockProvider::new();
        let handle = locks.try_acquire("a").await.unwrap().unwrap();
        let stale = LockHandle::new("a");

        assert!(locks.release(stale).await.is_err());
        // The real holder still releases fine.
        locks.release(handle).await.unwrap();
    }

    #[tokio::test]
    async fn test_ensure_collection_is_idempotent() {
        let db = MemoryDatabase::new("orders");
        let spec = CollectionSpec::new("orders")
            .with_index(IndexSpec::ascending("by_customer", "customer_id"));

        db.ensure_collection(&spec).await.unwrap();
        db.ensure_collection(&spec).await.unwrap();

        assert_eq!(db.collection_names(), vec!["orders"]);
        assert!(db.has_index("orders", "by_customer"));
    }

    #[tokio::test]
    async fn test_insert_if_absent() {
        let db = MemoryDatabase::new("orders");
        let doc = serde_json::json!({ "status": "open" });

        assert!(db.insert_if_absent("orders", "o-1", doc.clone()).await.unwrap());
        assert!(!db.insert_if_absent("orders", "o-1", doc).await.unwrap());
        assert_eq!(db.document_count("orders"), 1);
    }

    #[tokio::test]
    async fn test_same_host_shares_cluster() {
        let factory = MemoryClientFactory::new();
        let a = factory
            .connect(&ConnectionUri::parse("x", "mongodb://h/one").unwrap())
            .await
            .unwrap();
        a.database("one");

        assert_eq!(factory.cluster("h").database_names(), vec!["one"]);
    }
}
