//! Document-store driver seam
//!
//! The coordinator never talks to a driver directly; it goes through these
//! traits so hosts can plug in their driver of choice and tests can run
//! against [`memory`](super::memory) implementations.

use crate::common::{ConnectionUri, Result};
use crate::bootstrap::context::CollectionSpec;
use async_trait::async_trait;
use std::sync::Arc;

/// Constructs clients from parsed connection strings.
///
/// Construction performs the driver handshake, so it can fail for
/// connectivity reasons.
#[async_trait]
pub trait ClientFactory: Send + Sync {
    async fn connect(&self, uri: &ConnectionUri) -> Result<Arc<dyn DatabaseClient>>;
}

/// A connected client, scoped to one server/cluster.
pub trait DatabaseClient: Send + Sync {
    /// Handle to a named database. Cheap; the database need not exist yet
    /// (document stores create it on first write).
    fn database(&self, name: &str) -> Arc<dyn DatabaseHandle>;
}

/// A live database reference that contexts bind their descriptors against.
#[async_trait]
pub trait DatabaseHandle: Send + Sync {
    fn name(&self) -> &str;

    /// Create the collection if absent and bring its indexes up to date
    /// with the spec. Idempotent.
    async fn ensure_collection(&self, spec: &CollectionSpec) -> Result<()>;

    /// Insert a document unless one with the same id already exists.
    ///
    /// Returns `true` when the document was inserted. This is the seeding
    /// primitive; it makes seed application idempotent by construction.
    async fn insert_if_absent(
        &self,
        collection: &str,
        id: &str,
        document: serde_json::Value,
    ) -> Result<bool>;
}
