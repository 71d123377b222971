//! Seed data application
//!
//! Runs after every context is bound, still under the cluster lock.
//! Seeders must be idempotent with respect to data already present.

use crate::bootstrap::client::DatabaseHandle;
use crate::common::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Databases the coordinator bound during this bootstrap, keyed by
/// context connection name. Contexts skipped for lack of a connection
/// string have no entry.
pub type BoundContexts = HashMap<String, Arc<dyn DatabaseHandle>>;

/// Applies required seed data. May assume every bound context's
/// collections exist.
#[async_trait]
pub trait Seeder: Send + Sync {
    async fn seed(&self, bound: &BoundContexts) -> Result<()>;
}

/// A seeder that does nothing, for services with no required seed data.
pub struct NoopSeeder;

#[async_trait]
impl Seeder for NoopSeeder {
    async fn seed(&self, _bound: &BoundContexts) -> Result<()> {
        Ok(())
    }
}

/// One document a [`StaticSeeder`] guarantees to exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedDocument {
    /// Connection name of the context owning the target collection.
    pub context: String,
    pub collection: String,
    /// Stable document id; this is what makes re-seeding a no-op.
    pub id: String,
    pub body: serde_json::Value,
}

/// Declarative seeder: a fixed list of documents applied with
/// insert-if-absent semantics.
pub struct StaticSeeder {
    documents: Vec<SeedDocument>,
}

impl StaticSeeder {
    pub fn new(documents: Vec<SeedDocument>) -> Self {
        Self { documents }
    }
}

#[async_trait]
impl Seeder for StaticSeeder {
    async fn seed(&self, bound: &BoundContexts) -> Result<()> {
        let mut inserted = 0usize;
        for doc in &self.documents {
            let Some(db) = bound.get(&doc.context) else {
                // Context skipped (not configured): its seeds skip with it.
                continue;
            };
            let fresh = db
                .insert_if_absent(&doc.collection, &doc.id, doc.body.clone())
                .await
                .map_err(|e| Error::Seed(e.to_string()))?;
            if fresh {
                inserted += 1;
            }
        }

        if inserted > 0 {
            tracing::info!("Seeded {} document(s)", inserted);
        }
        Ok(())
    }
}
