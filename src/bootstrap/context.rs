//! Document contexts and their collection descriptors
//!
//! A context is one logical document-database the service defines: a named
//! set of collections with their indexes. The registry hands the
//! coordinator an ordered list of them at bootstrap; the coordinator binds
//! each to its live database under the cluster lock.

use crate::bootstrap::client::DatabaseHandle;
use crate::common::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Sort order of one index key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexOrder {
    Ascending,
    Descending,
}

/// One index a collection declares.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexSpec {
    pub name: String,
    pub keys: Vec<(String, IndexOrder)>,
    #[serde(default)]
    pub unique: bool,
}

impl IndexSpec {
    pub fn ascending(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keys: vec![(field.into(), IndexOrder::Ascending)],
            unique: false,
        }
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }
}

/// One collection a context declares.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionSpec {
    pub name: String,
    #[serde(default)]
    pub indexes: Vec<IndexSpec>,
}

impl CollectionSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            indexes: Vec::new(),
        }
    }

    pub fn with_index(mut self, index: IndexSpec) -> Self {
        self.indexes.push(index);
        self
    }
}

/// One logical document-context owned by the service.
#[async_trait]
pub trait DocumentContext: Send + Sync {
    /// Static identity used to look up this context's connection string.
    /// Also the fallback database name when the connection string's URI
    /// carries no database path component.
    fn connection_name(&self) -> &str;

    /// The collections (and their indexes) this context declares.
    fn collections(&self) -> &[CollectionSpec];

    /// Bind the declared collections to a live database: create what is
    /// missing, ensure indexes. Runs only under the cluster lock, inside a
    /// unit scope owned by the coordinator.
    async fn initialize_collections(&self, db: &dyn DatabaseHandle) -> Result<()> {
        for spec in self.collections() {
            db.ensure_collection(spec).await?;
        }
        Ok(())
    }
}

/// A context defined by data alone, for services that do not need custom
/// binding logic.
pub struct StaticContext {
    connection_name: String,
    collections: Vec<CollectionSpec>,
}

impl StaticContext {
    pub fn new(connection_name: impl Into<String>, collections: Vec<CollectionSpec>) -> Self {
        Self {
            connection_name: connection_name.into(),
            collections,
        }
    }
}

#[async_trait]
impl DocumentContext for StaticContext {
    fn connection_name(&self) -> &str {
        &self.connection_name
    }

    fn collections(&self) -> &[CollectionSpec] {
        &self.collections
    }
}

/// Ordered, restartable list of the contexts this service owns.
#[derive(Default)]
pub struct ContextRegistry {
    contexts: Vec<Arc<dyn DocumentContext>>,
}

impl ContextRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, context: Arc<dyn DocumentContext>) -> Self {
        self.contexts.push(context);
        self
    }

    /// Enumeration order is registration order. Bindings are independent,
    /// so callers must not rely on any cross-context ordering beyond that.
    pub fn contexts(&self) -> &[Arc<dyn DocumentContext>] {
        &self.contexts
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_preserves_order() {
        let registry = ContextRegistry::new()
            .register(Arc::new(StaticContext::new("orders", vec![])))
            .register(Arc::new(StaticContext::new("audit", vec![])));

        let names: Vec<&str> = registry
            .contexts()
            .iter()
            .map(|c| c.connection_name())
            .collect();
        assert_eq!(names, vec!["orders", "audit"]);
    }

    #[test]
    fn test_collection_spec_builder() {
        let spec = CollectionSpec::new("orders")
            .with_index(IndexSpec::ascending("by_customer", "customer_id"))
            .with_index(IndexSpec::ascending("by_number", "number").unique());

        assert_eq!(spec.indexes.len(), 2);
        assert!(spec.indexes[1].unique);
        assert!(!spec.indexes[0].unique);
    }
}
