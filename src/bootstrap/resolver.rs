//! Connection-string resolution

use crate::common::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// Maps a context's connection name to a connection string.
///
/// Unknown names resolve to an empty string, never an error: a context
/// with no connection string is simply not configured for this service
/// instance and gets skipped.
#[async_trait]
pub trait ConnectionResolver: Send + Sync {
    async fn resolve(&self, connection_name: &str) -> Result<String>;
}

/// Resolver backed by a fixed table, typically the `connection_strings`
/// section of [`Config`](crate::common::Config).
pub struct StaticResolver {
    entries: HashMap<String, String>,
}

impl StaticResolver {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }
}

impl From<&crate::common::Config> for StaticResolver {
    fn from(cfg: &crate::common::Config) -> Self {
        Self::new(cfg.connection_strings.clone())
    }
}

#[async_trait]
impl ConnectionResolver for StaticResolver {
    async fn resolve(&self, connection_name: &str) -> Result<String> {
        Ok(self
            .entries
            .get(connection_name)
            .cloned()
            .unwrap_or_default())
    }
}
