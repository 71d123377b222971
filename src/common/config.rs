//! Configuration for the bootstrap coordinator

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Host-supplied bootstrap configuration.
///
/// The `database` field is the coordinator's database identity: the stable
/// name of the single database this service owns, used as the cluster lock
/// key suffix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database identity (lock key suffix). Immutable once the
    /// coordinator is constructed.
    pub database: String,

    /// Lock name prefix. The default is a cross-replica contract; change
    /// it only if every replica changes it in the same deploy.
    #[serde(default = "default_lock_prefix")]
    pub lock_prefix: String,

    /// Connection strings keyed by context connection name. Contexts with
    /// no entry here are treated as not configured and skipped.
    #[serde(default)]
    pub connection_strings: HashMap<String, String>,

    /// Logging level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_lock_prefix() -> String {
    "Migration_Mongo_".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            lock_prefix: default_lock_prefix(),
            connection_strings: HashMap::new(),
            log_level: default_log_level(),
        }
    }

    /// The cluster-wide lock name for this configuration.
    pub fn lock_name(&self) -> String {
        format!("{}{}", self.lock_prefix, self.database)
    }

    /// Load from `seedgate.toml` (if present) layered with `SEEDGATE_*`
    /// environment variables.
    pub fn load() -> crate::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("seedgate").required(false))
            .add_source(config::Environment::with_prefix("SEEDGATE").separator("__"))
            .build()
            .map_err(|e| crate::Error::InvalidConfig(e.to_string()))?;

        let cfg: Config = settings
            .try_deserialize()
            .map_err(|e| crate::Error::InvalidConfig(e.to_string()))?;

        if cfg.database.trim().is_empty() {
            return Err(crate::Error::InvalidConfig(
                "database identity must not be empty".into(),
            ));
        }

        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_name_contract() {
        let cfg = Config::new("orders");
        assert_eq!(cfg.lock_name(), "Migration_Mongo_orders");
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::new("identity");
        assert_eq!(cfg.log_level, "info");
        assert!(cfg.connection_strings.is_empty());
    }
}
