//! # seedgate
//!
//! A startup-time database bootstrap coordinator for services that own
//! one document-oriented database:
//! - Cluster-wide try-once lock so one replica does the work, peers yield
//! - Collection creation and index ensure for every owned context
//! - Idempotent seed-data application under the lock
//! - Best-effort boundary: failures are logged, startup never blocks
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │            Replica fleet (N hosts)           │
//! │  each runs one Coordinator at startup        │
//! └──────────────┬───────────────────────────────┘
//!                │ try_acquire("Migration_Mongo_<db>")
//!        ┌───────▼────────┐      ┌───────────────┐
//!        │  Lock Provider  │     │  Document DB   │
//!        │  (one winner)   │     │  (shared)      │
//!        └───────┬────────┘      └───────▲───────┘
//!                │ winner only           │ bind + seed
//!        ┌───────▼────────────────────────┴──────┐
//!        │ contexts → resolve → connect → ensure │
//!        │ collections/indexes → seed → release  │
//!        └───────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```no_run
//! use seedgate::bootstrap::context::{CollectionSpec, ContextRegistry, IndexSpec, StaticContext};
//! use seedgate::bootstrap::memory::{MemoryClientFactory, MemoryLockProvider};
//! use seedgate::bootstrap::resolver::StaticResolver;
//! use seedgate::bootstrap::scope::TenancyContext;
//! use seedgate::bootstrap::seeder::NoopSeeder;
//! use seedgate::{BootstrapDeps, Config, Coordinator};
//! use std::sync::Arc;
//!
//! # async fn run() {
//! let mut config = Config::new("orders");
//! config.connection_strings.insert(
//!     "orders".into(),
//!     "mongodb://db.internal/ordersdb".into(),
//! );
//!
//! let registry = ContextRegistry::new().register(Arc::new(StaticContext::new(
//!     "orders",
//!     vec![CollectionSpec::new("orders")
//!         .with_index(IndexSpec::ascending("by_customer", "customer_id"))],
//! )));
//!
//! let deps = BootstrapDeps {
//!     lock: Arc::new(MemoryLockProvider::new()),
//!     registry,
//!     resolver: Arc::new(StaticResolver::from(&config)),
//!     clients: Arc::new(MemoryClientFactory::new()),
//!     seeder: Arc::new(NoopSeeder),
//!     tenancy: TenancyContext::new(),
//! };
//!
//! let report = Coordinator::new(&config, deps)
//!     .check_and_apply_database_bootstrap()
//!     .await;
//! assert!(report.is_applied());
//! # }
//! ```

pub mod bootstrap;
pub mod common;

// Re-export commonly used types
pub use bootstrap::{BootstrapDeps, BootstrapReport, Coordinator};
pub use common::{Config, Error, Result};

/// Current version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
