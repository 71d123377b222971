//! Bootstrap coordinator
//!
//! Drives the startup-time bootstrap for the single database the service
//! owns: under a cluster-wide try-once lock, bind every owned document
//! context to its target database (creating collections and ensuring
//! indexes) and apply seed data. Replicas that lose the lock race yield
//! silently; the peer holding it is trusted to do the work.

use crate::bootstrap::context::ContextRegistry;
use crate::bootstrap::resolver::ConnectionResolver;
use crate::bootstrap::runner::BestEffortRunner;
use crate::bootstrap::scope::{TenancyContext, UnitScope};
use crate::bootstrap::seeder::{BoundContexts, Seeder};
use crate::bootstrap::{client::ClientFactory, lock::LockProvider};
use crate::common::{is_blank, Config, ConnectionUri, Result};
use std::sync::Arc;

/// The coordinator's injected collaborators.
pub struct BootstrapDeps {
    pub lock: Arc<dyn LockProvider>,
    pub registry: ContextRegistry,
    pub resolver: Arc<dyn ConnectionResolver>,
    pub clients: Arc<dyn ClientFactory>,
    pub seeder: Arc<dyn Seeder>,
    pub tenancy: TenancyContext,
}

/// What a bootstrap invocation observed. Never an `Err`: failures are
/// logged and folded into [`BootstrapReport::Failed`] so the host's
/// startup proceeds regardless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapReport {
    /// This replica held the lock and brought the database up to date.
    Applied {
        contexts_bound: usize,
        contexts_skipped: usize,
    },
    /// Another replica holds the lock; it is trusted to do the work.
    LockHeldByPeer,
    /// Bootstrap failed; the error was logged. The lock, if held, was
    /// released.
    Failed { error: String },
}

impl BootstrapReport {
    pub fn is_applied(&self) -> bool {
        matches!(self, BootstrapReport::Applied { .. })
    }
}

struct BindSummary {
    bound: usize,
    skipped: usize,
}

/// Startup-time database bootstrap coordinator.
///
/// Constructed once per process, invoked once before the service accepts
/// traffic, then discarded.
pub struct Coordinator {
    database: String,
    lock_name: String,
    deps: BootstrapDeps,
}

impl Coordinator {
    pub fn new(config: &Config, deps: BootstrapDeps) -> Self {
        Self {
            database: config.database.clone(),
            lock_name: config.lock_name(),
            deps,
        }
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    /// Ensure the owned database's collections, indexes, and seed data
    /// are in the expected shape, serialized across the fleet.
    ///
    /// Runs in the host (untenanted) scope for its whole duration. Never
    /// fails the caller; see [`BootstrapReport`].
    pub async fn check_and_apply_database_bootstrap(&self) -> BootstrapReport {
        // Tenancy is cleared strictly around everything else and restored
        // on every exit path.
        let _host = self.deps.tenancy.host_scope();
        let outer = UnitScope::begin("database bootstrap");

        match BestEffortRunner::run("Database bootstrap", self.migrate_database_schema()).await {
            Ok(Some(summary)) => {
                outer.complete();
                BootstrapReport::Applied {
                    contexts_bound: summary.bound,
                    contexts_skipped: summary.skipped,
                }
            }
            Ok(None) => {
                outer.complete();
                BootstrapReport::LockHeldByPeer
            }
            Err(e) => BootstrapReport::Failed {
                error: e.to_string(),
            },
        }
    }

    /// Try-once lock, bind, seed, release.
    ///
    /// `Ok(None)` means a peer holds the lock. The lock is released
    /// exactly once per acquisition, on the success and the failure path
    /// alike; release failures are logged and do not change the outcome
    /// (the provider's lease expiry is the backstop).
    async fn migrate_database_schema(&self) -> Result<Option<BindSummary>> {
        let Some(handle) = self.deps.lock.try_acquire(&self.lock_name).await? else {
            return Ok(None);
        };

        tracing::info!(
            "Lock is acquired for db migration and seeding on database named: {}...",
            self.database
        );

        // No `?` between acquire and release: the outcome is captured so
        // the release below runs on every path.
        let outcome = self.bind_and_seed().await;

        if let Err(e) = self.deps.lock.release(handle).await {
            tracing::warn!("Lock release failed for {}: {}", self.database, e);
        }
        tracing::info!("Lock is released for: {}...", self.database);

        outcome.map(Some)
    }

    async fn bind_and_seed(&self) -> Result<BindSummary> {
        let scope = UnitScope::begin("schema migration");

        let mut bound: BoundContexts = BoundContexts::new();
        let mut skipped = 0usize;

        for context in self.deps.registry.contexts() {
            let name = context.connection_name();

            let raw = self.deps.resolver.resolve(name).await?;
            if is_blank(&raw) {
                // Not configured for this service instance (e.g. an
                // optional feature's context). Skip, no error.
                tracing::debug!("No connection string for context '{}', skipping", name);
                skipped += 1;
                continue;
            }

            let uri = ConnectionUri::parse(name, &raw)?;
            let client = self.deps.clients.connect(&uri).await?;

            // URIs without a database path component fall back to the
            // context's declared connection name.
            let database_name = uri.database_name().unwrap_or(name);
            let db = client.database(database_name);

            context.initialize_collections(db.as_ref()).await?;
            bound.insert(name.to_string(), db);
        }

        scope.complete();

        // All bindings are done before any seeding begins, and seeding
        // stays under the lock.
        self.deps.seeder.seed(&bound).await?;

        Ok(BindSummary {
            bound: bound.len(),
            skipped,
        })
    }
}
