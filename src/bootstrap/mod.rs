//! Bootstrap coordination
//!
//! The coordinator is responsible for:
//! - Cluster-wide serialization of bootstrap (try-once distributed lock)
//! - Binding each owned document context to its target database
//! - Collection creation and index ensure through the driver seam
//! - Idempotent seed-data application, under the lock
//! - Best-effort error containment so the host keeps starting

pub mod client;
pub mod context;
pub mod coordinator;
pub mod lock;
pub mod memory;
pub mod resolver;
pub mod runner;
pub mod scope;
pub mod seeder;

pub use coordinator::{BootstrapDeps, BootstrapReport, Coordinator};
