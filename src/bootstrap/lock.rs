//! Cluster-wide lock provider contract
//!
//! The provider is a named mutex shared by every replica of the service.
//! Only the try-acquire/release contract is consumed here; lease storage,
//! fencing, and expiry are the provider's concern.

use crate::common::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Proof of a successful acquisition.
///
/// Exists iff `try_acquire` returned `Some`. Must be passed back to
/// `release` exactly once; the token ties the release to this acquisition.
#[derive(Debug)]
pub struct LockHandle {
    name: String,
    token: Uuid,
}

impl LockHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            token: Uuid::new_v4(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn token(&self) -> Uuid {
        self.token
    }
}

/// Cluster-wide named mutex.
#[async_trait]
pub trait LockProvider: Send + Sync {
    /// Attempt to take the named lock without blocking.
    ///
    /// `Ok(None)` means another replica holds it; that is a normal
    /// outcome, not an error.
    async fn try_acquire(&self, name: &str) -> Result<Option<LockHandle>>;

    /// Release a previously acquired handle.
    async fn release(&self, handle: LockHandle) -> Result<()>;
}
