//! Explicit scope brackets
//!
//! The original design leaned on ambient framework scopes for tenancy and
//! units of work. Here both are explicit values with restore/unwind on
//! drop, so no global mutable state participates in the bootstrap.

use std::sync::{Arc, Mutex};

/// Brackets a logical unit of side-effectful external work.
///
/// Non-transactional: the document store is not used in a multi-document
/// transactional mode, so completion is a marker, not a commit. A scope
/// dropped without [`complete`](UnitScope::complete) means the work
/// unwound early; that is logged at debug and is otherwise harmless.
#[must_use = "a unit scope that is never completed reports an early unwind"]
pub struct UnitScope {
    label: &'static str,
    completed: bool,
}

impl UnitScope {
    pub fn begin(label: &'static str) -> Self {
        tracing::debug!("unit scope '{}' opened", label);
        Self {
            label,
            completed: false,
        }
    }

    /// Mark the unit complete. Consumes the scope; a scope completes at
    /// most once.
    pub fn complete(mut self) {
        self.completed = true;
        tracing::debug!("unit scope '{}' completed", self.label);
    }
}

impl Drop for UnitScope {
    fn drop(&mut self) {
        if !self.completed {
            tracing::debug!("unit scope '{}' unwound without completing", self.label);
        }
    }
}

/// Process-local tenancy state.
///
/// Bootstrap must run against the host-level database, so the coordinator
/// clears the tenant for its whole duration and restores the previous one
/// afterwards, on every exit path.
#[derive(Clone, Default)]
pub struct TenancyContext {
    current: Arc<Mutex<Option<String>>>,
}

impl TenancyContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<String> {
        self.current.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn set(&self, tenant: Option<String>) {
        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = tenant;
    }

    /// Clear the tenant until the returned guard drops.
    pub fn host_scope(&self) -> TenancyGuard {
        let prior = {
            let mut slot = self.current.lock().unwrap_or_else(|e| e.into_inner());
            slot.take()
        };
        TenancyGuard {
            context: self.clone(),
            prior,
        }
    }
}

/// Restores the prior tenant on drop.
pub struct TenancyGuard {
    context: TenancyContext,
    prior: Option<String>,
}

impl Drop for TenancyGuard {
    fn drop(&mut self) {
        self.context.set(self.prior.take());
    }
}
