//! Tracing setup for embedding hosts

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install a global subscriber with env-filter support.
///
/// Honors `RUST_LOG`; falls back to the given level. Safe to call once per
/// process; hosts with their own subscriber should skip this.
pub fn init(default_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
