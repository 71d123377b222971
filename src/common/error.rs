//! Error types for seedgate

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    // === Connection-string errors ===
    #[error("Invalid connection string for context '{context}': {reason}")]
    InvalidUri { context: String, reason: String },

    #[error("Connection-string resolution failed for '{0}'")]
    Resolver(String),

    // === Binding errors ===
    #[error("Client construction failed for context '{context}': {reason}")]
    Connect { context: String, reason: String },

    #[error("Collection binding failed for context '{context}': {reason}")]
    Bind { context: String, reason: String },

    // === Seeding errors ===
    #[error("Seeding failed: {0}")]
    Seed(String),

    // === Lock errors ===
    #[error("Lock provider error for '{name}': {reason}")]
    Lock { name: String, reason: String },

    // === Config errors ===
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // === Generic ===
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Is this a failure that a later replica restart may clear on its own?
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Error::Connect { .. } | Error::Bind { .. } | Error::Lock { .. } | Error::Seed(_)
        )
    }
}

// Implement From for common error types
impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<anyhow::Error> for Error {
    fn from(e: anyhow::Error) -> Self {
        Error::Other(e.to_string())
    }
}
