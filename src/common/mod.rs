//! Common utilities and types shared across seedgate

pub mod config;
pub mod error;
pub mod telemetry;
pub mod uri;

pub use config::Config;
pub use error::{Error, Result};
pub use uri::{is_blank, ConnectionUri};
