//! Best-effort execution boundary
//!
//! The service host must keep starting even when bootstrap fails: the
//! failure may be transient and a peer or the next deploy will retry.
//! Operators find out from the error log, not from a startup crash. This
//! policy is a named component so it is visible at the call site.

use crate::common::Result;
use std::future::Future;

pub struct BestEffortRunner;

impl BestEffortRunner {
    /// Run the future, logging any error at error severity.
    ///
    /// The error is returned so the caller can fold it into a non-failing
    /// outcome; it has already been logged and must not be propagated
    /// further.
    pub async fn run<T, F>(label: &str, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match fut.await {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::error!("{} failed: {}", label, e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Error;

    #[tokio::test]
    async fn test_ok_passes_through() {
        let out = BestEffortRunner::run("noop", async { Ok(7u32) }).await;
        assert_eq!(out.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_error_is_returned_for_folding() {
        let out: Result<()> =
            BestEffortRunner::run("boom", async { Err(Error::Other("boom".into())) }).await;
        assert!(out.is_err());
    }
}
