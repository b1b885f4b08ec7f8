//! Cancellation tokens
//!
//! A caller that loses interest in an in-flight operation (a dismissed
//! view, an aborted command) cancels the token it handed out; the wrapped
//! operation keeps running, but its outcome is replaced by [`Canceled`] so
//! stale results are never acted upon.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

/// Marker error distinguishing cancellation from genuine failure.
/// Detect it with `err.is::<Canceled>()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("operation canceled")]
pub struct Canceled;

/// Shared cancellation flag
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    canceled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the token canceled. Operations already in flight keep running;
    /// only their observed outcome changes.
    pub fn cancel(&self) {
        self.canceled.store(true, Ordering::SeqCst);
    }

    pub fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::SeqCst)
    }
}

/// Await `operation`, then replace its outcome (success or failure) with
/// [`Canceled`] if the token was canceled in the meantime.
///
/// The underlying operation is never interrupted.
pub async fn run_cancelable<T, F>(token: &CancelToken, operation: F) -> anyhow::Result<T>
where
    F: Future<Output = anyhow::Result<T>>,
{
    let result = operation.await;

    if token.is_canceled() {
        return Err(Canceled.into());
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_cancel_replaces_success() {
        let token = CancelToken::new();
        token.cancel();

        let result = tokio_test::block_on(run_cancelable(&token, async { Ok(42) }));
        assert!(result.is_err_and(|e| e.is::<Canceled>()));
    }

    #[test]
    fn test_cancel_replaces_failure() {
        let token = CancelToken::new();
        token.cancel();

        let result = tokio_test::block_on(run_cancelable::<i32, _>(&token, async {
            Err(anyhow!("network down"))
        }));
        assert!(result.is_err_and(|e| e.is::<Canceled>()));
    }

    #[test]
    fn test_uncanceled_outcomes_pass_through() {
        let token = CancelToken::new();

        let ok = tokio_test::block_on(run_cancelable(&token, async { Ok(42) }));
        assert_eq!(ok.unwrap(), 42);

        let err = tokio_test::block_on(run_cancelable::<i32, _>(&token, async {
            Err(anyhow!("network down"))
        }));
        let err = err.unwrap_err();
        assert!(!err.is::<Canceled>());
        assert_eq!(err.to_string(), "network down");
    }

    #[test]
    fn test_cancel_after_completion_still_wins() {
        // The flag is checked when the result is observed, so a token
        // canceled between completion and observation also redirects.
        let token = CancelToken::new();
        let clone = token.clone();

        let result = tokio_test::block_on(run_cancelable(&token, async move {
            clone.cancel();
            Ok("fresh data")
        }));
        assert!(result.is_err_and(|e| e.is::<Canceled>()));
    }
}
