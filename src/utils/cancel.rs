use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::errors::{AppError, AppResult};

/// Race a network-bound operation against the caller's cancellation token.
///
/// The token is checked first, so an already cancelled caller never starts
/// the operation.
pub async fn with_cancellation<T, F>(
    cancel: &CancellationToken,
    operation: &str,
    future: F,
) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            debug!("Cancelled during {}", operation);
            Err(AppError::cancelled(operation))
        }
        result = future => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_passes_through_result() {
        let token = CancellationToken::new();
        let value = with_cancellation(&token, "answer", async { Ok(42) })
            .await
            .unwrap();
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn test_pre_cancelled_token_skips_operation() {
        let token = CancellationToken::new();
        token.cancel();

        let ran = AtomicBool::new(false);
        let result: AppResult<()> = with_cancellation(&token, "fetch page", async {
            ran.store(true, Ordering::SeqCst);
            Ok(())
        })
        .await;

        assert!(matches!(result, Err(AppError::Cancelled { operation }) if operation == "fetch page"));
        assert!(!ran.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_cancel_aborts_in_flight_operation() {
        let token = CancellationToken::new();
        let child = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            child.cancel();
        });

        let result: AppResult<()> = with_cancellation(&token, "slow", async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(())
        })
        .await;

        assert!(matches!(result, Err(AppError::Cancelled { .. })));
    }
}
