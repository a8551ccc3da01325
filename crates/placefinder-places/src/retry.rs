//! Exponential back-off for feature-provider requests.
//!
//! Overpass sheds load with 429 and 504 responses, so those are retried along
//! with network failures. Everything else is returned at once.

use std::future::Future;
use std::time::Duration;

use crate::error::PlacesError;

const MAX_DELAY_MS: u64 = 60_000;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:** timeouts, connection failures, 5xx, and
/// [`PlacesError::RateLimited`].
///
/// **Not retriable:** 4xx statuses, malformed bodies, and a bad endpoint.
pub(crate) fn is_retriable(err: &PlacesError) -> bool {
    match err {
        PlacesError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        PlacesError::RateLimited { .. } => true,
        PlacesError::UnexpectedStatus { status, .. } => *status >= 500,
        PlacesError::Deserialize { .. } | PlacesError::InvalidEndpoint { .. } => false,
    }
}

/// Delay before retry number `attempt` (1-based), before jitter.
///
/// A rate-limit response with a `Retry-After` hint overrides the computed
/// exponential delay when the hint is longer.
fn base_delay_ms(attempt: u32, backoff_base_ms: u64, err: &PlacesError) -> u64 {
    let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
    let hinted = match err {
        PlacesError::RateLimited { retry_after_secs } => retry_after_secs.saturating_mul(1000),
        _ => 0,
    };
    computed.max(hinted).min(MAX_DELAY_MS)
}

/// Runs `operation` with up to `max_retries` additional attempts on transient
/// errors, sleeping `backoff_base_ms * 2^(attempt-1)` ± 25 % between tries.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, PlacesError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, PlacesError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let capped = base_delay_ms(attempt, backoff_base_ms, &err);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "feature provider transient error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    fn deserialize_err() -> PlacesError {
        let src = serde_json::from_str::<()>("invalid").unwrap_err();
        PlacesError::Deserialize {
            context: "test".to_owned(),
            source: src,
        }
    }

    fn status_err(status: u16) -> PlacesError {
        PlacesError::UnexpectedStatus {
            status,
            url: "http://localhost/api/interpreter".to_owned(),
        }
    }

    #[test]
    fn classifies_errors() {
        assert!(is_retriable(&PlacesError::RateLimited { retry_after_secs: 0 }));
        assert!(is_retriable(&status_err(504)));
        assert!(!is_retriable(&status_err(400)));
        assert!(!is_retriable(&deserialize_err()));
        assert!(!is_retriable(&PlacesError::InvalidEndpoint {
            url: "nope".to_owned(),
            reason: "relative URL without a base".to_owned(),
        }));
    }

    #[test]
    fn delay_doubles_and_respects_retry_after() {
        let err = status_err(503);
        assert_eq!(base_delay_ms(1, 1_000, &err), 1_000);
        assert_eq!(base_delay_ms(3, 1_000, &err), 4_000);
        assert_eq!(base_delay_ms(30, 1_000, &err), MAX_DELAY_MS);

        let limited = PlacesError::RateLimited { retry_after_secs: 5 };
        assert_eq!(base_delay_ms(1, 1_000, &limited), 5_000);
        assert_eq!(base_delay_ms(4, 1_000, &limited), 8_000);
    }

    #[tokio::test]
    async fn retries_rate_limit_then_succeeds() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result = retry_with_backoff(3, 0, || async move {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(PlacesError::RateLimited { retry_after_secs: 0 })
            } else {
                Ok(7)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn does_not_retry_client_errors() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result = retry_with_backoff(3, 0, || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err::<u32, _>(status_err(400))
        })
        .await;
        assert!(matches!(
            result,
            Err(PlacesError::UnexpectedStatus { status: 400, .. })
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result = retry_with_backoff(2, 0, || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err::<u32, _>(status_err(503))
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
