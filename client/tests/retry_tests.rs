//! Retry policy tests
//!
//! Tests for bounded exponential backoff:
//! - 5xx responses retry up to 3 total attempts
//! - 4xx responses fail with zero retries
//!
//! Time is paused, so the 1s/2s backoff waits complete instantly.

use std::sync::atomic::{AtomicU32, Ordering};

use expirapp_client::{AppError, RetryPolicy};

fn server_error() -> AppError {
    AppError::Api {
        status: 503,
        message: "Service Unavailable".to_string(),
    }
}

fn client_error() -> AppError {
    AppError::Api {
        status: 400,
        message: "Bad Request".to_string(),
    }
}

#[tokio::test(start_paused = true)]
async fn server_errors_retry_until_success() {
    expirapp_client::telemetry::init();
    let attempts = AtomicU32::new(0);
    let policy = RetryPolicy::default();

    let result = policy
        .run(|_| {
            let n = attempts.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(server_error())
                } else {
                    Ok(n)
                }
            }
        })
        .await;

    assert_eq!(result.unwrap(), 2);
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn server_errors_exhaust_after_three_attempts() {
    let attempts = AtomicU32::new(0);
    let policy = RetryPolicy::default();

    let result: Result<(), _> = policy
        .run(|_| {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Err(server_error()) }
        })
        .await;

    assert!(matches!(
        result,
        Err(AppError::Api { status: 503, .. })
    ));
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn client_errors_fail_without_retry() {
    let attempts = AtomicU32::new(0);
    let policy = RetryPolicy::default();

    let result: Result<(), _> = policy
        .run(|_| {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Err(client_error()) }
        })
        .await;

    assert!(matches!(
        result,
        Err(AppError::Api { status: 400, .. })
    ));
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn first_success_short_circuits() {
    let attempts = AtomicU32::new(0);
    let policy = RetryPolicy::default();

    let result = policy
        .run(|_| {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Ok(42) }
        })
        .await;

    assert_eq!(result.unwrap(), 42);
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}
