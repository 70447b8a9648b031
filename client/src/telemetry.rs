//! Tracing setup for embeddings of the client library

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber.
///
/// Honors `RUST_LOG`; repeated calls (e.g. across tests) are harmless.
pub fn init() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "expirapp_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
