//! Expirapp client core
//!
//! Networked client library for the Expirapp marketplace: configuration,
//! session persistence, REST API access and the checkout pipeline that
//! turns a multi-store cart into one order per store with bounded retries.

pub mod api;
pub mod checkout;
pub mod config;
pub mod error;
pub mod retry;
pub mod session;
pub mod telemetry;

pub use api::ApiClient;
pub use checkout::{CheckoutOrchestrator, OrderTransport};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use retry::RetryPolicy;
pub use session::{FileSessionStore, MemorySessionStore, SessionStore};
