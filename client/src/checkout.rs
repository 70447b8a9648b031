//! Checkout orchestration: one order per store, aggregated result
//!
//! Stores are submitted sequentially and independently; a failure in one
//! store's order never blocks the others, and there is no cross-store
//! transaction. A manual retry of the whole flow re-validates from scratch
//! rather than resuming partial state.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use shared::models::cart::Cart;
use shared::models::order::{CheckoutReport, OrderPayload, OrderReceipt, StoreOrderResult};
use shared::types::{PaymentMethod, UserId};

use crate::error::{AppError, AppResult};
use crate::retry::RetryPolicy;
use crate::session::SessionStore;

/// The seam between checkout and the network.
#[async_trait]
pub trait OrderTransport: Send + Sync {
    async fn submit(&self, order: &OrderPayload) -> AppResult<OrderReceipt>;
}

#[async_trait]
impl<T: OrderTransport + ?Sized> OrderTransport for Arc<T> {
    async fn submit(&self, order: &OrderPayload) -> AppResult<OrderReceipt> {
        (**self).submit(order).await
    }
}

pub struct CheckoutOrchestrator<T> {
    transport: T,
    session: Arc<dyn SessionStore>,
    retry: RetryPolicy,
}

impl<T: OrderTransport> CheckoutOrchestrator<T> {
    pub fn new(transport: T, session: Arc<dyn SessionStore>) -> Self {
        Self {
            transport,
            session,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Run one checkout attempt over the whole cart.
    ///
    /// Validation failures (empty cart, missing identity, missing token)
    /// return an error before any network call; per-store failures are
    /// captured in the report instead.
    pub async fn submit(
        &self,
        cart: &Cart,
        payment_method: PaymentMethod,
    ) -> AppResult<CheckoutReport> {
        if cart.is_empty() {
            return Err(AppError::EmptyCart);
        }
        let client = self
            .session
            .current_user()
            .ok_or(AppError::MissingIdentity)?;
        if self.session.token().is_none() {
            return Err(AppError::MissingToken);
        }
        let client_id = UserId(client.id_usuario);

        info!(
            client = client_id.0,
            stores = cart.stores().len(),
            "submitting checkout"
        );

        let mut results = Vec::with_capacity(cart.stores().len());
        for group in cart.stores() {
            let result = match OrderPayload::for_store(client_id, group, payment_method) {
                Ok(payload) => {
                    match self.retry.run(|_attempt| self.transport.submit(&payload)).await {
                        Ok(receipt) => {
                            info!(
                                store = %group.store,
                                order_id = ?receipt.order_id,
                                "store order accepted"
                            );
                            StoreOrderResult::success(&group.store, receipt)
                        }
                        Err(err) => {
                            warn!(store = %group.store, error = %err, "store order failed");
                            StoreOrderResult::failure(&group.store, err.user_message())
                        }
                    }
                }
                Err(err) => {
                    warn!(store = %group.store, error = %err, "order payload rejected");
                    StoreOrderResult::failure(&group.store, err.to_string())
                }
            };
            results.push(result);
        }

        Ok(CheckoutReport::new(results))
    }
}
