//! Order submission endpoint

use async_trait::async_trait;

use shared::models::order::{OrderPayload, OrderReceipt};

use crate::checkout::OrderTransport;
use crate::error::AppResult;

use super::ApiClient;

impl ApiClient {
    /// `POST /orders` — submit one store's order.
    ///
    /// A success without a parseable JSON body still counts as created,
    /// with a placeholder confirmation message.
    pub async fn submit_order(&self, order: &OrderPayload) -> AppResult<OrderReceipt> {
        let builder = self.http().post(self.url("/orders")).json(order);
        let response = self.authorized(builder)?.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::api_error(status, response).await);
        }

        match response.json::<OrderReceipt>().await {
            Ok(receipt) => Ok(receipt),
            Err(_) => Ok(OrderReceipt::without_confirmation()),
        }
    }
}

#[async_trait]
impl OrderTransport for ApiClient {
    async fn submit(&self, order: &OrderPayload) -> AppResult<OrderReceipt> {
        self.submit_order(order).await
    }
}
