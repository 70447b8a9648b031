//! Store profile and inventory endpoints

use validator::Validate;

use shared::models::product::{ApiProduct, Product};
use shared::models::store::{StoreProfile, UpdateStoreInput};
use shared::types::StoreId;

use crate::error::AppResult;

use super::{ApiClient, MaybeEnveloped};

impl ApiClient {
    /// `GET /stores/:id` — read a store profile.
    pub async fn store_profile(&self, id: StoreId) -> AppResult<StoreProfile> {
        let builder = self.http().get(self.url(&format!("/stores/{id}")));
        let response = self.authorized(builder)?.send().await?;
        let profile: MaybeEnveloped<StoreProfile> = Self::read_json(response).await?;
        Ok(profile.into_inner())
    }

    /// `PUT /stores/:id` — update a store profile.
    pub async fn update_store_profile(
        &self,
        id: StoreId,
        input: &UpdateStoreInput,
    ) -> AppResult<()> {
        input.validate()?;
        let builder = self
            .http()
            .put(self.url(&format!("/stores/{id}")))
            .json(input);
        let response = self.authorized(builder)?.send().await?;
        Self::expect_success(response).await
    }

    /// `GET /stores/:id/products` — the seller's inventory, normalized.
    pub async fn store_products(&self, id: StoreId) -> AppResult<Vec<Product>> {
        let builder = self
            .http()
            .get(self.url(&format!("/stores/{id}/products")));
        let response = self.authorized(builder)?.send().await?;
        let rows: MaybeEnveloped<Vec<ApiProduct>> = Self::read_json(response).await?;
        Ok(rows
            .into_inner()
            .into_iter()
            .map(|row| Product::from_api(row, self.asset_base_url()))
            .collect())
    }
}
