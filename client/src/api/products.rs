//! Catalog and listing endpoints

use serde::Deserialize;
use tracing::debug;
use validator::Validate;

use shared::models::product::{ApiProduct, CreateProductInput, Product, ProductsPage};
use shared::types::ProductId;

use crate::error::AppResult;

use super::ApiClient;

/// `GET /products/` answers with either a paginated page or a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogResponse {
    Page(ProductsPage),
    List(Vec<ApiProduct>),
}

impl CatalogResponse {
    fn into_rows(self) -> Vec<ApiProduct> {
        match self {
            CatalogResponse::Page(page) => page.productos,
            CatalogResponse::List(rows) => rows,
        }
    }
}

impl ApiClient {
    /// `GET /products/` — the public catalog, normalized to domain
    /// products.
    pub async fn list_products(&self) -> AppResult<Vec<Product>> {
        let response = self.http().get(self.url("/products/")).send().await?;
        let catalog: CatalogResponse = Self::read_json(response).await?;
        let rows = catalog.into_rows();
        debug!(count = rows.len(), "catalog fetched");
        Ok(rows
            .into_iter()
            .map(|row| Product::from_api(row, self.asset_base_url()))
            .collect())
    }

    /// `POST /products/` — publish a new listing.
    pub async fn create_product(&self, input: &CreateProductInput) -> AppResult<()> {
        input.validate()?;
        let builder = self.http().post(self.url("/products/")).json(input);
        let response = self.authorized(builder)?.send().await?;
        Self::expect_success(response).await
    }

    /// `PATCH /products/:id/toggle-visibility` — hide or show a listing.
    pub async fn toggle_product_visibility(&self, id: ProductId) -> AppResult<()> {
        let builder = self
            .http()
            .patch(self.url(&format!("/products/{id}/toggle-visibility")));
        let response = self.authorized(builder)?.send().await?;
        Self::expect_success(response).await
    }

    /// `DELETE /products/:id` — remove a listing.
    pub async fn delete_product(&self, id: ProductId) -> AppResult<()> {
        let builder = self.http().delete(self.url(&format!("/products/{id}")));
        let response = self.authorized(builder)?.send().await?;
        Self::expect_success(response).await
    }
}
