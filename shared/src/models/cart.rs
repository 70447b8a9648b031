//! Shopping cart model: line items grouped by store
//!
//! Groups are keyed by store display name and pruned as soon as they lose
//! their last item, so an empty group never survives a mutation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::product::Product;
use crate::types::StoreId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CartError {
    /// The product carried no canonical store id; carts refuse such
    /// products instead of inventing a sentinel identifier.
    #[error("el producto \"{product}\" no tiene una tienda asociada")]
    InvalidStoreReference { product: String },
}

/// A single line in the cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Derived identifier, format `p-<product id>`
    pub item_id: String,
    pub name: String,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<chrono::NaiveDate>,
    pub original_price: Decimal,
    pub sale_price: Decimal,
    pub quantity: u32,
    pub image_url: String,
    /// Units available at the store, when known
    #[serde(default)]
    pub stock: Option<u32>,
}

/// All items from one store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartStore {
    pub id: StoreId,
    /// Store display name; also the grouping key
    pub store: String,
    pub items: Vec<CartItem>,
}

/// Read-only line used for order summaries and total computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlattenedItem {
    pub name: String,
    pub size: String,
    pub price: Decimal,
    pub quantity: u32,
}

/// A line whose requested quantity exceeds the known stock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockIssue {
    pub store: String,
    pub name: String,
    pub requested: u32,
    pub available: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    Increase,
    Decrease,
}

/// The whole cart: store groups in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    stores: Vec<CartStore>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stores(&self) -> &[CartStore] {
        &self.stores
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    /// Total number of lines across all stores
    pub fn line_count(&self) -> usize {
        self.stores.iter().map(|s| s.items.len()).sum()
    }

    /// Add `quantity` units of a catalog product.
    ///
    /// The target group is matched by store display name and created on
    /// demand; an existing line for the same product has the quantities
    /// summed. Fails when the product has no canonical store id.
    pub fn add(&mut self, product: &Product, quantity: u32) -> Result<(), CartError> {
        let store_id = product
            .store_id
            .ok_or_else(|| CartError::InvalidStoreReference {
                product: product.name.clone(),
            })?;
        let item_id = format!("p-{}", product.id);

        if !self.stores.iter().any(|s| s.store == product.location) {
            self.stores.push(CartStore {
                id: store_id,
                store: product.location.clone(),
                items: Vec::new(),
            });
        }
        let Some(group) = self.stores.iter_mut().find(|s| s.store == product.location) else {
            return Ok(());
        };

        if let Some(existing) = group.items.iter_mut().find(|i| i.item_id == item_id) {
            existing.quantity += quantity;
        } else {
            group.items.push(CartItem {
                item_id,
                name: product.name.clone(),
                size: None,
                expiry_date: product.expiry_date,
                original_price: if product.original_price.is_zero() {
                    product.price
                } else {
                    product.original_price
                },
                sale_price: product.price,
                quantity,
                image_url: product.image_url.clone(),
                stock: product.stock,
            });
        }
        Ok(())
    }

    /// Increment or decrement a line, clamped to `[1, stock]`.
    ///
    /// Unknown item ids are ignored.
    pub fn update_quantity(&mut self, item_id: &str, change: QuantityChange) {
        for group in &mut self.stores {
            for item in &mut group.items {
                if item.item_id == item_id {
                    let next = match change {
                        QuantityChange::Increase => item.quantity.saturating_add(1),
                        QuantityChange::Decrease => item.quantity.saturating_sub(1),
                    };
                    let next = next.max(1);
                    item.quantity = match item.stock {
                        Some(stock) => next.min(stock),
                        None => next,
                    };
                    return;
                }
            }
        }
    }

    /// Remove a line; the owning group is pruned when it empties.
    pub fn remove_item(&mut self, item_id: &str) {
        for group in &mut self.stores {
            group.items.retain(|i| i.item_id != item_id);
        }
        self.stores.retain(|s| !s.items.is_empty());
    }

    pub fn clear(&mut self) {
        self.stores.clear();
    }

    /// Flatten all groups into summary lines.
    ///
    /// The unit price falls back from sale price to original price (a zero
    /// sale price falls through, which is what keeps donation lines out of
    /// paid totals); lines without a positive price and quantity are
    /// dropped.
    pub fn flatten(&self) -> Vec<FlattenedItem> {
        self.stores
            .iter()
            .flat_map(|group| group.items.iter())
            .map(|item| FlattenedItem {
                name: item.name.clone(),
                size: item
                    .size
                    .clone()
                    .unwrap_or_else(|| "Unidad".to_string()),
                price: if item.sale_price.is_zero() {
                    item.original_price
                } else {
                    item.sale_price
                },
                quantity: item.quantity,
            })
            .filter(|line| line.price > Decimal::ZERO && line.quantity > 0)
            .collect()
    }

    /// Lines that exceed the known stock; checkout is gated on this being
    /// empty.
    pub fn stock_issues(&self) -> Vec<StockIssue> {
        let mut issues = Vec::new();
        for group in &self.stores {
            for item in &group.items {
                if let Some(stock) = item.stock {
                    if item.quantity > stock {
                        issues.push(StockIssue {
                            store: group.store.clone(),
                            name: item.name.clone(),
                            requested: item.quantity,
                            available: stock,
                        });
                    }
                }
            }
        }
        issues
    }
}

impl From<Vec<CartStore>> for Cart {
    fn from(stores: Vec<CartStore>) -> Self {
        Cart { stores }
    }
}
