//! Order payloads, checkout aggregation and order history

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::cart::CartStore;
use crate::types::{PaymentMethod, UserId};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrderBuildError {
    #[error("artículo con referencia inválida: {item_id}")]
    InvalidProductReference { item_id: String },
    #[error("la tienda \"{store}\" no tiene artículos válidos")]
    NoValidItems { store: String },
}

/// One line of a per-store order request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemPayload {
    pub product_id: i64,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
}

/// Per-store order request for `POST /orders`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPayload {
    pub client_id: i64,
    pub store_id: i64,
    pub payment_method: PaymentMethod,
    pub items: Vec<OrderItemPayload>,
}

impl OrderPayload {
    /// Build the order request for one store group of the cart.
    ///
    /// Lines follow the same price fallback and positivity filter as cart
    /// flattening; an unparseable product id fails this store's order (the
    /// caller submits other stores regardless).
    pub fn for_store(
        client_id: UserId,
        group: &CartStore,
        payment_method: PaymentMethod,
    ) -> Result<Self, OrderBuildError> {
        let mut items = Vec::with_capacity(group.items.len());
        for item in &group.items {
            let unit_price = if item.sale_price.is_zero() {
                item.original_price
            } else {
                item.sale_price
            };
            if unit_price <= Decimal::ZERO || item.quantity == 0 {
                continue;
            }
            let product_id = parse_product_id(&item.item_id).ok_or_else(|| {
                OrderBuildError::InvalidProductReference {
                    item_id: item.item_id.clone(),
                }
            })?;
            items.push(OrderItemPayload {
                product_id,
                quantity: item.quantity,
                unit_price,
            });
        }

        if items.is_empty() {
            return Err(OrderBuildError::NoValidItems {
                store: group.store.clone(),
            });
        }

        Ok(OrderPayload {
            client_id: client_id.0,
            store_id: group.id.0,
            payment_method,
            items,
        })
    }
}

/// Numeric product id recovered from a cart item id (`p-<id>` or a bare
/// integer).
pub fn parse_product_id(item_id: &str) -> Option<i64> {
    let digits = item_id.strip_prefix("p-").unwrap_or(item_id);
    digits.parse().ok()
}

/// Whatever the backend confirms for an accepted order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderReceipt {
    #[serde(default, alias = "orderId", alias = "id_pedido")]
    pub order_id: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

impl OrderReceipt {
    /// Receipt used when the backend accepted the order but returned no
    /// parseable JSON body.
    pub fn without_confirmation() -> Self {
        OrderReceipt {
            order_id: None,
            message: Some("Orden creada, no se recibió confirmación JSON.".to_string()),
        }
    }
}

/// Settled outcome of one store's submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreOrderResult {
    pub store: String,
    #[serde(default)]
    pub order_id: Option<i64>,
    #[serde(default)]
    pub error: Option<String>,
}

impl StoreOrderResult {
    pub fn success(store: &str, receipt: OrderReceipt) -> Self {
        StoreOrderResult {
            store: store.to_string(),
            order_id: receipt.order_id,
            error: None,
        }
    }

    pub fn failure(store: &str, error: String) -> Self {
        StoreOrderResult {
            store: store.to_string(),
            order_id: None,
            error: Some(error),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Overall outcome of a checkout attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStatus {
    AllSucceeded,
    Partial,
    AllFailed,
}

/// Aggregated per-store results of one checkout attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutReport {
    pub results: Vec<StoreOrderResult>,
}

impl CheckoutReport {
    pub fn new(results: Vec<StoreOrderResult>) -> Self {
        CheckoutReport { results }
    }

    pub fn status(&self) -> CheckoutStatus {
        let succeeded = self.results.iter().filter(|r| r.succeeded()).count();
        if succeeded == self.results.len() {
            CheckoutStatus::AllSucceeded
        } else if succeeded == 0 {
            CheckoutStatus::AllFailed
        } else {
            CheckoutStatus::Partial
        }
    }

    pub fn successes(&self) -> impl Iterator<Item = &StoreOrderResult> {
        self.results.iter().filter(|r| r.succeeded())
    }

    pub fn failures(&self) -> impl Iterator<Item = &StoreOrderResult> {
        self.results.iter().filter(|r| !r.succeeded())
    }

    /// User-facing summary of the whole attempt.
    pub fn user_message(&self) -> String {
        match self.status() {
            CheckoutStatus::AllSucceeded => {
                let order_ids: Vec<String> = self
                    .successes()
                    .filter_map(|r| r.order_id)
                    .map(|id| id.to_string())
                    .collect();
                if order_ids.is_empty() {
                    "Tu orden se ha creado correctamente.".to_string()
                } else {
                    format!(
                        "Tu orden se ha creado correctamente. Pedidos: {}.",
                        order_ids.join(", ")
                    )
                }
            }
            CheckoutStatus::Partial => {
                let ok: Vec<&str> = self.successes().map(|r| r.store.as_str()).collect();
                let failed: Vec<String> = self
                    .failures()
                    .map(|r| {
                        format!(
                            "{} ({})",
                            r.store,
                            r.error.as_deref().unwrap_or("error desconocido")
                        )
                    })
                    .collect();
                format!(
                    "Algunas tiendas no pudieron procesar tu pedido. Completadas: {}. Fallidas: {}.",
                    ok.join(", "),
                    failed.join("; ")
                )
            }
            CheckoutStatus::AllFailed => {
                let failed: Vec<String> = self
                    .failures()
                    .map(|r| {
                        format!(
                            "{}: {}",
                            r.store,
                            r.error.as_deref().unwrap_or("error desconocido")
                        )
                    })
                    .collect();
                format!("No se pudo completar el pedido. {}", failed.join("; "))
            }
        }
    }
}

/// Lifecycle states shown in the order history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "En preparación")]
    InPreparation,
    #[serde(rename = "Listo para recoger")]
    ReadyForPickup,
    #[serde(rename = "Entregado")]
    Delivered,
}

impl OrderStatus {
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::InPreparation => "En preparación",
            OrderStatus::ReadyForPickup => "Listo para recoger",
            OrderStatus::Delivered => "Entregado",
        }
    }
}

/// One entry in the buyer's order history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: String,
    pub store: String,
    pub status: OrderStatus,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub total: Decimal,
}

/// Status filter for the order history tabs ("Todos" keeps everything).
pub fn filter_orders(records: &[OrderRecord], status: Option<OrderStatus>) -> Vec<&OrderRecord> {
    records
        .iter()
        .filter(|r| status.map(|s| r.status == s).unwrap_or(true))
        .collect()
}
