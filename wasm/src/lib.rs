//! WebAssembly module for the Expirapp storefront
//!
//! Provides client-side computation for:
//! - Checkout totals and the cart-page summary
//! - Quantity clamping and stock validation
//! - Catalog search and donation filtering
//!
//! Every binding speaks JSON strings so the JavaScript side can keep its
//! existing cart and product shapes.

use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::pricing::*;
pub use shared::types::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&"expirapp wasm initialized".into());
}

fn parse_cart(cart_json: &str) -> Result<Cart, JsValue> {
    serde_json::from_str(cart_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid cart JSON: {e}")))
}

/// Compute checkout totals for a cart (JSON array of store groups).
///
/// `delivery_option` is the UI option id ("pickup", "delivery", ...).
#[wasm_bindgen]
pub fn checkout_totals_json(cart_json: &str, delivery_option: &str) -> Result<String, JsValue> {
    let cart = parse_cart(cart_json)?;
    let delivery = DeliveryMethod::from_option_id(delivery_option);
    let breakdown = shared::pricing::checkout_totals(&cart.flatten(), delivery);
    serde_json::to_string(&breakdown).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Cart-page summary: original-price subtotal, savings, amount to pay.
#[wasm_bindgen]
pub fn cart_summary_json(cart_json: &str) -> Result<String, JsValue> {
    let cart = parse_cart(cart_json)?;
    let summary = shared::pricing::cart_summary(&cart);
    serde_json::to_string(&summary).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Clamp a quantity step to `[1, stock]`.
#[wasm_bindgen]
pub fn clamp_quantity(current: u32, increase: bool, stock: Option<u32>) -> u32 {
    let next = if increase {
        current.saturating_add(1)
    } else {
        current.saturating_sub(1)
    };
    let next = next.max(1);
    match stock {
        Some(stock) => next.min(stock),
        None => next,
    }
}

/// Lines exceeding known stock, as a JSON array.
#[wasm_bindgen]
pub fn stock_issues_json(cart_json: &str) -> Result<String, JsValue> {
    let cart = parse_cart(cart_json)?;
    serde_json::to_string(&cart.stock_issues()).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Filter a catalog (JSON array of products) by search text and the
/// donations-only toggle.
#[wasm_bindgen]
pub fn filter_catalog_json(
    products_json: &str,
    query: &str,
    only_donations: bool,
) -> Result<String, JsValue> {
    let products: Vec<Product> = serde_json::from_str(products_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid products JSON: {e}")))?;
    let filtered = shared::models::product::filter_catalog(&products, query, only_donations);
    serde_json::to_string(&filtered).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Line total shown next to each summary row, formatted to cents.
#[wasm_bindgen]
pub fn line_total(price: f64, quantity: u32) -> String {
    let price = Decimal::from_f64_retain(price).unwrap_or_default();
    format!("{:.2}", (price * Decimal::from(quantity)).round_dp(2))
}

/// Labels for the order-history status tabs.
#[wasm_bindgen]
pub fn order_status_labels() -> js_sys::Array {
    [
        OrderStatus::InPreparation,
        OrderStatus::ReadyForPickup,
        OrderStatus::Delivered,
    ]
    .iter()
    .map(|status| JsValue::from_str(status.label()))
    .collect()
}
