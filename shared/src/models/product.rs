//! Catalog product models and wire-to-domain conversion
//!
//! The backend speaks Spanish field names and is inconsistent about which
//! price fields it fills in; `Product::from_api` normalizes all of that so
//! the rest of the client only ever sees a clean domain product.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{Badge, ProductId, StoreId};

/// Fallback markup applied when the backend only reports a single price:
/// that price is the current (discounted) one, and the original is derived
/// as price × 1.35 rounded to a whole amount.
const DERIVED_ORIGINAL_MARKUP: Decimal = Decimal::from_parts(135, 0, 0, false, 2);

/// Catalog row exactly as the backend returns it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiProduct {
    pub id_producto: i64,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub imagen_url: Option<String>,
    #[serde(default)]
    pub precio_original: Option<Decimal>,
    #[serde(default)]
    pub precio_descuento: Option<Decimal>,
    #[serde(default)]
    pub precio: Option<Decimal>,
    #[serde(default)]
    pub fecha_vencimiento: Option<String>,
    #[serde(default)]
    pub stock: Option<u32>,
    #[serde(default)]
    pub badge: Option<String>,
    #[serde(default)]
    pub id_categoria: Option<i64>,
    #[serde(default)]
    pub nombre_categoria: Option<String>,
    #[serde(default)]
    pub nombre_tienda: Option<String>,
    #[serde(default)]
    pub id_tienda: Option<i64>,
}

/// Paginated catalog response (`GET /products/`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductsPage {
    pub productos: Vec<ApiProduct>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub pagina: Option<u32>,
    #[serde(default)]
    pub limite: Option<u32>,
}

/// Normalized catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Current (discounted) price; zero for donations
    pub price: Decimal,
    pub original_price: Decimal,
    #[serde(default)]
    pub badge: Option<Badge>,
    pub image_url: String,
    /// Store display name used for cart grouping
    pub location: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub stock: Option<u32>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub store_id: Option<StoreId>,
}

impl Product {
    /// Normalize a backend catalog row.
    ///
    /// `asset_base_url` is prefixed onto relative image paths; products
    /// without an image get a placeholder derived from their name.
    pub fn from_api(api: ApiProduct, asset_base_url: &str) -> Self {
        let (price, original_price) = normalize_prices(
            api.precio_original,
            api.precio_descuento,
            api.precio,
        );

        let badge = match api.badge {
            Some(label) => Some(Badge::from(label)),
            None if price.is_zero() => Some(Badge::Donation),
            None if original_price > price => Some(Badge::Offer),
            None => None,
        };

        let image_url = normalize_image_url(api.imagen_url.as_deref(), &api.nombre, asset_base_url);
        let location = api
            .nombre_tienda
            .clone()
            .unwrap_or_else(|| "Ubicación Desconocida".to_string());

        Product {
            id: ProductId(api.id_producto),
            name: api.nombre.trim().to_string(),
            price,
            original_price,
            badge,
            image_url,
            location,
            description: api.descripcion,
            expiry_date: api.fecha_vencimiento.as_deref().and_then(parse_expiry_date),
            stock: api.stock,
            category: api.nombre_categoria,
            store_id: api.id_tienda.map(StoreId),
        }
    }

    pub fn is_donation(&self) -> bool {
        matches!(self.badge, Some(Badge::Donation))
    }
}

/// Resolve the (current, original) price pair from whichever fields the
/// backend filled in.
fn normalize_prices(
    original: Option<Decimal>,
    discount: Option<Decimal>,
    plain: Option<Decimal>,
) -> (Decimal, Decimal) {
    if let (Some(original), Some(discount)) = (original, discount) {
        return (discount, original);
    }

    let price = discount.or(plain).or(original).unwrap_or(Decimal::ZERO);
    let derived_original = (price * DERIVED_ORIGINAL_MARKUP)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    (price, derived_original)
}

fn normalize_image_url(raw: Option<&str>, name: &str, asset_base_url: &str) -> String {
    match raw {
        Some(url) if !url.is_empty() => {
            let url = url.replace('\\', "/");
            if url.starts_with("http") {
                url
            } else {
                format!(
                    "{}/{}",
                    asset_base_url.trim_end_matches('/'),
                    url.trim_start_matches('/')
                )
            }
        }
        _ => {
            let label: String = name.chars().take(10).collect();
            format!(
                "https://placehold.co/300x300/cccccc/333333?text={}",
                urlencode(&label)
            )
        }
    }
}

/// The backend sends either a bare date or a full RFC 3339 timestamp.
fn parse_expiry_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Minimal percent-encoding for the placeholder label
fn urlencode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push_str("%20"),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// New product listing for `POST /products/`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProductInput {
    #[validate(length(min = 1, message = "El nombre del producto es obligatorio"))]
    pub nombre: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub precio: Decimal,
    pub fecha_vencimiento: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estado: Option<String>,
    pub id_tienda: i64,
}

/// Catalog search + donation filter used by the storefront
pub fn filter_catalog<'a>(
    products: &'a [Product],
    query: &str,
    only_donations: bool,
) -> Vec<&'a Product> {
    let query = query.to_lowercase();
    products
        .iter()
        .filter(|p| !only_donations || p.is_donation())
        .filter(|p| p.name.to_lowercase().contains(&query))
        .collect()
}
