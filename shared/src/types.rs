//! Common identifier and enum types used across the platform

use serde::{Deserialize, Serialize};

/// Canonical numeric identifier of a store.
///
/// Cart groups are matched by store display name, but order submission
/// requires this identifier, so it must be present when a product enters
/// the cart.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct StoreId(pub i64);

impl std::fmt::Display for StoreId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Numeric identifier of a catalog product.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Numeric identifier of a user account.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Payment options offered at checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Credit or debit card
    #[default]
    Card,
    /// PSE online bank transfer
    Pse,
    /// Cash on delivery
    Cod,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Pse => "pse",
            PaymentMethod::Cod => "cod",
        }
    }
}

/// How the buyer receives the order.
///
/// The redesigned checkout always uses pickup; home delivery is retained
/// for the delivery-selection step and carries the flat shipping fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMethod {
    #[default]
    Pickup,
    HomeDelivery,
}

impl DeliveryMethod {
    /// Parse a delivery option id coming from the UI ("pickup", "delivery", ...).
    pub fn from_option_id(id: &str) -> Self {
        if id.contains("pickup") {
            DeliveryMethod::Pickup
        } else {
            DeliveryMethod::HomeDelivery
        }
    }
}

/// Catalog badge shown on a product card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Badge {
    Offer,
    Donation,
    Other(String),
}

impl Badge {
    pub fn label(&self) -> &str {
        match self {
            Badge::Offer => "Oferta",
            Badge::Donation => "Donación",
            Badge::Other(label) => label,
        }
    }
}

impl From<String> for Badge {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Oferta" => Badge::Offer,
            "Donación" => Badge::Donation,
            _ => Badge::Other(label),
        }
    }
}

impl From<Badge> for String {
    fn from(badge: Badge) -> Self {
        badge.label().to_string()
    }
}

/// Normalized account role.
///
/// The backend is inconsistent about role spelling ("tienda" vs "vendedor",
/// "comprador" vs "cliente"); unrecognized roles fall back to buyer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Buyer,
    Seller,
}

impl Role {
    pub fn from_wire(role: &str) -> Self {
        match role.trim().to_lowercase().as_str() {
            "tienda" | "vendedor" => Role::Seller,
            "comprador" | "cliente" => Role::Buyer,
            _ => Role::Buyer,
        }
    }

    /// The wire value used when registering an account with this role.
    pub fn as_wire(&self) -> &'static str {
        match self {
            Role::Buyer => "comprador",
            Role::Seller => "vendedor",
        }
    }
}
