//! Pricing: checkout totals and the cart-page summary
//!
//! Pure arithmetic over cart state. The tax rate and the home-delivery fee
//! are fixed at build time.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::cart::{Cart, FlattenedItem};
use crate::types::DeliveryMethod;

/// Fixed VAT rate (19%)
pub const TAX_RATE: Decimal = Decimal::from_parts(19, 0, 0, false, 2);

/// Flat fee charged for home delivery
pub const SHIPPING_FLAT_FEE: Decimal = Decimal::from_parts(5000, 0, 0, false, 0);

/// Checkout cost breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub taxes: Decimal,
    pub total: Decimal,
}

/// Compute the checkout totals for the flattened cart lines.
///
/// Shipping is free for pickup and for an empty cart; taxes are rounded to
/// cents, and the grand total is the sum of the three components.
pub fn checkout_totals(items: &[FlattenedItem], delivery: DeliveryMethod) -> PriceBreakdown {
    let subtotal: Decimal = items
        .iter()
        .map(|line| line.price * Decimal::from(line.quantity))
        .sum();

    let shipping = match delivery {
        DeliveryMethod::Pickup => Decimal::ZERO,
        DeliveryMethod::HomeDelivery if subtotal > Decimal::ZERO => SHIPPING_FLAT_FEE,
        DeliveryMethod::HomeDelivery => Decimal::ZERO,
    };

    let taxes = (subtotal * TAX_RATE).round_dp(2);
    let total = subtotal + shipping + taxes;

    PriceBreakdown {
        subtotal,
        shipping,
        taxes,
        total,
    }
}

/// Cart-page summary: original-price subtotal, total savings and the
/// sale-price amount to pay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartSummary {
    pub subtotal: Decimal,
    pub savings: Decimal,
    pub total_to_pay: Decimal,
}

pub fn cart_summary(cart: &Cart) -> CartSummary {
    let mut subtotal = Decimal::ZERO;
    let mut total_to_pay = Decimal::ZERO;

    for group in cart.stores() {
        for item in &group.items {
            let quantity = Decimal::from(item.quantity);
            subtotal += item.original_price * quantity;
            total_to_pay += item.sale_price * quantity;
        }
    }

    CartSummary {
        subtotal,
        savings: subtotal - total_to_pay,
        total_to_pay,
    }
}
