//! Pricing projection.
//!
//! Pure derivation of the displayed totals from the cart lines and the
//! delivery-type choice. Recomputed on every call and never stored, so
//! the numbers on screen cannot go stale.
//!
//! Delivery fees are flat constants; distance and time-window surcharges
//! belong to the seller-configuration collaborator, not this core.

use samovar_core::{CurrencyCode, Price};

use crate::cart::CartLine;
use crate::form::DeliveryType;

/// Flat courier fee for delivery to the apartment door, in rubles.
const TO_DOOR_FEE_RUB: i64 = 200;

/// Flat courier fee for delivery to the building entrance, in rubles.
const TO_ENTRANCE_FEE_RUB: i64 = 100;

/// Derived totals for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceBreakdown {
    /// Sum of all line subtotals.
    pub subtotal: Price,
    /// Flat fee for the chosen delivery type.
    pub delivery_fee: Price,
    /// Applied discount; zero until promo codes land.
    pub discount: Price,
    /// `subtotal + delivery_fee - discount`, floored at zero.
    pub total: Price,
}

/// The flat delivery fee for the given delivery type.
#[must_use]
pub fn delivery_fee(delivery_type: DeliveryType) -> Price {
    match delivery_type {
        DeliveryType::ToDoor => Price::from_major(TO_DOOR_FEE_RUB, CurrencyCode::Rub),
        DeliveryType::ToBuildingEntrance => {
            Price::from_major(TO_ENTRANCE_FEE_RUB, CurrencyCode::Rub)
        }
    }
}

/// Quote the current cart with no discount applied.
#[must_use]
pub fn quote(lines: &[CartLine], delivery_type: DeliveryType) -> PriceBreakdown {
    quote_with_discount(lines, delivery_type, Price::zero(CurrencyCode::Rub))
}

/// Quote the current cart with an explicit discount.
///
/// Extension point for promo codes; the base checkout always passes zero.
/// The total never goes below zero no matter how large the discount is.
#[must_use]
pub fn quote_with_discount(
    lines: &[CartLine],
    delivery_type: DeliveryType,
    discount: Price,
) -> PriceBreakdown {
    let subtotal = lines
        .iter()
        .fold(Price::zero(CurrencyCode::Rub), |acc, line| {
            acc + line.subtotal()
        });
    let delivery_fee = delivery_fee(delivery_type);
    let total = (subtotal + delivery_fee - discount).max_zero();

    PriceBreakdown {
        subtotal,
        delivery_fee,
        discount,
        total,
    }
}
