//! Cart line items.
//!
//! The cart is owned by an external collaborator and read-only to the
//! checkout core. It is keyed by dish, so the dish id doubles as the
//! line id.

use samovar_core::{DishId, Price};
use serde::{Deserialize, Serialize};

/// A single line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// The dish this line refers to.
    pub dish_id: DishId,
    /// Price per unit.
    pub unit_price: Price,
    /// Units ordered; the cart collaborator guarantees this is positive.
    pub quantity: u32,
}

impl CartLine {
    /// Create a new cart line.
    #[must_use]
    pub const fn new(dish_id: DishId, unit_price: Price, quantity: u32) -> Self {
        Self {
            dish_id,
            unit_price,
            quantity,
        }
    }

    /// The line subtotal (unit price times quantity).
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.unit_price.mul_quantity(self.quantity)
    }
}
