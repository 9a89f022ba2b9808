//! Core type definitions.
//!
//! Newtype wrappers that keep distinct concepts distinct at the type level:
//! entity IDs, validated phone numbers, and currency-aware prices.

pub mod id;
pub mod phone;
pub mod price;

pub use id::{DishId, DraftId};
pub use phone::{PhoneError, PhoneNumber};
pub use price::{CurrencyCode, Price};
