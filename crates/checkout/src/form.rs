//! Checkout form model.
//!
//! The mutable field aggregate behind the checkout screens. The step
//! machine reads it through the per-step gates, the sync controller reads
//! it as a snapshot, and the local mirror persists it wholesale.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::steps::CheckoutStep;

/// How the courier hands the order over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryType {
    /// Meet the courier at the building entrance.
    #[default]
    ToBuildingEntrance,
    /// Delivery up to the apartment door.
    ToDoor,
}

/// Payment method offered at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// Bank card.
    #[default]
    Card,
    /// Instant transfer over the national faster-payments rails.
    FastPaymentSystem,
}

/// A form field referenced by validation errors, for inline rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    ContactName,
    ContactPhone,
    DeliveryAddress,
    TermsAccepted,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ContactName => "contact name",
            Self::ContactPhone => "contact phone",
            Self::DeliveryAddress => "delivery address",
            Self::TermsAccepted => "terms acceptance",
        };
        write!(f, "{label}")
    }
}

/// The checkout form aggregate.
///
/// Created with defaults at checkout start, mutated field by field by user
/// input, and only ever [`reset`](Self::reset) when checkout completes or
/// is abandoned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckoutFormState {
    pub contact_name: String,
    /// Free-form phone input; normalized to E.164 when the draft payload
    /// is built, never rejected here.
    pub contact_phone: String,
    pub delivery_address: String,
    pub delivery_type: DeliveryType,
    pub apartment: String,
    pub floor: String,
    pub entrance: String,
    pub intercom_code: String,
    pub comment: String,
    pub payment_method: PaymentMethod,
    pub terms_accepted: bool,
}

impl CheckoutFormState {
    /// Fields still blank for the given step's gate.
    ///
    /// Blank means empty after trimming whitespace. An empty result means
    /// the gate is open.
    #[must_use]
    pub fn missing_fields(&self, step: CheckoutStep) -> Vec<FormField> {
        match step {
            CheckoutStep::Delivery => {
                let mut missing = Vec::new();
                if is_blank(&self.contact_name) {
                    missing.push(FormField::ContactName);
                }
                if is_blank(&self.contact_phone) {
                    missing.push(FormField::ContactPhone);
                }
                if is_blank(&self.delivery_address) {
                    missing.push(FormField::DeliveryAddress);
                }
                missing
            }
            // The payment method always has a default, so this gate is open.
            CheckoutStep::Payment => Vec::new(),
            CheckoutStep::Review => {
                if self.terms_accepted {
                    Vec::new()
                } else {
                    vec![FormField::TermsAccepted]
                }
            }
        }
    }

    /// Reset every field to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
