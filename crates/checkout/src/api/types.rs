//! Order-draft wire types.

use chrono::{DateTime, Utc};
use samovar_core::{DishId, DraftId, PhoneNumber, Price};
use serde::{Deserialize, Serialize};

use crate::cart::CartLine;
use crate::form::{CheckoutFormState, DeliveryType, PaymentMethod};

/// A persisted order draft as the server returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub id: DraftId,
    pub dish_id: DishId,
    pub quantity: u32,
    pub contact_name: String,
    pub contact_phone: String,
    pub address: String,
    pub delivery_type: DeliveryType,
    pub apartment: String,
    pub floor: String,
    pub entrance: String,
    pub intercom_code: String,
    pub comment: String,
    pub payment_method: PaymentMethod,
    pub delivery_price: Price,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The client-assembled draft body sent on create and update.
///
/// Identical to [`Draft`] minus the fields the server owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftPayload {
    pub dish_id: DishId,
    pub quantity: u32,
    pub contact_name: String,
    pub contact_phone: String,
    pub address: String,
    pub delivery_type: DeliveryType,
    pub apartment: String,
    pub floor: String,
    pub entrance: String,
    pub intercom_code: String,
    pub comment: String,
    pub payment_method: PaymentMethod,
    pub delivery_price: Price,
}

impl DraftPayload {
    /// Assemble a payload from the live form and the dominant cart line.
    ///
    /// The phone is normalized to E.164 when it parses; otherwise the raw
    /// text goes out as typed so a half-entered number is not lost.
    #[must_use]
    pub fn from_form(form: &CheckoutFormState, line: &CartLine, delivery_price: Price) -> Self {
        let contact_phone = PhoneNumber::parse(&form.contact_phone)
            .map_or_else(|_| form.contact_phone.clone(), PhoneNumber::into_inner);

        Self {
            dish_id: line.dish_id,
            quantity: line.quantity,
            contact_name: form.contact_name.clone(),
            contact_phone,
            address: form.delivery_address.clone(),
            delivery_type: form.delivery_type,
            apartment: form.apartment.clone(),
            floor: form.floor.clone(),
            entrance: form.entrance.clone(),
            intercom_code: form.intercom_code.clone(),
            comment: form.comment.clone(),
            payment_method: form.payment_method,
            delivery_price,
        }
    }

    /// Promote the payload to a full [`Draft`] with server-owned fields.
    #[must_use]
    pub fn into_draft(self, id: DraftId, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Draft {
        Draft {
            id,
            dish_id: self.dish_id,
            quantity: self.quantity,
            contact_name: self.contact_name,
            contact_phone: self.contact_phone,
            address: self.address,
            delivery_type: self.delivery_type,
            apartment: self.apartment,
            floor: self.floor,
            entrance: self.entrance,
            intercom_code: self.intercom_code,
            comment: self.comment,
            payment_method: self.payment_method,
            delivery_price: self.delivery_price,
            created_at,
            updated_at,
        }
    }
}

impl Draft {
    /// Re-hydrate the editable form fields from a stored draft.
    ///
    /// Terms acceptance is a per-session attestation and always comes
    /// back unchecked.
    #[must_use]
    pub fn form_state(&self) -> CheckoutFormState {
        CheckoutFormState {
            contact_name: self.contact_name.clone(),
            contact_phone: self.contact_phone.clone(),
            delivery_address: self.address.clone(),
            apartment: self.apartment.clone(),
            floor: self.floor.clone(),
            entrance: self.entrance.clone(),
            intercom_code: self.intercom_code.clone(),
            comment: self.comment.clone(),
            delivery_type: self.delivery_type,
            payment_method: self.payment_method,
            terms_accepted: false,
        }
    }
}
