//! REST client for the order-drafts endpoint.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use reqwest::{header, Response, StatusCode};
use samovar_core::DraftId;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};
use url::Url;

use crate::config::CheckoutConfig;

use super::store::DraftStore;
use super::types::{Draft, DraftPayload};
use super::ApiError;

/// Path of the drafts collection under the API base URL.
const DRAFTS_PATH: &str = "api/v1/order-drafts";

/// Client for the marketplace order-drafts API.
///
/// Cheap to clone; all clones share the same HTTP pool and credential
/// slot. Requests carry `Authorization: Bearer <token>`; while no token
/// is held the store reports unavailable and mutating calls fail with
/// [`ApiError::MissingCredential`] without touching the network.
#[derive(Clone)]
pub struct DraftsClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    base_url: Url,
    credential: RwLock<Option<SecretString>>,
}

impl DraftsClient {
    /// Create a client against the given API base URL with no credential.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                http: reqwest::Client::new(),
                base_url,
                credential: RwLock::new(None),
            }),
        }
    }

    /// Create a client from the checkout configuration.
    #[must_use]
    pub fn from_config(config: &CheckoutConfig) -> Self {
        let client = Self::new(config.api_base_url.clone());
        if let Some(token) = &config.access_token {
            client.set_credential(token.clone());
        }
        client
    }

    /// Install or replace the bearer token.
    pub fn set_credential(&self, token: SecretString) {
        if let Ok(mut slot) = self.inner.credential.write() {
            *slot = Some(token);
        }
    }

    /// Drop the bearer token, e.g. on sign-out.
    pub fn clear_credential(&self) {
        if let Ok(mut slot) = self.inner.credential.write() {
            *slot = None;
        }
    }

    fn has_credential(&self) -> bool {
        self.inner
            .credential
            .read()
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }

    fn bearer(&self) -> Result<String, ApiError> {
        self.inner
            .credential
            .read()
            .ok()
            .and_then(|slot| {
                slot.as_ref()
                    .map(|token| format!("Bearer {}", token.expose_secret()))
            })
            .ok_or(ApiError::MissingCredential)
    }

    fn drafts_url(&self) -> String {
        let base = self.inner.base_url.as_str().trim_end_matches('/');
        format!("{base}/{DRAFTS_PATH}")
    }

    fn draft_url(&self, id: DraftId) -> String {
        format!("{}/{id}", self.drafts_url())
    }

    async fn parse_draft(response: Response) -> Result<Draft, ApiError> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Api { status, message });
        }

        response
            .json::<Draft>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[async_trait]
impl DraftStore for DraftsClient {
    async fn available(&self) -> bool {
        self.has_credential()
    }

    #[instrument(skip(self, payload))]
    async fn create(&self, payload: &DraftPayload) -> Result<Draft, ApiError> {
        debug!("Creating order draft");

        let bearer = self.bearer()?;
        let response = self
            .inner
            .http
            .post(self.drafts_url())
            .header(header::AUTHORIZATION, bearer)
            .json(payload)
            .send()
            .await?;

        Self::parse_draft(response).await
    }

    #[instrument(skip(self))]
    async fn get(&self, id: DraftId) -> Result<Draft, ApiError> {
        debug!(draft_id = %id, "Fetching order draft");

        let bearer = self.bearer()?;
        let response = self
            .inner
            .http
            .get(self.draft_url(id))
            .header(header::AUTHORIZATION, bearer)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(id));
        }
        Self::parse_draft(response).await
    }

    #[instrument(skip(self, payload))]
    async fn update(&self, id: DraftId, payload: &DraftPayload) -> Result<Draft, ApiError> {
        debug!(draft_id = %id, "Updating order draft");

        let bearer = self.bearer()?;
        let response = self
            .inner
            .http
            .patch(self.draft_url(id))
            .header(header::AUTHORIZATION, bearer)
            .json(payload)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(id));
        }
        Self::parse_draft(response).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: DraftId) -> Result<(), ApiError> {
        debug!(draft_id = %id, "Deleting order draft");

        let bearer = self.bearer()?;
        let response = self
            .inner
            .http
            .delete(self.draft_url(id))
            .header(header::AUTHORIZATION, bearer)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(id));
        }
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Api { status, message });
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Draft>, ApiError> {
        debug!("Listing order drafts");

        let bearer = self.bearer()?;
        let response = self
            .inner
            .http
            .get(self.drafts_url())
            .header(header::AUTHORIZATION, bearer)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Api { status, message });
        }

        response
            .json::<Vec<Draft>>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use samovar_core::{CurrencyCode, DishId, Price};

    use crate::form::{DeliveryType, PaymentMethod};

    use super::*;

    fn client() -> DraftsClient {
        DraftsClient::new(Url::parse("https://api.samovar.example").unwrap())
    }

    fn sample_payload() -> DraftPayload {
        DraftPayload {
            dish_id: DishId::new(1),
            quantity: 1,
            contact_name: "Anna".to_string(),
            contact_phone: "+79123456789".to_string(),
            address: "Tverskaya 1".to_string(),
            delivery_type: DeliveryType::ToDoor,
            apartment: String::new(),
            floor: String::new(),
            entrance: String::new(),
            intercom_code: String::new(),
            comment: String::new(),
            payment_method: PaymentMethod::Card,
            delivery_price: Price::from_major(200, CurrencyCode::Rub),
        }
    }

    #[test]
    fn test_urls_ignore_trailing_slash() {
        let client = client();
        assert_eq!(
            client.drafts_url(),
            "https://api.samovar.example/api/v1/order-drafts"
        );

        let id = DraftId::new();
        assert_eq!(
            client.draft_url(id),
            format!("https://api.samovar.example/api/v1/order-drafts/{id}")
        );
    }

    #[tokio::test]
    async fn test_available_tracks_credential() {
        let client = client();
        assert!(!client.available().await);

        client.set_credential(SecretString::from("token-1"));
        assert!(client.available().await);

        client.clear_credential();
        assert!(!client.available().await);
    }

    #[tokio::test]
    async fn test_requests_without_credential_fail_fast() {
        // No credential means no request is attempted, so this cannot
        // hit the network even with an unreachable base URL.
        let client = client();
        let err = client.create(&sample_payload()).await.unwrap_err();
        assert!(matches!(err, ApiError::MissingCredential));

        let err = client.delete(DraftId::new()).await.unwrap_err();
        assert!(matches!(err, ApiError::MissingCredential));
    }
}
