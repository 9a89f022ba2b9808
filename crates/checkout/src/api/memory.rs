//! In-memory draft store for tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use samovar_core::DraftId;
use tokio::sync::Mutex;

use super::store::DraftStore;
use super::types::{Draft, DraftPayload};
use super::ApiError;

/// One recorded store operation, in call order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreCall {
    Create,
    Get,
    Update,
    Delete,
    List,
}

#[derive(Debug, Default)]
struct MemoryState {
    drafts: HashMap<DraftId, Draft>,
    calls: Vec<StoreCall>,
    fail_on_create: bool,
    fail_on_update: bool,
    available: bool,
    latency: Option<Duration>,
}

/// [`DraftStore`] backed by a `HashMap`, with failure and latency knobs.
///
/// Records every call so tests can assert not just on end state but on
/// how many round trips the sync controller actually made.
#[derive(Debug, Clone)]
pub struct InMemoryDraftStore {
    state: Arc<Mutex<MemoryState>>,
}

impl Default for InMemoryDraftStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDraftStore {
    /// An empty, available store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MemoryState {
                available: true,
                ..MemoryState::default()
            })),
        }
    }

    /// Toggle what [`DraftStore::available`] reports.
    pub async fn set_available(&self, available: bool) {
        self.state.lock().await.available = available;
    }

    /// Make every subsequent create fail until switched back off.
    pub async fn set_fail_on_create(&self, fail: bool) {
        self.state.lock().await.fail_on_create = fail;
    }

    /// Make every subsequent update fail until switched back off.
    pub async fn set_fail_on_update(&self, fail: bool) {
        self.state.lock().await.fail_on_update = fail;
    }

    /// Delay every operation by this much before it takes effect.
    pub async fn set_latency(&self, latency: Duration) {
        self.state.lock().await.latency = Some(latency);
    }

    /// Every operation recorded so far, in order.
    pub async fn calls(&self) -> Vec<StoreCall> {
        self.state.lock().await.calls.clone()
    }

    /// Forget the recorded operations, keeping the drafts.
    pub async fn clear_calls(&self) {
        self.state.lock().await.calls.clear();
    }

    /// Number of drafts currently held.
    pub async fn draft_count(&self) -> usize {
        self.state.lock().await.drafts.len()
    }

    /// Fetch one draft without recording a call.
    pub async fn draft(&self, id: DraftId) -> Option<Draft> {
        self.state.lock().await.drafts.get(&id).cloned()
    }

    /// Seed a draft directly, bypassing the call log.
    pub async fn insert(&self, draft: Draft) {
        self.state.lock().await.drafts.insert(draft.id, draft);
    }

    async fn delay(&self) {
        let latency = self.state.lock().await.latency;
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl DraftStore for InMemoryDraftStore {
    async fn available(&self) -> bool {
        self.state.lock().await.available
    }

    async fn create(&self, payload: &DraftPayload) -> Result<Draft, ApiError> {
        self.delay().await;
        let mut state = self.state.lock().await;
        state.calls.push(StoreCall::Create);

        if state.fail_on_create {
            return Err(ApiError::Api {
                status: 500,
                message: "injected create failure".to_string(),
            });
        }

        let now = Utc::now();
        let draft = payload.clone().into_draft(DraftId::new(), now, now);
        state.drafts.insert(draft.id, draft.clone());
        Ok(draft)
    }

    async fn get(&self, id: DraftId) -> Result<Draft, ApiError> {
        self.delay().await;
        let mut state = self.state.lock().await;
        state.calls.push(StoreCall::Get);

        state.drafts.get(&id).cloned().ok_or(ApiError::NotFound(id))
    }

    async fn update(&self, id: DraftId, payload: &DraftPayload) -> Result<Draft, ApiError> {
        self.delay().await;
        let mut state = self.state.lock().await;
        state.calls.push(StoreCall::Update);

        if state.fail_on_update {
            return Err(ApiError::Api {
                status: 500,
                message: "injected update failure".to_string(),
            });
        }

        let created_at = state
            .drafts
            .get(&id)
            .map(|existing| existing.created_at)
            .ok_or(ApiError::NotFound(id))?;
        let draft = payload.clone().into_draft(id, created_at, Utc::now());
        state.drafts.insert(id, draft.clone());
        Ok(draft)
    }

    async fn delete(&self, id: DraftId) -> Result<(), ApiError> {
        self.delay().await;
        let mut state = self.state.lock().await;
        state.calls.push(StoreCall::Delete);

        state
            .drafts
            .remove(&id)
            .map(|_| ())
            .ok_or(ApiError::NotFound(id))
    }

    async fn list(&self) -> Result<Vec<Draft>, ApiError> {
        self.delay().await;
        let mut state = self.state.lock().await;
        state.calls.push(StoreCall::List);

        Ok(state.drafts.values().cloned().collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use samovar_core::{CurrencyCode, DishId, Price};

    use crate::form::{DeliveryType, PaymentMethod};

    use super::*;

    fn payload(contact_name: &str) -> DraftPayload {
        DraftPayload {
            dish_id: DishId::new(7),
            quantity: 2,
            contact_name: contact_name.to_string(),
            contact_phone: "+79123456789".to_string(),
            address: "Tverskaya 1".to_string(),
            delivery_type: DeliveryType::ToDoor,
            apartment: "12".to_string(),
            floor: String::new(),
            entrance: String::new(),
            intercom_code: String::new(),
            comment: String::new(),
            payment_method: PaymentMethod::Card,
            delivery_price: Price::from_major(200, CurrencyCode::Rub),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_stores() {
        let store = InMemoryDraftStore::new();
        let draft = store.create(&payload("Anna")).await.unwrap();

        assert_eq!(store.draft_count().await, 1);
        assert_eq!(store.draft(draft.id).await.unwrap().contact_name, "Anna");
        assert_eq!(store.calls().await, vec![StoreCall::Create]);
    }

    #[tokio::test]
    async fn test_update_keeps_identity() {
        let store = InMemoryDraftStore::new();
        let created = store.create(&payload("Anna")).await.unwrap();

        let updated = store.update(created.id, &payload("Boris")).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.contact_name, "Boris");
        assert_eq!(store.draft_count().await, 1);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let store = InMemoryDraftStore::new();
        let id = DraftId::new();
        let err = store.update(id, &payload("Anna")).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(missing) if missing == id));
    }

    #[tokio::test]
    async fn test_injected_create_failure() {
        let store = InMemoryDraftStore::new();
        store.set_fail_on_create(true).await;

        let err = store.create(&payload("Anna")).await.unwrap_err();
        assert!(matches!(err, ApiError::Api { status: 500, .. }));
        assert_eq!(store.draft_count().await, 0);
        assert_eq!(store.calls().await, vec![StoreCall::Create]);
    }

    #[tokio::test]
    async fn test_delete_then_delete_again() {
        let store = InMemoryDraftStore::new();
        let draft = store.create(&payload("Anna")).await.unwrap();

        store.delete(draft.id).await.unwrap();
        assert_eq!(store.draft_count().await, 0);

        let err = store.delete(draft.id).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_returns_everything() {
        let store = InMemoryDraftStore::new();
        store.create(&payload("Anna")).await.unwrap();
        store.create(&payload("Boris")).await.unwrap();

        let drafts = store.list().await.unwrap();
        assert_eq!(drafts.len(), 2);
    }

    #[tokio::test]
    async fn test_availability_toggle() {
        let store = InMemoryDraftStore::new();
        assert!(store.available().await);

        store.set_available(false).await;
        assert!(!store.available().await);
    }
}
