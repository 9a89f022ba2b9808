//! Storage port for order drafts.

use async_trait::async_trait;
use samovar_core::DraftId;

use super::types::{Draft, DraftPayload};
use super::ApiError;

/// Where order drafts live.
///
/// The sync controller and session only ever see this trait, so the
/// REST client can be swapped for a test double without touching them.
#[async_trait]
pub trait DraftStore: Send + Sync {
    /// Whether the store can currently accept requests.
    ///
    /// `false` means flushes are skipped, not failed; the draft stays
    /// local until a later cycle finds the store reachable.
    async fn available(&self) -> bool;

    /// Persist a new draft and return it with server-owned fields set.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft could not be stored.
    async fn create(&self, payload: &DraftPayload) -> Result<Draft, ApiError>;

    /// Fetch one draft by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if no draft has that id.
    async fn get(&self, id: DraftId) -> Result<Draft, ApiError>;

    /// Overwrite an existing draft with the latest payload.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if no draft has that id.
    async fn update(&self, id: DraftId, payload: &DraftPayload) -> Result<Draft, ApiError>;

    /// Delete one draft by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if no draft has that id.
    async fn delete(&self, id: DraftId) -> Result<(), ApiError>;

    /// All drafts belonging to the current caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing request failed.
    async fn list(&self) -> Result<Vec<Draft>, ApiError>;
}
