//! Order-draft API surface.
//!
//! The sync controller talks to storage through the [`DraftStore`] trait.
//! [`DraftsClient`] is the production implementation over the marketplace
//! REST API; [`InMemoryDraftStore`] backs the tests.

mod drafts;
mod memory;
mod store;
mod types;

pub use drafts::DraftsClient;
pub use memory::{InMemoryDraftStore, StoreCall};
pub use store::DraftStore;
pub use types::{Draft, DraftPayload};

use samovar_core::DraftId;

/// Errors from the order-draft API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response
    #[error("Parse error: {0}")]
    Parse(String),

    /// Draft does not exist on the server
    #[error("Draft not found: {0}")]
    NotFound(DraftId),

    /// No access credential held, request not attempted
    #[error("No access credential held")]
    MissingCredential,
}
