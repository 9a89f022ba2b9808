//! Integration tests for the Samovar checkout.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p samovar-integration-tests
//! ```
//!
//! Everything runs against [`InMemoryDraftStore`] with tokio's paused
//! clock, so no server, credentials, or wall-clock waiting is involved.
//!
//! # Test Categories
//!
//! - `checkout_flow` - full wizard journeys from cart to placed order
//! - `draft_sync` - draft persistence across edits, failures, and restarts
//!
//! [`InMemoryDraftStore`]: samovar_checkout::api::InMemoryDraftStore
