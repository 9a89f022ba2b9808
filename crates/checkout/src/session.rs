//! Checkout session facade.
//!
//! [`CheckoutSession`] is the one object the presentation layer holds:
//! it owns the form, the step machine, the cart lines, the sync handle
//! and the local form mirror, and keeps them consistent. Every field
//! setter mirrors the form to disk and hands the sync controller an
//! up-to-date draft snapshot; step navigation goes through the step
//! machine's gates and nothing else mutates step state.

use std::sync::Arc;

use samovar_core::DraftId;
use tracing::debug;

use crate::api::{Draft, DraftPayload, DraftStore, DraftsClient};
use crate::cart::CartLine;
use crate::config::CheckoutConfig;
use crate::error::Result;
use crate::form::{CheckoutFormState, DeliveryType, PaymentMethod};
use crate::pricing::{self, PriceBreakdown};
use crate::steps::{Advance, CheckoutStep, StepMachine};
use crate::storage::FormMirror;
use crate::sync::{DraftSync, SyncOptions};

/// A live checkout: form, steps, cart and draft sync under one roof.
pub struct CheckoutSession {
    form: CheckoutFormState,
    steps: StepMachine,
    cart: Vec<CartLine>,
    store: Arc<dyn DraftStore>,
    sync: DraftSync,
    mirror: FormMirror,
}

impl CheckoutSession {
    /// Start a session against the given store.
    ///
    /// The form comes back from the mirror when a previous session left
    /// one behind; otherwise it starts blank.
    #[must_use]
    pub fn new(store: Arc<dyn DraftStore>, mirror: FormMirror, options: SyncOptions) -> Self {
        let form = mirror.load().unwrap_or_default();
        let sync = DraftSync::spawn(Arc::clone(&store), options);

        Self {
            form,
            steps: StepMachine::new(),
            cart: Vec::new(),
            store,
            sync,
            mirror,
        }
    }

    /// Start a session wired up from the environment configuration.
    #[must_use]
    pub fn from_config(config: &CheckoutConfig) -> Self {
        let client = DraftsClient::from_config(config);
        let mirror = FormMirror::new(config.form_cache_path.clone());
        Self::new(Arc::new(client), mirror, config.sync_options())
    }

    // ===== Read Side =====

    /// The current form state.
    #[must_use]
    pub const fn form(&self) -> &CheckoutFormState {
        &self.form
    }

    /// The step the user is on.
    #[must_use]
    pub const fn current_step(&self) -> CheckoutStep {
        self.steps.current()
    }

    /// Whether the given step's gate has already passed.
    #[must_use]
    pub fn is_step_completed(&self, step: CheckoutStep) -> bool {
        self.steps.is_completed(step)
    }

    /// The cart lines this checkout is for.
    #[must_use]
    pub fn cart(&self) -> &[CartLine] {
        &self.cart
    }

    /// Recompute the price breakdown for the current cart and form.
    #[must_use]
    pub fn totals(&self) -> PriceBreakdown {
        pricing::quote(&self.cart, self.form.delivery_type)
    }

    /// The server draft id currently held, if any.
    pub async fn draft_id(&self) -> Option<DraftId> {
        self.sync.draft_id().await
    }

    // ===== Cart and Form Edits =====

    /// Replace the cart lines this checkout is for.
    pub fn set_cart(&mut self, cart: Vec<CartLine>) {
        self.cart = cart;
        self.after_change();
    }

    pub fn set_contact_name(&mut self, value: impl Into<String>) {
        self.form.contact_name = value.into();
        self.after_change();
    }

    pub fn set_contact_phone(&mut self, value: impl Into<String>) {
        self.form.contact_phone = value.into();
        self.after_change();
    }

    pub fn set_delivery_address(&mut self, value: impl Into<String>) {
        self.form.delivery_address = value.into();
        self.after_change();
    }

    pub fn set_delivery_type(&mut self, value: DeliveryType) {
        self.form.delivery_type = value;
        self.after_change();
    }

    pub fn set_apartment(&mut self, value: impl Into<String>) {
        self.form.apartment = value.into();
        self.after_change();
    }

    pub fn set_floor(&mut self, value: impl Into<String>) {
        self.form.floor = value.into();
        self.after_change();
    }

    pub fn set_entrance(&mut self, value: impl Into<String>) {
        self.form.entrance = value.into();
        self.after_change();
    }

    pub fn set_intercom_code(&mut self, value: impl Into<String>) {
        self.form.intercom_code = value.into();
        self.after_change();
    }

    pub fn set_comment(&mut self, value: impl Into<String>) {
        self.form.comment = value.into();
        self.after_change();
    }

    pub fn set_payment_method(&mut self, value: PaymentMethod) {
        self.form.payment_method = value;
        self.after_change();
    }

    pub fn set_terms_accepted(&mut self, value: bool) {
        self.form.terms_accepted = value;
        self.after_change();
    }

    // ===== Step Navigation =====

    /// Validate the current step and move forward.
    ///
    /// From review a success means the order may be placed.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Validation`](crate::error::CheckoutError)
    /// with the blank fields when the current step's gate rejects.
    pub fn advance(&mut self) -> Result<Advance> {
        let outcome = self.steps.advance(&self.form)?;
        debug!(step = %self.steps.current(), "checkout advanced");
        Ok(outcome)
    }

    /// Go back one step. No-op at the first step.
    pub fn retreat(&mut self) -> bool {
        self.steps.retreat()
    }

    /// Jump to a completed step or the immediate next one.
    pub fn jump_to(&mut self, step: CheckoutStep) -> bool {
        self.steps.jump_to(step)
    }

    // ===== Draft Lifecycle =====

    /// Adjust the sync behavior of this session.
    pub fn configure_sync(&self, options: SyncOptions) {
        self.sync.configure(options);
    }

    /// Push the final draft before handing off to order placement.
    ///
    /// Returns the draft id the order can reference, when a draft made
    /// it to the server.
    pub async fn prepare_submit(&self) -> Option<DraftId> {
        self.sync.flush_now().await;
        self.sync.draft_id().await
    }

    /// Finish checkout after the order was placed.
    ///
    /// Placement supersedes the draft server-side, so only local state
    /// is dropped; no delete call is made.
    pub async fn complete(&mut self) {
        self.sync.detach().await;
        self.reset_local();
    }

    /// Throw the checkout away, deleting the server draft if one exists.
    pub async fn abandon(&mut self) {
        self.sync.discard().await;
        self.reset_local();
    }

    /// Continue editing a previously saved draft.
    ///
    /// Refills the form from the draft and routes subsequent flushes to
    /// its id. The cart is left alone; line contents come from the live
    /// cart, not the draft.
    pub fn resume(&mut self, draft: &Draft) {
        self.form = draft.form_state();
        self.steps = StepMachine::new();
        self.sync.adopt(draft.id);
        self.mirror.save(&self.form);
    }

    /// Resume the most recently updated draft on the server, if any.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the draft listing fails.
    pub async fn resume_latest(&mut self) -> Result<Option<DraftId>> {
        if !self.store.available().await {
            return Ok(None);
        }

        let mut drafts = self.store.list().await?;
        drafts.sort_by_key(|draft| draft.updated_at);
        let Some(latest) = drafts.pop() else {
            return Ok(None);
        };

        self.resume(&latest);
        Ok(Some(latest.id))
    }

    // ===== Internals =====

    fn after_change(&mut self) {
        self.mirror.save(&self.form);
        match self.snapshot() {
            Some(payload) => self.sync.observe(payload),
            // Nothing left to draft; drop whatever was about to flush.
            None => self.sync.cancel_pending(),
        }
    }

    /// The draft snapshot for the current state, once there is anything
    /// worth drafting. An empty cart means no snapshot and no sync.
    fn snapshot(&self) -> Option<DraftPayload> {
        let line = self.cart.first()?;
        let delivery_price = pricing::delivery_fee(self.form.delivery_type);
        Some(DraftPayload::from_form(&self.form, line, delivery_price))
    }

    fn reset_local(&mut self) {
        self.mirror.clear();
        self.form.reset();
        self.steps = StepMachine::new();
        self.cart.clear();
    }
}
