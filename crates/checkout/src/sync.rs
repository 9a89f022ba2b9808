//! Debounced order-draft synchronization.
//!
//! [`DraftSync`] owns the create-vs-update lifecycle of the server-side
//! draft. Form edits are reported with [`DraftSync::observe`]; each one
//! restarts a quiet-period countdown, and only when the user stops
//! editing does a single flush go out carrying the latest snapshot.
//!
//! Flushes are serialized. While one is in flight, newer snapshots and
//! explicit flush requests collapse into at most one follow-up flush,
//! which runs immediately after the active one settles.
//!
//! The controller runs as a spawned task; [`DraftSync`] is a cheap
//! cloneable handle over a command channel, so the session can report
//! edits from synchronous code without blocking.

use std::sync::Arc;
use std::time::Duration;

use samovar_core::DraftId;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{self, Instant};
use tracing::{debug, warn};

use crate::api::{DraftPayload, DraftStore};

/// How long edits must stay quiet before an automatic flush.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(2000);

/// Tunables for the sync controller.
#[derive(Debug, Clone, Copy)]
pub struct SyncOptions {
    /// Whether observed edits schedule automatic flushes.
    pub auto_save: bool,
    /// Quiet period between the last edit and the automatic flush.
    pub quiet_period: Duration,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            auto_save: true,
            quiet_period: DEFAULT_QUIET_PERIOD,
        }
    }
}

enum Command {
    Configure(SyncOptions),
    Observe(Box<DraftPayload>),
    CancelPending,
    FlushNow(oneshot::Sender<()>),
    Adopt(DraftId),
    Discard(oneshot::Sender<()>),
    Detach(oneshot::Sender<()>),
    DraftId(oneshot::Sender<Option<DraftId>>),
}

/// Handle to the draft sync task.
///
/// All clones talk to the same task. Dropping every clone closes the
/// channel and the task winds down after the flush in progress.
#[derive(Debug, Clone)]
pub struct DraftSync {
    tx: mpsc::UnboundedSender<Command>,
}

impl DraftSync {
    /// Spawn the sync task against the given store.
    #[must_use]
    pub fn spawn(store: Arc<dyn DraftStore>, options: SyncOptions) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let actor = SyncActor {
            store,
            options,
            rx,
            pending: None,
            deadline: None,
            draft_id: None,
        };
        tokio::spawn(actor.run());
        Self { tx }
    }

    /// Replace the sync options.
    ///
    /// Disabling auto-save cancels any armed countdown. Enabling it does
    /// not arm one; the next observed edit does. A changed quiet period
    /// also applies from the next observed edit.
    pub fn configure(&self, options: SyncOptions) {
        let _ = self.tx.send(Command::Configure(options));
    }

    /// Report the latest draft snapshot.
    ///
    /// Supersedes any previously observed snapshot and, with auto-save
    /// on, restarts the quiet-period countdown.
    pub fn observe(&self, payload: DraftPayload) {
        let _ = self.tx.send(Command::Observe(Box::new(payload)));
    }

    /// Drop the pending snapshot and stop any armed countdown.
    ///
    /// The held draft id survives; a later edit resumes updating the
    /// same draft. Used when the state being drafted goes away, for
    /// example when the cart is emptied mid-checkout.
    pub fn cancel_pending(&self) {
        let _ = self.tx.send(Command::CancelPending);
    }

    /// Route subsequent flushes to an existing server draft.
    pub fn adopt(&self, id: DraftId) {
        let _ = self.tx.send(Command::Adopt(id));
    }

    /// Flush the latest snapshot now, regardless of auto-save.
    ///
    /// Cancels the countdown. Resolves once the flush, and any follow-up
    /// that queued behind it, has settled. A no-op when nothing has been
    /// observed yet.
    pub async fn flush_now(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send(Command::FlushNow(ack_tx)).is_ok() {
            let _ = ack_rx.await;
        }
    }

    /// Delete the server draft, if one exists, and reset all sync state.
    pub async fn discard(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send(Command::Discard(ack_tx)).is_ok() {
            let _ = ack_rx.await;
        }
    }

    /// Forget the held draft id and pending snapshot without touching
    /// the server. The next flush starts a fresh draft.
    pub async fn detach(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send(Command::Detach(ack_tx)).is_ok() {
            let _ = ack_rx.await;
        }
    }

    /// The server draft id currently held, if any.
    pub async fn draft_id(&self) -> Option<DraftId> {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send(Command::DraftId(ack_tx)).is_err() {
            return None;
        }
        ack_rx.await.ok().flatten()
    }
}

struct SyncActor {
    store: Arc<dyn DraftStore>,
    options: SyncOptions,
    rx: mpsc::UnboundedReceiver<Command>,
    /// Latest observed snapshot. Kept after flushes so an explicit flush
    /// or a retry always has the last known state to send.
    pending: Option<DraftPayload>,
    /// When the quiet period ends, while a countdown is armed.
    deadline: Option<Instant>,
    /// Server draft the controller owns. Only ever set from a create
    /// response or an explicit adopt.
    draft_id: Option<DraftId>,
}

impl SyncActor {
    async fn run(mut self) {
        loop {
            let command = if let Some(deadline) = self.deadline {
                tokio::select! {
                    command = self.rx.recv() => command,
                    () = time::sleep_until(deadline) => {
                        self.deadline = None;
                        self.flush_cycle(Vec::new()).await;
                        continue;
                    }
                }
            } else {
                self.rx.recv().await
            };

            let Some(command) = command else { break };
            self.handle(command).await;
        }
    }

    async fn handle(&mut self, command: Command) {
        match command {
            Command::Configure(options) => self.configure(options),
            Command::Observe(payload) => self.observe(*payload),
            Command::CancelPending => self.cancel_pending(),
            Command::Adopt(id) => self.draft_id = Some(id),
            Command::DraftId(ack) => {
                let _ = ack.send(self.draft_id);
            }
            Command::FlushNow(ack) => {
                self.deadline = None;
                self.flush_cycle(vec![ack]).await;
            }
            Command::Discard(ack) => {
                self.discard().await;
                let _ = ack.send(());
            }
            Command::Detach(ack) => {
                self.detach();
                let _ = ack.send(());
            }
        }
    }

    fn configure(&mut self, options: SyncOptions) {
        self.options = options;
        if !self.options.auto_save {
            self.deadline = None;
        }
    }

    fn observe(&mut self, payload: DraftPayload) {
        self.pending = Some(payload);
        if self.options.auto_save {
            self.deadline = Some(Instant::now() + self.options.quiet_period);
        }
    }

    fn cancel_pending(&mut self) {
        self.pending = None;
        self.deadline = None;
    }

    fn detach(&mut self) {
        self.draft_id = None;
        self.pending = None;
        self.deadline = None;
    }

    async fn discard(&mut self) {
        if let Some(id) = self.draft_id.take() {
            if self.store.available().await {
                if let Err(error) = self.store.delete(id).await {
                    warn!(draft_id = %id, %error, "failed to delete order draft");
                }
            }
        }
        self.pending = None;
        self.deadline = None;
    }

    /// One flush plus everything that queued behind it.
    ///
    /// Commands that arrive while the flush is in flight are drained
    /// afterwards; newer snapshots and flush requests collapse into a
    /// single immediate follow-up flush instead of a fresh countdown.
    /// Acks resolve only once the follow-up has settled too.
    async fn flush_cycle(&mut self, mut acks: Vec<oneshot::Sender<()>>) {
        self.flush_latest().await;

        let mut follow_up = false;
        while let Ok(command) = self.rx.try_recv() {
            match command {
                Command::Observe(payload) => {
                    self.pending = Some(*payload);
                    if self.options.auto_save {
                        follow_up = true;
                    }
                }
                Command::CancelPending => {
                    self.cancel_pending();
                    follow_up = false;
                }
                Command::FlushNow(ack) => {
                    acks.push(ack);
                    follow_up = true;
                }
                Command::Configure(options) => self.configure(options),
                Command::Adopt(id) => self.draft_id = Some(id),
                Command::DraftId(ack) => {
                    let _ = ack.send(self.draft_id);
                }
                Command::Discard(ack) => {
                    self.discard().await;
                    let _ = ack.send(());
                }
                Command::Detach(ack) => {
                    self.detach();
                    let _ = ack.send(());
                }
            }
        }

        if follow_up {
            self.flush_latest().await;
        }

        for ack in acks {
            let _ = ack.send(());
        }
    }

    /// Send the latest snapshot to the store.
    ///
    /// Creates when no draft id is held, updates when one is. Failures
    /// are logged and swallowed; the snapshot stays pending so the next
    /// cycle retries. An unavailable store skips the flush entirely.
    async fn flush_latest(&mut self) {
        let Some(payload) = self.pending.clone() else {
            return;
        };

        if !self.store.available().await {
            debug!("draft store unavailable, keeping draft local");
            return;
        }

        match self.draft_id {
            Some(id) => {
                if let Err(error) = self.store.update(id, &payload).await {
                    warn!(draft_id = %id, %error, "failed to update order draft");
                }
            }
            None => match self.store.create(&payload).await {
                Ok(draft) => {
                    debug!(draft_id = %draft.id, "created order draft");
                    self.draft_id = Some(draft.id);
                }
                Err(error) => {
                    warn!(%error, "failed to create order draft");
                }
            },
        }
    }
}
