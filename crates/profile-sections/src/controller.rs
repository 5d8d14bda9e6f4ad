//! Edit session controller: the add/edit/cancel/save/delete state machine
//! for one section.
//!
//! Every successful mutation is followed by a full list refetch that
//! replaces the items wholesale. The state lock is never held across a
//! remote call, so `cancel()` can run while a `save()` is suspended; each
//! dispatched request records the controller generation and its response
//! is dropped if the generation moved on in the meantime.

use crate::adapter::{EntityAdapter, EntityKind, Mutation};
use crate::error::{Result, SectionError};
use crate::notify::{LogNotifier, Notice, Notifier, Operation};
use crate::privacy::{RenderMode, SectionContext};
use crate::remote::CollectionRemote;
use crate::store::{CollectionStore, Cursor, Phase};
use parking_lot::Mutex;
use profile_http::ApiError;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Host page callback (`refreshPerformerPage`).
pub type HostRefresh = Arc<dyn Fn() + Send + Sync>;

/// What happens to the placeholder row when creating it fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailedCreate {
    /// Remove the placeholder so no unsaved row lingers.
    #[default]
    Discard,
    /// Keep the unsaved row until the next refresh.
    Retain,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SectionConfig {
    pub failed_create: FailedCreate,
}

/// How a dispatched request ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The response was applied to the section.
    Applied,
    /// The section moved on (cancel or re-initialize) before the response
    /// arrived; nothing was applied.
    Superseded,
}

/// What the host renders.
#[derive(Clone, Debug, PartialEq)]
pub enum SectionView<T> {
    Locked,
    Visible {
        items: Vec<T>,
        cursor: Cursor<T>,
        mode: RenderMode,
        busy: bool,
        /// Server-side lock flag, shown to viewers allowed past it.
        is_private: bool,
    },
}

struct Inner<T> {
    store: CollectionStore<T>,
    context: SectionContext,
    generation: u64,
    in_flight: Option<u64>,
}

impl<T: Clone> Inner<T> {
    fn dispatch(&mut self) -> u64 {
        self.generation += 1;
        self.in_flight = Some(self.generation);
        self.generation
    }

    fn ensure_idle(&self, op: &'static str) -> Result<()> {
        if self.in_flight.is_some() {
            return Err(SectionError::Busy);
        }
        match self.store.phase() {
            Phase::Idle => Ok(()),
            phase => Err(SectionError::InvalidTransition { op, phase }),
        }
    }

    fn ensure_mutable(&self) -> Result<()> {
        match self.context.render_mode() {
            RenderMode::Editable => Ok(()),
            RenderMode::Locked => Err(SectionError::Locked),
            RenderMode::ReadOnly => Err(SectionError::ReadOnly),
        }
    }
}

pub struct SectionController<A: EntityAdapter> {
    remote: Arc<dyn CollectionRemote<A>>,
    config: SectionConfig,
    notifier: Arc<dyn Notifier>,
    host_refresh: Option<HostRefresh>,
    inner: Mutex<Inner<A::Item>>,
}

impl<A: EntityAdapter> SectionController<A> {
    pub fn new(remote: Arc<dyn CollectionRemote<A>>, context: SectionContext) -> Self {
        Self {
            remote,
            config: SectionConfig::default(),
            notifier: Arc::new(LogNotifier),
            host_refresh: None,
            inner: Mutex::new(Inner {
                store: CollectionStore::new(),
                context,
                generation: 0,
                in_flight: None,
            }),
        }
    }

    pub fn with_config(mut self, config: SectionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_host_refresh(mut self, refresh: impl Fn() + Send + Sync + 'static) -> Self {
        self.host_refresh = Some(Arc::new(refresh));
        self
    }

    pub fn kind(&self) -> EntityKind {
        A::KIND
    }

    pub fn render_mode(&self) -> RenderMode {
        self.inner.lock().context.render_mode()
    }

    /// Applies new lock flags from the host. Switching to a locked mode
    /// abandons any edit in progress.
    pub fn set_context(&self, context: SectionContext) {
        let mut inner = self.inner.lock();
        inner.context = context;
        if !context.render_mode().allows_mutation() {
            if inner.in_flight.take().is_some() {
                inner.generation += 1;
            }
            inner.store.discard_placeholder();
            inner.store.reset_cursor();
        }
    }

    /// Seeds the section with the host's snapshot.
    pub fn initialize(&self, items: Vec<A::Item>) {
        let mut inner = self.inner.lock();
        if inner.in_flight.take().is_some() {
            debug!("[Section:{}] re-initialized with a request in flight", A::KIND);
        }
        inner.generation += 1;
        inner.store.initialize(items);
    }

    pub fn initialize_from_wire(&self, records: Vec<A::Wire>) {
        self.initialize(A::from_wire_list(records));
    }

    pub fn items(&self) -> Vec<A::Item> {
        self.inner.lock().store.items().to_vec()
    }

    pub fn cursor(&self) -> Cursor<A::Item> {
        self.inner.lock().store.cursor()
    }

    pub fn phase(&self) -> Phase {
        self.inner.lock().store.phase()
    }

    pub fn is_busy(&self) -> bool {
        self.inner.lock().in_flight.is_some()
    }

    /// Whether the add affordance should be enabled.
    pub fn can_add(&self) -> bool {
        let inner = self.inner.lock();
        inner.ensure_mutable().is_ok() && inner.ensure_idle("add").is_ok()
    }

    pub fn view(&self) -> SectionView<A::Item> {
        let inner = self.inner.lock();
        let mode = inner.context.render_mode();
        if mode == RenderMode::Locked {
            return SectionView::Locked;
        }
        SectionView::Visible {
            items: inner.store.items().to_vec(),
            cursor: inner.store.cursor(),
            mode,
            busy: inner.in_flight.is_some(),
            is_private: inner.context.is_locked,
        }
    }

    /// Initial fetch for hosts that do not pass a snapshot.
    pub async fn load(&self) -> Result<Outcome> {
        self.fetch_list(Operation::Load).await
    }

    /// Refetches the list and replaces the items. Only valid when idle.
    pub async fn refresh(&self) -> Result<Outcome> {
        self.fetch_list(Operation::Refresh).await
    }

    /// Inserts a placeholder and starts editing it. Returns its index.
    pub fn add(&self) -> Result<usize> {
        let mut inner = self.inner.lock();
        inner.ensure_mutable()?;
        inner.ensure_idle("add")?;
        let index = inner.store.begin_add(A::placeholder(), A::INSERT_AT);
        debug!("[Section:{}] adding placeholder at {}", A::KIND, index);
        Ok(index)
    }

    pub fn edit(&self, index: usize) -> Result<()> {
        let mut inner = self.inner.lock();
        inner.ensure_mutable()?;
        inner.ensure_idle("edit")?;
        if index >= inner.store.len() {
            return Err(SectionError::NoSuchItem(index));
        }
        inner.store.begin_edit(index);
        Ok(())
    }

    /// Leaves add/edit mode. A placeholder is dropped; an in-flight save is
    /// abandoned and its response ignored.
    pub fn cancel(&self) -> Result<()> {
        let mut inner = self.inner.lock();
        match inner.store.phase() {
            Phase::Adding(_) | Phase::Editing(_) => {}
            phase => return Err(SectionError::InvalidTransition { op: "cancel", phase }),
        }
        if inner.in_flight.take().is_some() {
            inner.generation += 1;
            warn!("[Section:{}] cancel abandons an in-flight save", A::KIND);
        }
        inner.store.discard_placeholder();
        inner.store.reset_cursor();
        Ok(())
    }

    /// Persists `updated` for the row being added or edited, then refetches.
    ///
    /// Creates when the edited row has no identity, updates it by that
    /// identity otherwise. A payload carrying a different identity is
    /// rejected with `IdentityMismatch` and the edit stays open. On failure
    /// the cursor returns to idle, the notifier is told, and the error is
    /// returned; placeholder handling follows `SectionConfig::failed_create`.
    pub async fn save(&self, updated: A::Item) -> Result<Outcome> {
        let (generation, is_adding, id) = {
            let mut inner = self.inner.lock();
            inner.ensure_mutable()?;
            if inner.in_flight.is_some() {
                return Err(SectionError::Busy);
            }
            let (index, is_adding) = match inner.store.phase() {
                Phase::Adding(i) => (i, true),
                Phase::Editing(i) => (i, false),
                phase => return Err(SectionError::InvalidTransition { op: "save", phase }),
            };
            // The edited row decides create vs update; a payload naming
            // another record is refused.
            let id = inner.store.get(index).and_then(A::identity);
            if let Some(found) = A::identity(&updated).filter(|found| Some(*found) != id) {
                return Err(SectionError::IdentityMismatch {
                    expected: id,
                    found,
                });
            }
            (inner.dispatch(), is_adding, id)
        };

        let (operation, mutation) = match id {
            Some(_) => (Operation::Update, Mutation::Updated),
            None => (Operation::Create, Mutation::Created),
        };
        let record = A::to_wire(&updated);
        let mutated = match id {
            Some(id) => self.remote.update(id, record).await,
            None => self.remote.create(record).await,
        };
        let listed = match mutated {
            Ok(()) if !self.is_current(generation) => {
                debug!("[Section:{}] {} landed after cancel", A::KIND, operation);
                return Ok(Outcome::Superseded);
            }
            Ok(()) => self
                .remote
                .list()
                .await
                .map_err(|e| (Operation::Refresh, e)),
            Err(e) => Err((operation, e)),
        };

        let mut inner = self.inner.lock();
        if inner.generation != generation {
            drop(inner);
            return Ok(self.superseded(operation, listed.err()));
        }
        inner.in_flight = None;

        match listed {
            Ok(records) => {
                inner.store.replace_items(A::from_wire_list(records));
                inner.store.reset_cursor();
                let remaining = inner.store.len();
                drop(inner);
                info!("[Section:{}] {} saved, {} items", A::KIND, operation, remaining);
                self.refresh_host_if_needed(mutation, remaining);
                Ok(Outcome::Applied)
            }
            Err((failed, e)) => {
                if is_adding && self.config.failed_create == FailedCreate::Discard {
                    inner.store.discard_placeholder();
                }
                inner.store.reset_cursor();
                drop(inner);
                self.report(failed, &e);
                Err(SectionError::Remote(e))
            }
        }
    }

    /// Marks the item at `index` for deletion; nothing is sent until
    /// `confirm_delete`.
    pub fn request_delete(&self, index: usize) -> Result<()> {
        let mut inner = self.inner.lock();
        inner.ensure_mutable()?;
        inner.ensure_idle("request delete")?;
        if index >= inner.store.len() {
            return Err(SectionError::NoSuchItem(index));
        }
        inner.store.request_delete(index);
        Ok(())
    }

    pub fn cancel_delete(&self) -> Result<()> {
        let mut inner = self.inner.lock();
        match inner.store.phase() {
            Phase::ConfirmingDelete(_) => {
                inner.store.confirmation().dismiss();
                Ok(())
            }
            phase => Err(SectionError::InvalidTransition {
                op: "cancel delete",
                phase,
            }),
        }
    }

    /// Deletes the confirmed target and refetches. The cursor is idle
    /// afterwards whether or not the call succeeded.
    pub async fn confirm_delete(&self) -> Result<Outcome> {
        let (generation, id) = {
            let mut inner = self.inner.lock();
            inner.ensure_mutable()?;
            if inner.in_flight.is_some() {
                return Err(SectionError::Busy);
            }
            let phase = inner.store.phase();
            let Some(pending) = inner.store.confirmation().confirm() else {
                return Err(SectionError::InvalidTransition {
                    op: "confirm delete",
                    phase,
                });
            };
            match A::identity(&pending.item) {
                Some(id) => (inner.dispatch(), id),
                None => {
                    // Never persisted: nothing to delete remotely.
                    if inner.store.get(pending.index) == Some(&pending.item) {
                        inner.store.remove(pending.index);
                    }
                    inner.store.reset_cursor();
                    debug!("[Section:{}] removed unsaved row {}", A::KIND, pending.index);
                    return Ok(Outcome::Applied);
                }
            }
        };

        let listed = match self.remote.delete(id).await {
            Ok(()) if !self.is_current(generation) => {
                debug!("[Section:{}] delete of {} landed after reset", A::KIND, id);
                return Ok(Outcome::Superseded);
            }
            Ok(()) => self
                .remote
                .list()
                .await
                .map_err(|e| (Operation::Refresh, e)),
            Err(e) => Err((Operation::Delete, e)),
        };

        let mut inner = self.inner.lock();
        if inner.generation != generation {
            drop(inner);
            return Ok(self.superseded(Operation::Delete, listed.err()));
        }
        inner.in_flight = None;
        inner.store.reset_cursor();

        match listed {
            Ok(records) => {
                inner.store.replace_items(A::from_wire_list(records));
                let remaining = inner.store.len();
                drop(inner);
                info!("[Section:{}] deleted {}, {} items left", A::KIND, id, remaining);
                self.refresh_host_if_needed(Mutation::Deleted, remaining);
                Ok(Outcome::Applied)
            }
            Err((failed, e)) => {
                drop(inner);
                self.report(failed, &e);
                Err(SectionError::Remote(e))
            }
        }
    }

    async fn fetch_list(&self, operation: Operation) -> Result<Outcome> {
        let generation = {
            let mut inner = self.inner.lock();
            if inner.context.render_mode() == RenderMode::Locked {
                return Err(SectionError::Locked);
            }
            inner.ensure_idle(operation.as_str())?;
            inner.dispatch()
        };

        let listed = self.remote.list().await;

        let mut inner = self.inner.lock();
        if inner.generation != generation {
            return Ok(Outcome::Superseded);
        }
        inner.in_flight = None;

        match listed {
            Ok(records) => {
                inner.store.replace_items(A::from_wire_list(records));
                debug!(
                    "[Section:{}] {} returned {} items",
                    A::KIND,
                    operation,
                    inner.store.len()
                );
                Ok(Outcome::Applied)
            }
            Err(e) => {
                drop(inner);
                self.report(operation, &e);
                Err(SectionError::Remote(e))
            }
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.inner.lock().generation == generation
    }

    /// A response that arrived after the section moved on. Failures are
    /// still logged and notified; nothing is applied.
    fn superseded(&self, operation: Operation, failure: Option<(Operation, ApiError)>) -> Outcome {
        match failure {
            Some((failed, e)) => {
                warn!(
                    "[Section:{}] superseded {} failed: {}",
                    A::KIND,
                    failed,
                    e
                );
                self.notifier.notify(Notice {
                    kind: A::KIND,
                    operation: failed,
                    message: e.to_string(),
                });
            }
            None => debug!(
                "[Section:{}] dropping superseded {} response",
                A::KIND,
                operation
            ),
        }
        Outcome::Superseded
    }

    fn report(&self, operation: Operation, e: &ApiError) {
        error!("[Section:{}] {} failed: {}", A::KIND, operation, e);
        self.notifier.notify(Notice {
            kind: A::KIND,
            operation,
            message: e.to_string(),
        });
    }

    fn refresh_host_if_needed(&self, mutation: Mutation, remaining: usize) {
        if !A::refreshes_host(mutation, remaining) {
            return;
        }
        match &self.host_refresh {
            Some(refresh) => {
                debug!("[Section:{}] refreshing host page", A::KIND);
                refresh();
            }
            None => warn!(
                "[Section:{}] host refresh needed but no callback registered",
                A::KIND
            ),
        }
    }
}
