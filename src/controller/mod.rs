//! View controller.
//!
//! Turns UI events into store calls and store results into document patches.
//! The current [`ViewQuery`] is replaced wholesale on every sort or search change
//! and handed by value to the fetch it triggers.
//!
//! List fetches are not cancelled. When two overlap, the one that resolves last
//! is rendered, even if it was issued first, unless stale responses are
//! discarded via [`ControllerOptions::discard_stale_responses`].

mod events;

pub use events::*;

use std::slice;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::Duration;

use crate::config::Config;
use crate::debounce::Debouncer;
use crate::models::{SortOrder, ViewQuery};
use crate::render::{self, card_dom_id, DocumentPatch, PatchOp, Surface};
use crate::store::RequestStore;

/// Lifecycle of the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState {
    Idle,
    Loading,
    Rendered,
}

#[derive(Debug, Clone)]
pub struct ControllerOptions {
    /// Quiet period after the last search keystroke
    pub search_debounce: Duration,
    /// Drop list responses older than the latest issued fetch
    pub discard_stale_responses: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            search_debounce: Duration::from_millis(550),
            discard_stale_responses: false,
        }
    }
}

impl From<&Config> for ControllerOptions {
    fn from(config: &Config) -> Self {
        Self {
            search_debounce: config.search_debounce,
            discard_stale_responses: config.discard_stale_responses,
        }
    }
}

pub struct ViewController {
    store: Arc<dyn RequestStore>,
    surface: Arc<dyn Surface>,
    query: Mutex<ViewQuery>,
    search: Debouncer<String>,
    discard_stale_responses: bool,
    /// Sequence number of the latest issued list fetch
    issued: AtomicU64,
    in_flight: AtomicUsize,
    rendered: AtomicBool,
    /// Held while a create request is outstanding
    submitting: AtomicBool,
}

impl ViewController {
    pub fn new(
        store: Arc<dyn RequestStore>,
        surface: Arc<dyn Surface>,
        options: ControllerOptions,
    ) -> Arc<Self> {
        Arc::new_cyclic(|weak: &Weak<Self>| {
            let weak = weak.clone();
            let search = Debouncer::new(options.search_debounce, move |term: String| {
                let Some(controller) = weak.upgrade() else {
                    return;
                };
                tokio::spawn(async move {
                    let query = controller.query().with_search_term(term);
                    controller.refresh(query).await;
                });
            });

            Self {
                store,
                surface,
                query: Mutex::new(ViewQuery::default()),
                search,
                discard_stale_responses: options.discard_stale_responses,
                issued: AtomicU64::new(0),
                in_flight: AtomicUsize::new(0),
                rendered: AtomicBool::new(false),
                submitting: AtomicBool::new(false),
            }
        })
    }

    /// Current sort order and search term.
    pub fn query(&self) -> ViewQuery {
        self.query
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn list_state(&self) -> ListState {
        if self.in_flight.load(Ordering::SeqCst) > 0 {
            ListState::Loading
        } else if self.rendered.load(Ordering::SeqCst) {
            ListState::Rendered
        } else {
            ListState::Idle
        }
    }

    fn replace_query(&self, update: impl FnOnce(&ViewQuery) -> ViewQuery) -> ViewQuery {
        let mut current = self.query.lock().unwrap_or_else(PoisonError::into_inner);
        *current = update(&*current);
        current.clone()
    }

    /// Fetch and render the unfiltered, unsorted list.
    pub async fn initial_load(&self) {
        tracing::info!("Loading video requests");
        self.refresh(ViewQuery::default()).await;
    }

    /// Reload the list with the current query.
    pub async fn refresh_current(&self) {
        let query = self.query();
        self.refresh(query).await;
    }

    /// Fetch the list for `query`, sort it client-side and render it with reset.
    pub async fn refresh(&self, query: ViewQuery) {
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let _in_flight = InFlight::enter(&self.in_flight);

        match self.store.list(&query).await {
            Ok(records) => {
                let latest = self.issued.load(Ordering::SeqCst);
                if self.discard_stale_responses && seq < latest {
                    tracing::debug!(seq, latest, "Discarding stale list response");
                } else {
                    let records = query.sort_order.apply(records);
                    tracing::debug!(
                        count = records.len(),
                        sort = query.sort_order.as_str(),
                        search = %query.search_term,
                        "Rendering video requests"
                    );
                    self.surface.apply(render::render(&records, true));
                    self.rendered.store(true, Ordering::SeqCst);
                }
            }
            Err(e) => tracing::error!("Failed to load video requests: {}", e),
        }
    }

    /// Submit the new-request form.
    pub async fn submit(&self) {
        if self.submitting.swap(true, Ordering::SeqCst) {
            tracing::debug!("Submit ignored, a create request is outstanding");
            return;
        }

        let form = self.surface.form_data();
        self.surface
            .apply(DocumentPatch::single(PatchOp::SetSubmitEnabled(false)));
        let _reenable = SubmitGuard { controller: self };

        match self.store.create(&form).await {
            Ok(created) => {
                tracing::info!("Created video request {}", created.id);
                let mut patch = render::render(slice::from_ref(&created), false);
                patch.push(PatchOp::ResetForm);
                self.surface.apply(patch);
            }
            Err(e) => tracing::error!("Failed to create video request: {}", e),
        }
    }

    /// Handle a click inside the list; only vote controls do anything.
    pub async fn click(&self, target_id: &str) {
        let Some((id, vote_type)) = render::parse_vote_control(target_id) else {
            return;
        };

        match self.store.vote(&id, vote_type).await {
            Ok(tally) => {
                tracing::debug!(id = %id, vote = vote_type.as_str(), "Vote recorded");
                self.surface
                    .apply(render::vote_update(&card_dom_id(&id), &tally));
            }
            Err(e) => tracing::error!("Failed to vote on {}: {}", id, e),
        }
    }

    /// Switch the sort toggle and reload with the current search term.
    pub async fn select_sort(&self, order: SortOrder) {
        let query = self.replace_query(|q| q.with_sort(order));
        self.surface
            .apply(DocumentPatch::single(PatchOp::SetActiveSort(order)));
        self.refresh(query).await;
    }

    /// Record a search keystroke; the reload happens once typing pauses.
    pub fn search_input(&self, term: impl Into<String>) {
        let term = term.into();
        self.replace_query(|q| q.with_search_term(term.clone()));
        self.search.call(term);
    }

    /// Route one event to its handler without waiting for network calls.
    pub fn dispatch(self: &Arc<Self>, event: UiEvent) {
        tracing::trace!(?event, "Dispatching UI event");
        match event {
            UiEvent::SearchInput(term) => self.search_input(term),
            UiEvent::Submit => {
                let controller = Arc::clone(self);
                tokio::spawn(async move { controller.submit().await });
            }
            UiEvent::ListClick { target_id } => {
                let controller = Arc::clone(self);
                tokio::spawn(async move { controller.click(&target_id).await });
            }
            UiEvent::SortClick(order) => {
                let controller = Arc::clone(self);
                tokio::spawn(async move { controller.select_sort(order).await });
            }
            UiEvent::Refresh => {
                let controller = Arc::clone(self);
                tokio::spawn(async move { controller.refresh_current().await });
            }
        }
    }

    /// Start the initial load and dispatch events until the source is exhausted.
    pub async fn run(self: Arc<Self>, mut events: impl EventSource) {
        let controller = Arc::clone(&self);
        tokio::spawn(async move { controller.initial_load().await });

        while let Some(event) = events.next_event().await {
            self.dispatch(event);
        }
        self.search.cancel();
        tracing::info!("Event source closed");
    }
}

/// Counts one list fetch as in flight until dropped.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Re-enables the submit control and releases the create gate when dropped.
struct SubmitGuard<'a> {
    controller: &'a ViewController,
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.controller
            .surface
            .apply(DocumentPatch::single(PatchOp::SetSubmitEnabled(true)));
        self.controller.submitting.store(false, Ordering::SeqCst);
    }
}
