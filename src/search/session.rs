//! Interactive search session: debounce, staleness control, and commits.
//!
//! A [`SearchSession`] owns the visible state of one search box: the query,
//! the result list, whether the dropdown is open, and the highlight. Every
//! change is published as a [`SearchSnapshot`] on a [`watch`] channel.
//!
//! Each keystroke, provider switch, and selection bumps a generation counter.
//! A dispatched search captures the generation it was issued under and only
//! touches visible state if that generation is still current when it
//! resolves. This one mechanism provides the debounce restart, drops
//! out-of-order responses, isolates provider switches, and suppresses the
//! re-search that echoing a selected title into the query would cause.

use std::sync::Arc;

use mediascout_common::ProviderKey;
use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

use crate::discovery::{domain_for_provider, provider_for_domain, CanonicalCandidate, SelectedCandidate};

use super::aggregator::{Aggregator, SearchHint};
use super::handler::SelectionHandler;
use super::selection::{KeyOutcome, NavKey, SelectionController};

/// Lifecycle of the current query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPhase {
    /// No search outstanding; the query is empty or too short.
    Idle,
    /// Waiting out the debounce period.
    Pending,
    /// The adapter call is in flight.
    Loading,
    /// The latest results are visible.
    Settled,
}

/// Point-in-time view of a session, as published to subscribers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchSnapshot {
    pub provider: ProviderKey,
    pub query: String,
    pub phase: SearchPhase,
    pub results: Vec<CanonicalCandidate>,
    pub open: bool,
    pub focused: bool,
    pub highlighted: Option<usize>,
    pub generation: u64,
    pub hint: Option<SearchHint>,
}

struct SessionState {
    provider: ProviderKey,
    query: String,
    phase: SearchPhase,
    results: Vec<CanonicalCandidate>,
    open: bool,
    focused: bool,
    selection: SelectionController,
    generation: u64,
    hint: Option<SearchHint>,
}

impl SessionState {
    fn snapshot(&self) -> SearchSnapshot {
        SearchSnapshot {
            provider: self.provider,
            query: self.query.clone(),
            phase: self.phase,
            results: self.results.clone(),
            open: self.open,
            focused: self.focused,
            highlighted: self.selection.highlighted(),
            generation: self.generation,
            hint: self.hint.clone(),
        }
    }

    /// Empty the list and close the dropdown.
    fn clear_results(&mut self) {
        self.results.clear();
        self.open = false;
        self.selection.reset();
        self.phase = SearchPhase::Idle;
    }
}

struct Shared {
    aggregator: Arc<Aggregator>,
    handler: Arc<dyn SelectionHandler>,
    state: Mutex<SessionState>,
    updates: watch::Sender<SearchSnapshot>,
}

impl Shared {
    /// Publish while the state lock is held so snapshots never go backwards.
    fn publish(&self, state: &SessionState) {
        self.updates.send_replace(state.snapshot());
    }
}

/// Handle to one search box. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct SearchSession {
    shared: Arc<Shared>,
}

impl SearchSession {
    pub fn new(
        aggregator: Arc<Aggregator>,
        provider: ProviderKey,
        handler: Arc<dyn SelectionHandler>,
    ) -> Self {
        let state = SessionState {
            provider,
            query: String::new(),
            phase: SearchPhase::Idle,
            results: Vec::new(),
            open: false,
            focused: false,
            selection: SelectionController::new(),
            generation: 0,
            hint: aggregator.hint(provider, ""),
        };
        let (updates, _) = watch::channel(state.snapshot());

        Self {
            shared: Arc::new(Shared {
                aggregator,
                handler,
                state: Mutex::new(state),
                updates,
            }),
        }
    }

    /// Create a session for a host content-domain token (see
    /// [`provider_for_domain`]).
    pub fn for_domain(
        aggregator: Arc<Aggregator>,
        domain: &str,
        handler: Arc<dyn SelectionHandler>,
    ) -> Self {
        Self::new(aggregator, provider_for_domain(domain), handler)
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchSnapshot> {
        self.shared.updates.subscribe()
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        self.shared.updates.borrow().clone()
    }

    pub fn provider(&self) -> ProviderKey {
        self.shared.state.lock().provider
    }

    pub fn domain(&self) -> &'static str {
        domain_for_provider(self.provider())
    }

    /// Mark the input as focused. Results kept from before an Escape are
    /// shown again.
    pub fn focus(&self) {
        let mut state = self.shared.state.lock();
        self.refocus(&mut state);
    }

    fn refocus(&self, state: &mut SessionState) {
        if state.focused {
            return;
        }
        state.focused = true;
        state.open = !state.results.is_empty();
        self.shared.publish(state);
    }

    /// Feed the current text of the search box.
    ///
    /// Re-entering the text already held (such as the title echoed by
    /// [`select`](Self::select)) only refocuses the box. Otherwise any
    /// outstanding search is superseded; a query below the provider's minimum
    /// clears the list, and a long enough one is searched after the debounce
    /// period.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn input(&self, text: &str) {
        let aggregator = &self.shared.aggregator;
        let mut state = self.shared.state.lock();

        if state.query == text {
            self.refocus(&mut state);
            return;
        }

        state.focused = true;
        state.query = text.to_string();
        state.generation += 1;
        let generation = state.generation;
        let provider = state.provider;

        if !aggregator.accepts(provider, text) {
            state.clear_results();
            state.hint = aggregator.hint(provider, text);
            self.shared.publish(&state);
            return;
        }

        state.phase = SearchPhase::Pending;
        self.shared.publish(&state);
        drop(state);

        let session = self.clone();
        let query = text.trim().to_string();
        tokio::spawn(async move {
            session.dispatch(generation, provider, query).await;
        });
    }

    async fn dispatch(&self, generation: u64, provider: ProviderKey, query: String) {
        let aggregator = &self.shared.aggregator;

        tokio::time::sleep(aggregator.settings().debounce()).await;

        {
            let mut state = self.shared.state.lock();
            if state.generation != generation {
                return;
            }
            state.phase = SearchPhase::Loading;
            self.shared.publish(&state);
        }

        let results = aggregator.search(provider, &query).await;

        let mut state = self.shared.state.lock();
        if state.generation != generation {
            debug!(
                generation,
                current = state.generation,
                provider = %provider,
                "Discarding stale search results"
            );
            return;
        }

        state.hint = if results.is_empty() {
            aggregator.hint(provider, &query)
        } else {
            None
        };
        state.open = state.focused && !results.is_empty();
        state.results = results;
        state.selection.reset();
        state.phase = SearchPhase::Settled;
        self.shared.publish(&state);
    }

    /// Switch the active provider, resetting the query, results, dropdown,
    /// and highlight together. In-flight searches for the old provider are
    /// discarded when they resolve.
    pub fn set_provider(&self, provider: ProviderKey) {
        let mut state = self.shared.state.lock();
        if state.provider == provider {
            return;
        }

        debug!(from = %state.provider, to = %provider, "Switching provider");
        state.generation += 1;
        state.provider = provider;
        state.query.clear();
        state.clear_results();
        state.hint = self.shared.aggregator.hint(provider, "");
        self.shared.publish(&state);
    }

    /// Switch provider by host content-domain token.
    pub fn set_domain(&self, domain: &str) {
        self.set_provider(provider_for_domain(domain));
    }

    /// Pointer moved over the result at `index`.
    pub fn hover(&self, index: usize) {
        let mut state = self.shared.state.lock();
        if !state.open {
            return;
        }
        let len = state.results.len();
        state.selection.hover(index, len);
        self.shared.publish(&state);
    }

    /// Apply a navigation key. Returns the committed candidate when the key
    /// was Enter on a highlighted result.
    pub async fn key(&self, key: NavKey) -> Option<SelectedCandidate> {
        let commit = {
            let mut state = self.shared.state.lock();
            if !state.open && key != NavKey::Escape {
                return None;
            }

            let len = state.results.len();
            match state.selection.handle_key(key, len) {
                KeyOutcome::Commit(index) => Some(index),
                KeyOutcome::Dismiss => {
                    state.open = false;
                    state.focused = false;
                    state.selection.reset();
                    self.shared.publish(&state);
                    None
                }
                KeyOutcome::Moved(_) => {
                    self.shared.publish(&state);
                    None
                }
                KeyOutcome::Ignored => None,
            }
        };

        match commit {
            Some(index) => self.select(index).await,
            None => None,
        }
    }

    /// Commit the result at `index`.
    ///
    /// The title is echoed into the query and the list is closed before the
    /// candidate is enriched; the host's `on_select` fires only after
    /// enrichment finishes. Returns `None` when `index` is out of range, or
    /// when a newer keystroke or selection superseded this one while it was
    /// being enriched; the host never hears about a superseded commit.
    pub async fn select(&self, index: usize) -> Option<SelectedCandidate> {
        let (candidate, provider, generation) = {
            let mut state = self.shared.state.lock();
            let candidate = state.results.get(index)?.clone();

            state.generation += 1;
            state.query = candidate.title.clone();
            state.clear_results();
            state.hint = None;
            self.shared.publish(&state);

            (candidate, state.provider, state.generation)
        };

        let candidate = self.shared.aggregator.enrich(candidate).await;

        let current = self.shared.state.lock().generation;
        if current != generation {
            debug!(
                generation,
                current,
                id = %candidate.external_id,
                "Discarding superseded selection"
            );
            return None;
        }

        let selected = SelectedCandidate {
            candidate,
            domain: domain_for_provider(provider).to_string(),
        };

        debug!(
            id = %selected.candidate.external_id,
            domain = %selected.domain,
            "Candidate selected"
        );
        self.shared.handler.on_select(selected.clone()).await;
        Some(selected)
    }

    /// Invoke the host's secondary commit on the result at `index`.
    ///
    /// Leaves the query, list, and dropdown untouched. Returns `Ok(false)`
    /// when the host has no action or `index` is out of range.
    pub async fn action(&self, index: usize) -> anyhow::Result<bool> {
        if !self.shared.handler.supports_action() {
            return Ok(false);
        }

        let candidate = self.shared.state.lock().results.get(index).cloned();
        let Some(candidate) = candidate else {
            return Ok(false);
        };

        self.shared.handler.on_action(candidate).await?;
        Ok(true)
    }
}
