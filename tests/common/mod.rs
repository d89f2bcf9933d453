//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`], which starts a [`wiremock::MockServer`] standing
//! in for every upstream (TMDB, Open Library, RAWG, Nominatim, Wikipedia) and
//! builds an [`Aggregator`] pointed at it.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use mediascout::config::Config;
use mediascout::search::{Aggregator, SearchPhase, SearchSession, SearchSnapshot, SelectionHandler};
use mediascout::{CanonicalCandidate, Endpoints, SelectedCandidate};
use parking_lot::Mutex;
use wiremock::MockServer;

pub const TMDB_KEY: &str = "tmdb-test-key";
pub const RAWG_KEY: &str = "rawg-test-key";

/// Test harness wrapping a mock upstream and the configuration pointed at it.
pub struct TestHarness {
    pub server: MockServer,
    pub config: Config,
}

impl TestHarness {
    /// Harness with TMDB and RAWG keys configured and a short debounce.
    pub async fn new() -> Self {
        let mut config = Config::default();
        config.tmdb.api_key = TMDB_KEY.into();
        config.rawg.api_key = RAWG_KEY.into();
        config.search.debounce_ms = 20;
        Self::with_config(config).await
    }

    /// Harness with no API keys.
    pub async fn without_keys() -> Self {
        let mut config = Config::default();
        config.search.debounce_ms = 20;
        Self::with_config(config).await
    }

    pub async fn with_config(config: Config) -> Self {
        Self {
            server: MockServer::start().await,
            config,
        }
    }

    pub fn aggregator(&self) -> Aggregator {
        Aggregator::with_endpoints(&self.config, &Endpoints::all(self.server.uri()))
    }

    pub fn session(&self, domain: &str, handler: Arc<RecordingHandler>) -> SearchSession {
        SearchSession::for_domain(Arc::new(self.aggregator()), domain, handler)
    }

    /// Number of requests the mock server has seen so far.
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|r| r.len())
            .unwrap_or_default()
    }
}

/// [`SelectionHandler`] that records every commit it receives.
#[derive(Default)]
pub struct RecordingHandler {
    pub selected: Mutex<Vec<SelectedCandidate>>,
    pub actions: Mutex<Vec<CanonicalCandidate>>,
}

#[async_trait::async_trait]
impl SelectionHandler for RecordingHandler {
    async fn on_select(&self, selected: SelectedCandidate) {
        self.selected.lock().push(selected);
    }

    fn supports_action(&self) -> bool {
        true
    }

    async fn on_action(&self, candidate: CanonicalCandidate) -> anyhow::Result<()> {
        self.actions.lock().push(candidate);
        Ok(())
    }
}

/// Wait (bounded) until the session publishes a snapshot matching `f`.
pub async fn wait_until<F>(session: &SearchSession, f: F) -> SearchSnapshot
where
    F: Fn(&SearchSnapshot) -> bool,
{
    let mut rx = session.subscribe();
    let snapshot = tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|s| f(s)))
        .await
        .expect("timed out waiting for session state")
        .expect("session dropped")
        .clone();
    snapshot
}

pub async fn wait_settled(session: &SearchSession) -> SearchSnapshot {
    wait_until(session, |s| s.phase == SearchPhase::Settled).await
}

// ---- upstream payloads ----

pub fn tmdb_movie(id: u64, title: &str, date: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "release_date": date,
        "overview": format!("{title} overview"),
        "poster_path": format!("/{id}.jpg"),
        "vote_average": 7.8
    })
}

pub fn tmdb_results(results: Vec<serde_json::Value>) -> serde_json::Value {
    let total = results.len();
    serde_json::json!({ "page": 1, "results": results, "total_results": total })
}

pub fn openlibrary_doc(olid: &str, title: &str) -> serde_json::Value {
    serde_json::json!({
        "key": format!("/works/{olid}"),
        "title": title,
        "author_name": ["Frank Herbert"],
        "first_publish_year": 1965,
        "cover_i": 11481354,
        "first_sentence": ["A beginning is the time for taking the most delicate care."],
        "ratings_average": 4.2
    })
}

pub fn openlibrary_results(docs: Vec<serde_json::Value>) -> serde_json::Value {
    let total = docs.len();
    serde_json::json!({ "numFound": total, "docs": docs })
}
