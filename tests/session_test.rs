//! End-to-end tests for interactive sessions against a mock upstream.

mod common;

use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use common::{
    openlibrary_doc, openlibrary_results, tmdb_movie, tmdb_results, wait_settled, wait_until,
    RecordingHandler, TestHarness,
};
use mediascout::search::{NavKey, SearchHint, SearchPhase};
use mediascout::ProviderKey;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

async fn mount_dune_movies(h: &TestHarness) {
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .and(query_param("query", "dune"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tmdb_results(vec![
            tmdb_movie(438631, "Dune", "2021-09-15"),
            tmdb_movie(841, "Dune", "1984-12-14"),
        ])))
        .mount(&h.server)
        .await;
}

#[tokio::test]
async fn selecting_a_movie_fills_the_director_before_on_select() {
    let h = TestHarness::new().await;
    mount_dune_movies(&h).await;

    Mock::given(method("GET"))
        .and(path("/movie/438631/credits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 438631,
            "cast": [{ "name": "Timothée Chalamet" }],
            "crew": [
                { "name": "Hans Zimmer", "job": "Original Music Composer" },
                { "name": "Denis Villeneuve", "job": "Director" }
            ]
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    let handler = Arc::new(RecordingHandler::default());
    let session = h.session("movie", handler.clone());

    session.input("dune");
    let snap = wait_settled(&session).await;
    assert_eq!(snap.results.len(), 2);
    assert!(snap.open);

    let selected = session.select(0).await.unwrap();
    assert_eq!(selected.candidate.creator, "Denis Villeneuve");
    assert_eq!(selected.domain, "movie");

    let recorded = handler.selected.lock();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].candidate.creator, "Denis Villeneuve");
    assert_eq!(recorded[0].candidate.external_id, "tmdb:movie:438631");
}

#[tokio::test]
async fn failed_enrichment_still_commits() {
    let h = TestHarness::new().await;
    mount_dune_movies(&h).await;

    Mock::given(method("GET"))
        .and(path("/movie/841/credits"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&h.server)
        .await;

    let handler = Arc::new(RecordingHandler::default());
    let session = h.session("movie", handler.clone());

    session.input("dune");
    wait_settled(&session).await;

    let selected = session.select(1).await.unwrap();
    assert_eq!(selected.candidate.title, "Dune");
    assert_eq!(selected.candidate.creator, "");
    assert_eq!(handler.selected.lock().len(), 1);
}

#[tokio::test]
async fn superseded_selection_never_reaches_the_host() {
    let h = TestHarness::new().await;
    mount_dune_movies(&h).await;

    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .and(query_param("query", "alien"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(tmdb_results(vec![tmdb_movie(348, "Alien", "1979-05-25")])),
        )
        .mount(&h.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/movie/438631/credits"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({
                    "crew": [{ "name": "Denis Villeneuve", "job": "Director" }]
                }))
                .set_delay(Duration::from_millis(1500)),
        )
        .mount(&h.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/movie/348/credits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "crew": [{ "name": "Ridley Scott", "job": "Director" }]
        })))
        .mount(&h.server)
        .await;

    let handler = Arc::new(RecordingHandler::default());
    let session = h.session("movie", handler.clone());

    session.input("dune");
    wait_settled(&session).await;

    // First commit is still waiting on its credits when the user moves on.
    let first = tokio::spawn({
        let session = session.clone();
        async move { session.select(0).await }
    });
    wait_until(&session, |s| s.query == "Dune").await;

    session.input("alien");
    wait_settled(&session).await;
    let second = session.select(0).await.unwrap();
    assert_eq!(second.candidate.creator, "Ridley Scott");

    assert!(first.await.unwrap().is_none());

    let recorded = handler.selected.lock();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].candidate.title, "Alien");
    assert_eq!(session.snapshot().query, "Alien");
}

#[tokio::test]
async fn selecting_a_series_uses_the_first_creator() {
    let h = TestHarness::new().await;

    Mock::given(method("GET"))
        .and(path("/search/tv"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [{ "id": 1396, "name": "Breaking Bad", "first_air_date": "2008-01-20" }]
        })))
        .mount(&h.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/tv/1396"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 1396,
            "created_by": [{ "id": 66633, "name": "Vince Gilligan" }]
        })))
        .mount(&h.server)
        .await;

    let handler = Arc::new(RecordingHandler::default());
    let session = h.session("series", handler.clone());
    assert_eq!(session.provider(), ProviderKey::Tv);

    session.input("breaking");
    wait_settled(&session).await;

    session.key(NavKey::Down).await;
    let selected = session.key(NavKey::Enter).await.unwrap();
    assert_eq!(selected.candidate.creator, "Vince Gilligan");
    assert_eq!(selected.domain, "series");
}

#[tokio::test]
async fn selecting_a_game_uses_the_first_developer() {
    let h = TestHarness::new().await;

    Mock::given(method("GET"))
        .and(path("/games"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [{ "id": 274755, "name": "Hades", "released": "2020-09-17", "metacritic": 93 }]
        })))
        .mount(&h.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/games/274755"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 274755,
            "developers": [{ "id": 1, "name": "Supergiant Games" }]
        })))
        .mount(&h.server)
        .await;

    let handler = Arc::new(RecordingHandler::default());
    let session = h.session("game", handler.clone());

    session.input("hades");
    wait_settled(&session).await;

    let selected = session.select(0).await.unwrap();
    assert_eq!(selected.candidate.creator, "Supergiant Games");
    assert_eq!(selected.candidate.external_rating, Some(4.7));
}

#[tokio::test]
async fn book_selection_needs_no_enrichment() {
    let h = TestHarness::without_keys().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(openlibrary_results(vec![openlibrary_doc("OL893415W", "Dune")])),
        )
        .mount(&h.server)
        .await;

    let handler = Arc::new(RecordingHandler::default());
    let session = h.session("book", handler.clone());

    session.input("dune");
    wait_settled(&session).await;
    let before = h.request_count().await;

    let selected = session.select(0).await.unwrap();
    assert_eq!(selected.candidate.creator, "Frank Herbert");
    assert_eq!(h.request_count().await, before);
}

#[tokio::test]
async fn slow_stale_response_is_discarded() {
    let h = TestHarness::without_keys().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("q", "dune"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(openlibrary_results(vec![openlibrary_doc("OL1W", "Old")]))
                .set_delay(Duration::from_millis(600)),
        )
        .mount(&h.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("q", "dunes"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(openlibrary_results(vec![openlibrary_doc("OL2W", "New")])),
        )
        .mount(&h.server)
        .await;

    let handler = Arc::new(RecordingHandler::default());
    let session = h.session("book", handler);

    session.input("dune");
    wait_until(&session, |s| s.phase == SearchPhase::Loading).await;

    session.input("dunes");
    let snap = wait_settled(&session).await;
    assert_eq!(snap.results[0].title, "New");

    // Let the slow response arrive; it must not replace the newer list.
    tokio::time::sleep(Duration::from_millis(800)).await;
    let snap = session.snapshot();
    assert_eq!(snap.query, "dunes");
    assert_eq!(snap.results.len(), 1);
    assert_eq!(snap.results[0].title, "New");
}

#[tokio::test]
async fn game_session_without_key_hints_configuration() {
    let h = TestHarness::without_keys().await;
    let handler = Arc::new(RecordingHandler::default());
    let session = h.session("game", handler);

    assert_matches!(
        session.snapshot().hint,
        Some(SearchHint::NotConfigured {
            provider: ProviderKey::Game
        })
    );

    session.input("zelda");
    let snap = wait_settled(&session).await;
    assert!(snap.results.is_empty());
    assert!(!snap.open);
    assert_matches!(snap.hint, Some(SearchHint::NotConfigured { .. }));
    assert_eq!(h.request_count().await, 0);
}

#[tokio::test]
async fn short_place_query_asks_for_more_characters() {
    let h = TestHarness::without_keys().await;
    let handler = Arc::new(RecordingHandler::default());
    let session = h.session("travel", handler);

    session.input("is");
    let snap = session.snapshot();
    assert_eq!(snap.phase, SearchPhase::Idle);
    assert_matches!(snap.hint, Some(SearchHint::TypeMore { remaining: 1 }));

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(h.request_count().await, 0);
}

#[tokio::test]
async fn action_commits_without_touching_the_query() {
    let h = TestHarness::without_keys().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(openlibrary_results(vec![openlibrary_doc("OL893415W", "Dune")])),
        )
        .mount(&h.server)
        .await;

    let handler = Arc::new(RecordingHandler::default());
    let session = h.session("book", handler.clone());

    session.input("dune");
    wait_settled(&session).await;

    assert!(session.action(0).await.unwrap());
    assert_eq!(handler.actions.lock().len(), 1);
    assert!(handler.selected.lock().is_empty());
    assert_eq!(session.snapshot().query, "dune");
}
