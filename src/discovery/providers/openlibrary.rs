//! Open Library book search adapter.
//!
//! Queries the unauthenticated `search.json` endpoint in a single locale.
//! `first_sentence` arrives either as a string or as an array of strings; only
//! the first entry is used and the excerpt is capped at 400 characters.

use async_trait::async_trait;
use mediascout_common::rating::round_five_point;
use mediascout_common::text::{non_empty, truncate_chars};
use mediascout_common::{ProviderKey, Result};
use serde::Deserialize;

use crate::discovery::candidate::{external_id, CanonicalCandidate};
use crate::discovery::http::ApiClient;
use crate::discovery::provider::SearchProvider;

pub const OPENLIBRARY_BASE_URL: &str = "https://openlibrary.org";
const COVER_BASE: &str = "https://covers.openlibrary.org/b/id";
const EXCERPT_MAX_CHARS: usize = 400;
const SEARCH_FIELDS: &str =
    "key,title,author_name,first_publish_year,cover_i,first_sentence,ratings_average";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    docs: Vec<BookDoc>,
}

#[derive(Debug, Deserialize)]
struct BookDoc {
    key: Option<String>,
    title: Option<String>,
    #[serde(default)]
    author_name: Vec<String>,
    first_publish_year: Option<i32>,
    cover_i: Option<i64>,
    first_sentence: Option<FirstSentence>,
    ratings_average: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FirstSentence {
    Text(String),
    List(Vec<String>),
}

impl FirstSentence {
    fn into_first(self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text),
            Self::List(list) => list.into_iter().next(),
        }
    }
}

/// Open Library search adapter.
pub struct OpenLibraryProvider {
    api: ApiClient,
    max_results: usize,
}

impl OpenLibraryProvider {
    pub fn new(max_results: usize) -> Self {
        Self {
            api: ApiClient::new(
                OPENLIBRARY_BASE_URL,
                concat!("mediascout/", env!("CARGO_PKG_VERSION")),
            ),
            max_results,
        }
    }

    /// Point the adapter at a different API root (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api = self.api.with_base_url(base_url);
        self
    }
}

fn to_candidate(doc: BookDoc) -> Option<CanonicalCandidate> {
    let title = non_empty(doc.title)?;
    let work_id = doc
        .key
        .as_deref()
        .and_then(|key| key.rsplit('/').next())
        .filter(|id| !id.is_empty())?
        .to_string();

    let mut candidate = CanonicalCandidate::new(title, external_id("openlibrary", "work", work_id));

    candidate.creator = doc.author_name.into_iter().next().unwrap_or_default();
    candidate.years = doc
        .first_publish_year
        .map(|year| year.to_string())
        .unwrap_or_default();
    candidate.image = doc
        .cover_i
        .filter(|id| *id > 0)
        .map(|id| format!("{COVER_BASE}/{id}-M.jpg"))
        .unwrap_or_default();
    candidate.excerpt = doc
        .first_sentence
        .and_then(FirstSentence::into_first)
        .map(|sentence| truncate_chars(sentence.trim(), EXCERPT_MAX_CHARS))
        .unwrap_or_default();
    candidate.external_rating = round_five_point(doc.ratings_average);

    Some(candidate)
}

#[async_trait]
impl SearchProvider for OpenLibraryProvider {
    fn key(&self) -> ProviderKey {
        ProviderKey::Book
    }

    async fn lookup(&self, query: &str) -> Result<Vec<CanonicalCandidate>> {
        let limit = self.max_results.to_string();
        let body: SearchResponse = self
            .api
            .get_json(
                "/search.json",
                &[("q", query), ("limit", limit.as_str()), ("fields", SEARCH_FIELDS)],
                &[],
            )
            .await?;

        Ok(body
            .docs
            .into_iter()
            .filter_map(to_candidate)
            .take(self.max_results)
            .collect())
    }
}
