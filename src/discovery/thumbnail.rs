//! Wikipedia thumbnail lookup for place candidates.
//!
//! OpenStreetMap objects often carry a `wikipedia=<lang>:<title>` tag. The
//! resolver asks that language's MediaWiki API for the page's lead image and
//! returns its thumbnail URL. Every failure, from a malformed tag to an HTTP
//! error, resolves to `None`.

use mediascout_common::Result;
use serde::Deserialize;
use tracing::debug;

use crate::config::WikipediaConfig;

use super::http::ApiClient;

#[derive(Debug, Deserialize)]
struct QueryResponse {
    query: Option<QueryBody>,
}

#[derive(Debug, Deserialize)]
struct QueryBody {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    thumbnail: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    source: String,
}

/// A page reference split out of a wiki tag.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PageRef {
    language: String,
    title: String,
}

/// Resolves Wikipedia page references to thumbnail URLs.
pub struct ThumbnailResolver {
    api: ApiClient,
    default_language: String,
    thumbnail_size: String,
    /// Fixed API root overriding `https://<lang>.wikipedia.org` (tests).
    base_override: Option<String>,
}

impl ThumbnailResolver {
    pub fn new(config: &WikipediaConfig, user_agent: &str) -> Self {
        Self {
            api: ApiClient::new(String::new(), user_agent),
            default_language: config.default_language.clone(),
            thumbnail_size: config.thumbnail_size.to_string(),
            base_override: None,
        }
    }

    /// Send every request to `base_url` regardless of language.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_override = Some(base_url.into());
        self
    }

    /// Look up a thumbnail for `wiki_tag`, or for `fallback_title` in the
    /// default language when the tag is absent.
    pub async fn resolve(
        &self,
        wiki_tag: Option<&str>,
        fallback_title: Option<&str>,
    ) -> Option<String> {
        let page = self.page_ref(wiki_tag, fallback_title)?;

        match self.fetch(&page).await {
            Ok(url) => url,
            Err(e) => {
                debug!(
                    language = %page.language,
                    title = %page.title,
                    error = %e,
                    "Thumbnail lookup failed"
                );
                None
            }
        }
    }

    fn page_ref(&self, wiki_tag: Option<&str>, fallback_title: Option<&str>) -> Option<PageRef> {
        if let Some(tag) = wiki_tag.map(str::trim).filter(|t| !t.is_empty()) {
            return Some(match tag.split_once(':') {
                Some((lang, title)) if is_language_code(lang) && !title.trim().is_empty() => {
                    PageRef {
                        language: lang.to_string(),
                        title: title.trim().to_string(),
                    }
                }
                _ => PageRef {
                    language: self.default_language.clone(),
                    title: tag.to_string(),
                },
            });
        }

        let title = fallback_title.map(str::trim).filter(|t| !t.is_empty())?;
        Some(PageRef {
            language: self.default_language.clone(),
            title: title.to_string(),
        })
    }

    async fn fetch(&self, page: &PageRef) -> Result<Option<String>> {
        let base = match &self.base_override {
            Some(base) => base.clone(),
            None => format!("https://{}.wikipedia.org", page.language),
        };

        let body: QueryResponse = self
            .api
            .get_json_from(
                &base,
                "/w/api.php",
                &[
                    ("action", "query"),
                    ("format", "json"),
                    ("formatversion", "2"),
                    ("prop", "pageimages"),
                    ("piprop", "thumbnail"),
                    ("pithumbsize", self.thumbnail_size.as_str()),
                    ("redirects", "1"),
                    ("titles", page.title.as_str()),
                ],
                &[],
            )
            .await?;

        Ok(body
            .query
            .and_then(|q| q.pages.into_iter().next())
            .and_then(|p| p.thumbnail)
            .map(|t| t.source)
            .filter(|s| !s.is_empty()))
    }
}

/// Wikipedia language prefixes are short ASCII codes such as `en`, `tr`, or
/// `zh-yue`. Anything else means the colon belongs to the title.
/// A 2-3 letter primary code with optional `-subtag`s (`en`, `zh-min-nan`).
fn is_language_code(prefix: &str) -> bool {
    let mut parts = prefix.split('-');
    let primary = parts.next().unwrap_or_default();
    (2..=3).contains(&primary.len())
        && primary.bytes().all(|b| b.is_ascii_lowercase())
        && parts.all(|sub| {
            (1..=8).contains(&sub.len()) && sub.bytes().all(|b| b.is_ascii_alphanumeric())
        })
}
