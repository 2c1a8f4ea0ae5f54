use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use url::Url;

use crate::api_types::*;
use crate::batch::{dedup_titles, join_batch, TITLE_SEPARATOR};
use crate::config::ClientConfig;
use crate::errors::{DeckError, Result};
use crate::models::{ArticleMetadata, CandidateLink};

/// Lists eligible article links on the subject page.
#[allow(async_fn_in_trait)]
pub trait LinkLister {
    async fn get_links(&self, subject: &str) -> Result<Vec<CandidateLink>>;
}

/// Size/popularity metadata for one batch of titles, in arrival order.
/// Redirects are resolved; nonexistent pages come back flagged `missing`.
#[allow(async_fn_in_trait)]
pub trait BatchMetadataFetcher {
    async fn fetch_metadata(&self, batch: &[String]) -> Result<Vec<ArticleMetadata>>;
}

/// Full plain text of one article; empty when there is nothing to extract.
#[allow(async_fn_in_trait)]
pub trait TextFetcher {
    async fn fetch_text(&self, title: &str) -> Result<String>;
}

/// Direct lookup and fuzzy search used to resolve a user term.
#[allow(async_fn_in_trait)]
pub trait TitleLookup {
    /// Canonical title when the term names an existing page.
    async fn lookup_title(&self, term: &str) -> Result<Option<String>>;
    async fn open_search(&self, term: &str) -> Result<Vec<String>>;
}

/// MediaWiki Action API client. Owns one HTTP session for the whole run.
pub struct WikiClient {
    client: Client,
    api_url: String,
}

impl WikiClient {
    pub fn new(cfg: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(cfg.user_agent.clone())
            .timeout(cfg.timeout)
            .connect_timeout(cfg.connect_timeout)
            .build()?;
        debug!("HTTP session opened - api_url={}, timeout={:?}", cfg.api_url, cfg.timeout);
        Ok(Self {
            client,
            api_url: cfg.api_url.clone(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str, params: &[(&str, String)]) -> Result<T> {
        let start = std::time::Instant::now();

        let resp = self
            .client
            .get(&self.api_url)
            .query(&[("format", "json"), ("formatversion", "2")])
            .query(params)
            .send()
            .await?
            .error_for_status()?;

        let body = resp.bytes().await?;
        let decoded = serde_json::from_slice(&body)
            .map_err(|e| DeckError::malformed(endpoint, e.to_string()))?;

        debug!(
            "API call completed - endpoint={}, duration={:.2}s, bytes={}",
            endpoint,
            start.elapsed().as_secs_f32(),
            body.len()
        );
        Ok(decoded)
    }

    async fn query(&self, params: &[(&str, String)]) -> Result<ApiQuery> {
        let resp: ApiQueryResponse = self.get_json("query", params).await?;
        if let Some(err) = resp.error {
            return Err(DeckError::malformed("query", format!("{}: {}", err.code, err.info)));
        }
        resp.query
            .ok_or_else(|| DeckError::malformed("query", "response has no 'query' object"))
    }
}

impl LinkLister for WikiClient {
    async fn get_links(&self, subject: &str) -> Result<Vec<CandidateLink>> {
        let params = [
            ("action", "parse".to_string()),
            ("prop", "links".to_string()),
            ("page", subject.to_string()),
            ("redirects", "1".to_string()),
        ];
        let resp: ApiParseResponse = self.get_json("parse", &params).await?;

        if let Some(err) = resp.error {
            warn!("Link listing failed - subject={}, code={}", subject, err.code);
            let suggestions = self.open_search(subject).await?;
            return Err(DeckError::subject_not_found(subject, suggestions));
        }
        let parse = resp
            .parse
            .ok_or_else(|| DeckError::malformed("parse", "response has no 'parse' object"))?;

        let total = parse.links.len();
        let kept = dedup_titles(
            parse
                .links
                .into_iter()
                .filter(|l| l.ns == 0 && l.exists)
                .map(|l| l.title),
        );

        info!(
            "Links listed - subject={}, total={}, eligible={}",
            parse.title,
            total,
            kept.len()
        );
        Ok(kept)
    }
}

impl BatchMetadataFetcher for WikiClient {
    async fn fetch_metadata(&self, batch: &[String]) -> Result<Vec<ArticleMetadata>> {
        let params = [
            ("action", "query".to_string()),
            ("prop", "info".to_string()),
            ("inprop", "url|watchers|visitingwatchers".to_string()),
            ("titles", join_batch(batch)),
            ("redirects", "1".to_string()),
        ];
        let query = self.query(&params).await?;

        if !query.redirects.is_empty() {
            debug!("Batch redirects resolved - count={}", query.redirects.len());
        }

        query.pages.into_iter().map(page_metadata).collect()
    }
}

fn page_metadata(page: ApiPage) -> Result<ArticleMetadata> {
    if !page.exists() {
        return Ok(ArticleMetadata::missing(page.title));
    }
    let length = page.length.ok_or_else(|| {
        DeckError::malformed("query", format!("page '{}' has no length", page.title))
    })?;
    Ok(ArticleMetadata {
        title: page.title,
        length,
        watchers: page.watchers,
        visiting_watchers: page.visitingwatchers,
        url: page.fullurl.as_deref().and_then(|u| Url::parse(u).ok()),
        missing: false,
    })
}

/// A user-supplied title must not expand into a multi-title query.
fn single_title(title: &str) -> Result<String> {
    if title.contains(TITLE_SEPARATOR) {
        return Err(DeckError::invalid_title(
            title,
            format!("contains the reserved separator '{}'", TITLE_SEPARATOR),
        ));
    }
    Ok(title.to_string())
}

impl TextFetcher for WikiClient {
    async fn fetch_text(&self, title: &str) -> Result<String> {
        let params = [
            ("action", "query".to_string()),
            ("prop", "extracts".to_string()),
            ("explaintext", "1".to_string()),
            ("exlimit", "1".to_string()),
            ("titles", single_title(title)?),
            ("redirects", "1".to_string()),
        ];
        let query = self.query(&params).await?;

        let text = query
            .pages
            .into_iter()
            .find(ApiPage::exists)
            .and_then(|p| p.extract)
            .unwrap_or_default();

        if text.is_empty() {
            debug!("No extract - title={}", title);
        }
        Ok(text)
    }
}

impl TitleLookup for WikiClient {
    async fn lookup_title(&self, term: &str) -> Result<Option<String>> {
        let params = [
            ("action", "query".to_string()),
            ("prop", "info".to_string()),
            ("titles", single_title(term)?),
            ("redirects", "1".to_string()),
        ];
        let query = self.query(&params).await?;
        Ok(query.pages.into_iter().find(ApiPage::exists).map(|p| p.title))
    }

    async fn open_search(&self, term: &str) -> Result<Vec<String>> {
        let params = [
            ("action", "opensearch".to_string()),
            ("search", term.to_string()),
            ("redirects", "resolve".to_string()),
        ];
        let ApiOpenSearch(_, titles, _, _) = self.get_json::<ApiOpenSearch>("opensearch", &params).await?;
        debug!("Open search - term={}, suggestions={}", term, titles.len());
        Ok(titles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_metadata_keeps_unknown_watchers() {
        let page: ApiPage = serde_json::from_str(
            r#"{"pageid":7,"ns":0,"title":"Quiet page","length":321,"fullurl":"https://en.wikipedia.org/wiki/Quiet_page"}"#,
        )
        .unwrap();
        let meta = page_metadata(page).unwrap();
        assert_eq!(meta.length, 321);
        assert_eq!(meta.watchers, None);
        assert_eq!(meta.visiting_watchers, None);
        assert_eq!(
            meta.url.map(|u| u.to_string()),
            Some("https://en.wikipedia.org/wiki/Quiet_page".to_string())
        );
    }

    #[test]
    fn test_page_metadata_flags_missing() {
        let page: ApiPage = serde_json::from_str(r#"{"ns":0,"title":"Ghost","missing":true}"#).unwrap();
        assert!(page_metadata(page).unwrap().missing);
    }

    #[test]
    fn test_existing_page_without_length_is_malformed() {
        let page: ApiPage = serde_json::from_str(r#"{"pageid":9,"ns":0,"title":"Odd"}"#).unwrap();
        assert!(matches!(
            page_metadata(page),
            Err(DeckError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_single_title_rejects_separator() {
        assert_eq!(single_title("Cat").unwrap(), "Cat");
        assert!(matches!(
            single_title("Cat|Dog"),
            Err(DeckError::InvalidTitle { .. })
        ));
    }
}
