//! Wire shapes of the MediaWiki Action API (`formatversion=2`).
//!
//! Every response is decoded into these records once, in `fetch.rs`; nothing
//! downstream looks at raw JSON.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    #[serde(default)]
    pub info: String,
}

/* action=parse&prop=links */
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiParseResponse {
    #[serde(default)]
    pub error: Option<ApiError>,
    #[serde(default)]
    pub parse: Option<ApiParse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiParse {
    pub title: String,
    #[serde(default)]
    pub pageid: Option<i64>,
    pub links: Vec<ApiLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiLink {
    pub ns: i64,
    pub title: String,
    #[serde(default)]
    pub exists: bool,
}

/* action=query (prop=info | prop=extracts) */
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiQueryResponse {
    #[serde(default)]
    pub error: Option<ApiError>,
    #[serde(default)]
    pub query: Option<ApiQuery>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiQuery {
    #[serde(default)]
    pub normalized: Vec<ApiTitleMapping>,
    #[serde(default)]
    pub redirects: Vec<ApiTitleMapping>,
    #[serde(default)]
    pub pages: Vec<ApiPage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiTitleMapping {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiPage {
    #[serde(default)]
    pub pageid: Option<i64>,
    #[serde(default)]
    pub ns: i64,
    pub title: String,
    #[serde(default)]
    pub missing: bool,
    #[serde(default)]
    pub invalid: bool,
    #[serde(default)]
    pub length: Option<u64>,
    #[serde(default)]
    pub watchers: Option<u64>,
    #[serde(default)]
    pub visitingwatchers: Option<u64>,
    #[serde(default)]
    pub fullurl: Option<String>,
    #[serde(default)]
    pub extract: Option<String>,
}

impl ApiPage {
    /// Missing and invalid pages come back without a positive page id.
    pub fn exists(&self) -> bool {
        !self.missing && !self.invalid && self.pageid.map_or(false, |id| id > 0)
    }
}

/* action=opensearch: [query, [titles], [descriptions], [urls]] */
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiOpenSearch(pub String, pub Vec<String>, pub Vec<String>, pub Vec<String>);
