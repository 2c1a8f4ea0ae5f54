use std::time::Duration;

use crate::errors::{DeckError, Result};

pub const DEFAULT_API_URL: &str = "https://en.wikipedia.org/w/api.php";
pub const DEFAULT_USER_AGENT: &str = concat!("flashdeck/", env!("CARGO_PKG_VERSION"));

/// Upstream hard limit on titles per `action=query` call.
pub const MAX_BATCH_SIZE: usize = 50;

#[derive(Debug, Clone)]
pub struct DeckParams {
    pub deck_size: usize,           // cards requested
    pub desc_length: usize,         // 0 = whole intro section
    pub fetch_multiplier: usize,    // candidates fetched per requested card
    pub batch_size: usize,          // titles per metadata call
    pub max_ngram: usize,           // phrase features 1..=max_ngram
    pub excluded_prefixes: Vec<String>,
}

impl Default for DeckParams {
    fn default() -> Self {
        Self {
            deck_size: 10,
            desc_length: 300,
            fetch_multiplier: 10,
            batch_size: MAX_BATCH_SIZE,
            max_ngram: 3,
            excluded_prefixes: ["List of", "History of", "Timeline of", "Glossary of"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl DeckParams {
    pub fn validate(&self) -> Result<()> {
        if self.deck_size == 0 {
            return Err(DeckError::invalid_config("deck_size must be at least 1"));
        }
        if self.fetch_multiplier == 0 {
            return Err(DeckError::invalid_config("fetch_multiplier must be at least 1"));
        }
        if self.batch_size == 0 || self.batch_size > MAX_BATCH_SIZE {
            return Err(DeckError::invalid_config(format!(
                "batch_size must be between 1 and {}",
                MAX_BATCH_SIZE
            )));
        }
        if self.max_ngram == 0 {
            return Err(DeckError::invalid_config("max_ngram must be at least 1"));
        }
        Ok(())
    }

    pub fn is_excluded(&self, title: &str) -> bool {
        self.excluded_prefixes.iter().any(|p| title.starts_with(p.as_str()))
    }

    /// Upper bound on documents pulled into the corpus (root excluded).
    pub fn candidate_pool(&self) -> usize {
        self.deck_size.saturating_mul(self.fetch_multiplier)
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `FLASHDECK_API_URL` / `FLASHDECK_USER_AGENT`.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(url) = std::env::var("FLASHDECK_API_URL") {
            cfg.api_url = url;
        }
        if let Ok(ua) = std::env::var("FLASHDECK_USER_AGENT") {
            cfg.user_agent = ua;
        }
        cfg
    }
}
