//! Error types for flashdeck
//!
//! Every failure the deck pipeline can surface is one variant of [`DeckError`].
//! Missing watcher counts and empty article text are not errors; they are
//! absorbed where they are decoded.

use thiserror::Error;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, DeckError>;

/// Main error type for flashdeck
#[derive(Error, Debug)]
pub enum DeckError {
    /// The subject (or a lookup term) has no matching page
    #[error("No page matches '{term}'")]
    SubjectNotFound {
        term: String,
        /// Similarly-titled pages from open search, possibly empty
        suggestions: Vec<String>,
    },

    /// Filtering or metadata lookup left nothing to rank
    #[error("No viable candidates: {message}")]
    NoCandidates { message: String },

    /// The API answered with a shape we could not decode
    #[error("Malformed response from {endpoint}: {message}")]
    MalformedResponse { endpoint: String, message: String },

    /// A title cannot be sent in a batched query
    #[error("Invalid title '{title}': {message}")]
    InvalidTitle { title: String, message: String },

    /// Deck parameters failed validation
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Transport level failure (connect, timeout, HTTP status)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl DeckError {
    /// Create a subject-not-found error
    pub fn subject_not_found(term: impl Into<String>, suggestions: Vec<String>) -> Self {
        Self::SubjectNotFound {
            term: term.into(),
            suggestions,
        }
    }

    /// Create a no candidates error
    pub fn no_candidates(message: impl Into<String>) -> Self {
        Self::NoCandidates {
            message: message.into(),
        }
    }

    /// Create a malformed response error
    pub fn malformed(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Create an invalid title error
    pub fn invalid_title(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidTitle {
            title: title.into(),
            message: message.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Whether the caller should retry with a different subject
    /// (the subject is unknown or nothing around it is usable).
    pub fn needs_fallback(&self) -> bool {
        matches!(self, Self::SubjectNotFound { .. } | Self::NoCandidates { .. })
    }

    /// Suggestions attached to a resolution failure, empty otherwise
    pub fn suggestions(&self) -> &[String] {
        match self {
            Self::SubjectNotFound { suggestions, .. } => suggestions,
            _ => &[],
        }
    }
}

impl From<serde_json::Error> for DeckError {
    fn from(err: serde_json::Error) -> Self {
        Self::malformed("json", err.to_string())
    }
}
