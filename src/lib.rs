//! # flashdeck
//!
//! Builds a small flashcard deck of topics related to a subject article.
//!
//! Linked articles are ranked by size, the largest are fetched as plain
//! text, and the final cards are the ones whose TF-IDF vectors sit closest
//! to the subject's.

pub mod api_types;
pub mod batch;
pub mod config;
pub mod corpus;
pub mod deck;
pub mod errors;
pub mod fetch;
pub mod models;
pub mod normalize;
pub mod orchestrator;
pub mod rank;
pub mod render;
pub mod resolve;
pub mod similarity;
pub mod stopwords;

pub use config::{ClientConfig, DeckParams};
pub use errors::{DeckError, Result};
pub use fetch::{BatchMetadataFetcher, LinkLister, TextFetcher, TitleLookup, WikiClient};
pub use models::{ArticleMetadata, Card, Corpus, Deck, DeckExport, Document, ScoredTitle};
pub use orchestrator::{define_term, generate_deck, run_deck};
