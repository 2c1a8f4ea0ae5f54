use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use url::Url;

/// Title of an article linked from the subject page.
pub type CandidateLink = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleMetadata {
    pub title: String,           // canonical title returned by the API
    pub length: u64,             // page size in bytes
    pub watchers: Option<u64>,   // None when withheld, never 0
    pub visiting_watchers: Option<u64>,
    pub url: Option<Url>,
    #[serde(skip)]
    pub missing: bool,           // nonexistent page, dropped before ranking
}

impl ArticleMetadata {
    pub fn new(title: impl Into<String>, length: u64) -> Self {
        Self {
            title: title.into(),
            length,
            watchers: None,
            visiting_watchers: None,
            url: None,
            missing: false,
        }
    }

    pub fn missing(title: impl Into<String>) -> Self {
        Self {
            missing: true,
            ..Self::new(title, 0)
        }
    }
}

/// Metadata ordered by byte length, largest first.
pub type RankedCandidateSet = Vec<ArticleMetadata>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub text: String,
}

impl Document {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }
}

/// Documents in insertion order. Index 0 is always the subject.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    docs: Vec<Document>,
}

impl Corpus {
    pub fn with_root(root: Document) -> Self {
        Self { docs: vec![root] }
    }

    /// Appends a candidate document. Titles already present are ignored so
    /// the root keeps index 0 even if the subject links to itself.
    pub fn push(&mut self, doc: Document) -> bool {
        if self.docs.iter().any(|d| d.title == doc.title) {
            return false;
        }
        self.docs.push(doc);
        true
    }

    pub fn root(&self) -> Option<&Document> {
        self.docs.first()
    }

    pub fn documents(&self) -> &[Document] {
        &self.docs
    }

    pub fn get(&self, title: &str) -> Option<&Document> {
        self.docs.iter().find(|d| d.title == title)
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTitle {
    pub title: String,
    pub similarity: f64, // [0.0, 1.0]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub title: String,
    pub description: String,
}

/// Ordered title -> description; insertion order is similarity rank.
pub type Deck = IndexMap<String, String>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckExport {
    pub subject: String,
    pub deck_size: usize,
    pub desc_length: usize,
    pub cards: Vec<ExportCard>,
}

impl DeckExport {
    pub fn deck(&self) -> Deck {
        self.cards
            .iter()
            .map(|c| (c.title.clone(), c.description.clone()))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportCard {
    pub rank: usize,
    pub title: String,
    pub similarity: f64,
    pub url: Option<Url>,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corpus_root_stays_first() {
        let mut corpus = Corpus::with_root(Document::new("A", "alpha"));
        assert!(corpus.push(Document::new("B", "beta")));
        assert!(!corpus.push(Document::new("A", "again")));
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.root().map(|d| d.title.as_str()), Some("A"));
        assert_eq!(corpus.get("A").map(|d| d.text.as_str()), Some("alpha"));
    }

    #[test]
    fn test_deck_follows_card_rank() {
        let card = |rank: usize, title: &str, description: &str| ExportCard {
            rank,
            title: title.to_string(),
            similarity: 1.0 / rank as f64,
            url: None,
            description: description.to_string(),
        };
        let export = DeckExport {
            subject: "Root".into(),
            deck_size: 2,
            desc_length: 3,
            cards: vec![card(1, "Zeta", "zed"), card(2, "Alpha", "alp")],
        };
        let deck = export.deck();
        assert_eq!(deck.keys().collect::<Vec<_>>(), vec!["Zeta", "Alpha"]);
        assert_eq!(deck["Alpha"], "alp");
    }

    #[test]
    fn test_missing_metadata_has_unknown_watchers() {
        let m = ArticleMetadata::missing("Nope");
        assert!(m.missing);
        assert_eq!(m.watchers, None);
        assert_eq!(m.visiting_watchers, None);
    }
}
