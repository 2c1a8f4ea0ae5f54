use tracing::debug;

use crate::models::{Card, Corpus, ScoredTitle};

/// Marker between the intro section and the first subsection in plain extracts.
pub const SECTION_BREAK: &str = "\n\n\n";

/// Bounded description from an article's full text.
///
/// `cap > 0` keeps the first `cap` characters. `cap == 0` keeps the intro up
/// to the first section break, or the whole text when there is none.
pub fn describe(text: &str, cap: usize) -> String {
    if cap > 0 {
        return text.chars().take(cap).collect();
    }
    match text.find(SECTION_BREAK) {
        Some(end) => text[..end].to_string(),
        None => text.to_string(),
    }
}

/// First `deck_size` titles of the similarity ordering, each with a description.
pub fn select_cards(ranked: &[ScoredTitle], corpus: &Corpus, deck_size: usize, cap: usize) -> Vec<Card> {
    if ranked.len() < deck_size {
        debug!("Fewer candidates than requested - requested={}, available={}", deck_size, ranked.len());
    }
    ranked
        .iter()
        .take(deck_size)
        .map(|s| Card {
            title: s.title.clone(),
            description: corpus
                .get(&s.title)
                .map(|d| describe(&d.text, cap))
                .unwrap_or_default(),
        })
        .collect()
}
