use tracing::{debug, info};

use crate::errors::Result;
use crate::fetch::TextFetcher;
use crate::models::{Corpus, Document, RankedCandidateSet};

/// Fetch full text for the subject and the top `pool` ranked candidates.
///
/// The subject is always document 0. A candidate whose text comes back empty
/// still joins the corpus as an empty document; it will simply score 0.
pub async fn assemble_corpus<T: TextFetcher>(
    fetcher: &T,
    subject: &str,
    ranked: &RankedCandidateSet,
    pool: usize,
) -> Result<Corpus> {
    let start = std::time::Instant::now();
    let take = pool.min(ranked.len());
    debug!(
        "Corpus assembly starting - subject={}, ranked={}, fetching={}",
        subject,
        ranked.len(),
        take
    );

    let root_text = fetcher.fetch_text(subject).await?;
    let mut corpus = Corpus::with_root(Document::new(subject, root_text));

    let mut empty = 0usize;
    for meta in ranked.iter().take(take) {
        let text = fetcher.fetch_text(&meta.title).await?;
        if text.is_empty() {
            empty += 1;
        }
        if !corpus.push(Document::new(meta.title.clone(), text)) {
            debug!("Skipping duplicate corpus title - title={}", meta.title);
        }
    }

    info!(
        "Corpus assembled - duration={:.2}s, documents={}, empty={}",
        start.elapsed().as_secs_f32(),
        corpus.len(),
        empty
    );
    Ok(corpus)
}
