use indexmap::IndexMap;
use tracing::{debug, info};

use crate::batch::plan_batches;
use crate::errors::{DeckError, Result};
use crate::fetch::BatchMetadataFetcher;
use crate::models::{ArticleMetadata, CandidateLink, RankedCandidateSet};

/// Fetch metadata for every candidate, one call per batch, and rank by size.
///
/// Results are keyed by the title the API returned, so a redirect and its
/// target collapse into one entry (first arrival wins).
pub async fn rank_by_length<F: BatchMetadataFetcher>(
    fetcher: &F,
    candidates: &[CandidateLink],
    batch_size: usize,
) -> Result<RankedCandidateSet> {
    let start = std::time::Instant::now();
    let batches = plan_batches(candidates, batch_size)?;
    debug!(
        "Metadata fetch starting - candidates={}, batches={}, batch_size={}",
        candidates.len(),
        batches.len(),
        batch_size
    );

    let mut merged: IndexMap<String, ArticleMetadata> = IndexMap::new();
    let mut dropped = 0usize;

    for (i, batch) in batches.iter().enumerate() {
        let results = fetcher.fetch_metadata(batch).await?;
        if results.is_empty() {
            debug!("Batch {} returned nothing", i + 1);
        }
        for meta in results {
            if meta.missing {
                dropped += 1;
                continue;
            }
            merged.entry(meta.title.clone()).or_insert(meta);
        }
    }

    let ranked = rank_metadata(merged.into_values());
    if ranked.is_empty() {
        return Err(DeckError::no_candidates(format!(
            "none of {} linked titles has page metadata",
            candidates.len()
        )));
    }

    info!(
        "Metadata ranking completed - duration={:.2}s, ranked={}, missing={}",
        start.elapsed().as_secs_f32(),
        ranked.len(),
        dropped
    );
    Ok(ranked)
}

/// Stable sort by byte length, largest first.
pub fn rank_metadata(metadata: impl IntoIterator<Item = ArticleMetadata>) -> RankedCandidateSet {
    let mut ranked: Vec<ArticleMetadata> = metadata.into_iter().filter(|m| !m.missing).collect();
    ranked.sort_by(|a, b| b.length.cmp(&a.length));
    ranked
}
