use tracing::{debug, info};

use crate::config::DeckParams;
use crate::corpus::assemble_corpus;
use crate::deck::{describe, select_cards};
use crate::errors::{DeckError, Result};
use crate::fetch::{BatchMetadataFetcher, LinkLister, TextFetcher, TitleLookup};
use crate::models::{DeckExport, ExportCard};
use crate::rank::rank_by_length;
use crate::resolve::resolve_subject;
use crate::similarity::rank_by_similarity;

/// Build a deck for an already resolved subject title.
///
/// links -> metadata ranking -> corpus -> TF-IDF ranking -> card selection.
/// Each network call is awaited before the next is issued.
pub async fn generate_deck<C>(source: &C, subject: &str, params: &DeckParams) -> Result<DeckExport>
where
    C: LinkLister + BatchMetadataFetcher + TextFetcher,
{
    params.validate()?;
    let pipeline_start = std::time::Instant::now();
    info!(
        "Pipeline started - subject={}, deck_size={}, multiplier={}",
        subject, params.deck_size, params.fetch_multiplier
    );

    // 1) candidate links, minus excluded title patterns
    let listed = source.get_links(subject).await?;
    let total = listed.len();
    let links: Vec<_> = listed.into_iter().filter(|t| !params.is_excluded(t)).collect();
    if links.len() < total {
        debug!("Excluded links dropped - subject={}, dropped={}", subject, total - links.len());
    }
    if links.is_empty() {
        return Err(DeckError::no_candidates(format!(
            "'{}' links to no eligible articles",
            subject
        )));
    }

    // 2) size ranking
    let ranked = rank_by_length(source, &links, params.batch_size).await?;

    // 3) corpus: subject + top deck_size * multiplier by size
    let corpus = assemble_corpus(source, subject, &ranked, params.candidate_pool()).await?;

    // 4) similarity to the subject
    let sim_start = std::time::Instant::now();
    let scored = rank_by_similarity(&corpus, params.max_ngram)?;
    info!(
        "Similarity ranking completed - duration={:.2}s, candidates={}",
        sim_start.elapsed().as_secs_f32(),
        scored.len()
    );

    // 5) cards
    let cards = select_cards(&scored, &corpus, params.deck_size, params.desc_length);
    let cards: Vec<ExportCard> = cards
        .into_iter()
        .zip(&scored)
        .enumerate()
        .map(|(i, (card, score))| ExportCard {
            rank: i + 1,
            url: ranked
                .iter()
                .find(|m| m.title == card.title)
                .and_then(|m| m.url.clone()),
            similarity: score.similarity,
            title: card.title,
            description: card.description,
        })
        .collect();

    for c in &cards {
        debug!("Card {} - title={}, similarity={:.4}", c.rank, c.title, c.similarity);
    }
    info!(
        "Pipeline completed successfully - total_duration={:.2}s, cards={}",
        pipeline_start.elapsed().as_secs_f32(),
        cards.len()
    );

    Ok(DeckExport {
        subject: subject.to_string(),
        deck_size: params.deck_size,
        desc_length: params.desc_length,
        cards,
    })
}

/// Resolve a raw term, then build its deck.
pub async fn run_deck<C>(source: &C, term: &str, params: &DeckParams) -> Result<DeckExport>
where
    C: TitleLookup + LinkLister + BatchMetadataFetcher + TextFetcher,
{
    let subject = resolve_subject(source, term).await?;
    generate_deck(source, &subject, params).await
}

/// Intro extract for a single term, bounded like a card description.
pub async fn define_term<C>(source: &C, term: &str, desc_length: usize) -> Result<(String, String)>
where
    C: TitleLookup + TextFetcher,
{
    let title = resolve_subject(source, term).await?;
    let text = source.fetch_text(&title).await?;
    Ok((title, describe(&text, desc_length)))
}
