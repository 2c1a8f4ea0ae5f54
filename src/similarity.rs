//! TF-IDF vectors and cosine similarity against the subject document.
//!
//! Weighting: raw term counts times smoothed idf `ln((1 + n) / (1 + df)) + 1`,
//! each document vector L2-normalised. Terms are lowercase runs of two or more
//! word characters with stop words removed; phrase features are the n-grams
//! of lengths `1..=max_ngram` over that filtered sequence.

use regex::Regex;
use std::collections::HashMap;
use tracing::debug;

use crate::errors::{DeckError, Result};
use crate::models::{Corpus, ScoredTitle};
use crate::stopwords::is_stopword;

/// Sparse, L2-normalised document vector (term -> weight).
pub type TermVector = HashMap<String, f64>;

#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    token_re: Regex,
    max_ngram: usize,
}

impl TfidfVectorizer {
    pub fn new(max_ngram: usize) -> Result<Self> {
        if max_ngram == 0 {
            return Err(DeckError::invalid_config("max_ngram must be at least 1"));
        }
        let token_re = Regex::new(r"\b\w\w+\b")
            .map_err(|e| DeckError::invalid_config(e.to_string()))?;
        Ok(Self { token_re, max_ngram })
    }

    /// Terms of one document, n-grams included, with repeats.
    pub fn terms(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        let words: Vec<&str> = self
            .token_re
            .find_iter(&lower)
            .map(|m| m.as_str())
            .filter(|w| !is_stopword(w))
            .collect();

        let mut out = Vec::with_capacity(words.len() * self.max_ngram);
        for n in 1..=self.max_ngram.min(words.len().max(1)) {
            for window in words.windows(n) {
                out.push(window.join(" "));
            }
        }
        out
    }

    /// One normalised vector per document, over the vocabulary of all of them.
    pub fn fit_transform<S: AsRef<str>>(&self, docs: &[S]) -> Vec<TermVector> {
        let counts: Vec<HashMap<String, f64>> = docs
            .iter()
            .map(|d| {
                let mut tf: HashMap<String, f64> = HashMap::new();
                for term in self.terms(d.as_ref()) {
                    *tf.entry(term).or_insert(0.0) += 1.0;
                }
                tf
            })
            .collect();

        let mut df: HashMap<&str, usize> = HashMap::new();
        for tf in &counts {
            for term in tf.keys() {
                *df.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        let n = docs.len() as f64;
        let idf: HashMap<&str, f64> = df
            .iter()
            .map(|(term, &d)| (*term, ((1.0 + n) / (1.0 + d as f64)).ln() + 1.0))
            .collect();
        debug!("TF-IDF vocabulary - documents={}, terms={}", docs.len(), idf.len());

        counts
            .iter()
            .map(|tf| {
                let mut v: TermVector = tf
                    .iter()
                    .map(|(term, count)| (term.clone(), count * idf[term.as_str()]))
                    .collect();
                let norm = v.values().map(|w| w * w).sum::<f64>().sqrt();
                if norm > 0.0 {
                    v.values_mut().for_each(|w| *w /= norm);
                }
                v
            })
            .collect()
    }
}

/// Cosine of two normalised vectors; 0 when either is all zeros.
pub fn cosine(a: &TermVector, b: &TermVector) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let dot: f64 = small
        .iter()
        .filter_map(|(term, w)| large.get(term).map(|x| w * x))
        .sum();
    dot.clamp(0.0, 1.0)
}

/// Full n x n cosine matrix. Diagonal cells are `None`.
pub fn pairwise_similarity(vectors: &[TermVector]) -> Vec<Vec<Option<f64>>> {
    let n = vectors.len();
    let mut matrix = vec![vec![None; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let s = cosine(&vectors[i], &vectors[j]);
            matrix[i][j] = Some(s);
            matrix[j][i] = Some(s);
        }
    }
    matrix
}

/// Candidates ordered by similarity to the root, most similar first.
///
/// The root's own cell is skipped. Equal scores keep corpus order.
pub fn rank_by_similarity(corpus: &Corpus, max_ngram: usize) -> Result<Vec<ScoredTitle>> {
    let docs = corpus.documents();
    if docs.is_empty() {
        return Err(DeckError::no_candidates("corpus has no root document"));
    }

    let vectorizer = TfidfVectorizer::new(max_ngram)?;
    let texts: Vec<&str> = docs.iter().map(|d| d.text.as_str()).collect();
    let vectors = vectorizer.fit_transform(&texts);
    let matrix = pairwise_similarity(&vectors);

    let mut scored: Vec<ScoredTitle> = matrix[0]
        .iter()
        .zip(docs)
        .filter_map(|(cell, doc)| {
            cell.map(|similarity| ScoredTitle {
                title: doc.title.clone(),
                similarity,
            })
        })
        .collect();

    scored.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    Ok(scored)
}
