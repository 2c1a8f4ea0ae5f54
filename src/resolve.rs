use tracing::{debug, info, warn};

use crate::errors::{DeckError, Result};
use crate::fetch::TitleLookup;
use crate::normalize::normalize_term;

/// Turn a user term into an existing page title without prompting.
///
/// Direct lookup first, then the normalized term. When both miss, the error
/// carries open-search suggestions for the caller to show.
pub async fn resolve_subject<L: TitleLookup>(lookup: &L, term: &str) -> Result<String> {
    let term = term.trim();
    if term.is_empty() {
        return Err(DeckError::invalid_config("subject must not be empty"));
    }

    if let Some(title) = lookup.lookup_title(term).await? {
        info!("Subject resolved - term={}, title={}", term, title);
        return Ok(title);
    }

    let normalized = normalize_term(term);
    if normalized != term {
        debug!("Retrying with normalized term - term={}, normalized={}", term, normalized);
        if let Some(title) = lookup.lookup_title(&normalized).await? {
            info!("Subject resolved - term={}, title={}", term, title);
            return Ok(title);
        }
    }

    let suggestions = lookup.open_search(term).await?;
    warn!("Subject not found - term={}, suggestions={}", term, suggestions.len());
    Err(DeckError::subject_not_found(term, suggestions))
}
