use itertools::Itertools;

use crate::errors::{DeckError, Result};

/// Separator the API uses between titles in a multi-title query.
pub const TITLE_SEPARATOR: char = '|';

/// Deduplicate titles keeping the first occurrence.
pub fn dedup_titles<S: AsRef<str>>(titles: impl IntoIterator<Item = S>) -> Vec<String> {
    titles
        .into_iter()
        .map(|t| t.as_ref().to_string())
        .unique()
        .collect()
}

/// Split titles into groups of at most `capacity`, every title exactly once.
///
/// A trailing group that is exactly `capacity` long is still emitted. Titles
/// containing the separator are rejected rather than silently split in two.
pub fn plan_batches(titles: &[String], capacity: usize) -> Result<Vec<Vec<String>>> {
    if capacity == 0 {
        return Err(DeckError::invalid_config("batch capacity must be at least 1"));
    }
    if let Some(bad) = titles.iter().find(|t| t.contains(TITLE_SEPARATOR)) {
        return Err(DeckError::invalid_title(
            bad.clone(),
            format!("contains the reserved separator '{}'", TITLE_SEPARATOR),
        ));
    }

    Ok(titles.chunks(capacity).map(|c| c.to_vec()).collect())
}

/// Join one group into the `titles=` query value.
pub fn join_batch(batch: &[String]) -> String {
    batch.iter().join(&TITLE_SEPARATOR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("Title {}", i)).collect()
    }

    #[test]
    fn test_exact_multiple_keeps_last_group() {
        let batches = plan_batches(&titles(50), 50).unwrap();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].len(), 50);

        let batches = plan_batches(&titles(100), 50).unwrap();
        assert_eq!(batches.len(), 2);
        assert!(batches.iter().all(|b| b.len() == 50));
    }

    #[test]
    fn test_remainder_group() {
        let batches = plan_batches(&titles(51), 50).unwrap();
        assert_eq!(batches.iter().map(Vec::len).collect::<Vec<_>>(), vec![50, 1]);
    }

    #[test]
    fn test_empty_input_gives_no_groups() {
        assert!(plan_batches(&[], 50).unwrap().is_empty());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            plan_batches(&titles(3), 0),
            Err(DeckError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_separator_in_title_rejected() {
        let input = vec!["Fine".to_string(), "Bad|Title".to_string()];
        match plan_batches(&input, 50) {
            Err(DeckError::InvalidTitle { title, .. }) => assert_eq!(title, "Bad|Title"),
            other => panic!("expected InvalidTitle, got {:?}", other),
        }
    }

    #[test]
    fn test_dedup_and_join() {
        let deduped = dedup_titles(["B", "A", "B", "C", "A"]);
        assert_eq!(deduped, vec!["B", "A", "C"]);
        assert_eq!(join_batch(&deduped), "B|A|C");
    }
}
