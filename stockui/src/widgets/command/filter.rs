//! Deciding which command items match the query.

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};
use thiserror::Error;

use crate::primitive::ItemDescriptor;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The caller's predicate rejected the query.
    #[error("command filter failed: {0}")]
    Filter(String),
}

/// Chooses and orders the visible items for a non-empty query.
///
/// An empty query never reaches the filter; every item is shown.
pub trait Filter: Send + Sync {
    /// Indices into `items` of the matches, in display order.
    fn filter(&self, query: &str, items: &[ItemDescriptor]) -> Result<Vec<usize>, CommandError>;
}

/// Case-insensitive substring match, keeping the original order.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringFilter;

impl Filter for SubstringFilter {
    fn filter(&self, query: &str, items: &[ItemDescriptor]) -> Result<Vec<usize>, CommandError> {
        let needle = query.to_lowercase();
        Ok(items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.label.to_lowercase().contains(&needle))
            .map(|(index, _)| index)
            .collect())
    }
}

/// Fuzzy match, best score first.
#[derive(Debug, Clone, Copy, Default)]
pub struct FuzzyFilter;

impl Filter for FuzzyFilter {
    fn filter(&self, query: &str, items: &[ItemDescriptor]) -> Result<Vec<usize>, CommandError> {
        let labels: Vec<&str> = items.iter().map(|item| item.label.as_str()).collect();
        Ok(fuzzy_filter(query, &labels)
            .into_iter()
            .map(|m| m.index)
            .collect())
    }
}

/// A per-item predicate supplied by the caller. An `Err` aborts filtering and
/// is handed back to whoever changed the query.
pub struct PredicateFilter<F>(pub F);

impl<F> Filter for PredicateFilter<F>
where
    F: Fn(&str, &ItemDescriptor) -> Result<bool, String> + Send + Sync,
{
    fn filter(&self, query: &str, items: &[ItemDescriptor]) -> Result<Vec<usize>, CommandError> {
        let mut matches = Vec::new();
        for (index, item) in items.iter().enumerate() {
            if (self.0)(query, item).map_err(CommandError::Filter)? {
                matches.push(index);
            }
        }
        Ok(matches)
    }
}

/// One fuzzy hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterMatch {
    /// Position in the input slice.
    pub index: usize,
    /// Higher is better.
    pub score: u32,
}

/// Score `labels` against `query` with nucleo, best first. Ties keep input
/// order. An empty query matches everything with score 0.
pub fn fuzzy_filter(query: &str, labels: &[&str]) -> Vec<FilterMatch> {
    if query.is_empty() {
        return (0..labels.len())
            .map(|index| FilterMatch { index, score: 0 })
            .collect();
    }

    let mut matcher = Matcher::new(Config::DEFAULT);
    let pattern = Pattern::new(
        query,
        CaseMatching::Ignore,
        Normalization::Smart,
        AtomKind::Fuzzy,
    );

    let mut buf = Vec::new();
    let mut matches: Vec<FilterMatch> = labels
        .iter()
        .enumerate()
        .filter_map(|(index, label)| {
            let haystack = Utf32Str::new(label, &mut buf);
            pattern
                .score(haystack, &mut matcher)
                .map(|score| FilterMatch { index, score })
        })
        .collect();

    // Stable, so equal scores stay in list order.
    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches
}
