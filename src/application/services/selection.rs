use crate::application::models::account::AccountEntry;
use std::fmt::Debug;

/// Picks the account to crawl out of the search hits.
pub trait SelectionPolicy: Debug + Send + Sync {
    fn select<'a>(&self, query: &str, candidates: &'a [AccountEntry]) -> Option<&'a AccountEntry>;
}

/// Takes the first hit. The search endpoint ranks best match first, but a
/// fuzzy query matching several accounts will silently pick the top one.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstMatch;

impl SelectionPolicy for FirstMatch {
    fn select<'a>(&self, _query: &str, candidates: &'a [AccountEntry]) -> Option<&'a AccountEntry> {
        candidates.first()
    }
}

/// Prefers a hit whose nickname or alias equals the query, otherwise the first.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExactMatch;

impl SelectionPolicy for ExactMatch {
    fn select<'a>(&self, query: &str, candidates: &'a [AccountEntry]) -> Option<&'a AccountEntry> {
        let query = query.trim();
        candidates
            .iter()
            .find(|c| c.nickname == query || c.alias.as_deref() == Some(query))
            .or_else(|| candidates.first())
    }
}
