//! Heuristic relevance scoring
//!
//! Scores a candidate against the query with token and substring checks over
//! the candidate's searchable attributes. The weights establish a strict order:
//! exact match > prefix match > substring containment > partial token overlap.
//! Multi-word queries still reward documents that contain every word out of
//! order.

use super::normalize::normalize;

/// Awarded per query token found anywhere in the candidate
pub const TOKEN_MATCH_WEIGHT: u32 = 18;
/// Awarded when every query token was found
pub const ALL_TOKENS_BONUS: u32 = 28;
/// Awarded when the whole query appears inside the candidate
pub const SUBSTRING_BONUS: u32 = 20;
/// Awarded when the candidate starts with the whole query
pub const PREFIX_BONUS: u32 = 20;
/// Awarded when the candidate is exactly the query
pub const EXACT_BONUS: u32 = 40;

/// Score returned for an empty query, where matching everything is allowed
pub const MATCH_ALL_SCORE: u32 = 1;

/// Score `field_values` against `query`; 0 means "not a match"
///
/// `query` is normalized here, so raw user text is accepted.
pub fn score<S: AsRef<str>>(query: &str, field_values: &[S]) -> u32 {
    score_normalized(&normalize(query), field_values)
}

/// [`score`] for a query that is already normalized
pub(crate) fn score_normalized<S: AsRef<str>>(query: &str, field_values: &[S]) -> u32 {
    if query.is_empty() {
        return MATCH_ALL_SCORE;
    }

    let blob = field_values
        .iter()
        .map(|v| normalize(v.as_ref()))
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if blob.is_empty() {
        return 0;
    }

    let tokens: Vec<&str> = query.split_whitespace().collect();
    if tokens.is_empty() {
        return 0;
    }

    let exact = blob == query;
    let starts = blob.starts_with(query);
    let includes = blob.contains(query);
    let token_matches = tokens.iter().filter(|t| blob.contains(**t)).count() as u32;

    if token_matches == 0 && !includes {
        return 0;
    }

    let mut total = token_matches * TOKEN_MATCH_WEIGHT;
    if token_matches as usize == tokens.len() {
        total += ALL_TOKENS_BONUS;
    }
    if includes {
        total += SUBSTRING_BONUS;
    }
    if starts {
        total += PREFIX_BONUS;
    }
    if exact {
        total += EXACT_BONUS;
    }
    total
}

/// A document together with its relevance score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate<'a, T> {
    pub document: &'a T,
    pub score: u32,
}

/// Score, filter and order `documents`, keeping at most `limit`
///
/// Zero-score documents are dropped. Ties keep their input order (the sort is
/// stable), so equally relevant documents stay newest-first.
pub fn rank_documents<'a, T, F>(
    documents: impl IntoIterator<Item = &'a T>,
    query: &str,
    field_selector: F,
    limit: usize,
) -> Vec<&'a T>
where
    T: 'a,
    F: Fn(&T) -> Vec<String>,
{
    let query = normalize(query);
    let mut scored: Vec<ScoredCandidate<'a, T>> = documents
        .into_iter()
        .map(|document| ScoredCandidate {
            score: score_normalized(&query, &field_selector(document)),
            document,
        })
        .filter(|candidate| candidate.score > 0)
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(limit);
    scored.into_iter().map(|c| c.document).collect()
}
