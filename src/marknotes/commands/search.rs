use crate::model::{days_before, Note};
use crate::state::AppState;
use chrono::{DateTime, Utc};
use std::str::FromStr;

/// Case-insensitive substring match on title, content or any tag.
///
/// A blank query returns every note. Trashed notes are NOT filtered out;
/// callers that want an active-only view filter on `deleted_at` themselves.
pub fn search_notes<'a>(state: &'a AppState, query: &str) -> Vec<&'a Note> {
    if query.trim().is_empty() {
        return state.notes.iter().collect();
    }
    let needle = query.to_lowercase();
    state
        .notes
        .iter()
        .filter(|n| matches_text(n, &needle))
        .collect()
}

fn matches_text(note: &Note, needle_lower: &str) -> bool {
    note.title.to_lowercase().contains(needle_lower)
        || note.content.to_lowercase().contains(needle_lower)
        || note
            .tags
            .iter()
            .any(|t| t.to_lowercase().contains(needle_lower))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryFilter {
    #[default]
    All,
    Favorites,
    /// Updated within the last `recent_days` of the query.
    Recent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuerySort {
    #[default]
    Relevance,
    Date,
    Title,
}

impl FromStr for QuerySort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "relevance" => Ok(QuerySort::Relevance),
            "date" => Ok(QuerySort::Date),
            "title" => Ok(QuerySort::Title),
            other => Err(format!(
                "Invalid sort: {} (expected relevance, date or title)",
                other
            )),
        }
    }
}

/// A search-panel query: text, required tags, a filter and a sort order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteQuery {
    pub text: String,
    /// Every listed tag must be present on the note.
    pub tags: Vec<String>,
    pub filter: QueryFilter,
    pub sort: QuerySort,
    pub recent_days: u32,
}

impl Default for NoteQuery {
    fn default() -> Self {
        Self {
            text: String::new(),
            tags: Vec::new(),
            filter: QueryFilter::All,
            sort: QuerySort::Relevance,
            recent_days: 7,
        }
    }
}

impl NoteQuery {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// Runs a [`NoteQuery`] against active notes.
pub fn query<'a>(state: &'a AppState, q: &NoteQuery, now: DateTime<Utc>) -> Vec<&'a Note> {
    let needle = q.text.trim().to_lowercase();

    let mut found: Vec<&Note> = state
        .notes
        .iter()
        .filter(|n| !n.is_trashed())
        .filter(|n| match q.filter {
            QueryFilter::All => true,
            QueryFilter::Favorites => n.is_favorite,
            QueryFilter::Recent => days_before(now, q.recent_days)
                .map(|cutoff| n.updated_at > cutoff)
                .unwrap_or(true),
        })
        .filter(|n| q.tags.iter().all(|t| n.has_tag(t)))
        .filter(|n| needle.is_empty() || matches_text(n, &needle))
        .collect();

    match q.sort {
        QuerySort::Date => found.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
        QuerySort::Title => {
            found.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        }
        QuerySort::Relevance if !needle.is_empty() => {
            found.sort_by_key(|n| std::cmp::Reverse(relevance(n, &needle)))
        }
        QuerySort::Relevance => {}
    }

    found
}

/// 10 points for a title hit, 5 for a content hit.
fn relevance(note: &Note, needle_lower: &str) -> u8 {
    let mut score = 0;
    if note.title.to_lowercase().contains(needle_lower) {
        score += 10;
    }
    if note.content.to_lowercase().contains(needle_lower) {
        score += 5;
    }
    score
}
