//! # Display Indexes
//!
//! Notes are identified by UUIDs, which nobody wants to type. Clients show
//! short, positional indexes instead and translate them back here.
//!
//! - `1`, `2`, ...: active notes, newest first by creation time
//! - `f1`, `f2`, ...: active favorites (a favorite also keeps its regular index)
//! - `d1`, `d2`, ...: notes in the trash
//!
//! Creation time is used for ordering because it never changes, so an index
//! stays put while a note is being edited.

use crate::error::{MarknotesError, Result};
use crate::model::Note;
use crate::state::AppState;
use std::str::FromStr;
use uuid::Uuid;

/// A user-facing index for a note.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DisplayIndex {
    Favorite(usize),
    Regular(usize),
    Deleted(usize),
}

impl std::fmt::Display for DisplayIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayIndex::Favorite(i) => write!(f, "f{}", i),
            DisplayIndex::Regular(i) => write!(f, "{}", i),
            DisplayIndex::Deleted(i) => write!(f, "d{}", i),
        }
    }
}

impl FromStr for DisplayIndex {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if let Some(rest) = s.strip_prefix('f') {
            if let Ok(n) = rest.parse() {
                return Ok(DisplayIndex::Favorite(n));
            }
        }
        if let Some(rest) = s.strip_prefix('d') {
            if let Ok(n) = rest.parse() {
                return Ok(DisplayIndex::Deleted(n));
            }
        }
        if let Ok(n) = s.parse() {
            return Ok(DisplayIndex::Regular(n));
        }
        Err(format!("Invalid index format: {}", s))
    }
}

/// A user input that selects notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteSelector {
    Index(DisplayIndex),
    /// Inclusive, both ends of the same kind.
    Range(DisplayIndex, DisplayIndex),
    Id(Uuid),
    Title(String),
}

impl std::fmt::Display for NoteSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoteSelector::Index(idx) => write!(f, "{}", idx),
            NoteSelector::Range(start, end) => write!(f, "{}-{}", start, end),
            NoteSelector::Id(id) => write!(f, "{}", id),
            NoteSelector::Title(t) => write!(f, "\"{}\"", t),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayNote {
    pub note: Note,
    pub index: DisplayIndex,
}

/// Assigns display indexes. Favorites appear twice: once as `f<n>` and once
/// with their regular index.
///
/// The returned list is ordered: favorites, then regular, then deleted.
pub fn index_notes(notes: &[Note]) -> Vec<DisplayNote> {
    let mut sorted: Vec<&Note> = notes.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let favorites = sorted
        .iter()
        .filter(|n| n.is_favorite && !n.is_trashed())
        .enumerate()
        .map(|(i, n)| DisplayNote {
            note: (*n).clone(),
            index: DisplayIndex::Favorite(i + 1),
        });
    let regular = sorted
        .iter()
        .filter(|n| !n.is_trashed())
        .enumerate()
        .map(|(i, n)| DisplayNote {
            note: (*n).clone(),
            index: DisplayIndex::Regular(i + 1),
        });
    let deleted = sorted
        .iter()
        .filter(|n| n.is_trashed())
        .enumerate()
        .map(|(i, n)| DisplayNote {
            note: (*n).clone(),
            index: DisplayIndex::Deleted(i + 1),
        });

    favorites.chain(regular).chain(deleted).collect()
}

/// Parses a single index or a same-kind range such as `2-4` or `d1-d3`.
///
/// Ranges stay as their two endpoints and are only walked in [`resolve`],
/// against the notes that actually exist.
pub fn parse_index_or_range(s: &str) -> std::result::Result<NoteSelector, String> {
    if let Some(dash_pos) = s.find('-') {
        if dash_pos > 0 {
            let start = DisplayIndex::from_str(&s[..dash_pos])?;
            let end = DisplayIndex::from_str(&s[dash_pos + 1..])?;
            check_range(&start, &end)?;
            return Ok(NoteSelector::Range(start, end));
        }
    }
    DisplayIndex::from_str(s).map(NoteSelector::Index)
}

fn check_range(start: &DisplayIndex, end: &DisplayIndex) -> std::result::Result<(), String> {
    let (s, e) = match (start, end) {
        (DisplayIndex::Regular(s), DisplayIndex::Regular(e))
        | (DisplayIndex::Favorite(s), DisplayIndex::Favorite(e))
        | (DisplayIndex::Deleted(s), DisplayIndex::Deleted(e)) => (s, e),
        _ => {
            return Err(format!(
                "Invalid range: cannot mix index types ({} and {})",
                start, end
            ))
        }
    };
    if s > e {
        return Err(format!(
            "Invalid range: start ({}) must be <= end ({})",
            start, end
        ));
    }
    Ok(())
}

/// Turns raw user arguments into selectors.
///
/// If every argument is an index, range or UUID they are used as such.
/// Otherwise all arguments are joined into one title search.
pub fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Vec<NoteSelector> {
    let mut selectors = Vec::new();
    for input in inputs {
        let raw = input.as_ref();
        if let Ok(selector) = parse_index_or_range(raw) {
            selectors.push(selector);
        } else if let Ok(id) = Uuid::parse_str(raw) {
            selectors.push(NoteSelector::Id(id));
        } else {
            let term = inputs
                .iter()
                .map(|s| s.as_ref())
                .collect::<Vec<&str>>()
                .join(" ");
            return vec![NoteSelector::Title(term)];
        }
    }
    selectors
}

/// Resolves selectors against the state. Unlike store operations, a
/// selector that matches nothing is an error: the user typed it.
pub fn resolve(state: &AppState, selectors: &[NoteSelector]) -> Result<Vec<DisplayNote>> {
    let indexed = index_notes(&state.notes);
    let mut results = Vec::new();

    for sel in selectors {
        match sel {
            NoteSelector::Index(idx) => results.push(indexed[position_of(&indexed, idx)?].clone()),
            NoteSelector::Range(start, end) => {
                let start_pos = position_of(&indexed, start)?;
                let end_pos = position_of(&indexed, end)?;
                results.extend(indexed[start_pos..=end_pos].iter().cloned());
            }
            NoteSelector::Id(id) => {
                let found = indexed
                    .iter()
                    .filter(|dn| !matches!(dn.index, DisplayIndex::Favorite(_)))
                    .find(|dn| &dn.note.id == id)
                    .ok_or_else(|| MarknotesError::Api(format!("No note with id {}", id)))?;
                results.push(found.clone());
            }
            NoteSelector::Title(term) => results.push(resolve_title(&indexed, term)?),
        }
    }

    Ok(results)
}

// Each kind occupies one contiguous, ascending run of `indexed`.
fn position_of(indexed: &[DisplayNote], idx: &DisplayIndex) -> Result<usize> {
    indexed
        .iter()
        .position(|dn| &dn.index == idx)
        .ok_or_else(|| MarknotesError::Api(format!("Index {} not found", idx)))
}

fn resolve_title(indexed: &[DisplayNote], term: &str) -> Result<DisplayNote> {
    let needle = term.to_lowercase();
    let candidates: Vec<&DisplayNote> = indexed
        .iter()
        .filter(|dn| matches!(dn.index, DisplayIndex::Regular(_)))
        .filter(|dn| dn.note.title.to_lowercase().contains(&needle))
        .collect();

    match candidates.as_slice() {
        [] => Err(MarknotesError::Api(format!(
            "No note matches \"{}\"",
            term
        ))),
        [only] => Ok((*only).clone()),
        many => many
            .iter()
            .find(|dn| dn.note.title.to_lowercase() == needle)
            .map(|dn| (*dn).clone())
            .ok_or_else(|| {
                MarknotesError::Api(format!(
                    "\"{}\" matches {} notes, use an index instead",
                    term,
                    many.len()
                ))
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn make_note(title: &str, favorite: bool, deleted: bool, age_minutes: i64) -> Note {
        let mut n = Note::new(title.to_string(), String::new(), None);
        n.created_at = Utc::now() - Duration::minutes(age_minutes);
        n.is_favorite = favorite;
        if deleted {
            n.deleted_at = Some(Utc::now());
        }
        n
    }

    fn state_with(notes: Vec<Note>) -> AppState {
        let mut state = AppState::empty();
        state.notes = notes;
        state
    }

    #[test]
    fn indexing_buckets() {
        let notes = vec![
            make_note("Oldest", false, false, 30),
            make_note("Fav", true, false, 20),
            make_note("Trashed", false, true, 10),
            make_note("Newest", false, false, 0),
        ];
        let indexed = index_notes(&notes);

        let labels: Vec<(String, String)> = indexed
            .iter()
            .map(|dn| (dn.index.to_string(), dn.note.title.clone()))
            .collect();
        assert_eq!(
            labels,
            vec![
                ("f1".to_string(), "Fav".to_string()),
                ("1".to_string(), "Newest".to_string()),
                ("2".to_string(), "Fav".to_string()),
                ("3".to_string(), "Oldest".to_string()),
                ("d1".to_string(), "Trashed".to_string()),
            ]
        );
    }

    #[test]
    fn parsing() {
        assert_eq!(DisplayIndex::from_str("1"), Ok(DisplayIndex::Regular(1)));
        assert_eq!(DisplayIndex::from_str("f2"), Ok(DisplayIndex::Favorite(2)));
        assert_eq!(DisplayIndex::from_str("d5"), Ok(DisplayIndex::Deleted(5)));
        assert!(DisplayIndex::from_str("").is_err());
        assert!(DisplayIndex::from_str("f").is_err());
        assert!(DisplayIndex::from_str("12a").is_err());
    }

    #[test]
    fn ranges() {
        assert_eq!(
            parse_index_or_range("d1-d3"),
            Ok(NoteSelector::Range(
                DisplayIndex::Deleted(1),
                DisplayIndex::Deleted(3)
            ))
        );
        assert_eq!(
            parse_index_or_range("2"),
            Ok(NoteSelector::Index(DisplayIndex::Regular(2)))
        );
        assert!(parse_index_or_range("3-1")
            .unwrap_err()
            .contains("must be <= end"));
        assert!(parse_index_or_range("1-f2")
            .unwrap_err()
            .contains("cannot mix index types"));
        assert!(parse_index_or_range("-5").is_err());
    }

    #[test]
    fn selectors_fall_back_to_title_search() {
        assert_eq!(
            parse_selectors(&["1", "d2"]),
            vec![
                NoteSelector::Index(DisplayIndex::Regular(1)),
                NoteSelector::Index(DisplayIndex::Deleted(2))
            ]
        );
        assert_eq!(
            parse_selectors(&["shopping", "list"]),
            vec![NoteSelector::Title("shopping list".to_string())]
        );
        let id = Uuid::new_v4();
        assert_eq!(
            parse_selectors(&[id.to_string()]),
            vec![NoteSelector::Id(id)]
        );
    }

    #[test]
    fn resolves_indexes_ids_and_titles() {
        let state = state_with(vec![
            make_note("Shopping List", false, false, 10),
            make_note("Shopping Cart", false, false, 5),
            make_note("Trashed", false, true, 0),
        ]);
        let trashed_id = state.notes[2].id;

        let found = resolve(
            &state,
            &[
                NoteSelector::Index(DisplayIndex::Regular(1)),
                NoteSelector::Id(trashed_id),
                NoteSelector::Title("list".into()),
            ],
        )
        .unwrap();
        assert_eq!(found[0].note.title, "Shopping Cart");
        assert_eq!(found[1].index, DisplayIndex::Deleted(1));
        assert_eq!(found[2].note.title, "Shopping List");
    }

    #[test]
    fn ambiguous_or_missing_titles_are_errors() {
        let state = state_with(vec![
            make_note("Shopping List", false, false, 10),
            make_note("Shopping Cart", false, false, 5),
        ]);
        assert!(resolve(&state, &[NoteSelector::Title("shopping".into())]).is_err());
        assert!(resolve(&state, &[NoteSelector::Title("nothing".into())]).is_err());
        assert!(resolve(&state, &[NoteSelector::Index(DisplayIndex::Regular(9))]).is_err());
    }

    #[test]
    fn resolves_ranges_within_one_kind() {
        let state = state_with(vec![
            make_note("Third", false, false, 30),
            make_note("Second", false, false, 20),
            make_note("First", false, false, 10),
            make_note("Gone", false, true, 0),
        ]);

        let found = resolve(&state, &parse_selectors(&["1-2", "d1"])).unwrap();
        let titles: Vec<&str> = found.iter().map(|dn| dn.note.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second", "Gone"]);
    }

    #[test]
    fn oversized_range_is_not_found() {
        let state = state_with(vec![make_note("Only", false, false, 0)]);

        let selectors = parse_selectors(&["1-9999999999"]);
        assert_eq!(
            selectors,
            vec![NoteSelector::Range(
                DisplayIndex::Regular(1),
                DisplayIndex::Regular(9999999999)
            )]
        );
        let err = resolve(&state, &selectors).unwrap_err();
        assert!(err.to_string().contains("Index 9999999999 not found"));
    }

    #[test]
    fn exact_title_breaks_ties() {
        let state = state_with(vec![
            make_note("Plan", false, false, 10),
            make_note("Plan B", false, false, 5),
        ]);
        let found = resolve(&state, &[NoteSelector::Title("plan".into())]).unwrap();
        assert_eq!(found[0].note.title, "Plan");
    }
}
