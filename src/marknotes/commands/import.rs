//! Importing an export document.
//!
//! Merge policy, by note id:
//! - unknown id: appended
//! - known id, imported copy updated more recently: replaces the existing note
//! - known id otherwise: skipped
//!
//! Imported notes get their word count recomputed and lose any `folder_id`
//! that does not point at an existing folder.

use crate::commands::export::{ExportDocument, EXPORT_VERSION};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{MarknotesError, Result};
use crate::model::word_count;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub added: usize,
    pub replaced: usize,
    pub skipped: usize,
}

pub fn parse(json: &str) -> Result<ExportDocument> {
    let doc: ExportDocument =
        serde_json::from_str(json).map_err(|e| MarknotesError::Import(e.to_string()))?;
    if doc.version != EXPORT_VERSION {
        return Err(MarknotesError::Import(format!(
            "unsupported export version {}",
            doc.version
        )));
    }
    Ok(doc)
}

pub fn run(state: &mut AppState, doc: ExportDocument) -> (CmdResult, ImportSummary) {
    let mut result = CmdResult::default();
    let mut summary = ImportSummary::default();

    for mut incoming in doc.notes {
        incoming.word_count = word_count(&incoming.content);
        if let Some(fid) = incoming.folder_id {
            if state.folder(&fid).is_none() {
                incoming.folder_id = None;
            }
        }

        match state.note_mut(&incoming.id) {
            None => {
                summary.added += 1;
                state.notes.push(incoming.clone());
                result.affected_notes.push(incoming);
            }
            Some(existing) if incoming.updated_at > existing.updated_at => {
                summary.replaced += 1;
                *existing = incoming.clone();
                result.affected_notes.push(incoming);
            }
            Some(_) => summary.skipped += 1,
        }
    }

    log::info!(
        "import: {} added, {} replaced, {} skipped",
        summary.added,
        summary.replaced,
        summary.skipped
    );
    result.add_message(CmdMessage::success(format!(
        "Imported notes: {} added, {} replaced, {} skipped",
        summary.added, summary.replaced, summary.skipped
    )));
    (result, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::export;
    use crate::model::Note;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn doc(notes: Vec<Note>) -> ExportDocument {
        ExportDocument {
            notes,
            export_date: Utc::now(),
            version: "1.0".into(),
        }
    }

    #[test]
    fn appends_unknown_notes() {
        let mut state = AppState::empty();
        let (_, summary) = run(
            &mut state,
            doc(vec![Note::new("New".into(), "a b".into(), None)]),
        );
        assert_eq!(summary.added, 1);
        assert_eq!(state.notes.len(), 1);
    }

    #[test]
    fn replaces_only_when_incoming_is_newer() {
        let mut state = AppState::empty();
        let original = Note::new("Original".into(), "".into(), None);
        state.notes.push(original.clone());

        let mut older = original.clone();
        older.title = "Older".into();
        older.updated_at = original.updated_at - Duration::hours(1);
        let (_, summary) = run(&mut state, doc(vec![older]));
        assert_eq!(summary.skipped, 1);
        assert_eq!(state.notes[0].title, "Original");

        let mut newer = original.clone();
        newer.title = "Newer".into();
        newer.updated_at = original.updated_at + Duration::hours(1);
        let (_, summary) = run(&mut state, doc(vec![newer]));
        assert_eq!(summary.replaced, 1);
        assert_eq!(state.notes.len(), 1);
        assert_eq!(state.notes[0].title, "Newer");
    }

    #[test]
    fn repairs_word_count_and_dangling_folder() {
        let mut state = AppState::empty();
        let mut note = Note::new("N".into(), "one two three".into(), Some(Uuid::new_v4()));
        note.word_count = 0;

        run(&mut state, doc(vec![note]));
        assert_eq!(state.notes[0].word_count, 3);
        assert_eq!(state.notes[0].folder_id, None);
    }

    #[test]
    fn parse_accepts_own_export() {
        let mut state = AppState::empty();
        state.notes.push(Note::new("A".into(), "x".into(), None));
        let json = export::to_json(&export::run(&state, Utc::now())).unwrap();

        let parsed = parse(&json).unwrap();
        assert_eq!(parsed.notes, state.notes);
    }

    #[test]
    fn parse_rejects_garbage_and_unknown_versions() {
        assert!(matches!(parse("not json"), Err(MarknotesError::Import(_))));
        let json = r#"{"notes": [], "exportDate": "2024-01-01T00:00:00Z", "version": "2.0"}"#;
        assert!(matches!(parse(json), Err(MarknotesError::Import(_))));
    }
}
