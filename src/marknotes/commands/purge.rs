use crate::commands::{CmdMessage, CmdResult};
use crate::state::AppState;
use crate::model::days_before;
use chrono::{DateTime, Utc};

/// Permanently removes every trashed note and folder, regardless of age.
pub fn run(state: &mut AppState) -> CmdResult {
    purge_where(state, |deleted_at| deleted_at.is_some())
}

/// Permanently removes trashed items whose `deleted_at` is older than
/// `retention_days` before `now`. Younger trash is kept, and so is everything
/// when the window reaches past the earliest representable date.
pub fn expired(state: &mut AppState, retention_days: u32, now: DateTime<Utc>) -> CmdResult {
    let cutoff = days_before(now, retention_days);
    purge_where(state, |deleted_at| match (deleted_at, cutoff) {
        (Some(at), Some(cutoff)) => at < cutoff,
        _ => false,
    })
}

fn purge_where<F>(state: &mut AppState, should_purge: F) -> CmdResult
where
    F: Fn(Option<DateTime<Utc>>) -> bool,
{
    let (purged_notes, kept_notes) = std::mem::take(&mut state.notes)
        .into_iter()
        .partition::<Vec<_>, _>(|n| should_purge(n.deleted_at));
    state.notes = kept_notes;

    let (purged_folders, kept_folders) = std::mem::take(&mut state.folders)
        .into_iter()
        .partition::<Vec<_>, _>(|f| should_purge(f.deleted_at));
    state.folders = kept_folders;

    if let Some(current) = state.current_note_id {
        if purged_notes.iter().any(|n| n.id == current) {
            state.current_note_id = None;
        }
    }

    let mut result = CmdResult::default();
    if purged_notes.is_empty() && purged_folders.is_empty() {
        result.add_message(CmdMessage::info("Nothing to purge."));
        return result;
    }

    log::info!(
        "purged {} notes and {} folders from trash",
        purged_notes.len(),
        purged_folders.len()
    );
    for note in &purged_notes {
        result.add_message(CmdMessage::success(format!("Purged note: {}", note.title)));
    }
    for folder in &purged_folders {
        result.add_message(CmdMessage::success(format!("Purged folder: {}", folder.name)));
    }

    result
        .with_affected_notes(purged_notes)
        .with_affected_folders(purged_folders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Folder, Note};
    use chrono::Duration;

    fn trashed_note(title: &str, days_ago: i64) -> Note {
        let mut note = Note::new(title.into(), "".into(), None);
        note.deleted_at = Some(Utc::now() - Duration::days(days_ago));
        note
    }

    #[test]
    fn removes_every_trashed_item_regardless_of_age() {
        let mut state = AppState::empty();
        state.notes.push(Note::new("Active".into(), "".into(), None));
        state.notes.push(trashed_note("Fresh", 0));
        state.notes.push(trashed_note("Old", 90));
        let mut folder = Folder::new("Gone".into(), None);
        folder.deleted_at = Some(Utc::now());
        state.folders.push(folder);
        state.folders.push(Folder::new("Kept".into(), None));

        let result = run(&mut state);

        assert_eq!(state.notes.len(), 1);
        assert_eq!(state.notes[0].title, "Active");
        assert_eq!(state.folders.len(), 1);
        assert_eq!(state.folders[0].name, "Kept");
        assert_eq!(result.affected_notes.len(), 2);
        assert_eq!(result.affected_folders.len(), 1);
    }

    #[test]
    fn leaves_active_items_untouched() {
        let mut state = AppState::empty();
        state.notes.push(Note::new("A".into(), "x".into(), None));
        state.folders.push(Folder::new("F".into(), None));
        let snapshot = state.clone();

        let result = run(&mut state);
        assert_eq!(state, snapshot);
        assert!(result.is_noop());
    }

    #[test]
    fn expired_only_removes_items_past_retention() {
        let mut state = AppState::empty();
        state.notes.push(trashed_note("Recent", 3));
        state.notes.push(trashed_note("Ancient", 45));

        let result = expired(&mut state, 30, Utc::now());

        assert_eq!(result.affected_notes.len(), 1);
        assert_eq!(result.affected_notes[0].title, "Ancient");
        assert_eq!(state.notes.len(), 1);
        assert_eq!(state.notes[0].title, "Recent");
    }

    #[test]
    fn expired_with_unbounded_retention_keeps_everything() {
        let mut state = AppState::empty();
        state.notes.push(trashed_note("Ancient", 3650));

        let result = expired(&mut state, u32::MAX, Utc::now());

        assert!(result.is_noop());
        assert_eq!(state.notes.len(), 1);
    }

    #[test]
    fn clears_selection_of_purged_note() {
        let mut state = AppState::empty();
        let note = trashed_note("Selected", 1);
        state.current_note_id = Some(note.id);
        state.notes.push(note);

        run(&mut state);
        assert!(state.current_note_id.is_none());
    }
}
