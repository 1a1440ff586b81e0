use crate::commands::{note_not_found, CmdMessage, CmdResult};
use crate::model::{advance_timestamp, NoteUpdate};
use crate::state::AppState;
use uuid::Uuid;

/// Merges `update` into the note, refreshes `updated_at` and, when the
/// content changed, the word count. Unknown ids are a no-op.
pub fn run(state: &mut AppState, id: &Uuid, update: &NoteUpdate) -> CmdResult {
    let Some(note) = state.note_mut(id) else {
        return CmdResult::default().with_message(note_not_found(id));
    };

    update.apply_to(note);
    note.updated_at = advance_timestamp(note.updated_at);

    let message = CmdMessage::success(format!("Note updated: {}", note.title));
    CmdResult::default()
        .with_affected_notes(vec![note.clone()])
        .with_message(message)
}

pub fn toggle_favorite(state: &mut AppState, id: &Uuid) -> CmdResult {
    let Some(is_favorite) = state.note(id).map(|n| n.is_favorite) else {
        return CmdResult::default().with_message(note_not_found(id));
    };
    run(state, id, &NoteUpdate::new().favorite(!is_favorite))
}

/// Sets the display color. `None` or an empty string clears it.
pub fn set_color(state: &mut AppState, id: &Uuid, color: Option<String>) -> CmdResult {
    run(state, id, &NoteUpdate::new().color(color))
}

/// Files the note under `folder_id`, or unfiles it with `None`.
///
/// Moving into a folder that does not exist or sits in the trash is refused.
pub fn move_note(state: &mut AppState, id: &Uuid, folder_id: Option<Uuid>) -> CmdResult {
    if let Some(fid) = folder_id {
        match state.folder(&fid) {
            Some(folder) if !folder.is_trashed() => {}
            _ => {
                return CmdResult::default().with_message(CmdMessage::warning(format!(
                    "Cannot move note into missing or trashed folder {}",
                    fid
                )))
            }
        }
    }
    run(state, id, &NoteUpdate::new().folder(folder_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{create, folders};

    fn setup() -> (AppState, Uuid) {
        let mut state = AppState::empty();
        let id = create::run(&mut state, "Title".into(), "one two".into(), None).affected_notes[0]
            .id;
        (state, id)
    }

    #[test]
    fn content_update_recomputes_word_count_and_advances_timestamp() {
        let (mut state, id) = setup();
        let before = state.note(&id).unwrap().updated_at;

        run(&mut state, &id, &NoteUpdate::new().content("a b c d"));

        let note = state.note(&id).unwrap();
        assert_eq!(note.word_count, 4);
        assert!(note.updated_at > before);
        assert_eq!(note.created_at, before);
    }

    #[test]
    fn title_update_keeps_word_count() {
        let (mut state, id) = setup();
        run(&mut state, &id, &NoteUpdate::new().title("Renamed"));

        let note = state.note(&id).unwrap();
        assert_eq!(note.title, "Renamed");
        assert_eq!(note.word_count, 2);
    }

    #[test]
    fn current_note_reflects_update() {
        let (mut state, id) = setup();
        run(&mut state, &id, &NoteUpdate::new().title("Renamed"));
        assert_eq!(state.current_note().unwrap().title, "Renamed");
    }

    #[test]
    fn unknown_id_is_a_noop_with_warning() {
        let (mut state, _) = setup();
        let snapshot = state.clone();

        let result = run(&mut state, &Uuid::new_v4(), &NoteUpdate::new().title("X"));

        assert_eq!(state, snapshot);
        assert!(result.is_noop());
        assert_eq!(result.messages.len(), 1);
    }

    #[test]
    fn toggles_favorite() {
        let (mut state, id) = setup();
        toggle_favorite(&mut state, &id);
        assert!(state.note(&id).unwrap().is_favorite);
        toggle_favorite(&mut state, &id);
        assert!(!state.note(&id).unwrap().is_favorite);
    }

    #[test]
    fn sets_and_clears_color() {
        let (mut state, id) = setup();
        set_color(&mut state, &id, Some("#ef4444".into()));
        assert_eq!(state.note(&id).unwrap().color.as_deref(), Some("#ef4444"));
        set_color(&mut state, &id, Some(String::new()));
        assert_eq!(state.note(&id).unwrap().color, None);
    }

    #[test]
    fn moves_between_folders() {
        let (mut state, id) = setup();
        let folder = folders::create(&mut state, "Work".into(), None).affected_folders[0].clone();

        move_note(&mut state, &id, Some(folder.id));
        assert_eq!(state.note(&id).unwrap().folder_id, Some(folder.id));

        move_note(&mut state, &id, None);
        assert_eq!(state.note(&id).unwrap().folder_id, None);
    }

    #[test]
    fn refuses_move_into_trashed_folder() {
        let (mut state, id) = setup();
        let folder = folders::create(&mut state, "Old".into(), None).affected_folders[0].clone();
        folders::delete(&mut state, &folder.id);

        let result = move_note(&mut state, &id, Some(folder.id));
        assert!(result.is_noop());
        assert_eq!(state.note(&id).unwrap().folder_id, None);
    }
}
