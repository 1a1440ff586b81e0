use crate::commands::{note_not_found, CmdMessage, CmdResult};
use crate::model::advance_timestamp;
use crate::state::AppState;
use uuid::Uuid;

/// Takes a note out of the trash. Active notes are left untouched.
pub fn run(state: &mut AppState, id: &Uuid) -> CmdResult {
    let Some(note) = state.note_mut(id) else {
        return CmdResult::default().with_message(note_not_found(id));
    };

    if note.deleted_at.is_none() {
        return CmdResult::default()
            .with_message(CmdMessage::info(format!("Note is not in trash: {}", note.title)));
    }

    note.deleted_at = None;
    note.updated_at = advance_timestamp(note.updated_at);

    CmdResult::default()
        .with_message(CmdMessage::success(format!("Note restored: {}", note.title)))
        .with_affected_notes(vec![note.clone()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{create, delete, list, search, tags};

    #[test]
    fn restore_after_delete_brings_note_back() {
        let mut state = AppState::empty();
        let id = create::run(
            &mut state,
            "Shopping List".into(),
            "milk eggs bread".into(),
            None,
        )
        .affected_notes[0]
            .id;
        tags::add_to_note(&mut state, &id, "errand");
        let before = state.note(&id).unwrap().clone();

        delete::run(&mut state, &id);
        assert!(list::active(&state).is_empty());

        run(&mut state, &id);

        let after = state.note(&id).unwrap();
        assert_eq!(after.deleted_at, None);
        assert_eq!(after.title, before.title);
        assert_eq!(after.content, before.content);
        assert_eq!(after.tags, vec!["errand".to_string()]);
        assert_eq!(after.word_count, 3);
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at > before.updated_at);

        assert_eq!(list::active(&state).len(), 1);
        assert_eq!(search::search_notes(&state, "milk").len(), 1);
    }

    #[test]
    fn active_note_is_left_alone() {
        let mut state = AppState::empty();
        let id = create::run(&mut state, "Fine".into(), "".into(), None).affected_notes[0].id;
        let snapshot = state.clone();

        let result = run(&mut state, &id);
        assert!(result.is_noop());
        assert_eq!(state, snapshot);
    }
}
