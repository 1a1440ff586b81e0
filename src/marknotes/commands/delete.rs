use crate::commands::{note_not_found, CmdMessage, CmdResult};
use crate::model::advance_timestamp;
use crate::state::AppState;
use uuid::Uuid;

/// Moves a note to the trash. The note stays in the collection.
pub fn run(state: &mut AppState, id: &Uuid) -> CmdResult {
    let Some(note) = state.note_mut(id) else {
        return CmdResult::default().with_message(note_not_found(id));
    };

    let now = advance_timestamp(note.updated_at);
    note.deleted_at = Some(now);
    note.updated_at = now;
    let note = note.clone();

    state.clear_current_if(id);

    CmdResult::default()
        .with_message(CmdMessage::success(format!("Note moved to trash: {}", note.title)))
        .with_affected_notes(vec![note])
}

/// Removes a note from the collection entirely.
pub fn permanently(state: &mut AppState, id: &Uuid) -> CmdResult {
    let Some(pos) = state.notes.iter().position(|n| &n.id == id) else {
        return CmdResult::default().with_message(note_not_found(id));
    };

    let note = state.notes.remove(pos);
    state.clear_current_if(id);

    CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Note permanently deleted: {}",
            note.title
        )))
        .with_affected_notes(vec![note])
}
