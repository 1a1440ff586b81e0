use crate::commands::{note_not_found, CmdResult};
use crate::state::AppState;
use uuid::Uuid;

/// Makes the note current. Unknown ids leave the selection as it was.
pub fn run(state: &mut AppState, id: &Uuid) -> CmdResult {
    match state.note(id) {
        Some(note) => {
            let note = note.clone();
            state.current_note_id = Some(note.id);
            CmdResult::default().with_affected_notes(vec![note])
        }
        None => CmdResult::default().with_message(note_not_found(id)),
    }
}

/// Clears the selection.
pub fn clear(state: &mut AppState) -> CmdResult {
    state.current_note_id = None;
    CmdResult::default()
}
