use crate::commands::{CmdMessage, CmdResult};
use crate::model::Note;
use crate::state::AppState;
use uuid::Uuid;

/// Creates a note, appends it and makes it the current note.
///
/// The created note is `affected_notes[0]`.
pub fn run(
    state: &mut AppState,
    title: String,
    content: String,
    folder_id: Option<Uuid>,
) -> CmdResult {
    let note = Note::new(title, content, folder_id);
    state.current_note_id = Some(note.id);
    state.notes.push(note.clone());

    let message = CmdMessage::success(format!("Note created: {}", note.title));
    CmdResult::default()
        .with_affected_notes(vec![note])
        .with_message(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_note_with_word_count_and_selects_it() {
        let mut state = AppState::empty();
        let result = run(
            &mut state,
            "Shopping List".into(),
            "milk eggs bread".into(),
            None,
        );

        let note = &result.affected_notes[0];
        assert_eq!(note.word_count, 3);
        assert_eq!(note.created_at, note.updated_at);
        assert_eq!(state.current_note().unwrap().id, note.id);
        assert_eq!(state.notes.len(), 1);
    }

    #[test]
    fn appends_in_creation_order() {
        let mut state = AppState::empty();
        run(&mut state, "First".into(), "".into(), None);
        run(&mut state, "Second".into(), "".into(), None);

        let titles: Vec<_> = state.notes.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second"]);
        assert_eq!(state.current_note().unwrap().title, "Second");
    }

    #[test]
    fn keeps_folder_reference() {
        let mut state = AppState::empty();
        let folder_id = Uuid::new_v4();
        let result = run(&mut state, "Filed".into(), "".into(), Some(folder_id));
        assert_eq!(result.affected_notes[0].folder_id, Some(folder_id));
        assert_eq!(result.affected_notes[0].word_count, 0);
    }
}
