use crate::commands::{CmdMessage, CmdResult};
use crate::model::Note;
use crate::state::{AppState, WELCOME_CONTENT, WELCOME_TAGS, WELCOME_TITLE};

/// Seeds the welcome note when the notebook is empty. No-op otherwise.
pub fn run(state: &mut AppState) -> CmdResult {
    if !state.notes.is_empty() {
        return CmdResult::default();
    }

    let mut welcome = Note::new(WELCOME_TITLE.to_string(), WELCOME_CONTENT.to_string(), None);
    welcome.tags = WELCOME_TAGS.iter().map(|t| t.to_string()).collect();

    log::info!("seeding empty notebook with welcome note {}", welcome.id);
    state.current_note_id = Some(welcome.id);
    state.notes.push(welcome.clone());

    CmdResult::default()
        .with_affected_notes(vec![welcome])
        .with_message(CmdMessage::info("Created welcome note"))
}
