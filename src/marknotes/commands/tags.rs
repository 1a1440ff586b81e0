//! Tags come in two independent flavors:
//!
//! - Tag records (`AppState::tags`): named, colored entries managed on their own.
//! - Note tags (`Note::tags`): plain strings on each note.
//!
//! Nothing links the two. Deleting a tag record leaves notes that use the
//! same name alone.

use crate::commands::{note_not_found, update, CmdMessage, CmdResult};
use crate::model::{NoteUpdate, Tag, TagUpdate};
use crate::state::AppState;
use std::collections::BTreeSet;
use uuid::Uuid;

fn tag_not_found(id: &Uuid) -> CmdMessage {
    CmdMessage::warning(format!("No tag with id {}", id))
}

/// The created tag is `affected_tags[0]`.
pub fn create(state: &mut AppState, name: String, color: String) -> CmdResult {
    let tag = Tag::new(name, color);
    state.tags.push(tag.clone());

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Tag created: {}", tag.name)));
    result.affected_tags.push(tag);
    result
}

pub fn update_record(state: &mut AppState, id: &Uuid, upd: &TagUpdate) -> CmdResult {
    let Some(tag) = state.tags.iter_mut().find(|t| &t.id == id) else {
        return CmdResult::default().with_message(tag_not_found(id));
    };
    upd.apply_to(tag);

    let mut result = CmdResult::default();
    result.affected_tags.push(tag.clone());
    result
}

pub fn delete_record(state: &mut AppState, id: &Uuid) -> CmdResult {
    let Some(pos) = state.tags.iter().position(|t| &t.id == id) else {
        return CmdResult::default().with_message(tag_not_found(id));
    };
    let tag = state.tags.remove(pos);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Tag deleted: {}", tag.name)));
    result.affected_tags.push(tag);
    result
}

/// Adds `tag` (trimmed) to the note. Blank or already present tags are ignored.
pub fn add_to_note(state: &mut AppState, id: &Uuid, tag: &str) -> CmdResult {
    let tag = tag.trim();
    let Some(note) = state.note(id) else {
        return CmdResult::default().with_message(note_not_found(id));
    };
    if tag.is_empty() {
        return CmdResult::default().with_message(CmdMessage::warning("Tag cannot be empty"));
    }
    if note.has_tag(tag) {
        return CmdResult::default()
            .with_message(CmdMessage::info(format!("Note already tagged: {}", tag)));
    }

    let mut tags = note.tags.clone();
    tags.push(tag.to_string());
    update::run(state, id, &NoteUpdate::new().tags(tags))
}

pub fn remove_from_note(state: &mut AppState, id: &Uuid, tag: &str) -> CmdResult {
    let Some(note) = state.note(id) else {
        return CmdResult::default().with_message(note_not_found(id));
    };
    if !note.has_tag(tag) {
        return CmdResult::default()
            .with_message(CmdMessage::info(format!("Note is not tagged: {}", tag)));
    }

    let tags = note.tags.iter().filter(|t| *t != tag).cloned().collect();
    update::run(state, id, &NoteUpdate::new().tags(tags))
}

/// Sorted, deduplicated tag names used by active notes.
pub fn in_use(state: &AppState) -> Vec<String> {
    state
        .notes
        .iter()
        .filter(|n| !n.is_trashed())
        .flat_map(|n| n.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{create as create_note, delete};

    fn note(state: &mut AppState, title: &str) -> Uuid {
        create_note::run(state, title.into(), "".into(), None).affected_notes[0].id
    }

    #[test]
    fn add_to_note_appends_once() {
        let mut state = AppState::empty();
        let id = note(&mut state, "Shopping List");

        add_to_note(&mut state, &id, "errand");
        add_to_note(&mut state, &id, " errand ");
        add_to_note(&mut state, &id, "   ");

        assert_eq!(state.note(&id).unwrap().tags, vec!["errand".to_string()]);
    }

    #[test]
    fn removes_tag_from_note() {
        let mut state = AppState::empty();
        let id = note(&mut state, "N");
        add_to_note(&mut state, &id, "a");
        add_to_note(&mut state, &id, "b");

        remove_from_note(&mut state, &id, "a");
        assert_eq!(state.note(&id).unwrap().tags, vec!["b".to_string()]);
    }

    #[test]
    fn deleting_a_record_leaves_note_tags_alone() {
        let mut state = AppState::empty();
        let id = note(&mut state, "N");
        add_to_note(&mut state, &id, "work");
        let tag_id = create(&mut state, "work".into(), "#3b82f6".into()).affected_tags[0].id;

        delete_record(&mut state, &tag_id);

        assert!(state.tags.is_empty());
        assert_eq!(state.note(&id).unwrap().tags, vec!["work".to_string()]);
    }

    #[test]
    fn update_record_merges_fields() {
        let mut state = AppState::empty();
        let tag_id = create(&mut state, "work".into(), "#3b82f6".into()).affected_tags[0].id;

        let upd = TagUpdate {
            color: Some("#10b981".into()),
            ..TagUpdate::default()
        };
        update_record(&mut state, &tag_id, &upd);

        let tag = state.tag(&tag_id).unwrap();
        assert_eq!(tag.name, "work");
        assert_eq!(tag.color, "#10b981");
    }

    #[test]
    fn in_use_is_sorted_and_ignores_trash() {
        let mut state = AppState::empty();
        let a = note(&mut state, "A");
        let b = note(&mut state, "B");
        let c = note(&mut state, "C");
        add_to_note(&mut state, &a, "zeta");
        add_to_note(&mut state, &b, "alpha");
        add_to_note(&mut state, &b, "zeta");
        add_to_note(&mut state, &c, "trashed-only");
        delete::run(&mut state, &c);

        assert_eq!(in_use(&state), vec!["alpha".to_string(), "zeta".to_string()]);
    }
}
