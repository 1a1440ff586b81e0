//! Folder lifecycle: create, update, trash, restore, purge.
//!
//! Trashing a folder also trashes its direct child folders (one level, not
//! the whole subtree) and unfiles every note that pointed at it. The notes
//! themselves stay active.

use crate::commands::{folder_not_found, CmdMessage, CmdResult};
use crate::model::{Folder, FolderUpdate};
use crate::state::AppState;
use chrono::Utc;
use uuid::Uuid;

/// The created folder is `affected_folders[0]`.
pub fn create(state: &mut AppState, name: String, parent_id: Option<Uuid>) -> CmdResult {
    let folder = Folder::new(name, parent_id);
    state.folders.push(folder.clone());

    let message = CmdMessage::success(format!("Folder created: {}", folder.name));
    CmdResult::default()
        .with_affected_folders(vec![folder])
        .with_message(message)
}

pub fn update(state: &mut AppState, id: &Uuid, update: &FolderUpdate) -> CmdResult {
    let Some(folder) = state.folder_mut(id) else {
        return CmdResult::default().with_message(folder_not_found(id));
    };
    update.apply_to(folder);
    CmdResult::default().with_affected_folders(vec![folder.clone()])
}

pub fn rename(state: &mut AppState, id: &Uuid, name: String) -> CmdResult {
    let upd = FolderUpdate {
        name: Some(name),
        ..FolderUpdate::default()
    };
    update(state, id, &upd)
}

pub fn toggle_expanded(state: &mut AppState, id: &Uuid) -> CmdResult {
    let Some(expanded) = state.folder(id).map(|f| f.is_expanded) else {
        return CmdResult::default().with_message(folder_not_found(id));
    };
    let upd = FolderUpdate {
        is_expanded: Some(!expanded),
        ..FolderUpdate::default()
    };
    update(state, id, &upd)
}

pub fn delete(state: &mut AppState, id: &Uuid) -> CmdResult {
    if state.folder(id).is_none() {
        return CmdResult::default().with_message(folder_not_found(id));
    }

    let now = Utc::now();
    let mut result = CmdResult::default();

    for folder in state
        .folders
        .iter_mut()
        .filter(|f| &f.id == id || f.parent_id.as_ref() == Some(id))
    {
        folder.deleted_at = Some(now);
        result.add_message(CmdMessage::success(format!(
            "Folder moved to trash: {}",
            folder.name
        )));
        result.affected_folders.push(folder.clone());
    }

    for note in state
        .notes
        .iter_mut()
        .filter(|n| n.folder_id.as_ref() == Some(id))
    {
        note.folder_id = None;
        result.affected_notes.push(note.clone());
    }
    if !result.affected_notes.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "{} note(s) moved out of the folder",
            result.affected_notes.len()
        )));
    }

    result
}

/// Restores only the folder itself. Child folders trashed alongside it stay
/// in the trash.
pub fn restore(state: &mut AppState, id: &Uuid) -> CmdResult {
    let Some(folder) = state.folder_mut(id) else {
        return CmdResult::default().with_message(folder_not_found(id));
    };
    if folder.deleted_at.take().is_none() {
        return CmdResult::default()
            .with_message(CmdMessage::info(format!("Folder is not in trash: {}", folder.name)));
    }

    let message = CmdMessage::success(format!("Folder restored: {}", folder.name));
    CmdResult::default()
        .with_affected_folders(vec![folder.clone()])
        .with_message(message)
}

/// Removes the folder record. Notes it once held were unfiled when it was
/// trashed and are not touched here.
pub fn delete_permanently(state: &mut AppState, id: &Uuid) -> CmdResult {
    let Some(pos) = state.folders.iter().position(|f| &f.id == id) else {
        return CmdResult::default().with_message(folder_not_found(id));
    };
    let folder = state.folders.remove(pos);

    let message = CmdMessage::success(format!("Folder permanently deleted: {}", folder.name));
    CmdResult::default()
        .with_affected_folders(vec![folder])
        .with_message(message)
}
