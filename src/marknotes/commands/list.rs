//! Read-only views over the state: folder and tag membership plus the
//! sidebar listings (active, favorites, unfiled, recent, trash).

use crate::model::{days_before, Folder, Note};
use crate::state::AppState;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Notes whose `folder_id` is exactly `folder_id`. Trash status is ignored.
pub fn in_folder<'a>(state: &'a AppState, folder_id: &Uuid) -> Vec<&'a Note> {
    state
        .notes
        .iter()
        .filter(|n| n.folder_id.as_ref() == Some(folder_id))
        .collect()
}

/// Notes carrying exactly `tag`. Trash status is ignored.
pub fn by_tag<'a>(state: &'a AppState, tag: &str) -> Vec<&'a Note> {
    state.notes.iter().filter(|n| n.has_tag(tag)).collect()
}

/// Active notes, most recently updated first.
pub fn active(state: &AppState) -> Vec<&Note> {
    let mut notes: Vec<&Note> = state.notes.iter().filter(|n| !n.is_trashed()).collect();
    notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    notes
}

pub fn favorites(state: &AppState) -> Vec<&Note> {
    active(state).into_iter().filter(|n| n.is_favorite).collect()
}

pub fn unfiled(state: &AppState) -> Vec<&Note> {
    active(state)
        .into_iter()
        .filter(|n| n.folder_id.is_none())
        .collect()
}

/// Active notes updated within `days` of `now`. A window longer than the
/// representable calendar covers every note.
pub fn recent(state: &AppState, days: u32, now: DateTime<Utc>) -> Vec<&Note> {
    let cutoff = days_before(now, days);
    active(state)
        .into_iter()
        .filter(|n| cutoff.map(|c| n.updated_at > c).unwrap_or(true))
        .collect()
}

/// Trashed notes, most recently deleted first.
pub fn trashed_notes(state: &AppState) -> Vec<&Note> {
    let mut notes: Vec<&Note> = state.notes.iter().filter(|n| n.is_trashed()).collect();
    notes.sort_by(|a, b| b.deleted_at.cmp(&a.deleted_at));
    notes
}

/// Trashed folders, most recently deleted first.
pub fn trashed_folders(state: &AppState) -> Vec<&Folder> {
    let mut folders: Vec<&Folder> = state.folders.iter().filter(|f| f.is_trashed()).collect();
    folders.sort_by(|a, b| b.deleted_at.cmp(&a.deleted_at));
    folders
}

/// Active folders in creation order.
pub fn active_folders(state: &AppState) -> Vec<&Folder> {
    state.folders.iter().filter(|f| !f.is_trashed()).collect()
}
