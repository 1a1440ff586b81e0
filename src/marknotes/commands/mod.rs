//! # Command Layer
//!
//! Pure business logic. Each function takes the [`AppState`](crate::state::AppState)
//! (shared or exclusive borrow), applies one operation, and reports what it
//! touched in a [`CmdResult`].
//!
//! Commands never perform I/O and never fail: an unknown id leaves the state
//! untouched and adds a warning message. Persistence happens one layer up, in
//! [`crate::api::NoteStore`].

use crate::model::{Folder, Note, Tag, Template};
use uuid::Uuid;

pub mod create;
pub mod delete;
pub mod export;
pub mod folders;
pub mod import;
pub mod init;
pub mod list;
pub mod purge;
pub mod restore;
pub mod search;
pub mod select;
pub mod settings;
pub mod stats;
pub mod tags;
pub mod templates;
pub mod update;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct CmdResult {
    pub affected_notes: Vec<Note>,
    pub affected_folders: Vec<Folder>,
    pub affected_tags: Vec<Tag>,
    pub affected_templates: Vec<Template>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_affected_notes(mut self, notes: Vec<Note>) -> Self {
        self.affected_notes = notes;
        self
    }

    pub fn with_affected_folders(mut self, folders: Vec<Folder>) -> Self {
        self.affected_folders = folders;
        self
    }

    /// True when the command changed nothing and only reported.
    pub fn is_noop(&self) -> bool {
        self.affected_notes.is_empty()
            && self.affected_folders.is_empty()
            && self.affected_tags.is_empty()
            && self.affected_templates.is_empty()
    }
}

pub(crate) fn note_not_found(id: &Uuid) -> CmdMessage {
    CmdMessage::warning(format!("No note with id {}", id))
}

pub(crate) fn folder_not_found(id: &Uuid) -> CmdMessage {
    CmdMessage::warning(format!("No folder with id {}", id))
}
