//! Debounced saving for an open editor.
//!
//! An [`EditSession`] sits between an editing surface and
//! [`NoteStore::update_note`](crate::api::NoteStore::update_note). Every
//! keystroke-level change goes through [`EditSession::edit`], which only
//! records the draft and pushes the deadline back. The client calls
//! [`EditSession::poll`] from its event loop; once the user has been idle for
//! `auto_save_interval` milliseconds the pending change comes back as a
//! [`NoteUpdate`] to apply.
//!
//! Time is passed in by the caller so sessions are deterministic in tests.

use crate::model::{AppSettings, Note, NoteUpdate};
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

const UNTITLED: &str = "Untitled";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

impl Draft {
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
            tags: note.tags.clone(),
        }
    }

    fn normalized(mut self) -> Self {
        if self.title.trim().is_empty() {
            self.title = UNTITLED.to_string();
        }
        self
    }
}

#[derive(Debug, Clone)]
pub struct EditSession {
    note_id: Uuid,
    committed: Draft,
    pending: Option<Draft>,
    deadline: Option<DateTime<Utc>>,
    interval: Duration,
    enabled: bool,
}

impl EditSession {
    pub fn new(note: &Note, settings: &AppSettings) -> Self {
        let interval_ms = i64::try_from(settings.auto_save_interval).unwrap_or(i64::MAX);
        Self {
            note_id: note.id,
            committed: Draft::from_note(note),
            pending: None,
            deadline: None,
            interval: Duration::try_milliseconds(interval_ms).unwrap_or(Duration::MAX),
            enabled: settings.auto_save,
        }
    }

    pub fn note_id(&self) -> Uuid {
        self.note_id
    }

    /// True when the latest draft differs from what was last committed.
    pub fn is_dirty(&self) -> bool {
        self.pending
            .as_ref()
            .map(|d| d.clone().normalized() != self.committed)
            .unwrap_or(false)
    }

    /// Records `draft` and restarts the idle timer. A deadline past the end
    /// of the calendar is pinned there, so only `save_now` commits it.
    pub fn edit(&mut self, draft: Draft, now: DateTime<Utc>) {
        self.pending = Some(draft);
        self.deadline = Some(
            now.checked_add_signed(self.interval)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        );
    }

    /// Returns the update to persist once the idle deadline has passed.
    /// Never fires while auto-save is disabled.
    pub fn poll(&mut self, now: DateTime<Utc>) -> Option<NoteUpdate> {
        if !self.enabled {
            return None;
        }
        match self.deadline {
            Some(deadline) if now >= deadline => self.commit(),
            _ => None,
        }
    }

    /// Commits the pending draft immediately, ignoring the timer.
    pub fn save_now(&mut self) -> Option<NoteUpdate> {
        self.commit()
    }

    fn commit(&mut self) -> Option<NoteUpdate> {
        self.deadline = None;
        let draft = self.pending.take()?.normalized();
        if draft == self.committed {
            return None;
        }

        let update = NoteUpdate::new()
            .title(draft.title.clone())
            .content(draft.content.clone())
            .tags(draft.tags.clone());
        self.committed = draft;
        Some(update)
    }
}
