//! # Application State
//!
//! [`AppState`] is the complete, serializable picture of a notebook: notes,
//! folders, tags, templates, settings and the current selection. It is what
//! gets written to the store blob after every mutation.
//!
//! The current note is tracked by id and resolved by lookup on every read,
//! so there is exactly one copy of each note.

use crate::model::{AppSettings, Folder, Note, Tag, Template};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppState {
    pub notes: Vec<Note>,
    pub folders: Vec<Folder>,
    pub tags: Vec<Tag>,
    pub templates: Vec<Template>,
    pub settings: AppSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_note_id: Option<Uuid>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            notes: Vec::new(),
            folders: Vec::new(),
            tags: Vec::new(),
            templates: seed_templates(),
            settings: AppSettings::default(),
            current_note_id: None,
        }
    }
}

impl AppState {
    /// An empty state with no seed templates.
    pub fn empty() -> Self {
        Self {
            templates: Vec::new(),
            ..Self::default()
        }
    }

    pub fn note(&self, id: &Uuid) -> Option<&Note> {
        self.notes.iter().find(|n| &n.id == id)
    }

    pub fn note_mut(&mut self, id: &Uuid) -> Option<&mut Note> {
        self.notes.iter_mut().find(|n| &n.id == id)
    }

    pub fn folder(&self, id: &Uuid) -> Option<&Folder> {
        self.folders.iter().find(|f| &f.id == id)
    }

    pub fn folder_mut(&mut self, id: &Uuid) -> Option<&mut Folder> {
        self.folders.iter_mut().find(|f| &f.id == id)
    }

    pub fn tag(&self, id: &Uuid) -> Option<&Tag> {
        self.tags.iter().find(|t| &t.id == id)
    }

    pub fn template(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// The selected note, resolved against the collection.
    ///
    /// A dangling id (the note was purged elsewhere) resolves to `None`.
    pub fn current_note(&self) -> Option<&Note> {
        self.current_note_id.as_ref().and_then(|id| self.note(id))
    }

    pub fn is_current(&self, id: &Uuid) -> bool {
        self.current_note_id.as_ref() == Some(id)
    }

    pub fn clear_current_if(&mut self, id: &Uuid) {
        if self.is_current(id) {
            self.current_note_id = None;
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

pub const WELCOME_TITLE: &str = "Welcome to MarkdownNotes";

pub const WELCOME_CONTENT: &str = r#"# Welcome to MarkdownNotes 📝

This is your new markdown-based note-taking application. Here's what you can do:

## Features
- **Rich Markdown Support**: Write with full markdown syntax
- **Organize with Folders**: Create nested folder structures
- **Tag System**: Tag your notes for easy filtering
- **Powerful Search**: Find anything instantly
- **Templates**: Use templates for common note types
- **Live Preview**: See your formatted text in real-time

## Getting Started
1. Create your first note using the + button
2. Organize notes into folders
3. Use tags like #important #work #personal
4. Try the search feature
5. Explore templates for common formats

## Markdown Syntax
- **Bold text** with `**text**`
- *Italic text* with `*text*`
- [Links](https://example.com)
- `inline code`
- Lists with `-` or `1.`

Happy note-taking! 🚀"#;

pub const WELCOME_TAGS: [&str; 2] = ["welcome", "getting-started"];

const MEETING_TEMPLATE: &str = r#"# Meeting Notes - {{date}}

## Attendees
-

## Agenda
1.
2.
3.

## Discussion Points

### Topic 1


### Topic 2


## Action Items
- [ ]
- [ ]

## Next Steps

"#;

const JOURNAL_TEMPLATE: &str = r#"# {{date}}

## Morning Reflection
How am I feeling today?

## Goals for Today
- [ ]
- [ ]
- [ ]

## Gratitude
1.
2.
3.

## Evening Review
What went well today?

What could I improve?

## Tomorrow's Priorities
-
-
-
"#;

pub fn seed_templates() -> Vec<Template> {
    vec![
        Template {
            id: "meeting-template".to_string(),
            name: "Meeting Notes".to_string(),
            content: MEETING_TEMPLATE.to_string(),
            description: "Template for meeting notes with structured sections".to_string(),
            category: "Work".to_string(),
        },
        Template {
            id: "daily-journal".to_string(),
            name: "Daily Journal".to_string(),
            content: JOURNAL_TEMPLATE.to_string(),
            description: "Daily journal template for reflection and planning".to_string(),
            category: "Personal".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_carries_seed_templates() {
        let state = AppState::default();
        assert_eq!(state.templates.len(), 2);
        assert!(state.template("meeting-template").is_some());
        assert!(state.template("daily-journal").is_some());
        assert!(state.notes.is_empty());
    }

    #[test]
    fn current_note_is_resolved_by_lookup() {
        let mut state = AppState::empty();
        let note = Note::new("A".into(), "".into(), None);
        let id = note.id;
        state.notes.push(note);
        state.current_note_id = Some(id);

        state.note_mut(&id).unwrap().title = "B".into();
        assert_eq!(state.current_note().unwrap().title, "B");

        state.notes.clear();
        assert!(state.current_note().is_none());
    }

    #[test]
    fn json_roundtrip_preserves_state() {
        let mut state = AppState::default();
        let mut note = Note::new("Report".into(), "quarterly numbers".into(), None);
        note.tags.push("work".into());
        let folder = Folder::new("Work".into(), None);
        note.folder_id = Some(folder.id);
        state.current_note_id = Some(note.id);
        state.notes.push(note);
        state.folders.push(folder);
        state.tags.push(Tag::new("work".into(), "#3b82f6".into()));

        let json = state.to_json().unwrap();
        let loaded = AppState::from_json(&json).unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn partial_blob_falls_back_to_defaults() {
        let loaded = AppState::from_json(r#"{"notes": []}"#).unwrap();
        assert_eq!(loaded.settings, AppSettings::default());
        assert_eq!(loaded.templates.len(), 2);
        assert!(loaded.current_note_id.is_none());
    }
}
