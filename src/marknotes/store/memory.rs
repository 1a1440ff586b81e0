use super::BlobStore;
use crate::error::Result;
use std::collections::HashMap;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    blobs: HashMap<String, String>,
    writes: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `save_blob` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl BlobStore for InMemoryStore {
    fn load_blob(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn save_blob(&mut self, key: &str, data: &str) -> Result<()> {
        self.blobs.insert(key.to_string(), data.to_string());
        self.writes += 1;
        Ok(())
    }

    fn remove_blob(&mut self, key: &str) -> Result<()> {
        self.blobs.remove(key);
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use crate::model::{Folder, Note};
    use crate::state::AppState;
    use uuid::Uuid;

    /// Builds an [`AppState`] without going through commands.
    pub struct StateFixture {
        pub state: AppState,
    }

    impl Default for StateFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StateFixture {
        pub fn new() -> Self {
            Self {
                state: AppState::empty(),
            }
        }

        pub fn with_notes(mut self, count: usize) -> Self {
            for i in 0..count {
                let note = Note::new(
                    format!("Test Note {}", i + 1),
                    format!("Content for note {}", i + 1),
                    None,
                );
                self.state.notes.push(note);
            }
            self
        }

        pub fn with_note(mut self, title: &str, content: &str, tags: &[&str]) -> Self {
            let mut note = Note::new(title.to_string(), content.to_string(), None);
            note.tags = tags.iter().map(|t| t.to_string()).collect();
            self.state.notes.push(note);
            self
        }

        pub fn with_folder(mut self, name: &str, parent_id: Option<Uuid>) -> Self {
            self.state
                .folders
                .push(Folder::new(name.to_string(), parent_id));
            self
        }

        pub fn note_id(&self, title: &str) -> Uuid {
            self.state
                .notes
                .iter()
                .find(|n| n.title == title)
                .map(|n| n.id)
                .unwrap_or_else(|| panic!("fixture has no note titled {}", title))
        }

        pub fn folder_id(&self, name: &str) -> Uuid {
            self.state
                .folders
                .iter()
                .find(|f| f.name == name)
                .map(|f| f.id)
                .unwrap_or_else(|| panic!("fixture has no folder named {}", name))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_writes() {
        let mut store = InMemoryStore::new();
        store.save_blob("a", "1").unwrap();
        store.save_blob("a", "2").unwrap();
        assert_eq!(store.write_count(), 2);
        assert_eq!(store.load_blob("a").unwrap(), Some("2".to_string()));
    }
}
