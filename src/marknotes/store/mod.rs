//! # Storage Layer
//!
//! Persistence is a single capability: save a named blob, load a named blob.
//! The [`BlobStore`] trait is all the rest of the crate knows about it.
//!
//! ## Keys
//!
//! - [`STATE_KEY`]: the whole serialized [`AppState`](crate::state::AppState)
//!   (notes, folders, tags, templates, settings, current selection).
//! - [`THEME_KEY`]: the bare theme string (`light` | `dark` | `system`),
//!   duplicated outside the state blob so a client can apply it before the
//!   full state has been read.
//!
//! ## Write Model
//!
//! Every mutation rewrites the full state blob. There is no batching and no
//! transaction spanning several operations.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: one `<key>.json` file per blob, written atomically
//!   (temp file + rename).
//! - [`memory::InMemoryStore`]: for testing logic without filesystem I/O.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── markdown-notes-storage.json   # AppState
//! ├── note-app-theme.json           # Theme side channel
//! └── config.json                   # Client configuration
//! ```

use crate::error::Result;

pub mod fs;
pub mod memory;

pub const STATE_KEY: &str = "markdown-notes-storage";
pub const THEME_KEY: &str = "note-app-theme";

/// Abstract interface for blob persistence.
pub trait BlobStore {
    /// Load the blob stored under `key`.
    /// Returns Ok(None) if nothing has been saved yet.
    fn load_blob(&self, key: &str) -> Result<Option<String>>;

    /// Replace the blob stored under `key`.
    fn save_blob(&mut self, key: &str, data: &str) -> Result<()>;

    /// Remove the blob stored under `key`. Missing blobs are not an error.
    fn remove_blob(&mut self, key: &str) -> Result<()>;
}
