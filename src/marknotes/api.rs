//! # API Facade
//!
//! [`NoteStore`] is the single entry point for every notebook operation,
//! whatever client sits on top of it. It owns two things:
//!
//! - the in-memory [`AppState`], passed explicitly to the command layer
//! - a [`BlobStore`], to which the full state is written after every mutation
//!
//! ## What the facade does
//!
//! - **Dispatches** to the matching function in `commands/*.rs`
//! - **Persists** (write-through, no batching) after each mutating call
//! - **Mirrors** the theme to its own blob so clients can apply it before
//!   the main state has loaded
//!
//! ## What it does not do
//!
//! - **Business logic**: that belongs in `commands/*.rs`
//! - **Presentation**: results are data, never formatted strings
//!
//! ## Generic over BlobStore
//!
//! - Production: `NoteStore<FileStore>`
//! - Testing: `NoteStore<InMemoryStore>`
//!
//! Query methods borrow the state and never touch the store.

use crate::commands::{
    self, export::ExportDocument, import::ImportSummary, search::NoteQuery, stats::NotebookStats,
    CmdResult,
};
use crate::error::{MarknotesError, Result};
use crate::model::{
    Folder, FolderUpdate, Note, NoteUpdate, SettingsUpdate, TagUpdate, TemplateUpdate, Theme,
};
use crate::state::AppState;
use crate::store::{BlobStore, STATE_KEY, THEME_KEY};
use chrono::{Local, Utc};
use uuid::Uuid;

pub struct NoteStore<S: BlobStore> {
    store: S,
    state: AppState,
}

impl<S: BlobStore> NoteStore<S> {
    /// Rehydrates the state from `store`, or starts from defaults when the
    /// state blob does not exist yet.
    ///
    /// A blob that exists but cannot be parsed is an error. Starting over
    /// would overwrite it on the first mutation.
    pub fn open(store: S) -> Result<Self> {
        let state = match store.load_blob(STATE_KEY)? {
            Some(json) => AppState::from_json(&json).map_err(|e| {
                MarknotesError::Store(format!("Cannot read blob {}: {}", STATE_KEY, e))
            })?,
            None => {
                log::debug!("no {} blob, starting with defaults", STATE_KEY);
                AppState::default()
            }
        };
        Ok(Self { store, state })
    }

    /// Like [`open`](Self::open), then purges trash older than
    /// `retention_days`.
    pub fn open_with_retention(store: S, retention_days: u32) -> Result<Self> {
        let mut api = Self::open(store)?;
        let result = commands::purge::expired(&mut api.state, retention_days, Utc::now());
        if !result.is_noop() {
            api.persist()?;
        }
        Ok(api)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn persist(&mut self) -> Result<()> {
        let json = self.state.to_json()?;
        self.store.save_blob(STATE_KEY, &json)
    }

    fn persisted(&mut self, result: CmdResult) -> Result<CmdResult> {
        self.persist()?;
        Ok(result)
    }

    // --- Lifecycle ---

    /// Seeds the welcome note into an empty notebook. Writes only when it
    /// actually seeded.
    pub fn initialize(&mut self) -> Result<CmdResult> {
        let result = commands::init::run(&mut self.state);
        if result.is_noop() {
            return Ok(result);
        }
        self.persisted(result)
    }

    // --- Notes ---

    /// The created note is `affected_notes[0]`; it also becomes current.
    pub fn create_note(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
        folder_id: Option<Uuid>,
    ) -> Result<CmdResult> {
        let result =
            commands::create::run(&mut self.state, title.into(), content.into(), folder_id);
        self.persisted(result)
    }

    pub fn update_note(&mut self, id: &Uuid, update: &NoteUpdate) -> Result<CmdResult> {
        let result = commands::update::run(&mut self.state, id, update);
        self.persisted(result)
    }

    pub fn delete_note(&mut self, id: &Uuid) -> Result<CmdResult> {
        let result = commands::delete::run(&mut self.state, id);
        self.persisted(result)
    }

    pub fn restore_note(&mut self, id: &Uuid) -> Result<CmdResult> {
        let result = commands::restore::run(&mut self.state, id);
        self.persisted(result)
    }

    pub fn delete_note_permanently(&mut self, id: &Uuid) -> Result<CmdResult> {
        let result = commands::delete::permanently(&mut self.state, id);
        self.persisted(result)
    }

    /// Empties the trash, notes and folders alike, regardless of age.
    pub fn purge_trashed_notes(&mut self) -> Result<CmdResult> {
        let result = commands::purge::run(&mut self.state);
        self.persisted(result)
    }

    pub fn purge_expired(&mut self, retention_days: u32) -> Result<CmdResult> {
        let result = commands::purge::expired(&mut self.state, retention_days, Utc::now());
        self.persisted(result)
    }

    pub fn select_note(&mut self, id: &Uuid) -> Result<CmdResult> {
        let result = commands::select::run(&mut self.state, id);
        self.persisted(result)
    }

    pub fn clear_selection(&mut self) -> Result<CmdResult> {
        let result = commands::select::clear(&mut self.state);
        self.persisted(result)
    }

    pub fn toggle_favorite(&mut self, id: &Uuid) -> Result<CmdResult> {
        let result = commands::update::toggle_favorite(&mut self.state, id);
        self.persisted(result)
    }

    pub fn set_color(&mut self, id: &Uuid, color: Option<String>) -> Result<CmdResult> {
        let result = commands::update::set_color(&mut self.state, id, color);
        self.persisted(result)
    }

    pub fn move_note(&mut self, id: &Uuid, folder_id: Option<Uuid>) -> Result<CmdResult> {
        let result = commands::update::move_note(&mut self.state, id, folder_id);
        self.persisted(result)
    }

    // --- Folders ---

    pub fn create_folder(
        &mut self,
        name: impl Into<String>,
        parent_id: Option<Uuid>,
    ) -> Result<CmdResult> {
        let result = commands::folders::create(&mut self.state, name.into(), parent_id);
        self.persisted(result)
    }

    pub fn update_folder(&mut self, id: &Uuid, update: &FolderUpdate) -> Result<CmdResult> {
        let result = commands::folders::update(&mut self.state, id, update);
        self.persisted(result)
    }

    pub fn rename_folder(&mut self, id: &Uuid, name: impl Into<String>) -> Result<CmdResult> {
        let result = commands::folders::rename(&mut self.state, id, name.into());
        self.persisted(result)
    }

    pub fn toggle_folder_expanded(&mut self, id: &Uuid) -> Result<CmdResult> {
        let result = commands::folders::toggle_expanded(&mut self.state, id);
        self.persisted(result)
    }

    pub fn delete_folder(&mut self, id: &Uuid) -> Result<CmdResult> {
        let result = commands::folders::delete(&mut self.state, id);
        self.persisted(result)
    }

    pub fn restore_folder(&mut self, id: &Uuid) -> Result<CmdResult> {
        let result = commands::folders::restore(&mut self.state, id);
        self.persisted(result)
    }

    pub fn delete_folder_permanently(&mut self, id: &Uuid) -> Result<CmdResult> {
        let result = commands::folders::delete_permanently(&mut self.state, id);
        self.persisted(result)
    }

    // --- Tags ---

    pub fn create_tag(
        &mut self,
        name: impl Into<String>,
        color: impl Into<String>,
    ) -> Result<CmdResult> {
        let result = commands::tags::create(&mut self.state, name.into(), color.into());
        self.persisted(result)
    }

    pub fn update_tag(&mut self, id: &Uuid, update: &TagUpdate) -> Result<CmdResult> {
        let result = commands::tags::update_record(&mut self.state, id, update);
        self.persisted(result)
    }

    pub fn delete_tag(&mut self, id: &Uuid) -> Result<CmdResult> {
        let result = commands::tags::delete_record(&mut self.state, id);
        self.persisted(result)
    }

    pub fn add_tag_to_note(&mut self, id: &Uuid, tag: &str) -> Result<CmdResult> {
        let result = commands::tags::add_to_note(&mut self.state, id, tag);
        self.persisted(result)
    }

    pub fn remove_tag_from_note(&mut self, id: &Uuid, tag: &str) -> Result<CmdResult> {
        let result = commands::tags::remove_from_note(&mut self.state, id, tag);
        self.persisted(result)
    }

    // --- Templates ---

    pub fn create_template(
        &mut self,
        name: impl Into<String>,
        content: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Result<CmdResult> {
        let result = commands::templates::create(
            &mut self.state,
            name.into(),
            content.into(),
            description.into(),
            category.into(),
        );
        self.persisted(result)
    }

    pub fn update_template(&mut self, id: &str, update: &TemplateUpdate) -> Result<CmdResult> {
        let result = commands::templates::update(&mut self.state, id, update);
        self.persisted(result)
    }

    pub fn delete_template(&mut self, id: &str) -> Result<CmdResult> {
        let result = commands::templates::delete(&mut self.state, id);
        self.persisted(result)
    }

    /// `{{date}}` is filled with today's local date.
    pub fn create_note_from_template(
        &mut self,
        template_id: &str,
        title: impl Into<String>,
        folder_id: Option<Uuid>,
    ) -> Result<CmdResult> {
        let result = commands::templates::instantiate(
            &mut self.state,
            template_id,
            title.into(),
            folder_id,
            Local::now().date_naive(),
        );
        self.persisted(result)
    }

    // --- Settings ---

    /// Merges `update` into the settings. A theme change is also written to
    /// its own blob.
    pub fn update_settings(&mut self, update: &SettingsUpdate) -> Result<CmdResult> {
        let result = commands::settings::update(&mut self.state, update);
        self.persist()?;
        if let Some(theme) = update.theme {
            self.store.save_blob(THEME_KEY, theme.as_str())?;
        }
        Ok(result)
    }

    // --- Import / Export ---

    pub fn export_notes(&self) -> ExportDocument {
        commands::export::run(&self.state, Utc::now())
    }

    /// Parses and merges an export document. Nothing is written when the
    /// document is rejected or every note in it was skipped.
    pub fn import_notes(&mut self, json: &str) -> Result<(CmdResult, ImportSummary)> {
        let doc = commands::import::parse(json)?;
        let (result, summary) = commands::import::run(&mut self.state, doc);
        if !result.is_noop() {
            self.persist()?;
        }
        Ok((result, summary))
    }

    // --- Queries ---

    pub fn current_note(&self) -> Option<&Note> {
        self.state.current_note()
    }

    pub fn search_notes(&self, query: &str) -> Vec<&Note> {
        commands::search::search_notes(&self.state, query)
    }

    pub fn query(&self, query: &NoteQuery) -> Vec<&Note> {
        commands::search::query(&self.state, query, Utc::now())
    }

    pub fn notes_in_folder(&self, folder_id: &Uuid) -> Vec<&Note> {
        commands::list::in_folder(&self.state, folder_id)
    }

    pub fn notes_by_tag(&self, tag: &str) -> Vec<&Note> {
        commands::list::by_tag(&self.state, tag)
    }

    pub fn active_notes(&self) -> Vec<&Note> {
        commands::list::active(&self.state)
    }

    pub fn favorite_notes(&self) -> Vec<&Note> {
        commands::list::favorites(&self.state)
    }

    pub fn unfiled_notes(&self) -> Vec<&Note> {
        commands::list::unfiled(&self.state)
    }

    pub fn recent_notes(&self, days: u32) -> Vec<&Note> {
        commands::list::recent(&self.state, days, Utc::now())
    }

    pub fn trashed_notes(&self) -> Vec<&Note> {
        commands::list::trashed_notes(&self.state)
    }

    pub fn active_folders(&self) -> Vec<&Folder> {
        commands::list::active_folders(&self.state)
    }

    pub fn trashed_folders(&self) -> Vec<&Folder> {
        commands::list::trashed_folders(&self.state)
    }

    pub fn all_note_tags(&self) -> Vec<String> {
        commands::tags::in_use(&self.state)
    }

    pub fn stats(&self) -> NotebookStats {
        commands::stats::run(&self.state)
    }
}

/// Reads the mirrored theme without loading the full state.
///
/// An unreadable value is logged and treated as absent.
pub fn read_theme<S: BlobStore>(store: &S) -> Option<Theme> {
    let raw = match store.load_blob(THEME_KEY) {
        Ok(raw) => raw?,
        Err(e) => {
            log::warn!("cannot read {}: {}", THEME_KEY, e);
            return None;
        }
    };
    match raw.trim().parse::<Theme>() {
        Ok(theme) => Some(theme),
        Err(e) => {
            log::warn!("ignoring {} blob: {}", THEME_KEY, e);
            None
        }
    }
}
