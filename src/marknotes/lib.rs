//! # Marknotes Architecture
//!
//! Marknotes is a **UI-agnostic markdown notebook library**: notes, folders,
//! tags, templates and settings, persisted as one JSON state blob. The
//! terminal client in this package is one consumer of it; a desktop or web
//! front end would drive the same [`api::NoteStore`].
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - Resolves display indexes (1, f1, d1) to note ids         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - NoteStore: owns the AppState and the blob store          │
//! │  - Write-through persistence after every mutation           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure business logic over &mut AppState                   │
//! │  - Unknown ids are no-ops reported as warnings              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - BlobStore trait: load/save a string by key               │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes Rust arguments and returns Rust types.
//! It never writes to stdout/stderr and never exits the process. The one
//! exception is [`editor`], which the terminal client uses to spawn
//! `$EDITOR`.
//!
//! ## State, Not Singletons
//!
//! The whole notebook is an explicit [`state::AppState`] value. The current
//! note is stored as an id and resolved on read, so there is never a second
//! copy of a note to keep in sync.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade, entry point for all operations
//! - [`commands`]: Business logic, one module per operation family
//! - [`state`]: The persisted notebook state and its seed data
//! - [`model`]: Records and partial-update types
//! - [`store`]: Blob storage abstraction and implementations
//! - [`index`]: Display indexing (1, f1, d1 notation) and note selectors
//! - [`autosave`]: Debounced edit sessions
//! - [`config`]: Client configuration and data directory
//! - [`editor`]: External editor integration
//! - [`error`]: Error types

pub mod api;
pub mod autosave;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod index;
pub mod model;
pub mod state;
pub mod store;
