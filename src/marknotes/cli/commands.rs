//! # CLI Layer
//!
//! This module is **one possible UI client** for marknotes, not the
//! application itself. It is the only place that:
//! - knows about stdout/stderr and exit codes
//! - parses arguments
//! - turns display indexes and names into ids
//! - formats output for humans
//!
//! ## Structure
//!
//! - `run()`: main dispatch (called by `main.rs`)
//! - `init_context()`: data dir, config, store, retention purge, seeding
//! - `handle_*()`: per-command handlers that call the API and print

use super::render::{
    print_messages, render_folder_tree, render_full_notes, render_note_list, render_settings,
    render_stats, render_tags, render_templates, render_trashed_folders,
};
use super::setup::{
    command_name, print_grouped_help, print_help_for_command, Cli, Commands, CoreCommands,
    DataCommands, FolderCommands, MiscCommands, NoteCommands, OrganizeCommands, TagCommands,
    TemplateCommands,
};
use chrono::Utc;
use clap::Parser;
use marknotes::api::NoteStore;
use marknotes::autosave::{Draft, EditSession};
use marknotes::commands::export;
use marknotes::commands::search::{NoteQuery, QueryFilter, QuerySort};
use marknotes::commands::settings::parse_setting;
use marknotes::commands::CmdMessage;
use marknotes::config::{data_dir, MarknotesConfig};
use marknotes::editor::{edit_content, EditorContent};
use marknotes::error::{MarknotesError, Result};
use marknotes::index::{self, DisplayIndex, DisplayNote};
use marknotes::model::{Folder, Note, TagUpdate};
use marknotes::store::fs::FileStore;
use std::collections::HashSet;
use std::path::PathBuf;
use uuid::Uuid;

struct AppContext {
    api: NoteStore<FileStore>,
    config: MarknotesConfig,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if cli.help {
        match &cli.command {
            Some(cmd) => print_help_for_command(command_name(cmd)),
            None => print_grouped_help(),
        }
        return Ok(());
    }

    if let Some(Commands::Misc(MiscCommands::Help { command })) = &cli.command {
        match command {
            Some(name) => print_help_for_command(name),
            None => print_grouped_help(),
        }
        return Ok(());
    }

    let mut ctx = init_context()?;

    match cli.command {
        Some(Commands::Core(cmd)) => match cmd {
            CoreCommands::Create {
                content,
                folder,
                tags,
                no_editor,
                title,
            } => handle_create(&mut ctx, title, content, folder, tags, no_editor),
            CoreCommands::List {
                folder,
                tag,
                favorites,
                unfiled,
                recent,
                deleted,
            } => {
                let filter = ListFilter {
                    folder,
                    tag,
                    favorites,
                    unfiled,
                    recent,
                    deleted,
                };
                handle_list(&ctx, filter)
            }
            CoreCommands::Search {
                term,
                tags,
                favorites,
                recent,
                sort,
            } => handle_search(&ctx, term, tags, favorites, recent, &sort),
        },
        Some(Commands::Note(cmd)) => match cmd {
            NoteCommands::View { indexes } => handle_view(&ctx, indexes),
            NoteCommands::Edit {
                title,
                content,
                indexes,
            } => handle_edit(&mut ctx, indexes, title, content),
            NoteCommands::Select { indexes } => handle_select(&mut ctx, indexes),
            NoteCommands::Delete { indexes } => handle_delete(&mut ctx, indexes),
            NoteCommands::Restore { indexes } => handle_restore(&mut ctx, indexes),
            NoteCommands::Favorite { indexes } => handle_favorite(&mut ctx, indexes),
            NoteCommands::Color { index, color } => handle_color(&mut ctx, index, color),
        },
        Some(Commands::Organize(cmd)) => match cmd {
            OrganizeCommands::Tag { action } => handle_tag(&mut ctx, action),
            OrganizeCommands::Folder { action } => handle_folder(&mut ctx, action),
            OrganizeCommands::Template { action } => handle_template(&mut ctx, action),
        },
        Some(Commands::Data(cmd)) => match cmd {
            DataCommands::Purge {
                indexes,
                expired,
                yes,
            } => handle_purge(&mut ctx, indexes, expired, yes),
            DataCommands::Export { path } => handle_export(&ctx, path),
            DataCommands::Import { file } => handle_import(&mut ctx, file),
            DataCommands::Stats => handle_stats(&ctx),
        },
        Some(Commands::Misc(cmd)) => match cmd {
            MiscCommands::Settings { key, value } => handle_settings(&mut ctx, key, value),
            MiscCommands::Help { .. } => Ok(()),
        },
        None => handle_list(&ctx, ListFilter::default()),
    }
}

fn init_context() -> Result<AppContext> {
    let dir = data_dir()?;
    let config = MarknotesConfig::load(&dir)?;
    log::debug!("data dir: {}", dir.display());

    let store = FileStore::new(dir);
    let mut api = NoteStore::open_with_retention(store, config.trash_retention_days)?;
    api.initialize()?;

    Ok(AppContext { api, config })
}

// --- Resolution helpers ---

fn resolve_notes<I: AsRef<str>>(ctx: &AppContext, inputs: &[I]) -> Result<Vec<DisplayNote>> {
    let selectors = index::parse_selectors(inputs);
    index::resolve(ctx.api.state(), &selectors)
}

fn resolve_note(ctx: &AppContext, input: &str) -> Result<DisplayNote> {
    let mut found = resolve_notes(ctx, &[input])?;
    match found.len() {
        1 => Ok(found.remove(0)),
        n => Err(MarknotesError::Api(format!(
            "Expected one note, \"{}\" selects {}",
            input, n
        ))),
    }
}

/// Finds an active folder by id or case-insensitive name.
fn resolve_folder(ctx: &AppContext, input: &str) -> Result<Uuid> {
    find_folder(ctx.api.active_folders(), input)
}

fn resolve_trashed_folder(ctx: &AppContext, input: &str) -> Result<Uuid> {
    find_folder(ctx.api.trashed_folders(), input)
}

fn find_folder(folders: Vec<&Folder>, input: &str) -> Result<Uuid> {
    if let Ok(id) = Uuid::parse_str(input) {
        if folders.iter().any(|f| f.id == id) {
            return Ok(id);
        }
    }
    let matches: Vec<&&Folder> = folders
        .iter()
        .filter(|f| f.name.eq_ignore_ascii_case(input))
        .collect();
    match matches.as_slice() {
        [only] => Ok(only.id),
        [] => Err(MarknotesError::Api(format!("No folder named \"{}\"", input))),
        many => Err(MarknotesError::Api(format!(
            "{} folders are named \"{}\", use the id",
            many.len(),
            input
        ))),
    }
}

fn resolve_tag(ctx: &AppContext, name: &str) -> Result<Uuid> {
    ctx.api
        .state()
        .tags
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
        .map(|t| t.id)
        .ok_or_else(|| MarknotesError::Api(format!("No tag record named \"{}\"", name)))
}

fn resolve_template(ctx: &AppContext, input: &str) -> Result<String> {
    let templates = &ctx.api.state().templates;
    templates
        .iter()
        .find(|t| t.id == input)
        .or_else(|| templates.iter().find(|t| t.name.eq_ignore_ascii_case(input)))
        .map(|t| t.id.clone())
        .ok_or_else(|| MarknotesError::Api(format!("No template \"{}\"", input)))
}

/// Regular index entries for `notes`, keeping the order of `notes`.
fn with_indexes(ctx: &AppContext, notes: &[&Note]) -> Vec<DisplayNote> {
    let indexed = index::index_notes(&ctx.api.state().notes);
    notes
        .iter()
        .filter_map(|n| {
            indexed
                .iter()
                .find(|dn| {
                    dn.note.id == n.id
                        && matches!(dn.index, DisplayIndex::Regular(_) | DisplayIndex::Deleted(_))
                })
                .cloned()
        })
        .collect()
}

fn current_id(ctx: &AppContext) -> Option<Uuid> {
    ctx.api.state().current_note_id
}

// --- Handlers ---

fn handle_create(
    ctx: &mut AppContext,
    title: Vec<String>,
    content: Option<String>,
    folder: Option<String>,
    tags: Vec<String>,
    no_editor: bool,
) -> Result<()> {
    let folder_id = folder.map(|f| resolve_folder(ctx, &f)).transpose()?;
    let mut title = title.join(" ");
    let mut body = content.clone().unwrap_or_default();

    if content.is_none() && !no_editor {
        let edited = edit_content(&EditorContent::new(title, body))?;
        title = edited.title;
        body = edited.content;
    }
    if title.trim().is_empty() {
        title = "Untitled".to_string();
    }

    let result = ctx.api.create_note(title, body, folder_id)?;
    print_messages(&result.messages);

    if let Some(note) = result.affected_notes.first() {
        for tag in &tags {
            ctx.api.add_tag_to_note(&note.id, tag)?;
        }
    }
    Ok(())
}

#[derive(Debug, Default)]
struct ListFilter {
    folder: Option<String>,
    tag: Option<String>,
    favorites: bool,
    unfiled: bool,
    recent: bool,
    deleted: bool,
}

fn handle_list(ctx: &AppContext, filter: ListFilter) -> Result<()> {
    let indexed = index::index_notes(&ctx.api.state().notes);

    let shown: Vec<DisplayNote> = if filter.deleted {
        indexed
            .into_iter()
            .filter(|dn| matches!(dn.index, DisplayIndex::Deleted(_)))
            .collect()
    } else if filter.favorites {
        indexed
            .into_iter()
            .filter(|dn| matches!(dn.index, DisplayIndex::Favorite(_)))
            .collect()
    } else if filter.folder.is_some() || filter.tag.is_some() || filter.unfiled || filter.recent
    {
        let mut keep: Option<HashSet<Uuid>> = None;
        let mut narrow = |ids: HashSet<Uuid>| {
            keep = Some(match keep.take() {
                Some(prev) => prev.intersection(&ids).copied().collect(),
                None => ids,
            });
        };
        if let Some(name) = &filter.folder {
            let folder_id = resolve_folder(ctx, name)?;
            narrow(ctx.api.notes_in_folder(&folder_id).iter().map(|n| n.id).collect());
        }
        if let Some(tag) = &filter.tag {
            narrow(ctx.api.notes_by_tag(tag).iter().map(|n| n.id).collect());
        }
        if filter.unfiled {
            narrow(ctx.api.unfiled_notes().iter().map(|n| n.id).collect());
        }
        if filter.recent {
            narrow(
                ctx.api
                    .recent_notes(ctx.config.recent_days)
                    .iter()
                    .map(|n| n.id)
                    .collect(),
            );
        }
        let keep = keep.unwrap_or_default();
        indexed
            .into_iter()
            .filter(|dn| matches!(dn.index, DisplayIndex::Regular(_)) && keep.contains(&dn.note.id))
            .collect()
    } else {
        indexed
            .into_iter()
            .filter(|dn| !matches!(dn.index, DisplayIndex::Deleted(_)))
            .collect()
    };

    print!("{}", render_note_list(&shown, current_id(ctx)));
    Ok(())
}

fn handle_search(
    ctx: &AppContext,
    term: Vec<String>,
    tags: Vec<String>,
    favorites: bool,
    recent: bool,
    sort: &str,
) -> Result<()> {
    let sort: QuerySort = sort.parse().map_err(MarknotesError::Api)?;
    let query = NoteQuery {
        tags,
        filter: if favorites {
            QueryFilter::Favorites
        } else if recent {
            QueryFilter::Recent
        } else {
            QueryFilter::All
        },
        sort,
        recent_days: ctx.config.recent_days,
        ..NoteQuery::text(term.join(" "))
    };

    let found = ctx.api.query(&query);
    print!("{}", render_note_list(&with_indexes(ctx, &found), current_id(ctx)));
    Ok(())
}

fn handle_view(ctx: &AppContext, indexes: Vec<String>) -> Result<()> {
    let notes = resolve_notes(ctx, &indexes)?;
    print!("{}", render_full_notes(&notes, &ctx.api.state().folders));
    Ok(())
}

fn handle_edit(
    ctx: &mut AppContext,
    indexes: Vec<String>,
    title: Option<String>,
    content: Option<String>,
) -> Result<()> {
    let notes = resolve_notes(ctx, &indexes)?;
    let interactive = title.is_none() && content.is_none();

    for dn in &notes {
        let mut session = EditSession::new(&dn.note, &ctx.api.state().settings);
        let mut draft = Draft::from_note(&dn.note);

        if interactive {
            let edited =
                edit_content(&EditorContent::new(draft.title.clone(), draft.content.clone()))?;
            draft.title = edited.title;
            draft.content = edited.content;
        } else {
            if let Some(t) = &title {
                draft.title = t.clone();
            }
            if let Some(c) = &content {
                draft.content = c.clone();
            }
        }

        session.edit(draft, Utc::now());
        match session.save_now() {
            Some(update) => {
                let result = ctx.api.update_note(&session.note_id(), &update)?;
                print_messages(&result.messages);
            }
            None => print_messages(&[CmdMessage::info(format!(
                "No changes to {}",
                dn.note.title
            ))]),
        }
    }
    Ok(())
}

fn handle_select(ctx: &mut AppContext, indexes: Vec<String>) -> Result<()> {
    let dn = resolve_note(ctx, &indexes.join(" "))?;
    let result = ctx.api.select_note(&dn.note.id)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, indexes: Vec<String>) -> Result<()> {
    for dn in resolve_notes(ctx, &indexes)? {
        let result = ctx.api.delete_note(&dn.note.id)?;
        print_messages(&result.messages);
    }
    Ok(())
}

fn handle_restore(ctx: &mut AppContext, indexes: Vec<String>) -> Result<()> {
    for dn in resolve_notes(ctx, &indexes)? {
        let result = ctx.api.restore_note(&dn.note.id)?;
        print_messages(&result.messages);
    }
    Ok(())
}

fn handle_favorite(ctx: &mut AppContext, indexes: Vec<String>) -> Result<()> {
    for dn in resolve_notes(ctx, &indexes)? {
        let result = ctx.api.toggle_favorite(&dn.note.id)?;
        print_messages(&result.messages);
    }
    Ok(())
}

fn handle_color(ctx: &mut AppContext, index: String, color: Option<String>) -> Result<()> {
    let dn = resolve_note(ctx, &index)?;
    let result = ctx.api.set_color(&dn.note.id, color)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_tag(ctx: &mut AppContext, action: TagCommands) -> Result<()> {
    match action {
        TagCommands::Add { index, tags } => {
            let dn = resolve_note(ctx, &index)?;
            for tag in &tags {
                let result = ctx.api.add_tag_to_note(&dn.note.id, tag)?;
                print_messages(&result.messages);
            }
        }
        TagCommands::Rm { index, tags } => {
            let dn = resolve_note(ctx, &index)?;
            for tag in &tags {
                let result = ctx.api.remove_tag_from_note(&dn.note.id, tag)?;
                print_messages(&result.messages);
            }
        }
        TagCommands::Ls => {
            let in_use: Vec<(String, usize)> = ctx
                .api
                .all_note_tags()
                .into_iter()
                .map(|t| {
                    let count = ctx
                        .api
                        .notes_by_tag(&t)
                        .iter()
                        .filter(|n| !n.is_trashed())
                        .count();
                    (t, count)
                })
                .collect();
            print!("{}", render_tags(&in_use, &ctx.api.state().tags));
        }
        TagCommands::Create { name, color } => {
            let result = ctx.api.create_tag(name, color)?;
            print_messages(&result.messages);
        }
        TagCommands::Update {
            name,
            new_name,
            color,
        } => {
            let id = resolve_tag(ctx, &name)?;
            let update = TagUpdate {
                name: new_name,
                color,
                ..TagUpdate::default()
            };
            let result = ctx.api.update_tag(&id, &update)?;
            print_messages(&result.messages);
        }
        TagCommands::Delete { name } => {
            let id = resolve_tag(ctx, &name)?;
            let result = ctx.api.delete_tag(&id)?;
            print_messages(&result.messages);
        }
    }
    Ok(())
}

fn handle_folder(ctx: &mut AppContext, action: FolderCommands) -> Result<()> {
    let result = match action {
        FolderCommands::Create { name, parent } => {
            let parent_id = parent.map(|p| resolve_folder(ctx, &p)).transpose()?;
            ctx.api.create_folder(name, parent_id)?
        }
        FolderCommands::Ls { deleted } => {
            if deleted {
                print!("{}", render_trashed_folders(&ctx.api.trashed_folders()));
            } else {
                let counts = |id: &Uuid| {
                    ctx.api
                        .notes_in_folder(id)
                        .iter()
                        .filter(|n| !n.is_trashed())
                        .count()
                };
                print!("{}", render_folder_tree(&ctx.api.active_folders(), &counts));
            }
            return Ok(());
        }
        FolderCommands::Rename { folder, name } => {
            let id = resolve_folder(ctx, &folder)?;
            ctx.api.rename_folder(&id, name)?
        }
        FolderCommands::Move { index, folder } => {
            let dn = resolve_note(ctx, &index)?;
            let folder_id = folder.map(|f| resolve_folder(ctx, &f)).transpose()?;
            ctx.api.move_note(&dn.note.id, folder_id)?
        }
        FolderCommands::Delete { folder } => {
            let id = resolve_folder(ctx, &folder)?;
            ctx.api.delete_folder(&id)?
        }
        FolderCommands::Restore { folder } => {
            let id = resolve_trashed_folder(ctx, &folder)?;
            ctx.api.restore_folder(&id)?
        }
        FolderCommands::Purge { folder } => {
            let id = resolve_trashed_folder(ctx, &folder)?;
            ctx.api.delete_folder_permanently(&id)?
        }
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_template(ctx: &mut AppContext, action: TemplateCommands) -> Result<()> {
    let result = match action {
        TemplateCommands::Ls => {
            print!("{}", render_templates(&ctx.api.state().templates));
            return Ok(());
        }
        TemplateCommands::Use {
            template,
            folder,
            title,
        } => {
            let id = resolve_template(ctx, &template)?;
            let folder_id = folder.map(|f| resolve_folder(ctx, &f)).transpose()?;
            let title = if title.is_empty() {
                ctx.api
                    .state()
                    .template(&id)
                    .map(|t| t.name.clone())
                    .unwrap_or_default()
            } else {
                title.join(" ")
            };
            ctx.api.create_note_from_template(&id, title, folder_id)?
        }
        TemplateCommands::Create {
            name,
            content,
            description,
            category,
        } => {
            let content = match content {
                Some(c) => c,
                None => edit_content(&EditorContent::new(name.clone(), String::new()))?.content,
            };
            ctx.api
                .create_template(name, content, description, category)?
        }
        TemplateCommands::Delete { template } => {
            let id = resolve_template(ctx, &template)?;
            ctx.api.delete_template(&id)?
        }
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_purge(
    ctx: &mut AppContext,
    indexes: Vec<String>,
    expired: bool,
    yes: bool,
) -> Result<()> {
    if expired {
        let result = ctx.api.purge_expired(ctx.config.trash_retention_days)?;
        print_messages(&result.messages);
        return Ok(());
    }

    if !indexes.is_empty() {
        for dn in resolve_notes(ctx, &indexes)? {
            if !dn.note.is_trashed() {
                print_messages(&[CmdMessage::warning(format!(
                    "{} is not in the trash, delete it first",
                    dn.note.title
                ))]);
                continue;
            }
            let result = ctx.api.delete_note_permanently(&dn.note.id)?;
            print_messages(&result.messages);
        }
        return Ok(());
    }

    if !yes {
        let trashed = ctx.api.trashed_notes().len() + ctx.api.trashed_folders().len();
        print_messages(&[CmdMessage::warning(format!(
            "This permanently removes {} trashed item(s). Re-run with --yes to confirm.",
            trashed
        ))]);
        return Ok(());
    }

    let result = ctx.api.purge_trashed_notes()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(ctx: &AppContext, path: Option<String>) -> Result<()> {
    let doc = ctx.api.export_notes();
    let target = match path {
        Some(p) => PathBuf::from(p),
        None => ctx
            .config
            .export_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(export::file_name(Utc::now())),
    };

    std::fs::write(&target, export::to_json(&doc)?)?;
    print_messages(&[CmdMessage::success(format!(
        "Exported {} notes to {}",
        doc.notes.len(),
        target.display()
    ))]);
    Ok(())
}

fn handle_import(ctx: &mut AppContext, file: String) -> Result<()> {
    let json = std::fs::read_to_string(&file)?;
    let (result, _) = ctx.api.import_notes(&json)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_stats(ctx: &AppContext) -> Result<()> {
    print!("{}", render_stats(&ctx.api.stats()));
    Ok(())
}

fn handle_settings(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    match (key, value) {
        (Some(k), Some(v)) => {
            let update = parse_setting(&k, &v).map_err(MarknotesError::Api)?;
            let result = ctx.api.update_settings(&update)?;
            print_messages(&result.messages);
        }
        (key, _) => {
            let output = render_settings(&ctx.api.state().settings, key.as_deref());
            if output.is_empty() {
                return Err(MarknotesError::Api(format!(
                    "Unknown setting: {}",
                    key.unwrap_or_default()
                )));
            }
            print!("{}", output);
        }
    }
    Ok(())
}
