//! # Rendering
//!
//! Turns library results into terminal text. Every `render_*` function
//! returns a `String` so output can be asserted on in tests; color comes
//! from `colored`, which switches itself off when stdout is not a terminal.
//!
//! Layout math (width, truncation, padding) is done on display width, not
//! byte or char length, so titles with wide characters line up.

use chrono::{DateTime, Utc};
use colored::Colorize;
use marknotes::commands::stats::NotebookStats;
use marknotes::commands::{CmdMessage, MessageLevel};
use marknotes::index::{DisplayIndex, DisplayNote};
use marknotes::model::{AppSettings, Folder, Tag, Template};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use uuid::Uuid;

pub const LINE_WIDTH: usize = 100;
pub const TIME_WIDTH: usize = 14;
pub const FAVORITE_MARKER: &str = "★";
pub const CURRENT_MARKER: &str = "▸";

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

/// One line per note: marker, index, title (plus tags), right-aligned age.
///
/// A blank line separates the favorites block from the rest.
pub fn render_note_list(notes: &[DisplayNote], current: Option<Uuid>) -> String {
    if notes.is_empty() {
        return "No notes found.\n".to_string();
    }

    let mut output = String::new();
    let mut last_was_favorite = false;

    for dn in notes {
        let is_favorite_entry = matches!(dn.index, DisplayIndex::Favorite(_));
        if last_was_favorite && !is_favorite_entry {
            output.push('\n');
        }
        last_was_favorite = is_favorite_entry;

        let marker = if Some(dn.note.id) == current {
            CURRENT_MARKER
        } else if is_favorite_entry {
            FAVORITE_MARKER
        } else {
            " "
        };
        let left = format!("  {} ", marker);
        let idx_str = format!("{}. ", dn.index);

        let right = if dn.note.is_favorite && !is_favorite_entry {
            format!("{} ", FAVORITE_MARKER)
        } else {
            "  ".to_string()
        };

        let mut label = dn.note.title.clone();
        if !dn.note.tags.is_empty() {
            let tags: Vec<String> = dn.note.tags.iter().map(|t| format!("#{}", t)).collect();
            label = format!("{} {}", label, tags.join(" "));
        }

        let fixed = left.width() + idx_str.width() + right.width() + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed);
        let title_display = truncate_to_width(&label, available);
        let padding = " ".repeat(available.saturating_sub(title_display.width()));

        let time_reference = dn.note.deleted_at.unwrap_or(dn.note.updated_at);
        let idx_colored = match dn.index {
            DisplayIndex::Favorite(_) => idx_str.yellow(),
            DisplayIndex::Deleted(_) => idx_str.red(),
            DisplayIndex::Regular(_) => idx_str.normal(),
        };

        output.push_str(&format!(
            "{}{}{}{}{}{}\n",
            left,
            idx_colored,
            title_display,
            padding,
            right,
            format_time_ago(time_reference).dimmed()
        ));
    }

    output
}

pub fn render_full_notes(notes: &[DisplayNote], folders: &[Folder]) -> String {
    let mut output = String::new();
    for (i, dn) in notes.iter().enumerate() {
        if i > 0 {
            output.push_str("\n================================\n\n");
        }
        output.push_str(&format!(
            "{} {}\n",
            dn.index.to_string().yellow(),
            dn.note.title.bold()
        ));

        let mut meta = vec![format!("{} words", dn.note.word_count)];
        if let Some(folder) = dn
            .note
            .folder_id
            .and_then(|id| folders.iter().find(|f| f.id == id))
        {
            meta.push(format!("in {}", folder.name));
        }
        if !dn.note.tags.is_empty() {
            meta.push(
                dn.note
                    .tags
                    .iter()
                    .map(|t| format!("#{}", t))
                    .collect::<Vec<_>>()
                    .join(" "),
            );
        }
        if let Some(color) = &dn.note.color {
            meta.push(color.clone());
        }
        meta.push(format!("updated {}", format_time_ago(dn.note.updated_at).trim()));
        output.push_str(&format!("{}\n", meta.join(" · ").dimmed()));
        output.push_str("--------------------------------\n");
        output.push_str(&dn.note.content);
        output.push('\n');
    }
    output
}

/// Folders as an indented tree. Children whose parent is not in `folders`
/// are shown at the top level.
pub fn render_folder_tree(folders: &[&Folder], note_counts: &dyn Fn(&Uuid) -> usize) -> String {
    if folders.is_empty() {
        return "No folders.\n".to_string();
    }

    fn walk(
        out: &mut String,
        folders: &[&Folder],
        parent: Option<Uuid>,
        depth: usize,
        note_counts: &dyn Fn(&Uuid) -> usize,
    ) {
        for folder in folders.iter().filter(|f| f.parent_id == parent) {
            out.push_str(&format!(
                "{}{} {}\n",
                "  ".repeat(depth + 1),
                folder.name.bold(),
                format!("({})", note_counts(&folder.id)).dimmed()
            ));
            if folder.is_expanded {
                walk(out, folders, Some(folder.id), depth + 1, note_counts);
            }
        }
    }

    let mut output = String::new();
    let known: Vec<Uuid> = folders.iter().map(|f| f.id).collect();
    let roots: Vec<&Folder> = folders
        .iter()
        .copied()
        .filter(|f| f.parent_id.map(|p| !known.contains(&p)).unwrap_or(true))
        .collect();
    for root in roots {
        output.push_str(&format!(
            "  {} {}\n",
            root.name.bold(),
            format!("({})", note_counts(&root.id)).dimmed()
        ));
        if root.is_expanded {
            walk(&mut output, folders, Some(root.id), 1, note_counts);
        }
    }
    output
}

pub fn render_trashed_folders(folders: &[&Folder]) -> String {
    if folders.is_empty() {
        return "No trashed folders.\n".to_string();
    }
    folders
        .iter()
        .map(|f| {
            let deleted = f.deleted_at.map(format_time_ago).unwrap_or_default();
            format!("  {} {}\n", f.name.red(), deleted.trim().dimmed())
        })
        .collect()
}

pub fn render_tags(in_use: &[(String, usize)], records: &[Tag]) -> String {
    let mut output = String::new();
    if in_use.is_empty() {
        output.push_str("No tags in use.\n");
    } else {
        for (tag, count) in in_use {
            output.push_str(&format!("  #{} {}\n", tag, format!("({})", count).dimmed()));
        }
    }
    if !records.is_empty() {
        output.push_str("\nTag records:\n");
        for tag in records {
            output.push_str(&format!("  {} {}\n", tag.name, tag.color.dimmed()));
        }
    }
    output
}

pub fn render_templates(templates: &[Template]) -> String {
    if templates.is_empty() {
        return "No templates.\n".to_string();
    }
    let id_width = templates.iter().map(|t| t.id.width()).max().unwrap_or(0);
    templates
        .iter()
        .map(|t| {
            let id = format!("{:<width$}", t.id, width = id_width);
            format!(
                "  {}  {} {}\n",
                id.yellow(),
                t.name.bold(),
                format!("[{}] {}", t.category, t.description).dimmed()
            )
        })
        .collect()
}

pub fn render_settings(settings: &AppSettings, key: Option<&str>) -> String {
    let pairs = [
        ("theme", settings.theme.to_string()),
        ("editor-mode", settings.editor_mode.to_string()),
        ("font-size", settings.font_size.to_string()),
        ("font-family", settings.font_family.clone()),
        ("line-height", settings.line_height.to_string()),
        ("show-line-numbers", settings.show_line_numbers.to_string()),
        ("auto-save", settings.auto_save.to_string()),
        ("auto-save-interval", settings.auto_save_interval.to_string()),
    ];
    let wanted = key.map(normalize_key);
    pairs
        .iter()
        .filter(|(k, _)| wanted.as_deref().map(|w| normalize_key(k) == w).unwrap_or(true))
        .map(|(k, v)| format!("{} = {}\n", k, v))
        .collect()
}

fn normalize_key(key: &str) -> String {
    key.replace(['-', '_'], "").to_lowercase()
}

pub fn render_stats(stats: &NotebookStats) -> String {
    let rows = [
        ("Notes", stats.notes),
        ("Favorites", stats.favorites),
        ("Folders", stats.folders),
        ("Tags", stats.tags),
        ("In trash", stats.trashed),
        ("Words", stats.words),
    ];
    rows.iter()
        .map(|(label, value)| format!("  {:<10} {}\n", label, value))
        .collect()
}

pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let c = if c == '\n' { ' ' } else { c };
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

pub fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);

    let formatter = Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    // keeps singular and plural units the same width
    let time_str = time_str
        .replace("hour ago", "hour  ago")
        .replace("minute ago", "minute  ago")
        .replace("second ago", "second  ago")
        .replace("day ago", "day  ago")
        .replace("week ago", "week  ago")
        .replace("month ago", "month  ago")
        .replace("year ago", "year  ago");

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
