use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Counts whitespace-delimited tokens. Empty or blank content counts as zero words.
pub fn word_count(content: &str) -> usize {
    content.split_whitespace().count()
}

/// Returns a timestamp strictly later than `previous`, normally "now".
///
/// Coarse system clocks can hand back the same instant twice in a row; an
/// update must still move `updated_at` forward.
pub fn advance_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

/// The instant `days` before `now`, or `None` when it falls outside the
/// range chrono can represent.
pub fn days_before(now: DateTime<Utc>, days: u32) -> Option<DateTime<Utc>> {
    Duration::try_days(i64::from(days)).and_then(|d| now.checked_sub_signed(d))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub linked_notes: Vec<Uuid>,
    /// Id of the template the note was created from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub word_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Note {
    pub fn new(title: String, content: String, folder_id: Option<Uuid>) -> Self {
        let now = Utc::now();
        let word_count = word_count(&content);
        Self {
            id: Uuid::new_v4(),
            title,
            content,
            tags: Vec::new(),
            folder_id,
            created_at: now,
            updated_at: now,
            linked_notes: Vec::new(),
            template: None,
            is_favorite: false,
            word_count,
            color: None,
            deleted_at: None,
        }
    }

    pub fn is_trashed(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uuid>,
    /// Informational only. Membership is derived from `Note::folder_id` and
    /// `Folder::parent_id`.
    #[serde(default)]
    pub children: Vec<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default = "default_expanded")]
    pub is_expanded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

fn default_expanded() -> bool {
    true
}

impl Folder {
    pub fn new(name: String, parent_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            parent_id,
            children: Vec::new(),
            color: None,
            created_at: Utc::now(),
            is_expanded: true,
            deleted_at: None,
        }
    }

    pub fn is_trashed(&self) -> bool {
        self.deleted_at.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub count: usize,
}

impl Tag {
    pub fn new(name: String, color: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            color,
            count: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Seed templates carry fixed, human-readable ids.
    pub id: String,
    pub name: String,
    pub content: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
}

impl Template {
    pub fn new(name: String, content: String, description: String, category: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            content,
            description,
            category,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    System,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "system" => Ok(Theme::System),
            other => Err(format!("Invalid theme: {} (expected light, dark or system)", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    #[default]
    Split,
    Preview,
    Edit,
}

impl fmt::Display for EditorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EditorMode::Split => "split",
            EditorMode::Preview => "preview",
            EditorMode::Edit => "edit",
        };
        f.write_str(s)
    }
}

impl FromStr for EditorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "split" => Ok(EditorMode::Split),
            "preview" => Ok(EditorMode::Preview),
            "edit" => Ok(EditorMode::Edit),
            other => Err(format!(
                "Invalid editor mode: {} (expected split, preview or edit)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub theme: Theme,
    pub editor_mode: EditorMode,
    pub font_size: u32,
    pub font_family: String,
    pub line_height: f32,
    pub show_line_numbers: bool,
    pub auto_save: bool,
    /// Milliseconds of inactivity before a pending edit is committed.
    pub auto_save_interval: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            editor_mode: EditorMode::Split,
            font_size: 14,
            font_family: "Inter".to_string(),
            line_height: 1.6,
            show_line_numbers: false,
            auto_save: true,
            auto_save_interval: 2000,
        }
    }
}

// --- Partial updates ---
//
// `Option<Option<T>>` fields distinguish "leave alone" (None) from
// "clear" (Some(None)).

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub folder_id: Option<Option<Uuid>>,
    pub linked_notes: Option<Vec<Uuid>>,
    pub is_favorite: Option<bool>,
    pub color: Option<Option<String>>,
}

impl NoteUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn folder(mut self, folder_id: Option<Uuid>) -> Self {
        self.folder_id = Some(folder_id);
        self
    }

    pub fn favorite(mut self, is_favorite: bool) -> Self {
        self.is_favorite = Some(is_favorite);
        self
    }

    pub fn color(mut self, color: Option<String>) -> Self {
        self.color = Some(color);
        self
    }

    /// Merges the update into `note`. Word count follows content; the
    /// caller owns `updated_at`.
    pub fn apply_to(&self, note: &mut Note) {
        if let Some(title) = &self.title {
            note.title = title.clone();
        }
        if let Some(content) = &self.content {
            note.content = content.clone();
            note.word_count = word_count(content);
        }
        if let Some(tags) = &self.tags {
            note.tags = dedup_tags(tags);
        }
        if let Some(folder_id) = self.folder_id {
            note.folder_id = folder_id;
        }
        if let Some(linked) = &self.linked_notes {
            note.linked_notes = linked.clone();
        }
        if let Some(fav) = self.is_favorite {
            note.is_favorite = fav;
        }
        if let Some(color) = &self.color {
            note.color = color.clone().filter(|c| !c.is_empty());
        }
    }
}

/// Keeps the first occurrence of each tag, preserving order.
fn dedup_tags(tags: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        if !out.contains(tag) {
            out.push(tag.clone());
        }
    }
    out
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FolderUpdate {
    pub name: Option<String>,
    pub parent_id: Option<Option<Uuid>>,
    pub color: Option<Option<String>>,
    pub is_expanded: Option<bool>,
}

impl FolderUpdate {
    pub fn apply_to(&self, folder: &mut Folder) {
        if let Some(name) = &self.name {
            folder.name = name.clone();
        }
        if let Some(parent) = self.parent_id {
            folder.parent_id = parent;
        }
        if let Some(color) = &self.color {
            folder.color = color.clone().filter(|c| !c.is_empty());
        }
        if let Some(expanded) = self.is_expanded {
            folder.is_expanded = expanded;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagUpdate {
    pub name: Option<String>,
    pub color: Option<String>,
    pub count: Option<usize>,
}

impl TagUpdate {
    pub fn apply_to(&self, tag: &mut Tag) {
        if let Some(name) = &self.name {
            tag.name = name.clone();
        }
        if let Some(color) = &self.color {
            tag.color = color.clone();
        }
        if let Some(count) = self.count {
            tag.count = count;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateUpdate {
    pub name: Option<String>,
    pub content: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl TemplateUpdate {
    pub fn apply_to(&self, template: &mut Template) {
        if let Some(name) = &self.name {
            template.name = name.clone();
        }
        if let Some(content) = &self.content {
            template.content = content.clone();
        }
        if let Some(description) = &self.description {
            template.description = description.clone();
        }
        if let Some(category) = &self.category {
            template.category = category.clone();
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsUpdate {
    pub theme: Option<Theme>,
    pub editor_mode: Option<EditorMode>,
    pub font_size: Option<u32>,
    pub font_family: Option<String>,
    pub line_height: Option<f32>,
    pub show_line_numbers: Option<bool>,
    pub auto_save: Option<bool>,
    pub auto_save_interval: Option<u64>,
}

impl SettingsUpdate {
    pub fn apply_to(&self, settings: &mut AppSettings) {
        if let Some(theme) = self.theme {
            settings.theme = theme;
        }
        if let Some(mode) = self.editor_mode {
            settings.editor_mode = mode;
        }
        if let Some(size) = self.font_size {
            settings.font_size = size;
        }
        if let Some(family) = &self.font_family {
            settings.font_family = family.clone();
        }
        if let Some(lh) = self.line_height {
            settings.line_height = lh;
        }
        if let Some(show) = self.show_line_numbers {
            settings.show_line_numbers = show;
        }
        if let Some(auto) = self.auto_save {
            settings.auto_save = auto;
        }
        if let Some(interval) = self.auto_save_interval {
            settings.auto_save_interval = interval;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_count_splits_on_whitespace_runs() {
        assert_eq!(word_count("milk eggs bread"), 3);
        assert_eq!(word_count("  milk\n\n\teggs   "), 2);
    }

    #[test]
    fn word_count_of_empty_content_is_zero() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   \n"), 0);
    }

    #[test]
    fn new_note_has_matching_timestamps() {
        let note = Note::new("Title".into(), "one two".into(), None);
        assert_eq!(note.created_at, note.updated_at);
        assert_eq!(note.word_count, 2);
        assert!(!note.is_trashed());
    }

    #[test]
    fn advance_timestamp_is_strictly_later() {
        let future = Utc::now() + Duration::hours(1);
        assert!(advance_timestamp(future) > future);
        let past = Utc::now() - Duration::hours(1);
        assert!(advance_timestamp(past) > past);
    }

    #[test]
    fn days_before_saturates_to_none() {
        let now = Utc::now();
        assert_eq!(days_before(now, 7), Some(now - Duration::days(7)));
        assert_eq!(days_before(now, u32::MAX), None);
    }

    #[test]
    fn note_update_without_content_keeps_word_count() {
        let mut note = Note::new("Title".into(), "a b c".into(), None);
        NoteUpdate::new().title("Other").apply_to(&mut note);
        assert_eq!(note.title, "Other");
        assert_eq!(note.word_count, 3);
    }

    #[test]
    fn note_update_dedups_tags_and_clears_color() {
        let mut note = Note::new("Title".into(), "".into(), None);
        note.color = Some("#ff0000".into());
        NoteUpdate::new()
            .tags(vec!["a".into(), "b".into(), "a".into()])
            .color(Some(String::new()))
            .apply_to(&mut note);
        assert_eq!(note.tags, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(note.color, None);
    }

    #[test]
    fn theme_parses_case_insensitively() {
        assert_eq!("Dark".parse::<Theme>(), Ok(Theme::Dark));
        assert!("blue".parse::<Theme>().is_err());
        assert_eq!("preview".parse::<EditorMode>(), Ok(EditorMode::Preview));
    }

    #[test]
    fn settings_serialize_in_camel_case() {
        let json = serde_json::to_value(AppSettings::default()).unwrap();
        assert_eq!(json["editorMode"], "split");
        assert_eq!(json["autoSaveInterval"], 2000);
        assert_eq!(json["theme"], "light");
    }

    #[test]
    fn note_loads_with_missing_optional_fields() {
        let json = r#"{
            "id": "5f0c6c1e-8d3b-4b8e-9a43-3a1f7e1d2c10",
            "title": "Old",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-02T00:00:00Z"
        }"#;
        let note: Note = serde_json::from_str(json).unwrap();
        assert_eq!(note.title, "Old");
        assert!(note.tags.is_empty());
        assert!(note.deleted_at.is_none());
        assert!(!note.is_favorite);
    }
}
