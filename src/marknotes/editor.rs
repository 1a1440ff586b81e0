use crate::error::{MarknotesError, Result};
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;
use uuid::Uuid;

/// A note as laid out in an editor buffer.
/// Format: title\n\ncontent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorContent {
    pub title: String,
    pub content: String,
}

impl EditorContent {
    pub fn new(title: String, content: String) -> Self {
        Self { title, content }
    }

    pub fn to_buffer(&self) -> String {
        if self.content.is_empty() {
            format!("{}\n\n", self.title)
        } else {
            format!("{}\n\n{}", self.title, self.content)
        }
    }

    /// First non-blank line is the title, the rest (minus leading blank
    /// lines) is the markdown body.
    pub fn from_buffer(buffer: &str) -> Self {
        let trimmed = buffer.trim_start_matches(['\n', '\r']);
        let (title, body) = match trimmed.split_once('\n') {
            Some((title, body)) => (title, body),
            None => (trimmed, ""),
        };

        Self {
            title: title.trim().to_string(),
            content: body.trim_start_matches(['\n', '\r']).trim_end().to_string(),
        }
    }
}

/// Gets the editor command from environment.
/// Checks $EDITOR, then $VISUAL, then falls back to common editors.
pub fn get_editor() -> Result<String> {
    for var in ["EDITOR", "VISUAL"] {
        if let Ok(editor) = env::var(var) {
            if !editor.is_empty() {
                return Ok(editor);
            }
        }
    }

    for fallback in &["vim", "vi", "nano"] {
        if Command::new("which")
            .arg(fallback)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
        {
            return Ok((*fallback).to_string());
        }
    }

    Err(MarknotesError::Api(
        "No editor found. Set $EDITOR environment variable.".to_string(),
    ))
}

/// Opens a file in the user's editor and waits for it to close.
/// Returns the contents of the file after editing.
pub fn open_in_editor<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let editor = get_editor()?;
    let path = file_path.as_ref();

    // $EDITOR may carry arguments, e.g. "code --wait"
    let mut parts = editor.split_whitespace();
    let program = parts.next().unwrap_or("vi");

    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|e| {
            MarknotesError::Api(format!("Failed to launch editor '{}': {}", editor, e))
        })?;

    if !status.success() {
        return Err(MarknotesError::Api(format!(
            "Editor '{}' exited with non-zero status",
            editor
        )));
    }

    Ok(fs::read_to_string(path)?)
}

/// Opens an editor on a temporary markdown file holding `initial` and
/// returns what the user saved.
pub fn edit_content(initial: &EditorContent) -> Result<EditorContent> {
    let temp_file = env::temp_dir().join(format!("marknotes-{}.md", Uuid::new_v4()));
    fs::write(&temp_file, initial.to_buffer())?;

    let result = open_in_editor(&temp_file);
    let _ = fs::remove_file(&temp_file);

    Ok(EditorContent::from_buffer(&result?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_buffer_separates_title_and_body() {
        let ec = EditorContent::new("My Title".to_string(), "Some *markdown*.".to_string());
        assert_eq!(ec.to_buffer(), "My Title\n\nSome *markdown*.");

        let empty = EditorContent::new("My Title".to_string(), String::new());
        assert_eq!(empty.to_buffer(), "My Title\n\n");
    }

    #[test]
    fn from_buffer_normal() {
        let ec = EditorContent::from_buffer("My Title\n\n# Heading\n\n- item\n");
        assert_eq!(ec.title, "My Title");
        assert_eq!(ec.content, "# Heading\n\n- item");
    }

    #[test]
    fn from_buffer_title_only_and_empty() {
        let ec = EditorContent::from_buffer("My Title");
        assert_eq!(ec.title, "My Title");
        assert_eq!(ec.content, "");

        let ec = EditorContent::from_buffer("");
        assert_eq!(ec.title, "");
        assert_eq!(ec.content, "");
    }

    #[test]
    fn from_buffer_skips_leading_blank_lines() {
        let ec = EditorContent::from_buffer("\n\nTitle\nbody without blank");
        assert_eq!(ec.title, "Title");
        assert_eq!(ec.content, "body without blank");
    }

    #[test]
    fn roundtrip() {
        let original = EditorContent::new(
            "Test Title".to_string(),
            "Test content\nwith lines".to_string(),
        );
        assert_eq!(EditorContent::from_buffer(&original.to_buffer()), original);
    }
}
