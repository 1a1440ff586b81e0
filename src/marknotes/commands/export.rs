use crate::model::Note;
use crate::state::AppState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const EXPORT_VERSION: &str = "1.0";

/// The on-disk export/import document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub notes: Vec<Note>,
    pub export_date: DateTime<Utc>,
    pub version: String,
}

/// Builds an export of every active note, in collection order.
pub fn run(state: &AppState, now: DateTime<Utc>) -> ExportDocument {
    ExportDocument {
        notes: state
            .notes
            .iter()
            .filter(|n| !n.is_trashed())
            .cloned()
            .collect(),
        export_date: now,
        version: EXPORT_VERSION.to_string(),
    }
}

pub fn to_json(doc: &ExportDocument) -> serde_json::Result<String> {
    serde_json::to_string_pretty(doc)
}

/// `markdown-notes-export-YYYY-MM-DD.json`
pub fn file_name(now: DateTime<Utc>) -> String {
    format!("markdown-notes-export-{}.json", now.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StateFixture;
    use chrono::TimeZone;

    #[test]
    fn exports_active_notes_only() {
        let mut fx = StateFixture::new()
            .with_note("Active", "", &[])
            .with_note("Deleted", "", &[]);
        fx.state.notes[1].deleted_at = Some(Utc::now());

        let doc = run(&fx.state, Utc::now());
        assert_eq!(doc.notes.len(), 1);
        assert_eq!(doc.notes[0].title, "Active");
        assert_eq!(doc.version, "1.0");
    }

    #[test]
    fn json_uses_documented_field_names() {
        let fx = StateFixture::new().with_note("A", "body", &[]);
        let json = to_json(&run(&fx.state, Utc::now())).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(value["exportDate"].is_string());
        assert_eq!(value["version"], "1.0");
        assert_eq!(value["notes"][0]["title"], "A");
        assert_eq!(value["notes"][0]["wordCount"], 1);
    }

    #[test]
    fn file_name_carries_the_date() {
        let now = Utc.with_ymd_and_hms(2024, 5, 17, 12, 0, 0).unwrap();
        assert_eq!(file_name(now), "markdown-notes-export-2024-05-17.json");
    }
}
