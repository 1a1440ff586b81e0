use crate::commands::{create as create_note, CmdMessage, CmdResult};
use crate::model::{Template, TemplateUpdate};
use crate::state::AppState;
use chrono::NaiveDate;
use uuid::Uuid;

const DATE_PLACEHOLDER: &str = "{{date}}";

fn template_not_found(id: &str) -> CmdMessage {
    CmdMessage::warning(format!("No template with id {}", id))
}

/// The created template is `affected_templates[0]`.
pub fn create(
    state: &mut AppState,
    name: String,
    content: String,
    description: String,
    category: String,
) -> CmdResult {
    let template = Template::new(name, content, description, category);
    state.templates.push(template.clone());

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Template created: {}",
        template.name
    )));
    result.affected_templates.push(template);
    result
}

pub fn update(state: &mut AppState, id: &str, upd: &TemplateUpdate) -> CmdResult {
    let Some(template) = state.templates.iter_mut().find(|t| t.id == id) else {
        return CmdResult::default().with_message(template_not_found(id));
    };
    upd.apply_to(template);

    let mut result = CmdResult::default();
    result.affected_templates.push(template.clone());
    result
}

pub fn delete(state: &mut AppState, id: &str) -> CmdResult {
    let Some(pos) = state.templates.iter().position(|t| t.id == id) else {
        return CmdResult::default().with_message(template_not_found(id));
    };
    let template = state.templates.remove(pos);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Template deleted: {}",
        template.name
    )));
    result.affected_templates.push(template);
    result
}

/// Fills the template placeholders for `date`.
pub fn render(template: &Template, date: NaiveDate) -> String {
    template
        .content
        .replace(DATE_PLACEHOLDER, &date.format("%Y-%m-%d").to_string())
}

/// Creates (and selects) a note from a template, stamped with `date`.
pub fn instantiate(
    state: &mut AppState,
    template_id: &str,
    title: String,
    folder_id: Option<Uuid>,
    date: NaiveDate,
) -> CmdResult {
    let Some(template) = state.template(template_id) else {
        return CmdResult::default().with_message(template_not_found(template_id));
    };
    let content = render(template, date);
    let template_id = template.id.clone();

    let mut result = create_note::run(state, title, content, folder_id);
    if let Some(created) = result.affected_notes.first_mut() {
        if let Some(note) = state.note_mut(&created.id) {
            note.template = Some(template_id);
            *created = note.clone();
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn render_replaces_every_date_placeholder() {
        let template = Template::new(
            "T".into(),
            "{{date}} and {{date}}".into(),
            "".into(),
            "".into(),
        );
        assert_eq!(render(&template, date()), "2024-03-09 and 2024-03-09");
    }

    #[test]
    fn instantiate_seed_template() {
        let mut state = AppState::default();
        let result = instantiate(
            &mut state,
            "meeting-template",
            "Standup".into(),
            None,
            date(),
        );

        let note = &result.affected_notes[0];
        assert!(note.content.starts_with("# Meeting Notes - 2024-03-09"));
        assert_eq!(note.template.as_deref(), Some("meeting-template"));
        assert_eq!(state.current_note().unwrap().id, note.id);
        assert_eq!(state.note(&note.id).unwrap().template.as_deref(), Some("meeting-template"));
    }

    #[test]
    fn instantiate_unknown_template_is_noop() {
        let mut state = AppState::default();
        let result = instantiate(&mut state, "nope", "X".into(), None, date());
        assert!(result.is_noop());
        assert!(state.notes.is_empty());
    }

    #[test]
    fn crud_roundtrip() {
        let mut state = AppState::empty();
        let id = create(
            &mut state,
            "Bug".into(),
            "## Steps".into(),
            "Bug report".into(),
            "Work".into(),
        )
        .affected_templates[0]
            .id
            .clone();

        let upd = TemplateUpdate {
            category: Some("Engineering".into()),
            ..TemplateUpdate::default()
        };
        update(&mut state, &id, &upd);
        assert_eq!(state.template(&id).unwrap().category, "Engineering");
        assert_eq!(state.template(&id).unwrap().name, "Bug");

        delete(&mut state, &id);
        assert!(state.template(&id).is_none());
    }
}
