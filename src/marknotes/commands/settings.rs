use crate::commands::{CmdMessage, CmdResult};
use crate::model::{EditorMode, SettingsUpdate, Theme};
use crate::state::AppState;

/// Merges `update` into the settings record.
pub fn update(state: &mut AppState, update: &SettingsUpdate) -> CmdResult {
    update.apply_to(&mut state.settings);
    CmdResult::default().with_message(CmdMessage::success("Settings updated"))
}

/// Builds a single-field update from a `key value` pair, as typed by a user.
///
/// Keys accept both the camelCase names used in the store and kebab-case.
pub fn parse_setting(key: &str, value: &str) -> Result<SettingsUpdate, String> {
    let mut upd = SettingsUpdate::default();
    let normalized = key.replace('-', "").replace('_', "").to_lowercase();
    match normalized.as_str() {
        "theme" => upd.theme = Some(value.parse::<Theme>()?),
        "editormode" => upd.editor_mode = Some(value.parse::<EditorMode>()?),
        "fontsize" => upd.font_size = Some(parse_num(key, value)?),
        "fontfamily" => upd.font_family = Some(value.to_string()),
        "lineheight" => {
            upd.line_height = Some(
                value
                    .parse::<f32>()
                    .map_err(|_| format!("Invalid number for {}: {}", key, value))?,
            )
        }
        "showlinenumbers" => upd.show_line_numbers = Some(parse_bool(key, value)?),
        "autosave" => upd.auto_save = Some(parse_bool(key, value)?),
        "autosaveinterval" => upd.auto_save_interval = Some(parse_num(key, value)?),
        _ => return Err(format!("Unknown setting: {}", key)),
    }
    Ok(upd)
}

fn parse_num<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, String> {
    value
        .parse::<T>()
        .map_err(|_| format!("Invalid number for {}: {}", key, value))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, String> {
    match value.to_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(format!("Invalid boolean for {}: {}", key, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AppSettings;

    #[test]
    fn merges_only_given_fields() {
        let mut state = AppState::empty();
        let upd = SettingsUpdate {
            font_size: Some(18),
            ..SettingsUpdate::default()
        };
        update(&mut state, &upd);

        assert_eq!(state.settings.font_size, 18);
        assert_eq!(state.settings.theme, AppSettings::default().theme);
        assert_eq!(state.settings.auto_save_interval, 2000);
    }

    #[test]
    fn parses_user_keys() {
        assert_eq!(parse_setting("theme", "dark").unwrap().theme, Some(Theme::Dark));
        assert_eq!(
            parse_setting("auto-save-interval", "500")
                .unwrap()
                .auto_save_interval,
            Some(500)
        );
        assert_eq!(
            parse_setting("showLineNumbers", "on")
                .unwrap()
                .show_line_numbers,
            Some(true)
        );
        assert_eq!(
            parse_setting("editor_mode", "preview").unwrap().editor_mode,
            Some(EditorMode::Preview)
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_setting("colour", "red").is_err());
        assert!(parse_setting("font-size", "big").is_err());
        assert!(parse_setting("auto-save", "maybe").is_err());
        assert!(parse_setting("theme", "neon").is_err());
    }
}
