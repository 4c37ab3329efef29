use std::fs;
use std::path::Path;

use super::parsing::{parse_bool, parse_color_value, parse_key_chord, strip_inline_comment};
use super::skeleton::SETTINGS_SKELETON_CONTENT;
use super::types::{DEFAULT_CATEGORY_COLOR, KeyChord, MIN_CATEGORY_COLORS, Settings};

/// What: Load user settings from `path`, writing a skeleton first when the file is missing.
///
/// Inputs:
/// - `path`: Location of `settings.conf`.
///
/// Output:
/// - Parsed [`Settings`]; `Settings::default()` when the file cannot be read.
pub fn load_settings(path: &Path) -> Settings {
    if !path.exists() {
        if let Some(dir) = path.parent() {
            let _ = fs::create_dir_all(dir);
        }
        match fs::write(path, SETTINGS_SKELETON_CONTENT) {
            Ok(()) => tracing::info!(path = %path.display(), "wrote default settings skeleton"),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to write settings skeleton");
            }
        }
    }
    match fs::read_to_string(path) {
        Ok(content) => {
            tracing::debug!(path = %path.display(), "loaded settings");
            parse_settings(&content)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "settings unreadable; using defaults");
            Settings::default()
        }
    }
}

/// What: Parse `key = value` settings text.
///
/// Inputs:
/// - `content`: Full text of a settings file.
///
/// Output:
/// - [`Settings`] with every recognized key applied over the defaults.
///
/// Details:
/// - Blank lines and lines starting with `#` or `//` are skipped.
/// - Keys are case-insensitive; `.`, `-` and spaces normalize to `_`.
/// - Unknown keys are ignored and invalid values keep the default.
/// - `category_icon` may repeat; each line reads `Category => icon`.
/// - The first `keybind_*` line for an action replaces its defaults; later lines add chords.
pub fn parse_settings(content: &str) -> Settings {
    let mut out = Settings::default();
    let mut rebound: Vec<String> = Vec::new();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
            continue;
        }
        let Some((raw_key, raw_val)) = trimmed.split_once('=') else {
            continue;
        };
        let key = raw_key.trim().to_lowercase().replace(['.', '-', ' '], "_");
        let val_raw = raw_val.trim();
        let val = strip_inline_comment(val_raw);
        match key.as_str() {
            "dataset_path" | "data" => {
                out.dataset_path = Some(val.to_string()).filter(|s| !s.is_empty());
            }
            "favorites_key" => {
                if !val.is_empty() {
                    out.favorites_key = val.to_string();
                }
            }
            "status_duration_ms" => {
                if let Ok(v) = val.parse::<u64>() {
                    out.status_duration_ms = v;
                }
            }
            "panel_transition_ms" => {
                if let Ok(v) = val.parse::<u64>() {
                    out.panel_transition_ms = v;
                }
            }
            "category_colors" => {
                // Hex values start with '#', so only `//` comments apply here.
                let list = val_raw.split("//").next().unwrap_or("");
                let colors: Vec<_> = list.split(',').filter_map(parse_color_value).collect();
                if colors.is_empty() {
                    tracing::warn!(value = list, "category_colors has no valid colors");
                } else {
                    out.category_colors = colors;
                    while out.category_colors.len() < MIN_CATEGORY_COLORS {
                        out.category_colors.push(DEFAULT_CATEGORY_COLOR);
                    }
                }
            }
            "category_icon" => {
                if let Some((name, icon)) = val_raw.split_once("=>") {
                    let (name, icon) = (name.trim(), icon.trim());
                    if !name.is_empty() && !icon.is_empty() {
                        out.category_icons.retain(|(n, _)| n != name);
                        out.category_icons.push((name.to_string(), icon.to_string()));
                    }
                }
            }
            "default_icon" => {
                if !val_raw.is_empty() {
                    out.default_icon = val_raw.to_string();
                }
            }
            "show_keybinds_footer" => {
                if let Some(b) = parse_bool(val) {
                    out.show_keybinds_footer = b;
                }
            }
            k if k.starts_with("keybind_") => {
                let action = &k["keybind_".len()..];
                let Some(chord) = parse_key_chord(val) else {
                    tracing::warn!(key = k, value = val, "invalid key chord");
                    continue;
                };
                let first = !rebound.iter().any(|a| a == action);
                if bind(&mut out, action, chord, first) && first {
                    rebound.push(action.to_string());
                }
            }
            _ => {}
        }
    }
    out
}

/// Attach `chord` to `action`; `replace` drops the defaults first. Returns whether the action exists.
fn bind(settings: &mut Settings, action: &str, chord: KeyChord, replace: bool) -> bool {
    let km = &mut settings.keymap;
    let slot = match action {
        "quit" | "exit" => &mut km.quit,
        "focus_search" | "search" => &mut km.focus_search,
        "toggle_favorites_view" | "favorites_view" => &mut km.toggle_favorites_view,
        "toggle_favorite" | "favorite" => &mut km.toggle_favorite,
        "close_panel" | "close" => &mut km.close_panel,
        "next_card" | "down" => &mut km.next_card,
        "prev_card" | "up" => &mut km.prev_card,
        "activate" | "open" => &mut km.activate,
        "cycle_focus" | "pane_next" => &mut km.cycle_focus,
        _ => return false,
    };
    if replace {
        slot.clear();
    }
    if !slot.contains(&chord) {
        slot.push(chord);
    }
    true
}
