use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::style::Color;

/// Application color palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    /// Primary background color for the canvas.
    pub base: Color,
    /// Subtle surface color for selection backgrounds.
    pub surface1: Color,
    /// Muted overlay line/border color.
    pub overlay1: Color,
    /// Primary foreground text color.
    pub text: Color,
    /// Secondary text for less prominent content.
    pub subtext0: Color,
    /// Accent color used for focus and interactive highlights.
    pub sapphire: Color,
    /// Accent color for headings.
    pub mauve: Color,
    /// Success/positive state color.
    pub green: Color,
    /// Warning/attention state color, also used for favorite markers.
    pub yellow: Color,
    /// Error/danger state color.
    pub red: Color,
    /// Accent color for search-match highlights.
    pub lavender: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            base: Color::Rgb(0x1e, 0x1e, 0x2e),
            surface1: Color::Rgb(0x45, 0x47, 0x5a),
            overlay1: Color::Rgb(0x7f, 0x84, 0x9c),
            text: Color::Rgb(0xcd, 0xd6, 0xf4),
            subtext0: Color::Rgb(0xa6, 0xad, 0xc8),
            sapphire: Color::Rgb(0x74, 0xc7, 0xec),
            mauve: Color::Rgb(0xcb, 0xa6, 0xf7),
            green: Color::Rgb(0xa6, 0xe3, 0xa1),
            yellow: Color::Rgb(0xf9, 0xe2, 0xaf),
            red: Color::Rgb(0xf3, 0x8b, 0xa8),
            lavender: Color::Rgb(0xb4, 0xbe, 0xfe),
        }
    }
}

impl Theme {
    /// Palette that leaves every color to the terminal defaults (`--no-color`).
    #[must_use]
    pub const fn monochrome() -> Self {
        Self {
            base: Color::Reset,
            surface1: Color::Reset,
            overlay1: Color::Reset,
            text: Color::Reset,
            subtext0: Color::Reset,
            sapphire: Color::Reset,
            mauve: Color::Reset,
            green: Color::Reset,
            yellow: Color::Reset,
            red: Color::Reset,
            lavender: Color::Reset,
        }
    }
}

/// Color used for categories without a palette slot.
pub const DEFAULT_CATEGORY_COLOR: Color = Color::Rgb(0x77, 0x77, 0x77);
/// Minimum number of palette slots; shorter palettes are padded with the default color.
pub const MIN_CATEGORY_COLORS: usize = 10;
/// Icon used for categories without a configured icon.
pub const DEFAULT_ICON: &str = "✨";

/// User-configurable application settings parsed from `settings.conf`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Dataset file; relative paths resolve against the config directory.
    pub dataset_path: Option<String>,
    /// Blob key holding the favorites list.
    pub favorites_key: String,
    /// How long transient status messages stay visible.
    pub status_duration_ms: u64,
    /// Duration of the panel's open transition.
    pub panel_transition_ms: u64,
    /// Category palette in first-seen order.
    pub category_colors: Vec<Color>,
    /// Icons per category name.
    pub category_icons: Vec<(String, String)>,
    /// Icon for categories without an entry in `category_icons`.
    pub default_icon: String,
    /// Whether the keybinds footer is shown.
    pub show_keybinds_footer: bool,
    /// Resolved key bindings.
    pub keymap: KeyMap,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dataset_path: None,
            favorites_key: crate::favorites::DEFAULT_FAVORITES_KEY.to_string(),
            status_duration_ms: 4000,
            panel_transition_ms: 300,
            category_colors: default_category_colors(),
            category_icons: Vec::new(),
            default_icon: DEFAULT_ICON.to_string(),
            show_keybinds_footer: true,
            keymap: KeyMap::default(),
        }
    }
}

impl Settings {
    /// What: Pick the display color of a category.
    ///
    /// Inputs:
    /// - `palette_index`: Slot in first-seen order; `None` for the uncategorized bucket.
    ///
    /// Output:
    /// - Palette color, cycling when there are more categories than colors.
    #[must_use]
    pub fn category_color(&self, palette_index: Option<usize>) -> Color {
        match palette_index {
            Some(i) if !self.category_colors.is_empty() => {
                self.category_colors[i % self.category_colors.len()]
            }
            _ => DEFAULT_CATEGORY_COLOR,
        }
    }

    /// Icon configured for `category`, or the default icon.
    #[must_use]
    pub fn category_icon(&self, category: &str) -> &str {
        self.category_icons
            .iter()
            .find(|(name, _)| name == category)
            .map_or(self.default_icon.as_str(), |(_, icon)| icon.as_str())
    }
}

/// Built-in category palette.
fn default_category_colors() -> Vec<Color> {
    vec![
        Color::Rgb(0x89, 0xb4, 0xfa),
        Color::Rgb(0xa6, 0xe3, 0xa1),
        Color::Rgb(0xf9, 0xe2, 0xaf),
        Color::Rgb(0xf3, 0x8b, 0xa8),
        Color::Rgb(0xcb, 0xa6, 0xf7),
        Color::Rgb(0x94, 0xe2, 0xd5),
        Color::Rgb(0xfa, 0xb3, 0x87),
        Color::Rgb(0xf5, 0xc2, 0xe7),
        Color::Rgb(0x74, 0xc7, 0xec),
        Color::Rgb(0xb4, 0xbe, 0xfe),
    ]
}

/// A single keyboard chord (modifiers + key).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyChord {
    /// Key code.
    pub code: KeyCode,
    /// Required modifiers.
    pub mods: KeyModifiers,
}

impl KeyChord {
    /// Chord without modifiers.
    #[must_use]
    pub const fn plain(code: KeyCode) -> Self {
        Self {
            code,
            mods: KeyModifiers::empty(),
        }
    }

    /// Chord with the Ctrl modifier.
    #[must_use]
    pub const fn ctrl(ch: char) -> Self {
        Self {
            code: KeyCode::Char(ch),
            mods: KeyModifiers::CONTROL,
        }
    }

    /// Return a short display label such as "Ctrl+R", "F1", "Esc".
    #[must_use]
    pub fn label(&self) -> String {
        let mut parts: Vec<&'static str> = Vec::new();
        if self.mods.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl");
        }
        if self.mods.contains(KeyModifiers::ALT) {
            parts.push("Alt");
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            parts.push("Shift");
        }
        let key = match self.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(ch) => ch.to_ascii_uppercase().to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Backspace => "Backspace".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "Shift+Tab".to_string(),
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            KeyCode::Left => "←".to_string(),
            KeyCode::Right => "→".to_string(),
            KeyCode::F(n) => format!("F{n}"),
            _ => "?".to_string(),
        };
        if parts.is_empty() || matches!(self.code, KeyCode::BackTab) {
            key
        } else {
            format!("{}+{}", parts.join("+"), key)
        }
    }

    /// Whether a pressed key matches this chord.
    #[must_use]
    pub fn matches(&self, code: KeyCode, mods: KeyModifiers) -> bool {
        let code = match code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        };
        // Shift is implied by uppercase characters and not required to match.
        let mods = if matches!(code, KeyCode::Char(_)) {
            mods.difference(KeyModifiers::SHIFT)
        } else {
            mods
        };
        self.code == code && self.mods == mods
    }
}

/// Application key bindings.
/// Each action can have multiple chords.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyMap {
    /// Quit the application.
    pub quit: Vec<KeyChord>,
    /// Move focus to the search input.
    pub focus_search: Vec<KeyChord>,
    /// Switch between all records and favorites only.
    pub toggle_favorites_view: Vec<KeyChord>,
    /// Flip favorite status of the open record.
    pub toggle_favorite: Vec<KeyChord>,
    /// Close the detail panel.
    pub close_panel: Vec<KeyChord>,
    /// Move the card selection down.
    pub next_card: Vec<KeyChord>,
    /// Move the card selection up.
    pub prev_card: Vec<KeyChord>,
    /// Open the selected card or related link.
    pub activate: Vec<KeyChord>,
    /// Cycle focus between search, cards and the panel.
    pub cycle_focus: Vec<KeyChord>,
}

impl Default for KeyMap {
    fn default() -> Self {
        use KeyCode::{Down, Enter, Esc, Tab, Up};
        Self {
            quit: vec![KeyChord::ctrl('c'), KeyChord::ctrl('q')],
            focus_search: vec![KeyChord::ctrl('f'), KeyChord::plain(KeyCode::Char('/'))],
            toggle_favorites_view: vec![KeyChord::ctrl('v'), KeyChord::plain(KeyCode::F(2))],
            toggle_favorite: vec![KeyChord::ctrl('s'), KeyChord::plain(KeyCode::Char('*'))],
            close_panel: vec![KeyChord::plain(Esc)],
            next_card: vec![KeyChord::plain(Down)],
            prev_card: vec![KeyChord::plain(Up)],
            activate: vec![KeyChord::plain(Enter)],
            cycle_focus: vec![KeyChord::plain(Tab)],
        }
    }
}
