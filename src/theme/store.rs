use std::sync::OnceLock;

use super::types::Theme;

/// Process-wide palette chosen at startup.
static THEME_STORE: OnceLock<Theme> = OnceLock::new();

/// What: Install the palette used by the renderer.
///
/// Inputs:
/// - `monochrome`: Use terminal default colors (`--no-color`).
///
/// Output:
/// - The installed theme; a second call keeps the first palette.
pub fn init_theme(monochrome: bool) -> Theme {
    let chosen = if monochrome {
        Theme::monochrome()
    } else {
        Theme::default()
    };
    *THEME_STORE.get_or_init(|| chosen)
}

/// Current palette; the default palette when none was installed.
pub fn theme() -> Theme {
    *THEME_STORE.get_or_init(Theme::default)
}
