//! Configuration and appearance for Casebook.
//!
//! Resolves the config directory layout, parses `settings.conf` and holds the
//! color palette and key bindings. Public re-exports keep the
//! `crate::theme::*` API stable.

/// Configuration parsing utilities.
mod parsing;
/// Path resolution for config directories.
mod paths;
/// Settings loading.
mod settings;
/// First-run settings file content.
mod skeleton;
/// Process-wide palette.
mod store;
/// Theme and settings type definitions.
mod types;

pub use paths::{
    config_dir, lists_dir, logs_dir, resolve_dataset_path, set_config_dir_override,
    settings_path,
};
pub use settings::{load_settings, parse_settings};
pub use store::{init_theme, theme};
pub use types::{
    DEFAULT_CATEGORY_COLOR, DEFAULT_ICON, KeyChord, KeyMap, MIN_CATEGORY_COLORS, Settings, Theme,
};

#[cfg(test)]
static TEST_MUTEX: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();

#[cfg(test)]
/// What: Provide a process-wide mutex to serialize environment-mutating tests in this module.
///
/// Inputs:
/// - None
///
/// Output:
/// - Shared reference to a lazily-initialized `Mutex<()>`.
pub(crate) fn test_mutex() -> &'static std::sync::Mutex<()> {
    TEST_MUTEX.get_or_init(|| std::sync::Mutex::new(()))
}
