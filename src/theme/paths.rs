use std::env;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Directory chosen with `--config-dir`, taking precedence over environment lookup.
static CONFIG_DIR_OVERRIDE: OnceLock<PathBuf> = OnceLock::new();

/// What: Pin the configuration directory for the rest of the process.
///
/// Inputs:
/// - `dir`: Directory from the command line.
///
/// Output:
/// - `true` when the override was installed; `false` when one was already set.
pub fn set_config_dir_override(dir: PathBuf) -> bool {
    CONFIG_DIR_OVERRIDE.set(dir).is_ok()
}

/// Resolve an XDG base directory from environment or default to `$HOME` + segments.
///
/// Inputs:
/// - `var`: Environment variable to check (e.g., `XDG_CONFIG_HOME`).
/// - `home_default`: Fallback path segments relative to `$HOME` if `var` is unset/empty.
///
/// Output: Resolved base directory path.
fn xdg_base_dir(var: &str, home_default: &[&str]) -> PathBuf {
    if let Ok(p) = env::var(var)
        && !p.trim().is_empty()
    {
        return PathBuf::from(p);
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    let mut base = PathBuf::from(home);
    for seg in home_default {
        base = base.join(seg);
    }
    base
}

/// Return `$HOME/.config/casebook`, ensuring it exists.
///
/// Inputs: none
///
/// Output: `Some(PathBuf)` when HOME is set and directory can be created; `None` otherwise.
fn home_config_dir() -> Option<PathBuf> {
    if let Ok(home) = env::var("HOME") {
        let dir = Path::new(&home).join(".config").join("casebook");
        if std::fs::create_dir_all(&dir).is_ok() {
            return Some(dir);
        }
    }
    None
}

/// Configuration directory for Casebook (ensured to exist).
pub fn config_dir() -> PathBuf {
    if let Some(dir) = CONFIG_DIR_OVERRIDE.get() {
        let _ = std::fs::create_dir_all(dir);
        return dir.clone();
    }
    if let Some(dir) = home_config_dir() {
        return dir;
    }
    let base = xdg_base_dir("XDG_CONFIG_HOME", &[".config"]);
    let dir = base.join("casebook");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Logs directory under config: "<config>/logs" (ensured to exist)
pub fn logs_dir() -> PathBuf {
    let dir = config_dir().join("logs");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Lists directory under config: "<config>/lists" (ensured to exist). Favorites live here.
pub fn lists_dir() -> PathBuf {
    let dir = config_dir().join("lists");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Path of the settings file.
pub fn settings_path() -> PathBuf {
    config_dir().join("settings.conf")
}

/// What: Resolve the dataset path.
///
/// Inputs:
/// - `configured`: Value from the command line or `settings.conf`.
///
/// Output:
/// - Absolute paths unchanged; relative paths joined onto the config directory;
///   `<config>/records.json` when nothing was configured.
pub fn resolve_dataset_path(configured: Option<&str>) -> PathBuf {
    match configured.map(str::trim).filter(|s| !s.is_empty()) {
        Some(p) if Path::new(p).is_absolute() => PathBuf::from(p),
        Some(p) => config_dir().join(p),
        None => config_dir().join("records.json"),
    }
}

#[cfg(test)]
mod tests {
    #[test]
    /// What: Config, logs and lists directories live under `$HOME/.config/casebook`.
    ///
    /// Inputs:
    /// - Temporary `HOME`.
    ///
    /// Output:
    /// - Each helper returns the expected suffix and creates the directory.
    fn paths_config_lists_logs_under_home() {
        let _guard = crate::theme::test_mutex()
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let orig_home = std::env::var_os("HOME");
        let base = tempfile::tempdir().expect("tempdir");
        unsafe { std::env::set_var("HOME", base.path()) };
        let cfg = super::config_dir();
        let logs = super::logs_dir();
        let lists = super::lists_dir();
        assert!(cfg.ends_with(".config/casebook"));
        assert!(logs.ends_with("logs") && logs.is_dir());
        assert!(lists.ends_with("lists") && lists.is_dir());
        assert_eq!(
            super::resolve_dataset_path(Some("data/r.json")),
            cfg.join("data/r.json")
        );
        assert_eq!(
            super::resolve_dataset_path(Some("/abs/r.json")),
            std::path::PathBuf::from("/abs/r.json")
        );
        assert_eq!(super::resolve_dataset_path(None), cfg.join("records.json"));
        unsafe {
            if let Some(v) = orig_home {
                std::env::set_var("HOME", v);
            } else {
                std::env::remove_var("HOME");
            }
        }
    }
}
