use std::env;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Directory name under the user's config root.
const APP_DIR: &str = "shelfscout";

/// Base directory chosen with `--config-dir`, if any.
static CONFIG_DIR_OVERRIDE: OnceLock<PathBuf> = OnceLock::new();

/// What: Pin the configuration directory for the rest of the process.
///
/// Inputs:
/// - `dir`: Directory passed on the command line.
///
/// Output:
/// - `false` when an override was already set (the first one wins).
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

/// Return `$HOME/.config/shelfscout`, ensuring it exists.
///
/// Output: `Some(PathBuf)` when HOME is set and directory can be created; `None` otherwise.
fn home_config_dir() -> Option<PathBuf> {
    if let Ok(home) = env::var("HOME") {
        let dir = Path::new(&home).join(".config").join(APP_DIR);
        if std::fs::create_dir_all(&dir).is_ok() {
            return Some(dir);
        }
    }
    None
}

/// Config directory for shelfscout (ensured to exist).
///
/// Order: `--config-dir` override, `$HOME/.config/shelfscout`, then
/// `$XDG_CONFIG_HOME/shelfscout`.
pub fn config_dir() -> PathBuf {
    if let Some(dir) = CONFIG_DIR_OVERRIDE.get() {
        let _ = std::fs::create_dir_all(dir);
        return dir.clone();
    }
    if let Some(dir) = home_config_dir() {
        return dir;
    }
    let base = xdg_base_dir("XDG_CONFIG_HOME", &[".config"]);
    let dir = base.join(APP_DIR);
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Logs directory under config: "<config>/logs" (ensured to exist)
pub fn logs_dir() -> PathBuf {
    let dir = config_dir().join("logs");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Lists directory under config: "<config>/lists" (ensured to exist).
///
/// Holds one JSON file per persisted collection.
pub fn lists_dir() -> PathBuf {
    let dir = config_dir().join("lists");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

#[cfg(test)]
mod tests {
    #[test]
    /// What: Config, logs, and lists directories resolve under `$HOME/.config/shelfscout`.
    ///
    /// Inputs:
    /// - `HOME` pointed at a fresh temporary directory.
    ///
    /// Output:
    /// - All three directories exist with the expected trailing components.
    fn paths_config_lists_logs_under_home() {
        let _guard = crate::state::test_mutex()
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let orig_home = std::env::var_os("HOME");
        let base = tempfile::tempdir().expect("tempdir");
        unsafe { std::env::set_var("HOME", base.path()) };
        let cfg = super::config_dir();
        let logs = super::logs_dir();
        let lists = super::lists_dir();
        unsafe {
            if let Some(v) = orig_home {
                std::env::set_var("HOME", v);
            } else {
                std::env::remove_var("HOME");
            }
        }
        if super::CONFIG_DIR_OVERRIDE.get().is_none() {
            assert!(cfg.ends_with(".config/shelfscout"));
            assert!(cfg.starts_with(base.path()));
        }
        assert!(logs.ends_with("logs") && logs.is_dir());
        assert!(lists.ends_with("lists") && lists.is_dir());
    }
}
