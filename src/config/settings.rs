use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::catalog::DEFAULT_CATALOG_URL;
use crate::logic::cover::{CoverSize, DEFAULT_COVERS_URL};
use crate::session::{DEFAULT_DEBOUNCE, SessionConfig};
use crate::state::SortMode;

/// Skeleton written to `settings.conf` on first run.
pub const SETTINGS_SKELETON_CONTENT: &str = "# shelfscout settings\n\
#\n\
# Format: key = value\n\
# Lines starting with # are comments. Unknown keys are ignored.\n\
#\n\
# Catalog search endpoint (Open Library compatible)\n\
catalog_url = https://openlibrary.org/search.json\n\
#\n\
# Cover image service base URL\n\
covers_url = https://covers.openlibrary.org/b\n\
#\n\
# Pause in typing (milliseconds) before a search is committed\n\
debounce_ms = 450\n\
#\n\
# Cover size for detail links: S, M, or L\n\
cover_size = M\n\
#\n\
# Keep favorites, recent searches, and theme between runs\n\
persist = true\n\
#\n\
# Initial result ordering: relevance, year_asc, year_desc\n\
default_sort = relevance\n";

/// User-tunable settings read from `settings.conf`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Catalog search endpoint.
    pub catalog_url: String,
    /// Cover image service base URL.
    pub covers_url: String,
    /// Debounce window in milliseconds.
    pub debounce_ms: u64,
    /// Size suffix used for cover links.
    pub cover_size: CoverSize,
    /// Whether collections are written to disk.
    pub persist: bool,
    /// Sort mode at startup.
    pub default_sort: SortMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            covers_url: DEFAULT_COVERS_URL.to_string(),
            debounce_ms: u64::try_from(DEFAULT_DEBOUNCE.as_millis()).unwrap_or(450),
            cover_size: CoverSize::default(),
            persist: true,
            default_sort: SortMode::default(),
        }
    }
}

impl Settings {
    /// Session tunables derived from these settings.
    #[must_use]
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            debounce: Duration::from_millis(self.debounce_ms),
            initial_sort: self.default_sort,
        }
    }
}

/// What: Drop a trailing `#` or `//` comment and surrounding whitespace.
///
/// Details:
/// - A marker only starts a comment at the beginning of the value or after whitespace,
///   so `https://host/path#frag` survives intact.
fn strip_inline_comment(s: &str) -> &str {
    let mut prev_ws = true;
    for (i, c) in s.char_indices() {
        if prev_ws && (c == '#' || s[i..].starts_with("//")) {
            return s[..i].trim();
        }
        prev_ws = c.is_whitespace();
    }
    s.trim()
}

/// Parse a boolean the way config files usually spell it.
fn parse_bool(val: &str) -> Option<bool> {
    match val.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// What: Parse `settings.conf` content.
///
/// Inputs:
/// - `content`: Raw file text.
///
/// Output:
/// - Settings with every recognized, valid key applied over the defaults.
///
/// Details:
/// - Keys are normalized (lowercase; `.`, `-`, and spaces become `_`).
/// - Unknown keys and unparsable values keep the default.
#[must_use]
pub fn parse_settings(content: &str) -> Settings {
    let mut out = Settings::default();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
            continue;
        }
        let Some((raw_key, raw_val)) = trimmed.split_once('=') else {
            continue;
        };
        let key = raw_key.trim().to_lowercase().replace(['.', '-', ' '], "_");
        let val = strip_inline_comment(raw_val.trim());
        match key.as_str() {
            "catalog_url" | "search_url" if !val.is_empty() => {
                out.catalog_url = val.to_string();
            }
            "covers_url" | "cover_url" if !val.is_empty() => {
                out.covers_url = val.trim_end_matches('/').to_string();
            }
            "debounce_ms" | "debounce" => {
                if let Ok(v) = val.parse::<u64>() {
                    out.debounce_ms = v;
                }
            }
            "cover_size" => {
                if let Some(size) = CoverSize::from_config_key(val) {
                    out.cover_size = size;
                }
            }
            "persist" => {
                if let Some(b) = parse_bool(val) {
                    out.persist = b;
                }
            }
            "default_sort" | "sort_mode" => {
                if let Some(mode) = SortMode::from_config_key(val) {
                    out.default_sort = mode;
                }
            }
            _ => {
                tracing::debug!(key = %key, "[Config] Ignoring settings entry");
            }
        }
    }
    out
}

/// What: Load settings from `dir/settings.conf`, creating the skeleton when missing.
///
/// Inputs:
/// - `dir`: Configuration directory.
///
/// Output:
/// - Parsed settings; defaults when the file cannot be read.
pub fn load_settings(dir: &Path) -> Settings {
    let path = dir.join("settings.conf");
    if !path.is_file() {
        let _ = fs::create_dir_all(dir);
        match fs::write(&path, SETTINGS_SKELETON_CONTENT) {
            Ok(()) => tracing::info!(path = %path.display(), "[Config] Wrote settings skeleton"),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "[Config] Could not write settings skeleton");
            }
        }
    }
    match fs::read_to_string(&path) {
        Ok(content) => parse_settings(&content),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "[Config] Using default settings");
            Settings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: The skeleton parses back to the defaults.
    fn skeleton_matches_defaults() {
        assert_eq!(parse_settings(SETTINGS_SKELETON_CONTENT), Settings::default());
    }

    #[test]
    /// What: Recognized keys override defaults, with normalization and inline comments.
    ///
    /// Inputs:
    /// - Mixed-case keys, dashed names, trailing comments, and one invalid value.
    ///
    /// Output:
    /// - Valid values applied; the invalid `debounce_ms` keeps the default.
    fn parses_overrides_and_ignores_junk() {
        let content = "\
Catalog-URL = http://localhost:8080/search.json # local mirror\n\
covers.url = http://localhost:8080/covers/\n\
debounce_ms = soon\n\
cover_size = l\n\
persist = off\n\
default_sort = year_desc\n\
no_equals_here\n\
mystery = 42\n";
        let s = parse_settings(content);
        assert_eq!(s.catalog_url, "http://localhost:8080/search.json");
        assert_eq!(s.covers_url, "http://localhost:8080/covers");
        assert_eq!(s.debounce_ms, 450);
        assert_eq!(s.cover_size, CoverSize::Large);
        assert!(!s.persist);
        assert_eq!(s.default_sort, SortMode::YearDescending);
        assert_eq!(
            s.session_config(),
            SessionConfig {
                debounce: Duration::from_millis(450),
                initial_sort: SortMode::YearDescending,
            }
        );
    }

    #[test]
    /// What: URLs keep their `//` and `#`; comments after whitespace are removed.
    fn inline_comments_need_leading_whitespace() {
        assert_eq!(
            strip_inline_comment("https://openlibrary.org/search.json"),
            "https://openlibrary.org/search.json"
        );
        assert_eq!(strip_inline_comment("http://a/b#frag # note"), "http://a/b#frag");
        assert_eq!(strip_inline_comment("450 // half a second"), "450");
        assert_eq!(strip_inline_comment("# all comment"), "");
        let s = parse_settings("covers_url = https://covers.example/b // mirror\n");
        assert_eq!(s.covers_url, "https://covers.example/b");
    }

    #[test]
    /// What: First load writes the skeleton and later loads read the edited file.
    fn load_creates_skeleton_then_reads_edits() {
        let dir = tempfile::tempdir().expect("tempdir");
        let first = load_settings(dir.path());
        assert_eq!(first, Settings::default());
        assert_eq!(first.catalog_url, "https://openlibrary.org/search.json");
        let path = dir.path().join("settings.conf");
        assert!(path.is_file());

        fs::write(&path, "debounce_ms = 100\n").expect("write settings");
        assert_eq!(load_settings(dir.path()).debounce_ms, 100);
    }
}
