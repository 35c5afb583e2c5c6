//! Path display helpers.

use std::path::{Path, PathBuf};

/// The user's home directory.
pub fn home_dir() -> Option<PathBuf> {
    home::home_dir()
}

/// Format a path for human display, abbreviating the home directory to `~`.
///
/// Only used in status messages. Data output (the final path line, JSON)
/// always carries the full path so shells and scripts can consume it.
pub fn format_path_for_display(path: &Path) -> String {
    if let Some(home) = home_dir()
        && let Ok(stripped) = path.strip_prefix(&home)
    {
        let stripped_str = stripped.to_string_lossy();
        if stripped_str.is_empty() {
            return "~".to_string();
        }
        return format!("~/{stripped_str}");
    }
    path.to_string_lossy().into_owned()
}
