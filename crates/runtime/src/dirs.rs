//! Platform-specific directory utilities.

use std::path::PathBuf;

const SAVE_FILE: &str = "progress.json";

/// Default location of the progression save file.
///
/// Follows platform conventions:
/// - macOS: `~/Library/Application Support/skilltree/progress.json`
/// - Linux: `~/.local/share/skilltree/progress.json` (or `$XDG_DATA_HOME/skilltree`)
/// - Windows: `%APPDATA%\skilltree\progress.json`
/// - Fallback: `./save_data/progress.json`
pub fn default_save_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "skilltree")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./save_data"))
        .join(SAVE_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_path_names_the_progress_file() {
        let path = default_save_path();
        assert_eq!(path.file_name().and_then(|name| name.to_str()), Some(SAVE_FILE));
    }
}
