//! Directory where the executable lives. Preferences, the preview surface,
//! and saved frames default to paths next to it.

use std::path::PathBuf;

/// Directory containing the running executable. Falls back to current directory if unavailable.
pub fn exe_directory() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(PathBuf::from))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Default directory for saved frames.
pub fn images_directory() -> PathBuf {
    exe_directory().join("images")
}

/// Default path of the live preview image.
pub fn preview_path() -> PathBuf {
    exe_directory().join("quadzoom_preview.png")
}
