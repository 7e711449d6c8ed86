use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use quadzoom_core::DEFAULT_ITERATION_CAP;

/// Persistent defaults, stored as `preferences.json` next to the executable.
///
/// Command-line flags override every field for a single run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Side length of the square frame in pixels.
    #[serde(default = "default_dim")]
    pub dim: u32,
    /// Iteration cap at startup.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    /// Preview image rewritten on every refresh. Empty means next to the executable.
    #[serde(default)]
    pub preview_path: String,
    /// Directory for saved frames. Empty means an `images/` folder next to the executable.
    #[serde(default)]
    pub output_dir: String,
}

fn default_dim() -> u32 {
    801
}
fn default_max_iterations() -> u32 {
    DEFAULT_ITERATION_CAP
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            dim: default_dim(),
            max_iterations: default_max_iterations(),
            preview_path: String::new(),
            output_dir: String::new(),
        }
    }
}

impl Preferences {
    /// Load preferences from the executable directory, falling back to defaults.
    ///
    /// A missing file is created with the defaults so it can be edited.
    pub fn load() -> Self {
        let path = config_path();
        if path.exists() {
            return Self::load_from(&path);
        }
        debug!("No preferences file at {}", path.display());
        let prefs = Self::default();
        prefs.save_to(&path);
        prefs
    }

    fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Preferences>(&json) {
                Ok(prefs) => {
                    info!("Loaded preferences from {}", path.display());
                    return prefs;
                }
                Err(e) => error!("Failed to parse preferences: {e}"),
            },
            Err(e) => error!("Failed to read preferences file: {e}"),
        }
        Self::default()
    }

    fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                error!("Failed to create config directory: {e}");
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = fs::write(path, &json) {
                    error!("Failed to write preferences: {e}");
                } else {
                    debug!("Saved preferences to {}", path.display());
                }
            }
            Err(e) => error!("Failed to serialize preferences: {e}"),
        }
    }

    /// Resolved preview image path.
    pub fn preview_path(&self) -> PathBuf {
        if self.preview_path.is_empty() {
            crate::app_dir::preview_path()
        } else {
            PathBuf::from(&self.preview_path)
        }
    }

    /// Resolved output directory for saved frames.
    pub fn output_dir(&self) -> PathBuf {
        if self.output_dir.is_empty() {
            crate::app_dir::images_directory()
        } else {
            PathBuf::from(&self.output_dir)
        }
    }
}

fn config_path() -> PathBuf {
    crate::app_dir::exe_directory().join("preferences.json")
}
