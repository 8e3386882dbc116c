use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use which::which;

use crate::{NoteError, Result};

/// Application configuration settings.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Directory where notes are stored
    pub notes_dir: PathBuf,

    /// File extension for newly created notes
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Default editor command
    pub editor_command: Option<String>,
}

fn default_extension() -> String {
    "md".to_string()
}

impl Default for Config {
    fn default() -> Self {
        let notes_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("notes");

        Config {
            notes_dir,
            extension: default_extension(),
            editor_command: None,
        }
    }
}

impl Config {
    /// Loads configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| NoteError::ConfigError {
            message: format!("Could not read {}: {}", path.display(), e),
        })?;
        let config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    // This method provides smart fallbacks when no editor is configured
    pub fn get_editor_command(&self) -> String {
        // First try the configured editor
        if let Some(editor) = &self.editor_command {
            return editor.clone();
        }

        // Then try environment variable
        if let Ok(editor) = std::env::var("EDITOR") {
            return editor;
        }

        // Fall back to platform defaults
        if cfg!(windows) {
            "notepad".to_string()
        } else if cfg!(target_os = "macos") {
            "open -t".to_string()
        } else {
            // Try common Linux editors
            for editor in &["nano", "vim", "vi", "emacs"] {
                if which(editor).is_ok() {
                    return editor.to_string();
                }
            }
            "nano".to_string()
        }
    }
}
