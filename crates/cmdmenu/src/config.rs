//! Menu configuration.
//!
//! Every field has a default, so a config file only names what it changes:
//!
//! ```yaml
//! prompt: "Choice: "
//! show_path: true
//! on_eof: reprompt
//! border: rounded
//! ```

use std::fs;
use std::path::Path;

use cmdmenu_render::BorderStyle;
use serde::Deserialize;

use crate::error::ConfigError;

/// What a menu does when its input reaches end of file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EofPolicy {
    /// Leave the menu.
    #[default]
    Exit,
    /// Write a newline and prompt again. Counts as a read failure.
    Reprompt,
}

/// Labels, messages and loop policy for a menu.
///
/// Submenus copy their parent's config when they are created.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MenuConfig {
    /// Written after the menu table, without a trailing newline.
    pub prompt: String,
    /// Label of the `0` row in a top-level menu.
    pub exit_label: String,
    /// Label of the `0` row in a submenu.
    pub back_label: String,
    /// Diagnostic for input that is not a listed option.
    pub invalid_selection: String,
    /// Diagnostic for a failed read.
    pub read_error: String,
    /// Whether the hierarchy path is written above the menu.
    pub show_path: bool,
    pub on_eof: EofPolicy,
    /// Consecutive read failures after which the menu gives up.
    pub max_read_failures: u32,
    /// Border of the default table renderer.
    pub border: BorderStyle,
}

impl MenuConfig {
    /// Parses a YAML document. An empty document yields the defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Reads and parses a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Label of the `0` row for a top-level menu or a submenu.
    pub fn sentinel_label(&self, is_submenu: bool) -> &str {
        if is_submenu {
            &self.back_label
        } else {
            &self.exit_label
        }
    }
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            prompt: "Enter option number: ".to_string(),
            exit_label: "Exit".to_string(),
            back_label: "<-Back".to_string(),
            invalid_selection: "Invalid number. Try again.".to_string(),
            read_error: "Input error. Try again.".to_string(),
            show_path: false,
            on_eof: EofPolicy::Exit,
            max_read_failures: 16,
            border: BorderStyle::Ascii,
        }
    }
}
