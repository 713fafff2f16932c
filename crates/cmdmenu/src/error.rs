//! Error types for menu construction and configuration.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a menu tree.
///
/// Running a menu never fails: input and handler errors are reported to the
/// router's [`Reporter`](crate::Reporter) and the loop continues.
#[derive(Debug, Error)]
pub enum MenuError {
    /// An action with this name is already registered on the menu.
    #[error("menu '{menu}' already has an action named '{name}'")]
    DuplicateAction { menu: String, name: String },

    /// No action with this name is registered on the menu.
    #[error("menu '{menu}' has no action named '{name}'")]
    UnknownAction { menu: String, name: String },

    /// The menu configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while loading a [`MenuConfig`](crate::MenuConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid menu config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
