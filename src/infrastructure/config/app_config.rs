//! Application configuration.

use crate::domain::entities::{SortColumn, default_sort_columns};
use crate::infrastructure::playlist::DEFAULT_NEW_PLAYLIST_TITLE;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub(crate) const APP_NAME: &str = "setlist";
pub(crate) const APP_QUALIFIER: &str = "com";
pub(crate) const APP_ORGANIZATION: &str = "linuxmobile";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Session state file path.
    #[serde(skip)]
    pub state_path: Option<PathBuf>,

    /// Log file path.
    #[serde(default)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Title given to playlists created from the menu.
    #[serde(default = "default_new_playlist_title")]
    pub new_playlist_title: String,

    /// Columns offered under "Sort by", in menu order.
    #[serde(default = "default_sort_columns")]
    pub sort_columns: Vec<SortColumn>,

    /// Theme configuration.
    #[serde(default)]
    pub theme: ThemeConfig,
}

/// Theme configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Accent color (name or hex code).
    #[serde(default = "default_accent_color")]
    pub accent_color: String,
}

fn default_accent_color() -> String {
    "Yellow".to_string()
}

fn default_new_playlist_title() -> String {
    DEFAULT_NEW_PLAYLIST_TITLE.to_string()
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent_color: default_accent_color(),
        }
    }
}

use super::args::CliArgs;

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(state_path) = args.state {
            self.state_path = Some(state_path);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(accent_color) = args.accent_color {
            self.theme.accent_color = accent_color;
        }
        if let Some(title) = args.new_playlist_title {
            self.new_playlist_title = title;
        }
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("setlist.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }

    /// Returns the sort columns, falling back to the built-in set when the
    /// configured list is empty.
    #[must_use]
    pub fn effective_sort_columns(&self) -> Vec<SortColumn> {
        if self.sort_columns.is_empty() {
            default_sort_columns()
        } else {
            self.sort_columns.clone()
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            state_path: None,
            log_path: None,
            log_level: LogLevel::Info,
            new_playlist_title: default_new_playlist_title(),
            sort_columns: default_sort_columns(),
            theme: ThemeConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::SortKey;

    #[test]
    fn test_parse_config_with_sort_columns() {
        let toml_content = r##"
            log_level = "debug"
            new_playlist_title = "Untitled"

            [[sort_columns]]
            title = "Performer"
            key = "artist"

            [[sort_columns]]
            title = "No."
            key = "track_number"

            [theme]
            accent_color = "#ff8800"
        "##;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.new_playlist_title, "Untitled");
        assert_eq!(
            config.sort_columns,
            vec![
                SortColumn::new("Performer", SortKey::Artist),
                SortColumn::new("No.", SortKey::TrackNumber),
            ]
        );
        assert_eq!(config.theme.accent_color, "#ff8800");
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.new_playlist_title, "New playlist");
        assert_eq!(config.sort_columns, default_sort_columns());
        assert_eq!(config.theme.accent_color, "Yellow");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").expect("Failed to parse config");
        assert_eq!(config.sort_columns.len(), 6);
        assert_eq!(config.new_playlist_title, "New playlist");
    }

    #[test]
    fn test_empty_sort_columns_fall_back() {
        let config: AppConfig = toml::from_str("sort_columns = []").expect("Failed to parse");
        assert!(config.sort_columns.is_empty());
        assert_eq!(config.effective_sort_columns(), default_sort_columns());
    }

    #[test]
    fn test_merge_with_args_overrides() {
        let mut config = AppConfig::default();
        let args = CliArgs {
            config: None,
            state: Some(PathBuf::from("/tmp/state.toml")),
            log_path: None,
            log_level: Some(LogLevel::Trace),
            accent_color: Some("Cyan".to_string()),
            new_playlist_title: None,
        };

        config.merge_with_args(args);

        assert_eq!(config.state_path, Some(PathBuf::from("/tmp/state.toml")));
        assert_eq!(config.log_level, LogLevel::Trace);
        assert_eq!(config.theme.accent_color, "Cyan");
        assert_eq!(config.new_playlist_title, "New playlist");
    }
}
