//! Infrastructure layer with configuration and playlist model adapters.

/// Application configuration.
#[allow(missing_docs)]
pub mod config;
/// Playlist model adapters.
pub mod playlist;

pub use config::{AppConfig, CliArgs, ConfigError, LogLevel, StateConfig, StorageManager};
pub use playlist::InMemoryPlaylistStore;
