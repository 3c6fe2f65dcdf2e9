//! Playlist model adapters.

pub mod sorter;
mod store;

pub use store::{DEFAULT_NEW_PLAYLIST_TITLE, InMemoryPlaylistStore};
