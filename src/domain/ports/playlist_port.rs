//! Playlist model port definition.

use std::sync::Arc;

use crate::domain::entities::{PlaylistId, PlaylistInfo, PlaylistItem, SortColumn};

/// Callback invoked after the model changed.
pub type ChangeListener = Arc<dyn Fn() + Send + Sync>;

/// Handle returned by [`PlaylistPort::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Port for the playlist data model.
///
/// Commands are fire-and-forget: failures are handled and reported by the
/// implementation, never by the caller.
#[cfg_attr(test, mockall::automock)]
pub trait PlaylistPort: Send + Sync {
    /// Returns the identifier of the current playlist.
    fn current_playlist_id(&self) -> Option<PlaylistId>;

    /// Returns the current playlist.
    fn current_playlist(&self) -> Option<PlaylistInfo>;

    /// Returns all playlists in display order.
    fn playlists(&self) -> Vec<PlaylistInfo>;

    /// Returns the items of the current playlist.
    fn current_items(&self) -> Vec<PlaylistItem>;

    /// Makes the given playlist current.
    fn select_playlist(&self, id: PlaylistId);

    /// Creates a new playlist.
    fn add_playlist(&self);

    /// Removes the current playlist.
    fn remove_playlist(&self);

    /// Renames the current playlist.
    fn rename_playlist(&self, title: &str);

    /// Removes every item of the current playlist.
    fn clear_playlist(&self);

    /// Appends items to the current playlist.
    fn add_items(&self, urls: &[String]);

    /// Sorts the current playlist.
    fn sort_playlist(&self, column: &SortColumn);

    /// Registers a change listener.
    fn subscribe(&self, listener: ChangeListener) -> SubscriptionId;

    /// Removes a change listener.
    fn unsubscribe(&self, id: SubscriptionId);
}

/// One model-mutating call, as a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistCommand {
    /// Create a new playlist.
    AddPlaylist,
    /// Remove the current playlist.
    RemovePlaylist,
    /// Rename the current playlist.
    RenamePlaylist(String),
    /// Remove every item of the current playlist.
    ClearPlaylist,
    /// Append items to the current playlist.
    AddItems(Vec<String>),
    /// Sort the current playlist.
    SortPlaylist(SortColumn),
}

impl PlaylistCommand {
    /// Issues the command against the model.
    pub fn dispatch(&self, port: &dyn PlaylistPort) {
        match self {
            Self::AddPlaylist => port.add_playlist(),
            Self::RemovePlaylist => port.remove_playlist(),
            Self::RenamePlaylist(title) => port.rename_playlist(title),
            Self::ClearPlaylist => port.clear_playlist(),
            Self::AddItems(urls) => port.add_items(urls),
            Self::SortPlaylist(column) => port.sort_playlist(column),
        }
    }

    /// Returns a short name for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AddPlaylist => "add_playlist",
            Self::RemovePlaylist => "remove_playlist",
            Self::RenamePlaylist(_) => "rename_playlist",
            Self::ClearPlaylist => "clear_playlist",
            Self::AddItems(_) => "add_items",
            Self::SortPlaylist(_) => "sort_playlist",
        }
    }
}
