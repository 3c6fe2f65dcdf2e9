//! Playlist model error types.

use thiserror::Error;

use crate::domain::entities::PlaylistId;

/// Failures reported by the playlist model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum PlaylistError {
    #[error("no playlist is selected")]
    NoCurrentPlaylist,

    #[error("playlist {id} does not exist")]
    UnknownPlaylist { id: PlaylistId },

    #[error("playlist title must not be empty")]
    EmptyTitle,

    #[error("nothing to add: {reason}")]
    NothingToAdd { reason: String },
}

impl PlaylistError {
    /// Creates an unknown playlist error.
    #[must_use]
    pub const fn unknown(id: PlaylistId) -> Self {
        Self::UnknownPlaylist { id }
    }

    /// Creates a nothing-to-add error.
    #[must_use]
    pub fn nothing_to_add(reason: impl Into<String>) -> Self {
        Self::NothingToAdd {
            reason: reason.into(),
        }
    }

    /// Returns whether the error means there was no playlist to act on.
    #[must_use]
    pub const fn is_missing_playlist(&self) -> bool {
        matches!(self, Self::NoCurrentPlaylist | Self::UnknownPlaylist { .. })
    }
}
