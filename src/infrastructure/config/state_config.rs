use serde::{Deserialize, Serialize};

use crate::domain::entities::{Playlist, PlaylistId};

/// Session state persisted between runs.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateConfig {
    /// Playlist selected when the session ended.
    #[serde(default)]
    pub current_playlist: Option<PlaylistId>,

    /// All playlists in display order.
    #[serde(default)]
    pub playlists: Vec<Playlist>,
}
