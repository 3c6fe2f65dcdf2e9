//! Playlist entities.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaylistId(pub Uuid);

impl PlaylistId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for PlaylistId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

/// A single playlist entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistItem {
    /// Location of the media, a URL or a file path.
    pub url: String,
    /// Track title, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Track artist, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    /// Album title, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    /// Release date, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Track number on the album, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_number: Option<u32>,
}

impl PlaylistItem {
    /// Creates an item that only knows its location.
    #[must_use]
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
            artist: None,
            album: None,
            date: None,
            track_number: None,
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the artist.
    #[must_use]
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    /// Sets the album.
    #[must_use]
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    /// Sets the release date.
    #[must_use]
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Sets the track number.
    #[must_use]
    pub const fn with_track_number(mut self, number: u32) -> Self {
        self.track_number = Some(number);
        self
    }

    /// Returns the title to show, falling back to the last path segment of the URL.
    #[must_use]
    pub fn display_title(&self) -> &str {
        if let Some(title) = self.title.as_deref().filter(|t| !t.is_empty()) {
            return title;
        }

        let path = self
            .url
            .split(['?', '#'])
            .next()
            .unwrap_or(&self.url)
            .trim_end_matches(['/', '\\']);

        path.rsplit(['/', '\\'])
            .find(|segment| !segment.is_empty())
            .unwrap_or(&self.url)
    }
}

/// A named, ordered collection of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Playlist identifier.
    pub id: PlaylistId,
    /// Human-readable title.
    pub title: String,
    /// Entries in playback order.
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
}

impl Playlist {
    /// Creates an empty playlist with a fresh identifier.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: PlaylistId::generate(),
            title: title.into(),
            items: Vec::new(),
        }
    }

    /// Returns the lightweight description of this playlist.
    #[must_use]
    pub fn info(&self) -> PlaylistInfo {
        PlaylistInfo {
            id: self.id,
            title: self.title.clone(),
            item_count: self.items.len(),
        }
    }
}

/// Read-only description of a playlist exposed by the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistInfo {
    /// Playlist identifier.
    pub id: PlaylistId,
    /// Human-readable title.
    pub title: String,
    /// Number of entries.
    pub item_count: usize,
}

/// The current playlist as last observed by a view.
///
/// A missing current playlist is represented by `id: None` and an empty title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaylistSnapshot {
    /// Identifier of the current playlist.
    pub id: Option<PlaylistId>,
    /// Title of the current playlist.
    pub title: String,
}

impl PlaylistSnapshot {
    /// Builds a snapshot from the model reads.
    #[must_use]
    pub fn new(id: Option<PlaylistId>, current: Option<PlaylistInfo>) -> Self {
        Self {
            id,
            title: current.map(|info| info.title).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("http://x/a.mp3", "a.mp3" ; "url_file")]
    #[test_case("http://x/dir/", "dir" ; "trailing_slash")]
    #[test_case("http://x/b.flac?token=1#t=3", "b.flac" ; "query_and_fragment")]
    #[test_case("C:\\Music\\c.ogg", "c.ogg" ; "windows_path")]
    #[test_case("plain", "plain" ; "no_separator")]
    fn test_display_title_falls_back_to_url(url: &str, expected: &str) {
        assert_eq!(PlaylistItem::from_url(url).display_title(), expected);
    }

    #[test]
    fn test_display_title_prefers_metadata() {
        let item = PlaylistItem::from_url("http://x/a.mp3").with_title("Intro");
        assert_eq!(item.display_title(), "Intro");
    }

    #[test]
    fn test_snapshot_without_current_playlist_has_empty_title() {
        let snapshot = PlaylistSnapshot::new(None, None);
        assert_eq!(snapshot, PlaylistSnapshot::default());
        assert!(snapshot.title.is_empty());
    }

    #[test]
    fn test_snapshot_reads_title() {
        let playlist = Playlist::new("Favorites");
        let snapshot = PlaylistSnapshot::new(Some(playlist.id), Some(playlist.info()));
        assert_eq!(snapshot.id, Some(playlist.id));
        assert_eq!(snapshot.title, "Favorites");
    }
}
