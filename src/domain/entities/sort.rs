//! Sortable playlist columns.

use serde::{Deserialize, Serialize};

/// Field a playlist can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Track artist.
    Artist,
    /// Album title.
    Album,
    /// Release date.
    Date,
    /// Track number on the album.
    TrackNumber,
    /// Track title.
    Title,
    /// Media location.
    Path,
}

/// Menu entry describing how to sort a playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortColumn {
    /// Label shown in the menu.
    pub title: String,
    /// Field to sort by.
    pub key: SortKey,
}

impl SortColumn {
    /// Creates a column.
    #[must_use]
    pub fn new(title: impl Into<String>, key: SortKey) -> Self {
        Self {
            title: title.into(),
            key,
        }
    }
}

/// Returns the built-in sortable columns in menu order.
#[must_use]
pub fn default_sort_columns() -> Vec<SortColumn> {
    vec![
        SortColumn::new("Artist", SortKey::Artist),
        SortColumn::new("Album", SortKey::Album),
        SortColumn::new("Date", SortKey::Date),
        SortColumn::new("Track number", SortKey::TrackNumber),
        SortColumn::new("Title", SortKey::Title),
        SortColumn::new("File path", SortKey::Path),
    ]
}
