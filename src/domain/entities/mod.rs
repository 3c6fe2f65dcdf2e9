//! Domain entities.

mod playlist;
mod sort;

pub use playlist::{Playlist, PlaylistId, PlaylistInfo, PlaylistItem, PlaylistSnapshot};
pub use sort::{SortColumn, SortKey, default_sort_columns};
