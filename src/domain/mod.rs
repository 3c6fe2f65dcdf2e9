//! Domain layer with core playlist entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Keybinding definitions.
#[allow(missing_docs)]
pub mod keybinding;
/// Port definitions.
pub mod ports;

pub use entities::{Playlist, PlaylistId, PlaylistItem, PlaylistSnapshot, SortColumn, SortKey};
pub use errors::PlaylistError;
pub use ports::{PlaylistCommand, PlaylistPort};
