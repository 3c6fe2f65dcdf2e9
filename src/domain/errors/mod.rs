//! Domain error types.

mod playlist_error;

pub use playlist_error::PlaylistError;
