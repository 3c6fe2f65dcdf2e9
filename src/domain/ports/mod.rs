//! Port definitions.

mod playlist_port;

#[cfg(test)]
pub use playlist_port::MockPlaylistPort;
pub use playlist_port::{ChangeListener, PlaylistCommand, PlaylistPort, SubscriptionId};
