//! UI screens.

mod app;
mod playlist_menu;
mod playlist_screen;

pub use app::App;
pub use playlist_menu::{
    Dialog, DialogKind, MenuAction, MenuEntry, PlaylistMenu, PlaylistMenuAction,
    PlaylistMenuWidget,
};
pub use playlist_screen::{PlaylistScreen, PlaylistScreenState, ScreenKeyResult, describe_command};
