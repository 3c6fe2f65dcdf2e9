//! Presentation layer with UI components and event handling.

/// Key bindings.
#[allow(missing_docs)]
pub mod commands;
/// Event handling.
pub mod events;
/// Color theme.
pub mod theme;
/// UI screens.
#[allow(missing_docs)]
pub mod ui;
/// Reusable widgets.
#[allow(missing_docs)]
pub mod widgets;

pub use theme::Theme;
pub use ui::{App, PlaylistMenu};
