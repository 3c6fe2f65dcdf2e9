//! Status bar widget.

use crate::domain::errors::PlaylistError;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Status bar severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusLevel {
    /// Informational.
    #[default]
    Info,
    /// Warning.
    Warning,
    /// Error.
    Error,
}

impl StatusLevel {
    /// Returns color for level.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Info => Color::Cyan,
            Self::Warning => Color::Yellow,
            Self::Error => Color::Red,
        }
    }
}

/// One line with a message on the left and a summary on the right.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusBar {
    message: String,
    summary: String,
    level: StatusLevel,
}

impl StatusBar {
    /// Creates info status bar.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    /// Creates warning status bar.
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: StatusLevel::Warning,
            ..Self::default()
        }
    }

    /// Creates error status bar.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: StatusLevel::Error,
            ..Self::default()
        }
    }

    /// Reports a rejected playlist command.
    #[must_use]
    pub fn from_error(error: &PlaylistError) -> Self {
        if error.is_missing_playlist() {
            Self::error(error.to_string())
        } else {
            Self::warning(error.to_string())
        }
    }

    /// Sets the right-aligned summary.
    #[must_use]
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Returns the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the level.
    #[must_use]
    pub const fn level(&self) -> StatusLevel {
        self.level
    }
}

impl Widget for &StatusBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = Style::default()
            .fg(self.level.color())
            .add_modifier(Modifier::BOLD);

        let width = usize::from(area.width);
        let used = self.message.width() + self.summary.width();
        let padding = width.saturating_sub(used);

        let line = Line::from(vec![
            Span::styled(self.message.as_str(), style),
            Span::raw(" ".repeat(padding)),
            Span::styled(self.summary.as_str(), Style::default().fg(Color::DarkGray)),
        ]);

        Paragraph::new(line).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(PlaylistError::EmptyTitle, StatusLevel::Warning ; "empty_title")]
    #[test_case(PlaylistError::nothing_to_add("no urls"), StatusLevel::Warning ; "nothing_to_add")]
    #[test_case(PlaylistError::NoCurrentPlaylist, StatusLevel::Error ; "no_current")]
    fn test_level_from_error(error: PlaylistError, expected: StatusLevel) {
        let bar = StatusBar::from_error(&error);
        assert_eq!(bar.level(), expected);
        assert_eq!(bar.message(), error.to_string());
    }

    #[test]
    fn test_summary_is_right_aligned() {
        let bar = StatusBar::info("Ready").summary("3 items");
        let area = Rect::new(0, 0, 20, 1);
        let mut buf = Buffer::empty(area);

        (&bar).render(area, &mut buf);

        assert_eq!(buf[(0, 0)].symbol(), "R");
        assert_eq!(buf[(13, 0)].symbol(), "3");
        assert_eq!(buf[(19, 0)].symbol(), "s");
    }
}
