//! Dropdown menu anchored to the top right of an area.

use std::borrow::Cow;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, StatefulWidget, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::presentation::theme::Theme;

/// One row of a dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownRow<'a> {
    /// Selectable entry.
    Item(Cow<'a, str>),
    /// Horizontal rule.
    Separator,
    /// Non-selectable heading.
    Label(Cow<'a, str>),
}

impl DropdownRow<'_> {
    fn width(&self) -> usize {
        match self {
            Self::Item(text) => text.width() + 2,
            Self::Label(text) => text.width(),
            Self::Separator => 0,
        }
    }
}

/// Renders rows in a bordered popup; the highlighted row index refers to `rows`.
pub struct Dropdown<'a> {
    rows: &'a [DropdownRow<'a>],
    selected: Option<usize>,
    title: &'a str,
    theme: &'a Theme,
}

impl<'a> Dropdown<'a> {
    #[must_use]
    pub const fn new(rows: &'a [DropdownRow<'a>], theme: &'a Theme) -> Self {
        Self {
            rows,
            selected: None,
            title: "",
            theme,
        }
    }

    #[must_use]
    pub const fn selected(mut self, selected: Option<usize>) -> Self {
        self.selected = selected;
        self
    }

    #[must_use]
    pub const fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    /// Area the popup occupies inside `area`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn popup_area(&self, area: Rect) -> Rect {
        let content_width = self
            .rows
            .iter()
            .map(DropdownRow::width)
            .chain(std::iter::once(self.title.width()))
            .max()
            .unwrap_or(0);

        let width = ((content_width + 4) as u16).min(area.width);
        let height = ((self.rows.len() + 2) as u16).min(area.height);

        Rect::new(area.right().saturating_sub(width), area.y, width, height)
    }
}

impl Widget for Dropdown<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = self.popup_area(area);
        if popup.width < 3 || popup.height < 3 {
            return;
        }

        Clear.render(popup, buf);

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent));
        if !self.title.is_empty() {
            block = block.title(format!(" {} ", self.title));
        }
        let inner = block.inner(popup);
        block.render(popup, buf);

        let rule = "─".repeat(usize::from(inner.width));
        let items: Vec<ListItem> = self
            .rows
            .iter()
            .map(|row| match row {
                DropdownRow::Item(text) => {
                    ListItem::new(Line::from(format!(" {text} "))).style(self.theme.base_style)
                }
                DropdownRow::Separator => {
                    ListItem::new(Line::from(Span::styled(rule.clone(), self.theme.dimmed_style)))
                }
                DropdownRow::Label(text) => {
                    ListItem::new(Line::from(Span::styled(text.clone(), self.theme.dimmed_style)))
                }
            })
            .collect();

        let mut state = ListState::default().with_selected(self.selected);
        StatefulWidget::render(
            List::new(items).highlight_style(self.theme.selection_style),
            inner,
            buf,
            &mut state,
        );
    }
}
