//! Modal confirm and input dialogs.
//!
//! Both widgets only render the values they are given; opening, editing and
//! closing belong to the component that owns the dialog state.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use super::input::TextInput;
use crate::presentation::theme::Theme;

const DIALOG_WIDTH_PERCENT: u16 = 50;

/// Yes/No question.
pub struct ConfirmDialog<'a> {
    title: &'a str,
    message: &'a str,
    theme: &'a Theme,
}

impl<'a> ConfirmDialog<'a> {
    #[must_use]
    pub const fn new(title: &'a str, message: &'a str, theme: &'a Theme) -> Self {
        Self {
            title,
            message,
            theme,
        }
    }
}

impl Widget for ConfirmDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(DIALOG_WIDTH_PERCENT, 6, area);
        let inner = open_frame(self.title, self.theme, popup, buf);

        let [message_area, _, buttons_area] = split_rows(inner);

        Paragraph::new(self.message)
            .wrap(Wrap { trim: true })
            .style(self.theme.base_style)
            .render(message_area, buf);

        Paragraph::new(Line::from(vec![
            Span::styled(" Yes ", self.theme.label_style),
            Span::styled(" Enter/y ", self.theme.key_style),
            Span::raw("  "),
            Span::styled(" No ", self.theme.label_style),
            Span::styled(" Esc/n ", self.theme.key_style),
        ]))
        .render(buttons_area, buf);
    }
}

/// Prompt with a single-line text field.
pub struct InputDialog<'a> {
    title: &'a str,
    prompt: &'a str,
    input: &'a TextInput,
    theme: &'a Theme,
}

impl<'a> InputDialog<'a> {
    #[must_use]
    pub const fn new(
        title: &'a str,
        prompt: &'a str,
        input: &'a TextInput,
        theme: &'a Theme,
    ) -> Self {
        Self {
            title,
            prompt,
            input,
            theme,
        }
    }
}

impl Widget for InputDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(DIALOG_WIDTH_PERCENT, 6, area);
        let inner = open_frame(self.title, self.theme, popup, buf);

        let [prompt_area, _, input_area] = split_rows(inner);

        Paragraph::new(self.prompt)
            .style(self.theme.base_style)
            .render(prompt_area, buf);

        let field = Block::default().style(Style::default().bg(Color::Black));
        let field_inner = field.inner(input_area);
        field.render(input_area, buf);
        self.input.render(field_inner, buf);
    }
}

fn open_frame(title: &str, theme: &Theme, popup: Rect, buf: &mut Buffer) -> Rect {
    Clear.render(popup, buf);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
        .title(format!(" {title} "));
    let inner = block.inner(popup);
    block.render(popup, buf);
    inner
}

fn split_rows(area: Rect) -> [Rect; 3] {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);
    [rows[0], rows[1], rows[2]]
}

/// Centers a box `percent_x` wide and `height` rows tall inside `r`.
#[must_use]
pub fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height.min(r.height)),
            Constraint::Fill(1),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
