use crate::domain::keybinding::Keybind;
use crate::presentation::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// What currently receives keys, shown at the left of the footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusContext {
    #[default]
    Items,
    Menu,
    Dialog,
}

impl FocusContext {
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Items => "ITEMS",
            Self::Menu => "MENU",
            Self::Dialog => "DIALOG",
        }
    }
}

pub struct FooterBarStyle {
    pub label_style: Style,
    pub key_style: Style,
    pub info: Style,
    pub focus_indicator: Style,
}

impl FooterBarStyle {
    #[must_use]
    pub fn from_theme(theme: &Theme) -> Self {
        let focus_bg = theme.key_style.bg.unwrap_or(Color::DarkGray);

        Self {
            label_style: theme.label_style,
            key_style: theme.key_style,
            info: theme.dimmed_style,
            focus_indicator: Style::default()
                .bg(focus_bg)
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        }
    }
}

impl Default for FooterBarStyle {
    fn default() -> Self {
        Self::from_theme(&Theme::default())
    }
}

pub struct FooterBar<'a> {
    keybindings: &'a [Keybind],
    focus_context: Option<FocusContext>,
    right_info: Option<&'a str>,
    style: FooterBarStyle,
}

impl<'a> FooterBar<'a> {
    #[must_use]
    pub fn new(keybindings: &'a [Keybind]) -> Self {
        Self {
            keybindings,
            focus_context: None,
            right_info: None,
            style: FooterBarStyle::default(),
        }
    }

    #[must_use]
    pub const fn focus_context(mut self, context: FocusContext) -> Self {
        self.focus_context = Some(context);
        self
    }

    #[must_use]
    pub const fn right_info(mut self, info: Option<&'a str>) -> Self {
        self.right_info = info;
        self
    }

    #[must_use]
    pub fn style(mut self, style: FooterBarStyle) -> Self {
        self.style = style;
        self
    }

    pub(crate) fn format_key(key: &KeyEvent) -> String {
        use std::fmt::Write;
        let mut s = String::new();
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("C-");
        }
        if key.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("A-");
        }

        match key.code {
            KeyCode::Char(c) => s.push(c),
            KeyCode::Enter => s.push_str("Enter"),
            KeyCode::Esc => s.push_str("Esc"),
            KeyCode::Tab => s.push_str("Tab"),
            KeyCode::BackTab => s.push_str("S-Tab"),
            KeyCode::Up => s.push('↑'),
            KeyCode::Down => s.push('↓'),
            KeyCode::Left => s.push('←'),
            KeyCode::Right => s.push('→'),
            KeyCode::Home => s.push_str("Home"),
            KeyCode::End => s.push_str("End"),
            KeyCode::F(n) => {
                let _ = write!(s, "F{n}");
            }
            other => {
                let _ = write!(s, "{other:?}");
            }
        }
        s
    }

    fn build_left_spans(&self) -> Vec<Span<'_>> {
        let mut spans = Vec::new();

        if let Some(context) = self.focus_context {
            spans.push(Span::styled(
                format!(" {} ", context.display_name()),
                self.style.focus_indicator,
            ));
            spans.push(Span::raw(" "));
        }

        for (i, binding) in self
            .keybindings
            .iter()
            .filter(|k| k.visible_in_bar)
            .enumerate()
        {
            if i > 0 {
                spans.push(Span::raw(" "));
            }

            spans.push(Span::styled(
                format!(" {} ", binding.label),
                self.style.label_style,
            ));
            spans.push(Span::styled(
                format!(" {} ", Self::format_key(&binding.key)),
                self.style.key_style,
            ));
        }

        spans
    }
}

impl Widget for FooterBar<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        let right_width = self.right_info.map_or(0, |s| s.width() as u16);
        let left_width = area.width.saturating_sub(right_width + 1);

        let left_area = Rect::new(area.x, area.y, left_width, 1);
        Paragraph::new(Line::from(self.build_left_spans())).render(left_area, buf);

        if let Some(info) = self.right_info
            && right_width < area.width
        {
            let right_x = area.right().saturating_sub(right_width);
            let right_area = Rect::new(right_x, area.y, right_width, 1);
            Paragraph::new(Span::styled(info, self.style.info)).render(right_area, buf);
        }
    }
}
