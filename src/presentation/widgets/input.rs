//! Single-line text input.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Editable text with a character cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    /// Cursor position in characters.
    cursor: usize,
}

impl TextInput {
    /// Creates an input holding `value` with the cursor at the end.
    #[must_use]
    pub fn with_value(value: impl Into<String>) -> Self {
        let mut input = Self::default();
        input.set_value(value);
        input
    }

    /// Returns current value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the cursor position in characters.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replaces the value and moves the cursor to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.chars().count();
    }

    /// Applies an editing key. Returns whether the value changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('u') if ctrl => {
                let changed = !self.value.is_empty();
                self.value.clear();
                self.cursor = 0;
                changed
            }
            KeyCode::Char('w') if ctrl => self.delete_word(),
            KeyCode::Char('a') if ctrl => {
                self.cursor = 0;
                false
            }
            KeyCode::Char('e') if ctrl => {
                self.cursor = self.len();
                false
            }
            KeyCode::Char(c) if !ctrl => {
                let at = self.byte_index(self.cursor);
                self.value.insert(at, c);
                self.cursor += 1;
                true
            }
            KeyCode::Backspace if ctrl || key.modifiers.contains(KeyModifiers::ALT) => {
                self.delete_word()
            }
            KeyCode::Backspace => {
                if self.cursor == 0 {
                    return false;
                }
                self.cursor -= 1;
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
                true
            }
            KeyCode::Delete => {
                if self.cursor >= self.len() {
                    return false;
                }
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
                true
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.len());
                false
            }
            KeyCode::Home => {
                self.cursor = 0;
                false
            }
            KeyCode::End => {
                self.cursor = self.len();
                false
            }
            _ => false,
        }
    }

    /// Deletes the word before the cursor along with trailing spaces.
    fn delete_word(&mut self) -> bool {
        let end = self.byte_index(self.cursor);
        let head = &self.value[..end];
        let start = head
            .trim_end()
            .rfind(' ')
            .map_or(0, |space| space + 1);

        if start == end {
            return false;
        }

        self.value.replace_range(start..end, "");
        self.cursor = self.value[..start].chars().count();
        true
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map_or(self.value.len(), |(i, _)| i)
    }

    /// Display width of the text before the cursor.
    fn cursor_offset(&self) -> usize {
        self.value[..self.byte_index(self.cursor)].width()
    }
}

impl Widget for &TextInput {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let offset = self.cursor_offset();
        let visible = usize::from(area.width.saturating_sub(1));
        let scroll = offset.saturating_sub(visible);

        #[allow(clippy::cast_possible_truncation)]
        Paragraph::new(self.value.as_str())
            .style(Style::default().fg(Color::White))
            .scroll((0, scroll as u16))
            .render(area, buf);

        #[allow(clippy::cast_possible_truncation)]
        let cursor_x = area.x + (offset - scroll) as u16;
        if cursor_x < area.right() {
            buf[(cursor_x, area.y)].set_style(Style::default().bg(Color::White).fg(Color::Black));
        }
    }
}
