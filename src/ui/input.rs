use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;

use crate::theme::Theme;

/// Single-line text field state. `cursor` is a byte offset on a char boundary.
#[derive(Debug, Default)]
pub struct InputEditor {
    content: String,
    cursor: usize,
}

impl InputEditor {
    pub fn new(initial: &str) -> Self {
        let mut editor = Self::default();
        editor.set_content(initial);
        editor
    }

    pub fn insert_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        self.content.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Insert a string at the cursor position (used for paste). Line breaks are dropped.
    pub fn insert_str(&mut self, s: &str) {
        let clean: String = s.chars().filter(|c| !c.is_control()).collect();
        self.content.insert_str(self.cursor, &clean);
        self.cursor += clean.len();
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = self.content[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.content.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.content.len() {
            let next = self.content[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.content.len());
            self.content.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.content[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.content.len() {
            self.cursor = self.content[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.content.len());
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.content.len();
    }

    /// Replace the entire content and move cursor to end.
    pub fn set_content(&mut self, text: &str) {
        self.content.clear();
        self.cursor = 0;
        self.insert_str(text);
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Cursor column in characters.
    pub fn cursor_col(&self) -> usize {
        self.content[..self.cursor].chars().count()
    }
}

/// Renders an [`InputEditor`] on one row, scrolling horizontally to keep the cursor visible.
pub struct InputWidget<'a> {
    editor: &'a InputEditor,
    theme: &'a Theme,
    focused: bool,
    placeholder: &'a str,
}

impl<'a> InputWidget<'a> {
    pub fn new(editor: &'a InputEditor, theme: &'a Theme, focused: bool) -> Self {
        Self {
            editor,
            theme,
            focused,
            placeholder: "",
        }
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }
}

impl Widget for InputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let base = Style::default().fg(self.theme.input_fg).bg(self.theme.input_bg);
        buf.set_style(Rect::new(area.x, area.y, area.width, 1), base);

        let width = area.width as usize;
        if self.editor.content().is_empty() {
            let style = base.fg(self.theme.input_placeholder);
            buf.set_stringn(area.x, area.y, self.placeholder, width, style);
        }

        // Leave one column for the cursor at the end of the text
        let cursor_col = self.editor.cursor_col();
        let scroll = (cursor_col + 1).saturating_sub(width);
        let visible: String = self.editor.content().chars().skip(scroll).take(width).collect();
        if !visible.is_empty() {
            buf.set_stringn(area.x, area.y, &visible, width, base);
        }

        if self.focused {
            let x = area.x + (cursor_col - scroll) as u16;
            if let Some(cell) = buf.cell_mut((x, area.y)) {
                cell.set_style(
                    Style::default()
                        .fg(self.theme.input_bg)
                        .bg(self.theme.input_fg)
                        .add_modifier(Modifier::BOLD),
                );
            }
        }
    }
}
