use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    style::{Color, Style},
    text::Span,
};

/// A reusable single-line text input with cursor handling.
///
/// Used by the search bar and by every query cell in the grid view.
/// Cursor positions are char indices; edits map them to byte offsets so
/// multi-byte input behaves.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    text: String,
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text and move the cursor to the end.
    pub fn set_text(&mut self, text: String) {
        self.cursor = text.chars().count();
        self.text = text;
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.text
            .chars()
            .take(char_pos)
            .map(|c| c.len_utf8())
            .sum()
    }

    /// Start of the word preceding the cursor.
    fn prev_word_boundary(&self) -> usize {
        let chars: Vec<char> = self.text.chars().collect();
        let mut pos = self.cursor;
        while pos > 0 && chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        while pos > 0 && !chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        pos
    }

    /// Delete the char range `start..end`; returns whether anything changed.
    fn delete_range(&mut self, start: usize, end: usize) -> bool {
        if start >= end || end > self.char_count() {
            return false;
        }
        let byte_start = self.byte_index(start);
        let byte_end = self.byte_index(end);
        self.text.drain(byte_start..byte_end);
        self.cursor = start;
        true
    }

    /// Render the text with a block cursor as styled spans.
    pub fn render_cursor_spans(&self) -> Vec<Span<'_>> {
        let cursor_style = Style::default().bg(Color::White).fg(Color::Black);
        if self.cursor >= self.char_count() {
            return vec![
                Span::raw(self.text.as_str()),
                Span::styled(" ", cursor_style),
            ];
        }

        let cursor_start = self.byte_index(self.cursor);
        let cursor_char = self.text[cursor_start..]
            .chars()
            .next()
            .expect("cursor within text");
        let cursor_end = cursor_start + cursor_char.len_utf8();

        let mut spans = Vec::new();
        if cursor_start > 0 {
            spans.push(Span::raw(&self.text[..cursor_start]));
        }
        spans.push(Span::styled(cursor_char.to_string(), cursor_style));
        if cursor_end < self.text.len() {
            spans.push(Span::raw(&self.text[cursor_end..]));
        }
        spans
    }

    /// Apply a key event; returns true when the text changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('a') => {
                    self.cursor = 0;
                    false
                }
                KeyCode::Char('e') => {
                    self.cursor = self.char_count();
                    false
                }
                KeyCode::Char('w') => {
                    let start = self.prev_word_boundary();
                    self.delete_range(start, self.cursor)
                }
                KeyCode::Char('u') => self.delete_range(0, self.cursor),
                KeyCode::Char('k') => {
                    let len = self.char_count();
                    self.delete_range(self.cursor, len)
                }
                _ => false,
            };
        }

        match key.code {
            KeyCode::Char(c) => {
                if key.modifiers.contains(KeyModifiers::ALT) {
                    return false;
                }
                let byte_pos = self.byte_index(self.cursor);
                self.text.insert(byte_pos, c);
                self.cursor += 1;
                true
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.delete_range(self.cursor - 1, self.cursor)
                } else {
                    false
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.char_count() {
                    self.delete_range(self.cursor, self.cursor + 1)
                } else {
                    false
                }
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            KeyCode::Right => {
                if self.cursor < self.char_count() {
                    self.cursor += 1;
                }
                false
            }
            KeyCode::Home => {
                self.cursor = 0;
                false
            }
            KeyCode::End => {
                self.cursor = self.char_count();
                false
            }
            _ => false,
        }
    }
}
