#![forbid(unsafe_code)]

//! Single-line text input widget.
//!
//! Grapheme-cluster aware editing with cursor management and horizontal
//! scrolling. The widget owns its text value; the surrounding form decides
//! when the value is valid.

use tuido_core::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, Rect};
use tuido_render::{Frame, Style};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::{Widget, draw_text_span};

/// A single-line text input.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    /// Text value.
    value: String,
    /// Cursor position (grapheme index).
    cursor: usize,
    /// Scroll offset in visual cells.
    scroll_cells: usize,
    /// Placeholder shown while the value is empty.
    placeholder: String,
    /// Base style.
    style: Style,
    /// Placeholder style.
    placeholder_style: Style,
    /// Whether the input is focused (controls cursor output).
    focused: bool,
}

impl TextInput {
    /// Create a new empty text input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text value, cursor at the end (builder).
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self.cursor = self.grapheme_count();
        self
    }

    /// Set the placeholder text (builder).
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the base style (builder).
    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Set the placeholder style (builder).
    #[must_use]
    pub fn with_placeholder_style(mut self, style: Style) -> Self {
        self.placeholder_style = style;
        self
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the value, clamping the cursor.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.cursor.min(self.grapheme_count());
    }

    /// Clear all text.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
        self.scroll_cells = 0;
    }

    /// Cursor position (grapheme index).
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Focus or blur the input.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Whether the input is focused.
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Handle a terminal event. Returns `true` if the value or cursor changed.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        if let Event::Key(key) = event
            && (key.kind == KeyEventKind::Press || key.kind == KeyEventKind::Repeat)
        {
            return self.handle_key(key);
        }
        false
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if key.modifiers.contains(Modifiers::CTRL) {
            return false;
        }
        match key.code {
            KeyCode::Char(c) => {
                self.insert_char(c);
                true
            }
            KeyCode::Backspace => {
                self.delete_char_back();
                true
            }
            KeyCode::Delete => {
                self.delete_char_forward();
                true
            }
            KeyCode::Left => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                }
                true
            }
            KeyCode::Right => {
                if self.cursor < self.grapheme_count() {
                    self.cursor += 1;
                }
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                self.scroll_cells = 0;
                true
            }
            KeyCode::End => {
                self.cursor = self.grapheme_count();
                true
            }
            _ => false,
        }
    }

    fn insert_char(&mut self, c: char) {
        let byte_offset = self.grapheme_byte_offset(self.cursor);
        self.value.insert(byte_offset, c);
        self.cursor += 1;
    }

    fn delete_char_back(&mut self) {
        if self.cursor > 0 {
            let start = self.grapheme_byte_offset(self.cursor - 1);
            let end = self.grapheme_byte_offset(self.cursor);
            self.value.drain(start..end);
            self.cursor -= 1;
        }
    }

    fn delete_char_forward(&mut self) {
        if self.cursor < self.grapheme_count() {
            let start = self.grapheme_byte_offset(self.cursor);
            let end = self.grapheme_byte_offset(self.cursor + 1);
            self.value.drain(start..end);
        }
    }

    fn grapheme_count(&self) -> usize {
        self.value.graphemes(true).count()
    }

    fn grapheme_byte_offset(&self, grapheme_idx: usize) -> usize {
        self.value
            .grapheme_indices(true)
            .nth(grapheme_idx)
            .map_or(self.value.len(), |(i, _)| i)
    }

    /// Visual column of the cursor within the unscrolled value.
    fn cursor_visual_pos(&self) -> usize {
        self.value
            .graphemes(true)
            .take(self.cursor)
            .map(UnicodeWidthStr::width)
            .sum()
    }

    /// Scroll offset that keeps the cursor inside `width` cells.
    fn effective_scroll(&self, width: usize) -> usize {
        if width == 0 {
            return self.scroll_cells;
        }
        let cursor = self.cursor_visual_pos();
        let mut scroll = self.scroll_cells;
        if cursor < scroll {
            scroll = cursor;
        } else if cursor >= scroll + width {
            scroll = cursor + 1 - width;
        }
        scroll
    }

    /// Cursor screen position relative to a render area.
    #[must_use]
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        let scroll = self.effective_scroll(area.width as usize);
        let rel = self.cursor_visual_pos().saturating_sub(scroll);
        let x = area
            .x
            .saturating_add(rel as u16)
            .min(area.right().saturating_sub(1));
        (x, area.y)
    }
}

impl Widget for TextInput {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }

        if self.value.is_empty() && !self.placeholder.is_empty() {
            draw_text_span(
                frame,
                area.x,
                area.y,
                &self.placeholder,
                self.placeholder_style,
                area.right(),
            );
        } else {
            let scroll = self.effective_scroll(area.width as usize);
            let mut skipped = 0;
            let mut visible = String::new();
            for grapheme in self.value.graphemes(true) {
                let w = UnicodeWidthStr::width(grapheme);
                if skipped < scroll {
                    skipped += w;
                    continue;
                }
                visible.push_str(grapheme);
            }
            draw_text_span(frame, area.x, area.y, &visible, self.style, area.right());
        }

        if self.focused {
            frame.set_cursor(Some(self.cursor_position(area)));
        }
    }
}
