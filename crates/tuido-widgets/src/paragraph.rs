#![forbid(unsafe_code)]

//! Plain text widget.

use tuido_core::Rect;
use tuido_render::{Frame, Style};

use crate::{Widget, draw_text_truncated};

/// A block of text, one source line per row, truncated with an ellipsis.
#[derive(Debug, Clone, Default)]
pub struct Paragraph {
    text: String,
    style: Style,
}

impl Paragraph {
    /// Create a paragraph from text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: Style::default(),
        }
    }

    /// Set the text style (builder).
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl Widget for Paragraph {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }
        for (i, line) in self.text.lines().enumerate() {
            if i as u16 >= area.height {
                break;
            }
            let y = area.y + i as u16;
            draw_text_truncated(frame, area.x, y, line, self.style, area.right());
        }
    }
}
