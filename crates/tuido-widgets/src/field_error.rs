#![forbid(unsafe_code)]

//! Inline field-error line.
//!
//! Displays a validation message next to a form field: a fixed warning icon
//! followed by the message, truncated with an ellipsis when the area is
//! narrow. The icon is the stable marker external checks look for.

use tuido_core::Rect;
use tuido_render::{Frame, Rgb, Style};
use unicode_width::UnicodeWidthStr;

use crate::{Widget, draw_text_span, draw_text_truncated};

/// Default error foreground color (red).
pub const ERROR_FG_DEFAULT: Rgb = Rgb::new(220, 60, 60);

/// The stable marker prefixed to every rendered field error.
pub const ERROR_ICON: &str = "⚠";

/// A one-line validation error display.
#[derive(Debug, Clone)]
pub struct FieldErrorLine {
    message: String,
    style: Style,
}

impl FieldErrorLine {
    /// Create an error line with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            style: Style::new().fg(ERROR_FG_DEFAULT),
        }
    }

    /// Set the error style (builder).
    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// The error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Minimum width needed to show icon and full message.
    #[must_use]
    pub fn min_width(&self) -> u16 {
        let icon = UnicodeWidthStr::width(ERROR_ICON) as u16;
        if self.message.is_empty() {
            icon
        } else {
            icon + 1 + UnicodeWidthStr::width(self.message.as_str()) as u16
        }
    }
}

impl Widget for FieldErrorLine {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }
        let y = area.y;
        let max_x = area.right();
        let mut x = draw_text_span(frame, area.x, y, ERROR_ICON, self.style, max_x);
        if x < max_x && !self.message.is_empty() {
            x = x.saturating_add(1);
            draw_text_truncated(frame, x, y, &self.message, self.style, max_x);
        }
    }
}
