#![forbid(unsafe_code)]

//! Widgets for tuido.

pub mod choice;
pub mod field_error;
pub mod input;
pub mod list;
pub mod paragraph;

pub use choice::Choice;
pub use field_error::FieldErrorLine;
pub use input::TextInput;
pub use list::{List, ListItem, ListState};
pub use paragraph::Paragraph;

use tuido_core::Rect;
use tuido_render::{Cell, Frame, Style};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// A renderable component.
///
/// Widgets draw themselves into a [`Frame`] within a given [`Rect`]. Drawing
/// outside the area is the widget's bug; the buffer still clips to its own
/// bounds.
pub trait Widget {
    /// Render the widget into the frame at the given area.
    fn render(&self, area: Rect, frame: &mut Frame);
}

/// A widget that renders based on mutable state.
pub trait StatefulWidget {
    type State;

    /// Render the widget into the frame with mutable state.
    fn render(&self, area: Rect, frame: &mut Frame, state: &mut Self::State);
}

/// Draw a text span at the given position, clipped at `max_x` (exclusive).
///
/// Returns the x position after the last drawn grapheme. Wide graphemes that
/// would cross `max_x` are not drawn.
pub(crate) fn draw_text_span(
    frame: &mut Frame,
    mut x: u16,
    y: u16,
    content: &str,
    style: Style,
    max_x: u16,
) -> u16 {
    for grapheme in content.graphemes(true) {
        if x >= max_x {
            break;
        }
        let w = UnicodeWidthStr::width(grapheme);
        if w == 0 {
            continue;
        }
        if x + w as u16 > max_x {
            break;
        }
        if let Some(c) = grapheme.chars().next() {
            let mut cell = Cell::from_char(c);
            style.apply_to(&mut cell);
            frame.buffer.set(x, y, cell);
        }
        x = x.saturating_add(w as u16);
    }
    x
}

/// Draw text truncated with an ellipsis when it exceeds the area width.
pub(crate) fn draw_text_truncated(
    frame: &mut Frame,
    x: u16,
    y: u16,
    content: &str,
    style: Style,
    max_x: u16,
) {
    let available = max_x.saturating_sub(x) as usize;
    if available == 0 {
        return;
    }
    let full_width = UnicodeWidthStr::width(content);
    if full_width <= available {
        draw_text_span(frame, x, y, content, style, max_x);
        return;
    }
    if available == 1 {
        draw_text_span(frame, x, y, "…", style, max_x);
        return;
    }

    let mut truncated = String::new();
    let mut w = 0;
    let limit = available - 1;
    for grapheme in content.graphemes(true) {
        let gw = UnicodeWidthStr::width(grapheme);
        if w + gw > limit {
            break;
        }
        truncated.push_str(grapheme);
        w += gw;
    }
    truncated.push('…');
    draw_text_span(frame, x, y, &truncated, style, max_x);
}

/// Apply a style to every cell in a rectangular area, preserving content.
pub(crate) fn set_style_area(frame: &mut Frame, area: Rect, style: Style) {
    if style.is_empty() {
        return;
    }
    for y in area.y..area.bottom() {
        for x in area.x..area.right() {
            if let Some(cell) = frame.buffer.get_mut(x, y) {
                style.apply_to(cell);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tuido_render::Rgb;

    #[test]
    fn draw_text_span_basic() {
        let mut frame = Frame::new(10, 1);
        let end = draw_text_span(&mut frame, 0, 0, "ABC", Style::default(), 10);
        assert_eq!(end, 3);
        assert_eq!(frame.buffer.get(0, 0).unwrap().content.as_char(), Some('A'));
        assert_eq!(frame.buffer.get(2, 0).unwrap().content.as_char(), Some('C'));
    }

    #[test]
    fn draw_text_span_clips_at_max_x() {
        let mut frame = Frame::new(10, 1);
        let end = draw_text_span(&mut frame, 0, 0, "ABCDEF", Style::default(), 3);
        assert_eq!(end, 3);
        assert!(frame.buffer.get(3, 0).unwrap().is_empty());
    }

    #[test]
    fn draw_text_span_handles_wide_graphemes() {
        let mut frame = Frame::new(10, 1);
        let end = draw_text_span(&mut frame, 0, 0, "漢a", Style::default(), 10);
        assert_eq!(end, 3);
        assert!(frame.buffer.get(1, 0).unwrap().is_continuation());
        assert_eq!(frame.buffer.get(2, 0).unwrap().content.as_char(), Some('a'));
    }

    #[test]
    fn draw_text_span_applies_style() {
        let mut frame = Frame::new(5, 1);
        draw_text_span(
            &mut frame,
            0,
            0,
            "A",
            Style::new().fg(Rgb::new(255, 0, 0)),
            5,
        );
        assert_eq!(frame.buffer.get(0, 0).unwrap().fg, Some(Rgb::new(255, 0, 0)));
    }

    #[test]
    fn draw_text_truncated_adds_ellipsis() {
        let mut frame = Frame::new(6, 1);
        draw_text_truncated(&mut frame, 0, 0, "abcdefgh", Style::default(), 6);
        assert_eq!(frame.buffer.get(4, 0).unwrap().content.as_char(), Some('e'));
        assert_eq!(frame.buffer.get(5, 0).unwrap().content.as_char(), Some('…'));
    }

    #[test]
    fn draw_text_truncated_short_text_unchanged() {
        let mut frame = Frame::new(10, 1);
        draw_text_truncated(&mut frame, 0, 0, "abc", Style::default(), 10);
        assert_eq!(frame.buffer.get(2, 0).unwrap().content.as_char(), Some('c'));
        assert!(frame.buffer.get(3, 0).unwrap().is_empty());
    }

    #[test]
    fn set_style_area_covers_rect() {
        let mut frame = Frame::new(3, 2);
        set_style_area(
            &mut frame,
            Rect::new(1, 0, 2, 2),
            Style::new().bg(Rgb::BLACK),
        );
        assert_eq!(frame.buffer.get(0, 0).unwrap().bg, None);
        assert_eq!(frame.buffer.get(1, 1).unwrap().bg, Some(Rgb::BLACK));
    }
}
