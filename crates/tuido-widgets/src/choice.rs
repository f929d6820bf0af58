#![forbid(unsafe_code)]

//! Segmented single-choice selector.
//!
//! Renders options side by side with the selected one highlighted; Left and
//! Right move the selection. Used for small closed sets such as a priority.

use tuido_core::{Event, KeyCode, KeyEvent, KeyEventKind, Rect};
use tuido_render::{Frame, Style};

use crate::{Widget, draw_text_span};

/// A horizontal single-choice selector over a fixed set of options.
#[derive(Debug, Clone)]
pub struct Choice {
    options: Vec<String>,
    selected: usize,
    style: Style,
    selected_style: Style,
}

impl Choice {
    /// Create a selector from options; the first option starts selected.
    #[must_use]
    pub fn new(options: Vec<String>) -> Self {
        Self {
            options,
            selected: 0,
            style: Style::default(),
            selected_style: Style::new().reverse(),
        }
    }

    /// Select an option by index (builder). Out-of-range indices are clamped.
    #[must_use]
    pub fn with_selected(mut self, index: usize) -> Self {
        self.set_selected(index);
        self
    }

    /// Set the base style (builder).
    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Set the selected-option style (builder).
    #[must_use]
    pub fn with_selected_style(mut self, style: Style) -> Self {
        self.selected_style = style;
        self
    }

    /// Index of the selected option.
    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Label of the selected option.
    #[must_use]
    pub fn selected_label(&self) -> &str {
        self.options
            .get(self.selected)
            .map_or("", String::as_str)
    }

    /// Select an option by index, clamping to the valid range.
    pub fn set_selected(&mut self, index: usize) {
        self.selected = index.min(self.options.len().saturating_sub(1));
    }

    /// Select the option with the given label, if present. Returns `true` on
    /// a match.
    pub fn select_label(&mut self, label: &str) -> bool {
        if let Some(i) = self.options.iter().position(|o| o == label) {
            self.selected = i;
            true
        } else {
            false
        }
    }

    /// Handle a terminal event. Returns `true` if the selection changed.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        if let Event::Key(key) = event
            && (key.kind == KeyEventKind::Press || key.kind == KeyEventKind::Repeat)
        {
            return self.handle_key(key);
        }
        false
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if self.options.is_empty() {
            return false;
        }
        match key.code {
            KeyCode::Left => {
                self.selected = self
                    .selected
                    .checked_sub(1)
                    .unwrap_or(self.options.len() - 1);
                true
            }
            KeyCode::Right => {
                self.selected = (self.selected + 1) % self.options.len();
                true
            }
            _ => false,
        }
    }
}

impl Widget for Choice {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }
        let mut x = area.x;
        for (i, option) in self.options.iter().enumerate() {
            if x >= area.right() {
                break;
            }
            let style = if i == self.selected {
                self.selected_style
            } else {
                self.style
            };
            let label = format!(" {option} ");
            x = draw_text_span(frame, x, area.y, &label, style, area.right());
            x = x.saturating_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code))
    }

    fn choice() -> Choice {
        Choice::new(vec!["low".into(), "medium".into(), "high".into()])
    }

    #[test]
    fn starts_on_first_option() {
        assert_eq!(choice().selected_label(), "low");
    }

    #[test]
    fn right_advances_and_wraps() {
        let mut c = choice();
        c.handle_event(&press(KeyCode::Right));
        assert_eq!(c.selected_label(), "medium");
        c.handle_event(&press(KeyCode::Right));
        c.handle_event(&press(KeyCode::Right));
        assert_eq!(c.selected_label(), "low");
    }

    #[test]
    fn left_wraps_backwards() {
        let mut c = choice();
        c.handle_event(&press(KeyCode::Left));
        assert_eq!(c.selected_label(), "high");
    }

    #[test]
    fn select_label_matches_exactly() {
        let mut c = choice();
        assert!(c.select_label("high"));
        assert_eq!(c.selected(), 2);
        assert!(!c.select_label("urgent"));
        assert_eq!(c.selected(), 2);
    }

    #[test]
    fn with_selected_clamps() {
        let c = choice().with_selected(99);
        assert_eq!(c.selected_label(), "high");
    }

    #[test]
    fn other_keys_are_ignored() {
        let mut c = choice();
        assert!(!c.handle_event(&Event::key('x')));
        assert_eq!(c.selected(), 0);
    }

    #[test]
    fn renders_all_options() {
        let mut frame = Frame::new(24, 1);
        choice().render(frame.bounds(), &mut frame);
        let text: String = (0..24)
            .filter_map(|x| frame.buffer.get(x, 0))
            .map(|c| c.content.as_char().unwrap_or(' '))
            .collect();
        assert!(text.contains("low"));
        assert!(text.contains("medium"));
        assert!(text.contains("high"));
    }

    #[test]
    fn selected_option_is_highlighted() {
        let mut frame = Frame::new(24, 1);
        choice().render(frame.bounds(), &mut frame);
        // " low " starts at x=0; its cells carry the reverse attribute.
        let cell = frame.buffer.get(1, 0).unwrap();
        assert!(cell.attrs.contains(tuido_render::StyleFlags::REVERSE));
    }
}
