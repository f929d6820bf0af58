#![forbid(unsafe_code)]

//! List widget.
//!
//! Displays items in input order with optional selection highlighting and
//! scrolling. Stateless with respect to its items: the list is a pure
//! function of the slice it is given.

use tuido_core::Rect;
use tuido_render::{Frame, Style};

use crate::{StatefulWidget, Widget, draw_text_truncated, set_style_area};

/// A single item in a list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListItem {
    content: String,
    style: Style,
}

impl ListItem {
    /// Create a new list item with the given content.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            style: Style::default(),
        }
    }

    /// Set the style for this item (builder).
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// The item's text content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl From<&str> for ListItem {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ListItem {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// A widget to display a list of items.
#[derive(Debug, Clone, Default)]
pub struct List {
    items: Vec<ListItem>,
    style: Style,
    highlight_style: Style,
    highlight_symbol: Option<&'static str>,
}

impl List {
    /// Create a new list from the given items.
    pub fn new(items: impl IntoIterator<Item = impl Into<ListItem>>) -> Self {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            style: Style::default(),
            highlight_style: Style::default(),
            highlight_symbol: None,
        }
    }

    /// Set the base style (builder).
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Set the style applied to the selected item (builder).
    #[must_use]
    pub fn highlight_style(mut self, style: Style) -> Self {
        self.highlight_style = style;
        self
    }

    /// Set a symbol displayed before the selected item (builder).
    #[must_use]
    pub fn highlight_symbol(mut self, symbol: &'static str) -> Self {
        self.highlight_symbol = Some(symbol);
        self
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Mutable state for a [`List`]: selection and scroll offset.
#[derive(Debug, Clone, Default)]
pub struct ListState {
    /// Index of the currently selected item, if any.
    selected: Option<usize>,
    /// Scroll offset (first visible item index).
    offset: usize,
}

impl ListState {
    /// Set the selected item index, or `None` to deselect.
    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index;
        if index.is_none() {
            self.offset = 0;
        }
    }

    /// The currently selected item index.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Move the selection down one item, clamped to `len`.
    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + 1).min(len - 1),
            None => 0,
        });
    }

    /// Move the selection up one item.
    pub fn select_prev(&mut self, len: usize) {
        if len == 0 {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => i.saturating_sub(1),
            None => 0,
        });
    }

    /// Clamp selection after the underlying collection shrank.
    pub fn clamp(&mut self, len: usize) {
        match self.selected {
            Some(_) if len == 0 => self.selected = None,
            Some(i) if i >= len => self.selected = Some(len - 1),
            _ => {}
        }
        self.offset = self.offset.min(len.saturating_sub(1));
    }

    fn scroll_into_view(&mut self, viewport: usize) {
        let Some(selected) = self.selected else {
            return;
        };
        if viewport == 0 {
            return;
        }
        if selected < self.offset {
            self.offset = selected;
        } else if selected >= self.offset + viewport {
            self.offset = selected + 1 - viewport;
        }
    }
}

impl StatefulWidget for List {
    type State = ListState;

    fn render(&self, area: Rect, frame: &mut Frame, state: &mut Self::State) {
        if area.is_empty() || self.items.is_empty() {
            return;
        }

        state.scroll_into_view(area.height as usize);

        let symbol_width = self.highlight_symbol.map_or(0, str::len) as u16;
        for (i, item) in self
            .items
            .iter()
            .enumerate()
            .skip(state.offset)
            .take(area.height as usize)
        {
            let y = area.y + (i - state.offset) as u16;
            let is_selected = state.selected == Some(i);

            let mut x = area.x;
            if let Some(symbol) = self.highlight_symbol {
                let prefix = if is_selected {
                    symbol.to_string()
                } else {
                    " ".repeat(symbol.len())
                };
                x = crate::draw_text_span(frame, x, y, &prefix, self.style, area.right());
            }
            draw_text_truncated(frame, x, y, item.content(), item.style, area.right());
            if is_selected {
                set_style_area(
                    frame,
                    Rect::new(
                        area.x + symbol_width,
                        y,
                        area.width.saturating_sub(symbol_width),
                        1,
                    ),
                    self.highlight_style,
                );
            }
        }
    }
}

impl Widget for List {
    fn render(&self, area: Rect, frame: &mut Frame) {
        let mut state = ListState::default();
        StatefulWidget::render(self, area, frame, &mut state);
    }
}
